//! Kind definitions: the parameter shape and constructor behind each
//! addressable layout node kind

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::builder::Builder;
use super::error::LayoutError;
use super::node::{is_reserved_key, Node};
use super::registry::KindRegistry;

/// Routine that declares the children of a composite node
pub type PopulateFn<'a> = Box<dyn FnOnce(&mut Builder) -> Result<(), LayoutError> + 'a>;

/// Turns resolved arguments into a node
pub type Constructor =
    Arc<dyn Fn(&BuildContext, Args<'_>) -> Result<Node, LayoutError> + Send + Sync>;

/// A positional argument passed to an append call
pub enum Arg<'a> {
    Value(Value),
    Populate(PopulateFn<'a>),
}

impl<'a> Arg<'a> {
    pub fn populate<F>(f: F) -> Self
    where
        F: FnOnce(&mut Builder) -> Result<(), LayoutError> + 'a,
    {
        Arg::Populate(Box::new(f))
    }

    fn describe(&self) -> &'static str {
        match self {
            Arg::Value(_) => "a value",
            Arg::Populate(_) => "a populate routine",
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Arg::Populate(_) => f.write_str("Populate(..)"),
        }
    }
}

macro_rules! arg_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(v: $ty) -> Self {
                    Arg::Value(Value::from(v))
                }
            }
        )*
    };
}

arg_from_value!(&str, String, bool, i32, i64, u32, u64, f64);

impl From<Value> for Arg<'_> {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

/// Shape of a declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A string; numbers and booleans are stringified, missing becomes `""`
    Text,
    /// Any scalar value kept as-is, missing becomes `""`
    Value,
    /// A populate routine for a nested builder, missing means no children
    Populate,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Text => "text",
            ParamKind::Value => "value",
            ParamKind::Populate => "populate",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
}

/// Registry entry for one node kind
#[derive(Clone)]
pub struct KindDef {
    pub name: String,
    pub description: String,
    pub params: Vec<Param>,
    pub composite: bool,
    pub constructor: Constructor,
}

impl KindDef {
    /// Declared number of positional arguments
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Human-readable signature, e.g. `card(title: text, body: text)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.kind))
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

impl fmt::Debug for KindDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("composite", &self.composite)
            .finish_non_exhaustive()
    }
}

/// A resolved argument slot, already checked against its parameter
enum Slot<'a> {
    Value(Value),
    Populate(Option<PopulateFn<'a>>),
}

/// Arguments matched to a kind's declared parameters
pub struct Args<'a> {
    slots: Vec<(String, Slot<'a>)>,
}

impl<'a> Args<'a> {
    /// Match positional arguments against `params`.
    ///
    /// Extra arguments and shape mismatches are errors; missing arguments
    /// take their parameter's default.
    pub(crate) fn resolve(
        def: &KindDef,
        args: Vec<Arg<'a>>,
        at: &str,
    ) -> Result<Self, LayoutError> {
        if args.len() > def.params.len() {
            return Err(LayoutError::ArityMismatch {
                kind: def.name.clone(),
                expected: def.params.len(),
                found: args.len(),
                at: at.to_string(),
            });
        }

        let mut supplied = args.into_iter();
        let mut slots = Vec::with_capacity(def.params.len());
        for (position, param) in def.params.iter().enumerate() {
            let slot = match (param.kind, supplied.next()) {
                (ParamKind::Populate, None) => Slot::Populate(None),
                (ParamKind::Populate, Some(Arg::Populate(f))) => Slot::Populate(Some(f)),
                (ParamKind::Text | ParamKind::Value, None) => {
                    Slot::Value(Value::String(String::new()))
                }
                (ParamKind::Text, Some(Arg::Value(v))) => match text_of(v) {
                    Some(s) => Slot::Value(Value::String(s)),
                    None => return Err(invalid(def, position, "text", at)),
                },
                (ParamKind::Value, Some(Arg::Value(v))) => Slot::Value(v),
                (kind, Some(other)) => {
                    log::debug!(
                        "rejecting {} for {} parameter of '{}'",
                        other.describe(),
                        kind,
                        def.name
                    );
                    let expected = match kind {
                        ParamKind::Populate => "a populate routine",
                        _ => "a value",
                    };
                    return Err(invalid(def, position, expected, at));
                }
            };
            slots.push((param.name.clone(), slot));
        }

        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// String form of the value at `index`, `""` when absent
    pub fn text(&self, index: usize) -> String {
        match self.slots.get(index) {
            Some((_, Slot::Value(Value::String(s)))) => s.clone(),
            Some((_, Slot::Value(v))) => text_of(v.clone()).unwrap_or_default(),
            _ => String::new(),
        }
    }

    pub fn value(&self, index: usize) -> Value {
        match self.slots.get(index) {
            Some((_, Slot::Value(v))) => v.clone(),
            _ => Value::String(String::new()),
        }
    }

    /// Take the populate routine at `index`, if one was supplied
    pub fn take_populate(&mut self, index: usize) -> Option<PopulateFn<'a>> {
        match self.slots.get_mut(index) {
            Some((_, Slot::Populate(f))) => f.take(),
            _ => None,
        }
    }

    /// Value arguments keyed by parameter name
    pub fn values(&self) -> Map<String, Value> {
        self.slots
            .iter()
            .filter_map(|(name, slot)| match slot {
                Slot::Value(v) => Some((name.clone(), v.clone())),
                Slot::Populate(_) => None,
            })
            .collect()
    }
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn invalid(def: &KindDef, position: usize, expected: &'static str, at: &str) -> LayoutError {
    LayoutError::InvalidArgument {
        kind: def.name.clone(),
        position,
        expected,
        at: at.to_string(),
    }
}

/// What a constructor knows about the node it is building
pub struct BuildContext {
    pub(crate) registry: Arc<KindRegistry>,
    pub(crate) kind: String,
    pub(crate) at: String,
}

impl BuildContext {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Tree path of the node under construction
    pub fn at(&self) -> &str {
        &self.at
    }

    /// A fresh leaf of this context's kind
    pub fn leaf(&self) -> Node {
        Node::leaf(self.kind.as_str())
    }

    /// Run `populate` against a nested builder seeded with `node`.
    ///
    /// The nested builder reads the same registry as its parent.
    pub fn populate(
        &self,
        node: Node,
        populate: Option<PopulateFn<'_>>,
    ) -> Result<Node, LayoutError> {
        Builder::run(self.registry.clone(), self.at.clone(), node, populate)
    }
}

/// Fluent builder for kind definitions
pub struct KindDefBuilder {
    name: String,
    description: Option<String>,
    params: Vec<Param>,
    composite: bool,
    constructor: Option<Constructor>,
}

impl KindDefBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            params: Vec::new(),
            composite: false,
            constructor: None,
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Declare the next positional parameter as text
    pub fn text_param(mut self, name: &str) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            kind: ParamKind::Text,
        });
        self
    }

    /// Declare the next positional parameter as a raw value
    pub fn value_param(mut self, name: &str) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            kind: ParamKind::Value,
        });
        self
    }

    /// Declare the next positional parameter as a populate routine.
    /// Marks the kind as composite.
    pub fn populate_param(mut self, name: &str) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            kind: ParamKind::Populate,
        });
        self.composite = true;
        self
    }

    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(&BuildContext, Args<'_>) -> Result<Node, LayoutError> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(f));
        self
    }

    /// Use the generic leaf constructor: every value parameter becomes a
    /// payload field of the same name
    pub fn leaf(self) -> Self {
        self.constructor(|ctx, args| {
            let mut node = ctx.leaf();
            for (key, value) in args.values() {
                node.set(key, value);
            }
            Ok(node)
        })
    }

    pub fn build(self) -> Result<KindDef, LayoutError> {
        if !is_kind_name(&self.name) {
            return Err(LayoutError::IncompleteKind {
                kind: self.name,
                reason: "name must be a non-empty identifier".to_string(),
            });
        }
        if let Some(param) = self.params.iter().find(|p| is_reserved_key(&p.name)) {
            let reason = format!("parameter name '{}' is reserved", param.name);
            return Err(LayoutError::IncompleteKind {
                kind: self.name,
                reason,
            });
        }
        let constructor = match self.constructor {
            Some(c) => c,
            None => {
                return Err(LayoutError::IncompleteKind {
                    kind: self.name,
                    reason: "constructor is required (use leaf() or constructor())".to_string(),
                })
            }
        };

        Ok(KindDef {
            name: self.name,
            description: self.description.unwrap_or_default(),
            params: self.params,
            composite: self.composite,
            constructor,
        })
    }
}

fn is_kind_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> KindDef {
        KindDefBuilder::new("card")
            .text_param("title")
            .text_param("body")
            .leaf()
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_records_params() {
        let def = card();
        assert_eq!(def.arity(), 2);
        assert!(!def.composite);
        assert_eq!(def.signature(), "card(title: text, body: text)");
    }

    #[test]
    fn test_populate_param_marks_composite() {
        let def = KindDefBuilder::new("row")
            .populate_param("content")
            .constructor(|ctx, mut args| {
                ctx.populate(Node::composite("row"), args.take_populate(0))
            })
            .build()
            .unwrap();
        assert!(def.composite);
    }

    #[test]
    fn test_missing_constructor() {
        let result = KindDefBuilder::new("text").text_param("content").build();
        assert!(matches!(result, Err(LayoutError::IncompleteKind { .. })));
    }

    #[test]
    fn test_invalid_name() {
        let result = KindDefBuilder::new("bad kind").leaf().build();
        assert!(result.is_err());
        let result = KindDefBuilder::new("").leaf().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_reserved_param_name_rejected() {
        let result = KindDefBuilder::new("badge").text_param("name").leaf().build();
        assert_eq!(
            result.err(),
            Some(LayoutError::IncompleteKind {
                kind: "badge".to_string(),
                reason: "parameter name 'name' is reserved".to_string(),
            })
        );
        assert!(KindDefBuilder::new("badge").value_param("items").leaf().build().is_err());
    }

    #[test]
    fn test_resolve_defaults_missing_to_empty() {
        let def = card();
        let args = Args::resolve(&def, vec![Arg::from("Title")], "col.card[0]").unwrap();
        assert_eq!(args.text(0), "Title");
        assert_eq!(args.text(1), "");
    }

    #[test]
    fn test_resolve_stringifies_numbers_for_text() {
        let def = card();
        let args = Args::resolve(&def, vec![Arg::from("Count"), Arg::from(42)], "x").unwrap();
        assert_eq!(args.text(1), "42");
    }

    #[test]
    fn test_resolve_rejects_extra_args() {
        let def = card();
        let err = Args::resolve(
            &def,
            vec![Arg::from("a"), Arg::from("b"), Arg::from("c")],
            "col.card[3]",
        )
        .err()
        .unwrap();
        assert_eq!(
            err,
            LayoutError::ArityMismatch {
                kind: "card".to_string(),
                expected: 2,
                found: 3,
                at: "col.card[3]".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_rejects_closure_for_text() {
        let def = card();
        let err = Args::resolve(&def, vec![Arg::populate(|_| Ok(()))], "x").err().unwrap();
        assert!(matches!(err, LayoutError::InvalidArgument { position: 0, .. }));
    }
}
