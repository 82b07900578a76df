//! Registry of addressable layout kinds

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error};
use once_cell::sync::Lazy;

use super::error::LayoutError;
use super::kind::{KindDef, KindDefBuilder};
use super::node::Node;

pub const ROW: &str = "row";
pub const COL: &str = "col";
pub const TEXT: &str = "text";
pub const CARD: &str = "card";
pub const STATISTIC: &str = "statistic";
pub const TABLE: &str = "table";

static DEFAULT_REGISTRY: Lazy<Arc<KindRegistry>> =
    Lazy::new(|| Arc::new(KindRegistry::with_defaults()));

/// Shared registry holding the built-in kinds.
///
/// Initialised once per process and never mutated afterwards. Callers that
/// need extra kinds build their own registry with
/// [`KindRegistry::with_defaults`] and wrap it in an `Arc`.
pub fn default_registry() -> Arc<KindRegistry> {
    DEFAULT_REGISTRY.clone()
}

/// Map from kind name to its definition
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: HashMap<String, KindDef>,
}

impl KindRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `row`, `col`, `text`, `card`, `statistic`
    /// and `table`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for def in builtin_kinds() {
            registry.register(def);
        }
        registry
    }

    /// Register a kind, replacing any existing definition of the same name.
    ///
    /// Returns the replaced definition.
    pub fn register(&mut self, def: KindDef) -> Option<KindDef> {
        let name = def.name.clone();
        let previous = self.kinds.insert(name.clone(), def);
        if previous.is_some() {
            debug!("Overrode layout kind: {}", name);
        } else {
            debug!("Registered layout kind: {}", name);
        }
        previous
    }

    /// Register a kind, failing if the name is already taken
    pub fn register_unique(&mut self, def: KindDef) -> Result<(), LayoutError> {
        if self.kinds.contains_key(&def.name) {
            return Err(LayoutError::DuplicateKind { kind: def.name });
        }
        self.register(def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&KindDef> {
        self.kinds.get(name)
    }

    /// Look up a kind outside any tree, signalling `UnknownKind` when it is
    /// not registered. The error's position is the bare kind name.
    pub fn resolve(&self, name: &str) -> Result<&KindDef, LayoutError> {
        self.resolve_at(name, name)
    }

    /// Look up a kind for the node at tree path `at`
    pub(crate) fn resolve_at(&self, name: &str, at: &str) -> Result<&KindDef, LayoutError> {
        self.kinds.get(name).ok_or_else(|| LayoutError::UnknownKind {
            kind: name.to_string(),
            at: at.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// All definitions, sorted by name
    pub fn list(&self) -> Vec<&KindDef> {
        let mut defs: Vec<_> = self.kinds.values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }
}

fn builtin_kinds() -> Vec<KindDef> {
    let defs = [
        KindDefBuilder::new(ROW)
            .description("Horizontal container of columns")
            .populate_param("content")
            .constructor(|ctx, mut args| {
                ctx.populate(Node::composite(ROW), args.take_populate(0))
            }),
        KindDefBuilder::new(COL)
            .description("Column with a span, holding any other kinds")
            .value_param("span")
            .populate_param("content")
            .constructor(|ctx, mut args| {
                let mut node = Node::composite(COL);
                node.set("span", args.value(0));
                ctx.populate(node, args.take_populate(1))
            }),
        KindDefBuilder::new(TEXT)
            .description("Plain text")
            .text_param("content")
            .leaf(),
        KindDefBuilder::new(CARD)
            .description("Titled card")
            .text_param("title")
            .text_param("body")
            .leaf(),
        KindDefBuilder::new(STATISTIC)
            .description("Titled figure")
            .text_param("title")
            .value_param("body")
            .leaf(),
        KindDefBuilder::new(TABLE)
            .description("Reference to a table resource")
            .text_param("content")
            .leaf(),
    ];

    defs.into_iter()
        .filter_map(|b| match b.build() {
            Ok(def) => Some(def),
            Err(e) => {
                error!("Skipping built-in layout kind: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(name: &str) -> KindDef {
        KindDefBuilder::new(name).text_param("content").leaf().build().unwrap()
    }

    #[test]
    fn test_defaults_registered() {
        let registry = KindRegistry::with_defaults();
        assert_eq!(registry.len(), 6);
        for name in [ROW, COL, TEXT, CARD, STATISTIC, TABLE] {
            assert!(registry.contains(name), "missing {}", name);
        }
        assert_eq!(registry.get(CARD).unwrap().arity(), 2);
        assert_eq!(registry.get(TEXT).unwrap().arity(), 1);
        assert!(registry.get(ROW).unwrap().composite);
    }

    #[test]
    fn test_every_builtin_kind_builds() {
        let names: Vec<String> = builtin_kinds().into_iter().map(|def| def.name).collect();
        assert_eq!(names, vec![ROW, COL, TEXT, CARD, STATISTIC, TABLE]);
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = KindRegistry::with_defaults();
        let err = registry.resolve("chart").unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownKind {
                kind: "chart".to_string(),
                at: "chart".to_string(),
            }
        );

        let err = registry.resolve_at("chart", "col.row[0].chart[1]").unwrap_err();
        assert!(matches!(
            err,
            LayoutError::UnknownKind { ref at, .. } if at == "col.row[0].chart[1]"
        ));
    }

    #[test]
    fn test_register_overrides_last_wins() {
        let mut registry = KindRegistry::new();
        assert!(registry.register(kind("badge")).is_none());

        let replacement = KindDefBuilder::new("badge")
            .text_param("label")
            .text_param("color")
            .leaf()
            .build()
            .unwrap();
        let previous = registry.register(replacement).unwrap();

        assert_eq!(previous.arity(), 1);
        assert_eq!(registry.get("badge").unwrap().arity(), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_unique_rejects_duplicate() {
        let mut registry = KindRegistry::new();
        registry.register_unique(kind("badge")).unwrap();
        let err = registry.register_unique(kind("badge")).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateKind { kind: "badge".to_string() });
    }

    #[test]
    fn test_list_sorted() {
        let registry = KindRegistry::with_defaults();
        let names: Vec<&str> = registry.list().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["card", "col", "row", "statistic", "table", "text"]);
    }

    #[test]
    fn test_default_registry_is_shared() {
        let a = default_registry();
        let b = default_registry();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
