//! Layout nodes and their serialisable shape

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::LayoutError;

/// Span/size parameter of a column: either a grid width or a CSS-like string
#[derive(Debug, Clone, PartialEq)]
pub struct Span(Value);

impl Span {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

macro_rules! span_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Span {
                fn from(n: $ty) -> Self {
                    Span(Value::from(n))
                }
            }
        )*
    };
}

span_from_number!(u8, u16, u32, u64, i32, i64);

impl From<&str> for Span {
    fn from(s: &str) -> Self {
        Span(Value::String(s.to_string()))
    }
}

impl From<String> for Span {
    fn from(s: String) -> Self {
        Span(Value::String(s))
    }
}

/// Keys the serialised node uses for its kind tag and its children
pub const RESERVED_KEYS: [&str; 2] = ["name", "items"];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// One node of a layout tree.
///
/// Leaves carry only a payload. Composites (`row`, `col`) additionally own
/// an ordered child list, which may be empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(rename = "name")]
    kind: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
    #[serde(rename = "items", skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,
}

impl Node {
    /// Create a leaf node
    pub fn leaf(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
            children: None,
        }
    }

    /// Create a composite node with no children yet
    pub fn composite(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
            children: Some(Vec::new()),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Look up a payload field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Look up a payload field holding a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    pub fn is_composite(&self) -> bool {
        self.children.is_some()
    }

    /// Ordered children; empty for leaves
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Set an arbitrary payload field. Reserved keys are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        if is_reserved_key(&key) {
            log::warn!("Ignoring reserved payload key '{}' on {} node", key, self.kind);
            return self;
        }
        self.payload.insert(key, value.into());
        self
    }

    pub fn width(&mut self, width: impl Into<Value>) -> &mut Self {
        self.set("width", width)
    }

    /// Set one entry of the node's `style` map
    pub fn style(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let style = self
            .payload
            .entry("style")
            .or_insert_with(|| Value::Object(Map::new()));
        if !style.is_object() {
            *style = Value::Object(Map::new());
        }
        if let Value::Object(map) = style {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Append a child. Only the builder calls this, and only for composites.
    pub(crate) fn push_child(&mut self, child: Node) -> &mut Node {
        let children = self.children.get_or_insert_with(Vec::new);
        let index = children.len();
        children.push(child);
        &mut children[index]
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }

    /// Plain nested structure for a rendering client
    pub fn render(&self) -> Result<Value, LayoutError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
