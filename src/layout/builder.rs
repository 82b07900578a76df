//! Construct-then-seal builder for composite layout nodes

use std::sync::Arc;

use log::debug;

use super::error::LayoutError;
use super::factory::NodeFactory;
use super::kind::{Arg, PopulateFn};
use super::node::{Node, Span};
use super::registry::{default_registry, KindRegistry, CARD, COL, ROW, STATISTIC, TABLE, TEXT};

/// Accumulates the children of one composite node.
///
/// A `Builder` only ever exists as the `&mut` handed to a populate routine.
/// Once the routine returns, the node is sealed and handed back to the
/// caller, so nothing can append to it afterwards.
pub struct Builder {
    factory: NodeFactory,
    at: String,
    node: Node,
    failure: Option<LayoutError>,
}

impl Builder {
    /// Build a `col` node with `span`, populated by `populate`
    pub fn build<F>(
        registry: Arc<KindRegistry>,
        span: impl Into<Span>,
        populate: F,
    ) -> Result<Node, LayoutError>
    where
        F: FnOnce(&mut Builder) -> Result<(), LayoutError>,
    {
        let span: Span = span.into();
        let mut node = Node::composite(COL);
        node.set("span", span.into_value());
        Self::run(registry, COL.to_string(), node, Some(populate))
    }

    /// Seed a builder with `node`, run `populate` to completion, then seal.
    ///
    /// Fails with the first append error even if `populate` swallowed it.
    pub(crate) fn run<F>(
        registry: Arc<KindRegistry>,
        at: String,
        node: Node,
        populate: Option<F>,
    ) -> Result<Node, LayoutError>
    where
        F: FnOnce(&mut Builder) -> Result<(), LayoutError>,
    {
        let mut builder = Builder {
            factory: NodeFactory::new(registry),
            at,
            node,
            failure: None,
        };

        if let Some(populate) = populate {
            populate(&mut builder)?;
        }

        match builder.failure {
            Some(err) => Err(err),
            None => Ok(builder.node),
        }
    }

    /// Append a node of `kind`, dispatched by name through the registry.
    ///
    /// On failure nothing is appended and the whole construction will fail.
    pub fn append(&mut self, kind: &str, args: Vec<Arg<'_>>) -> Result<&mut Node, LayoutError> {
        let position = self.node.child_count();
        let at = format!("{}.{}[{}]", self.at, kind, position);

        match self.factory.create_at(kind, args, at) {
            Ok(child) => {
                debug!("Appended {} to {}", child.kind(), self.at);
                Ok(self.node.push_child(child))
            }
            Err(err) => {
                debug!("Append to {} failed: {}", self.at, err);
                if self.failure.is_none() {
                    self.failure = Some(err.clone());
                }
                Err(err)
            }
        }
    }

    pub fn row<F>(&mut self, populate: F) -> Result<&mut Node, LayoutError>
    where
        F: FnOnce(&mut Builder) -> Result<(), LayoutError>,
    {
        self.append(ROW, vec![Arg::Populate(Box::new(populate) as PopulateFn<'_>)])
    }

    pub fn col<F>(&mut self, span: impl Into<Span>, populate: F) -> Result<&mut Node, LayoutError>
    where
        F: FnOnce(&mut Builder) -> Result<(), LayoutError>,
    {
        let span: Span = span.into();
        let span = Arg::Value(span.into_value());
        self.append(COL, vec![span, Arg::Populate(Box::new(populate) as PopulateFn<'_>)])
    }

    pub fn text<'a>(&mut self, content: impl Into<Arg<'a>>) -> Result<&mut Node, LayoutError> {
        self.append(TEXT, vec![content.into()])
    }

    pub fn card<'a>(
        &mut self,
        title: impl Into<Arg<'a>>,
        body: impl Into<Arg<'a>>,
    ) -> Result<&mut Node, LayoutError> {
        self.append(CARD, vec![title.into(), body.into()])
    }

    pub fn statistic<'a>(
        &mut self,
        title: impl Into<Arg<'a>>,
        body: impl Into<Arg<'a>>,
    ) -> Result<&mut Node, LayoutError> {
        self.append(STATISTIC, vec![title.into(), body.into()])
    }

    pub fn table<'a>(&mut self, content: impl Into<Arg<'a>>) -> Result<&mut Node, LayoutError> {
        self.append(TABLE, vec![content.into()])
    }

    /// Number of children appended so far
    pub fn len(&self) -> usize {
        self.node.child_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tree path of the node being built
    pub fn at(&self) -> &str {
        &self.at
    }

    /// The node as built so far
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn registry(&self) -> &Arc<KindRegistry> {
        self.factory.registry()
    }
}

/// Entry point for declaring a column against the shared registry
pub struct Col;

impl Col {
    #[allow(clippy::new_ret_no_self)]
    pub fn new<F>(span: impl Into<Span>, populate: F) -> Result<Node, LayoutError>
    where
        F: FnOnce(&mut Builder) -> Result<(), LayoutError>,
    {
        Builder::build(default_registry(), span, populate)
    }

    pub fn with_registry<F>(
        registry: Arc<KindRegistry>,
        span: impl Into<Span>,
        populate: F,
    ) -> Result<Node, LayoutError>
    where
        F: FnOnce(&mut Builder) -> Result<(), LayoutError>,
    {
        Builder::build(registry, span, populate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::kind::KindDefBuilder;
    use serde_json::json;

    #[test]
    fn test_children_follow_call_order() {
        let node = Col::new(24, |b| {
            b.text("one")?;
            b.table("config")?;
            b.text("two")?;
            Ok(())
        })
        .unwrap();

        let kinds: Vec<&str> = node.children().iter().map(Node::kind).collect();
        assert_eq!(kinds, vec!["text", "table", "text"]);
        assert_eq!(node.children()[2].get_str("content"), Some("two"));
    }

    #[test]
    fn test_empty_populate_is_valid() {
        let node = Col::new(8, |_| Ok(())).unwrap();
        assert!(node.is_composite());
        assert!(node.children().is_empty());
        assert_eq!(node.get("span"), Some(&json!(8)));
    }

    #[test]
    fn test_string_span() {
        let node = Col::new("50%", |_| Ok(())).unwrap();
        assert_eq!(node.get("span"), Some(&json!("50%")));
    }

    #[test]
    fn test_failed_append_leaves_children_unchanged() {
        let result = Col::new(12, |b| {
            b.text("kept")?;
            let before = b.len();
            assert!(b.append("chart", vec![Arg::from("x")]).is_err());
            assert_eq!(b.len(), before);
            Ok(())
        });

        // swallowed errors still fail the construction
        let err = result.unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownKind {
                kind: "chart".to_string(),
                at: "col.chart[1]".to_string(),
            }
        );
    }

    #[test]
    fn test_append_returns_node_for_chaining() {
        let node = Col::new(12, |b| {
            b.card("Title", "Body")?.width(300).style("color", "blue");
            Ok(())
        })
        .unwrap();

        let card = &node.children()[0];
        assert_eq!(card.get("width"), Some(&json!(300)));
        assert_eq!(card.get("style"), Some(&json!({"color": "blue"})));
    }

    #[test]
    fn test_child_kind_tag_survives_reserved_set() {
        let node = Col::new(12, |b| {
            b.text("x")?.set("name", "bogus");
            Ok(())
        })
        .unwrap();

        assert_eq!(
            node.render().unwrap(),
            json!({"name": "col", "span": 12, "items": [{"name": "text", "content": "x"}]})
        );
    }

    #[test]
    fn test_nested_error_reports_path() {
        let err = Col::new(24, |b| {
            b.text("a")?;
            b.row(|r| {
                r.col(12, |c| {
                    c.append("gauge", Vec::new())?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap_err();

        assert_eq!(
            err,
            LayoutError::UnknownKind {
                kind: "gauge".to_string(),
                at: "col.row[1].col[0].gauge[0]".to_string(),
            }
        );
    }

    #[test]
    fn test_custom_kind_dispatch() {
        let mut registry = KindRegistry::with_defaults();
        registry.register(
            KindDefBuilder::new("badge")
                .text_param("label")
                .value_param("count")
                .leaf()
                .build()
                .unwrap(),
        );

        let node = Col::with_registry(Arc::new(registry), 6, |b| {
            b.append("badge", vec![Arg::from("Inbox"), Arg::from(3)])?;
            Ok(())
        })
        .unwrap();

        assert_eq!(
            node.render().unwrap(),
            json!({
                "name": "col",
                "span": 6,
                "items": [{"name": "badge", "label": "Inbox", "count": 3}]
            })
        );
    }

    #[test]
    fn test_nested_builder_sees_parent_registry() {
        let mut registry = KindRegistry::with_defaults();
        registry.register(KindDefBuilder::new("badge").text_param("label").leaf().build().unwrap());

        let node = Col::with_registry(Arc::new(registry), 24, |b| {
            b.row(|r| {
                r.append("badge", vec![Arg::from("nested")])?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

        assert_eq!(node.children()[0].children()[0].kind(), "badge");
    }
}
