//! Builds nodes from a kind name and positional arguments

use std::sync::Arc;

use super::error::LayoutError;
use super::kind::{Arg, Args, BuildContext};
use super::node::Node;
use super::registry::KindRegistry;

/// Stateless apart from the registry it reads
#[derive(Debug, Clone)]
pub struct NodeFactory {
    registry: Arc<KindRegistry>,
}

impl NodeFactory {
    pub fn new(registry: Arc<KindRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<KindRegistry> {
        &self.registry
    }

    /// Create a detached node of `kind`
    pub fn create(&self, kind: &str, args: Vec<Arg<'_>>) -> Result<Node, LayoutError> {
        self.create_at(kind, args, kind.to_string())
    }

    /// Create a node that will live at tree path `at`
    pub(crate) fn create_at(
        &self,
        kind: &str,
        args: Vec<Arg<'_>>,
        at: String,
    ) -> Result<Node, LayoutError> {
        let def = self.registry.resolve_at(kind, &at)?;

        let args = Args::resolve(def, args, &at)?;
        let ctx = BuildContext {
            registry: self.registry.clone(),
            kind: def.name.clone(),
            at,
        };
        let node = (def.constructor)(&ctx, args)?;

        if node.kind() != def.name {
            return Err(LayoutError::IncompleteKind {
                kind: def.name.clone(),
                reason: format!("constructor produced a '{}' node", node.kind()),
            });
        }
        Ok(node)
    }
}
