//! Layout composition
//!
//! Declares trees of typed UI nodes (rows, columns, text, cards,
//! statistics, tables) through uniform append calls that are dispatched by
//! kind name:
//! - `registry`: kind name to definition map, with the built-in kinds
//! - `kind`: parameter shapes and constructors
//! - `factory`: creates one node from a kind name and arguments
//! - `builder`: runs a populate routine and seals the resulting node

pub mod builder;
pub mod error;
pub mod factory;
pub mod kind;
pub mod node;
pub mod registry;

pub use builder::{Builder, Col};
pub use error::LayoutError;
pub use factory::NodeFactory;
pub use kind::{Arg, Args, BuildContext, KindDef, KindDefBuilder, Param, ParamKind, PopulateFn};
pub use node::{is_reserved_key, Node, Span, RESERVED_KEYS};
pub use registry::{default_registry, KindRegistry};
