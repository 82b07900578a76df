//! Errors raised while assembling a layout tree

use thiserror::Error;

/// Construction-time failures of the layout builder.
///
/// `at` is the path of the slot the failing child would have occupied,
/// e.g. `col.row[1].text[0]`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("unknown layout kind '{kind}' at {at}")]
    UnknownKind { kind: String, at: String },

    #[error("layout kind '{kind}' is already registered")]
    DuplicateKind { kind: String },

    #[error("layout kind '{kind}' takes at most {expected} argument(s), got {found} at {at}")]
    ArityMismatch {
        kind: String,
        expected: usize,
        found: usize,
        at: String,
    },

    #[error("argument {position} of '{kind}' must be {expected} at {at}")]
    InvalidArgument {
        kind: String,
        position: usize,
        expected: &'static str,
        at: String,
    },

    #[error("layout kind definition '{kind}' is incomplete: {reason}")]
    IncompleteKind { kind: String, reason: String },

    #[error("failed to serialize layout: {0}")]
    Serialize(String),
}

impl LayoutError {
    /// Kind name the error refers to, when there is one
    pub fn kind(&self) -> Option<&str> {
        match self {
            LayoutError::UnknownKind { kind, .. }
            | LayoutError::DuplicateKind { kind }
            | LayoutError::ArityMismatch { kind, .. }
            | LayoutError::InvalidArgument { kind, .. }
            | LayoutError::IncompleteKind { kind, .. } => Some(kind),
            LayoutError::Serialize(_) => None,
        }
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Serialize(err.to_string())
    }
}
