//! Navigation errors
//!
//! Reaching the start or end of the document is not an error: walkers
//! return `Ok(None)` for that.

use vox_dom::NodeId;

/// Navigation error
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("{walker} walker does not support {operation}")]
    UnsupportedOperation {
        walker: &'static str,
        operation: &'static str,
    },

    #[error("traversal exceeded {steps} steps without settling")]
    TraversalExhausted { steps: usize },

    #[error("selection node {0} is no longer attached to the document")]
    StaleSelection(NodeId),

    #[error("selection is not inside a math expression")]
    NotInMath,
}

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid navigation config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type NavResult<T> = Result<T, NavError>;
