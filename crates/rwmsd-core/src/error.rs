//! Error type shared by every stage of the pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalkError>;

/// Failure conditions of the walk / MSD / fit pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalkError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("insufficient data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("degenerate data: {0}")]
    DataDegenerate(String),
}

impl WalkError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        WalkError::InvalidArgument(msg.into())
    }

    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        WalkError::DataDegenerate(msg.into())
    }
}
