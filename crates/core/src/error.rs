//! Error types shared across the workspace
//!
//! The computation layer itself is total: extraction, scoring, and stage
//! rules degrade to `None`/`false`/defaults on bad input. `Error` exists for
//! the collaborator seams: store lookups and reply generation can fail in
//! ways the orchestrator must see.

use thiserror::Error;

/// Workspace-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by collaborator implementations
#[derive(Debug, Error)]
pub enum Error {
    /// Record store rejected or failed a query
    #[error("store error: {0}")]
    Store(String),

    /// Text-completion collaborator failed
    #[error("reply model error: {0}")]
    ReplyModel(String),

    /// A reply was requested for a conversation with no usable content
    #[error("empty conversation: nothing to reply to")]
    EmptyConversation,

    /// Catch-all for implementor-specific failures
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a store error from any displayable cause
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Build a reply-model error from any displayable cause
    pub fn reply_model(msg: impl Into<String>) -> Self {
        Self::ReplyModel(msg.into())
    }
}
