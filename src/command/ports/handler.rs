//! Command handler port.
//!
//! Handlers are the command bodies. They run only after admission succeeded
//! and may suspend on upstream calls.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::{CommandResponse, Invocation};
use crate::readiness::domain::ReadinessError;

/// Result type for command handlers.
pub type HandlerResult = Result<CommandResponse, HandlerError>;

/// Body of one command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Produces the response for an admitted, validated invocation.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when an upstream call fails or the
    /// invocation cannot be served; the dispatcher converts it into a
    /// user-visible message.
    async fn handle(&self, invocation: &Invocation) -> HandlerResult;
}

/// Failures raised by command bodies.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    /// An upstream data source failed, timed out or returned malformed data.
    #[error("upstream failure: {0}")]
    Upstream(Arc<dyn std::error::Error + Send + Sync>),

    /// The readiness requirement could not be read.
    #[error(transparent)]
    Readiness(#[from] ReadinessError),

    /// The user supplied an argument the command cannot work with.
    #[error("{0}")]
    InvalidArgument(String),

    /// Media files could not be listed or read.
    #[error("media failure: {0}")]
    Media(Arc<dyn std::error::Error + Send + Sync>),

    /// A response template failed to render.
    #[error("render failure: {0}")]
    Render(Arc<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Wraps an upstream error.
    pub fn upstream(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upstream(Arc::new(err))
    }

    /// Wraps a media access error.
    pub fn media(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Media(Arc::new(err))
    }

    /// Wraps a template error.
    pub fn render(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Render(Arc::new(err))
    }

    /// Returns the message shown to the invoking user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument(message) => message.clone(),
            Self::Upstream(_) | Self::Readiness(_) | Self::Media(_) | Self::Render(_) => {
                "Something went wrong. Please try again later.".to_owned()
            }
        }
    }
}
