//! LLM Gateway port
//!
//! Defines the interface for communicating with completion providers.

use async_trait::async_trait;
use debate_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API key not found: set {0} or provider.api_key")]
    MissingApiKey(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// Maps an ordered message history plus a model selector to one completion.
/// Implementations (adapters) live in the infrastructure layer.
///
/// Errors are reported to the caller, but the debate engine never lets
/// them abort a session: a failed completion is handled like an empty reply.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Request a completion for `messages` from `model`
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError>;
}
