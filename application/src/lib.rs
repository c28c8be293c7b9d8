//! Application layer for quorum-debate
//!
//! This crate contains the debate use case and the port definitions it
//! drives. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{DebateProgressNotifier, NoDebateProgress},
};
pub use use_cases::run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
