//! Completion provider adapters implementing the
//! [`LlmGateway`](debate_application::LlmGateway) port.

mod openai;

pub use openai::{OpenAiCompatibleGateway, OpenAiSettings};
