//! Prompt domain
//!
//! Templates for the messages sent at each stage of a debate session.

mod template;

pub use template::DebatePrompts;
