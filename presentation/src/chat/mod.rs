//! Interactive chat module
//!
//! Provides a readline-based interactive debate interface with persistent
//! conversation files.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
