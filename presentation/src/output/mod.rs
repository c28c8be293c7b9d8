//! Rendering of finished debate sessions

pub mod console;
pub mod formatter;
