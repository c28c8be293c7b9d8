//! Debate orchestration domain
//!
//! Configuration, per-participant state and result types for running a
//! debate session.

pub mod entities;
pub mod value_objects;
