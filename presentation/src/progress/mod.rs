//! Console progress reporting

pub mod reporter;
