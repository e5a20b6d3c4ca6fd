//! Command implementations for Scriptweld CLI

pub mod build;
pub mod completions;
pub mod status;
pub mod version;
