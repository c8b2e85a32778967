//! Data models for statements, configuration and batch summaries.

pub mod config;
pub mod statement;
pub mod summary;
