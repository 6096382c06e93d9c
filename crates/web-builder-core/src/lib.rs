//! Core config, errors, and project persistence for Visual Web Builder.

pub mod config;
pub mod error;
pub mod project;
pub mod project_store;
