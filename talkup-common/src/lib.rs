//! # TalkUp Common Library
//!
//! Shared code for the TalkUp practice backend:
//! - Practice content and scoring data model
//! - Common error types
//! - Configuration loading

pub mod config;
pub mod error;
pub mod types;

pub use error::{Error, Result};
