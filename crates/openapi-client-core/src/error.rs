//! Error handling for the client generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling. One variant exists per pipeline stage that can fail; all of
//! them are terminal for the current invocation and nothing is retried.
//!
//! # Examples
//!
//! ```
//! use openapi_client_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for client generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for client generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network or filesystem failure reaching the schema
    #[error("schema fetch error: {0}")]
    SchemaFetch(String),

    /// Schema content is not valid JSON/YAML or fails structural validation
    #[error("schema parse error: {0}")]
    SchemaParse(String),

    /// The generator rejected the document or failed to render
    #[error("generation error: {0}")]
    Generation(String),

    /// Generated source did not match the post-processor's structural expectations
    #[error("post-processing error: {0}")]
    PostProcess(String),

    /// The delivery sink rejected the finished code
    #[error("submission error: {0}")]
    Submission(String),
}

impl Error {
    /// Create a new schema fetch error
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        Self::SchemaFetch(msg.into())
    }

    /// Create a new schema parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::SchemaParse(msg.into())
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        Self::Generation(msg.into())
    }

    /// Create a new post-processing error
    pub fn post_process<S: Into<String>>(msg: S) -> Self {
        Self::PostProcess(msg.into())
    }

    /// Create a new submission error
    pub fn submission<S: Into<String>>(msg: S) -> Self {
        Self::Submission(msg.into())
    }
}
