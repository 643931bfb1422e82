//! Generation options for the client pipeline.
//!
//! This module defines the `GenerationOptions` struct supplied once per
//! invocation, and the `MethodNameType` enum selecting how client method
//! names are derived from API operations.
//!
//! # Examples
//!
//! ```
//! use openapi_client_core::options::{GenerationOptions, MethodNameType};
//! use std::str::FromStr;
//!
//! // Parse a naming strategy from a string
//! let strategy = MethodNameType::from_str("operationid").unwrap();
//! assert_eq!(strategy, MethodNameType::OperationId);
//! assert_eq!(strategy.as_str(), "operationid");
//!
//! // The default options generate a class named OpenApiClient
//! let options = GenerationOptions::default();
//! assert_eq!(options.class_name, "OpenApiClient");
//! assert_eq!(options.exception_class(), "OpenApiClientException");
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Rule used to derive a client method name from an API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MethodNameType {
    /// Derive names from URL path segments and the HTTP verb
    #[default]
    Path,
    /// Use the operation's declared `operationId`
    OperationId,
}

impl FromStr for MethodNameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "path" => Ok(MethodNameType::Path),
            "operationid" => Ok(MethodNameType::OperationId),
            _ => Err(format!("Unknown method name type: {}", s)),
        }
    }
}

impl MethodNameType {
    /// Returns the strategy identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::OperationId => "operationid",
        }
    }

    /// Returns an iterator over all available strategies
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Path, Self::OperationId].iter().copied()
    }
}

impl fmt::Display for MethodNameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for a single client generation run
///
/// Immutable once constructed; every pipeline run receives its own copy and
/// nothing is shared across invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Name of the generated client class
    #[serde(default = "default_class_name")]
    pub class_name: String,

    /// How method names are derived from operations
    #[serde(default)]
    pub method_name_type: MethodNameType,

    /// Whether to inject the response-tracing hook
    #[serde(default)]
    pub enable_tracing: bool,
}

impl GenerationOptions {
    /// Create options for the given class name with default strategy and no tracing
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name_type: MethodNameType::default(),
            enable_tracing: false,
        }
    }

    /// Name of the exception type raised by generated client methods
    pub fn exception_class(&self) -> String {
        format!("{}Exception", self.class_name)
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::new(default_class_name())
    }
}

fn default_class_name() -> String {
    "OpenApiClient".to_string()
}
