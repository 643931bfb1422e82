//! Context builder traits and adapters for language-specific codegen.
pub mod csharp;

use crate::error::Result;
use crate::options::GenerationOptions;
use crate::schema::ApiDocument;

use serde_json::Value as JsonValue;

/// Trait for converting a parsed document plus options into a template context.
pub trait ClientContextBuilder {
    fn build(&self, doc: &ApiDocument, options: &GenerationOptions) -> Result<JsonValue>;
}
