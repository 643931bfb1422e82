//! openapi-client Core Library
//!
//! This library turns an OpenAPI schema (local file or URL, JSON or YAML)
//! into script-ready C# client source: it loads and parses the schema,
//! renders the client compilation unit, post-processes the text for script
//! embedding, and delivers it to a sink.

pub mod builders;
pub mod error;
pub mod generator;
pub mod naming;
pub mod options;
pub mod pipeline;
pub mod postprocess;
pub mod schema;
pub mod sink;
pub mod utils;

pub use crate::{
    error::{Error, Result},
    generator::{ClientGenerator, GeneratedSource},
    options::{GenerationOptions, MethodNameType},
    pipeline::{generate_client, ProgressEvent},
    postprocess::{post_process, FinalSource},
    schema::{ApiDocument, SchemaReference},
    sink::{DeliverySink, DEPENDENCY_DIRECTIVE},
};
