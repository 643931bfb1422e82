//! Client source generation over the embedded template.
//!
//! The generator renders one C# compilation unit per run: the client class
//! wrapped in the placeholder namespace, one model class per schema
//! definition, and the exception class. Rendering is deterministic: the same
//! document and options always produce byte-identical output.

// Internal imports (std, crate)
use crate::builders::csharp::CSharpContextBuilder;
use crate::builders::ClientContextBuilder;
use crate::error::{Error, Result};
use crate::options::GenerationOptions;
use crate::schema::ApiDocument;

// External imports (alphabetized)
use log::debug;
use tera::{Context, Tera};

/// Raw text produced by the generator, tagged with its client class name
#[derive(Debug, Clone)]
pub struct GeneratedSource {
    /// The class name the source was generated for
    pub class_name: String,
    /// The generated compilation unit
    pub text: String,
}

/// Renders script-ready C# client source from a parsed document
#[derive(Debug)]
pub struct ClientGenerator {
    tera: Tera,
}

impl ClientGenerator {
    /// Create a generator with the embedded client template loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("client.cs", include_str!("../templates/client.cs.tera"))
            .map_err(|e| Error::generation(format!("failed to load client template: {}", e)))?;
        Ok(Self { tera })
    }

    /// Render the client compilation unit for the given document and options
    pub fn generate(
        &self,
        doc: &ApiDocument,
        options: &GenerationOptions,
    ) -> Result<GeneratedSource> {
        let context_json = CSharpContextBuilder.build(doc, options)?;
        let context = Context::from_value(context_json)
            .map_err(|e| Error::generation(format!("failed to build template context: {}", e)))?;
        let text = self
            .tera
            .render("client.cs", &context)
            .map_err(|e| Error::generation(format!("failed to render client template: {}", e)))?;

        debug!(
            "generated {} bytes of client source for {}",
            text.len(),
            options.class_name
        );
        Ok(GeneratedSource {
            class_name: options.class_name.clone(),
            text,
        })
    }
}
