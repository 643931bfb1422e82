//! The generation pipeline: load, generate, post-process, deliver.
//!
//! One invocation runs the four stages strictly in sequence with no state
//! shared across runs. The pipeline itself has no UI dependency; callers
//! observe stage transitions through the [`ProgressEvent`] callback.
//!
//! # Examples
//!
//! ```no_run
//! use openapi_client_core::{generate_client, DeliverySink, GenerationOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> openapi_client_core::Result<()> {
//! let options = GenerationOptions::default();
//! let finished = generate_client(
//!     "petstore.yaml",
//!     &options,
//!     &DeliverySink::Stdout,
//!     |_event| {},
//! )
//! .await?;
//! assert_eq!(finished.class_name, "OpenApiClient");
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use crate::error::Result;
use crate::generator::ClientGenerator;
use crate::options::GenerationOptions;
use crate::postprocess::{post_process, FinalSource};
use crate::schema::{ApiDocument, SchemaReference};
use crate::sink::DeliverySink;

// External imports (alphabetized)
use log::info;

/// Stage-transition notifications emitted while the pipeline runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The schema is being fetched or read
    DownloadStarted { location: String },
    /// The client source is being generated and post-processed
    BuildStarted,
    /// The finished source was submitted to the sink
    Completed {
        class_name: String,
        location: String,
    },
}

/// Run one full generation: fetch, parse, generate, post-process, submit.
///
/// The first failing stage aborts the run; nothing is retried and nothing is
/// cached between invocations. The sink receives the dependency directive
/// strictly before the source.
pub async fn generate_client(
    schema: &str,
    options: &GenerationOptions,
    sink: &DeliverySink,
    mut on_progress: impl FnMut(&ProgressEvent),
) -> Result<FinalSource> {
    let reference = SchemaReference::new(schema);

    on_progress(&ProgressEvent::DownloadStarted {
        location: reference.location().to_string(),
    });
    let document = ApiDocument::load(&reference).await?;

    on_progress(&ProgressEvent::BuildStarted);
    let generator = ClientGenerator::new()?;
    let generated = generator.generate(&document, options)?;
    let finished = post_process(generated, options)?;

    sink.submit(&finished).await?;
    info!(
        "client {} generated from {}",
        finished.class_name,
        reference.location()
    );

    on_progress(&ProgressEvent::Completed {
        class_name: finished.class_name.clone(),
        location: reference.location().to_string(),
    });

    Ok(finished)
}
