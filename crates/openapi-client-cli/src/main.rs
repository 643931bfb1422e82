//! openapi-client CLI entrypoint
//! Parses command-line arguments and dispatches to the core pipeline.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use openapi_client_core::{
    generate_client, DeliverySink, GenerationOptions, MethodNameType, ProgressEvent,
};

#[derive(Parser)]
#[command(name = "openapi-client")]
#[command(author, version, about = "Generate an API client from its OpenAPI schema", long_about = None)]
struct Cli {
    /// Path or URL to the OpenAPI schema (YAML or JSON)
    ///
    /// Can be a local file path or an HTTP/HTTPS URL
    /// Example: openapi-client path/to/schema.yaml
    /// Example: openapi-client https://example.com/openapi.json
    schema: String,

    /// Name of the generated client class
    #[arg(short = 'c', long, default_value = "OpenApiClient")]
    class_name: String,

    /// Defines how method names are generated (path or operationid)
    #[arg(long, default_value = "path")]
    method_name_type: String,

    /// Trace HTTP responses through the display hook
    #[arg(short = 't', long)]
    enable_tracing: bool,

    /// Write the generated source to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let method_name_type: MethodNameType = cli
        .method_name_type
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid method name type '{}': {e}", cli.method_name_type))?;

    let options = GenerationOptions {
        class_name: cli.class_name.clone(),
        method_name_type,
        enable_tracing: cli.enable_tracing,
    };

    let sink = match &cli.output {
        Some(path) => DeliverySink::File(path.clone()),
        None => DeliverySink::Stdout,
    };

    tracing::debug!(schema = %cli.schema, "starting client generation");

    // Progress notices go to stderr so a stdout sink stays clean
    generate_client(&cli.schema, &options, &sink, |event| match event {
        ProgressEvent::DownloadStarted { location } => {
            eprintln!("Downloading schema from {}...", location);
        }
        ProgressEvent::BuildStarted => {
            eprintln!("Building client...");
        }
        ProgressEvent::Completed {
            class_name,
            location,
        } => {
            eprintln!("Client generated for {}", location);
            eprintln!("You can initialize the client as shown below:");
            eprintln!("    var client = new {}();", class_name);
            eprintln!("or using an already existing HttpClient:");
            eprintln!("    var httpClient = new HttpClient();");
            eprintln!("    var client = new {}(httpClient);", class_name);
        }
    })
    .await
    .context("Failed to generate client")?;

    Ok(())
}
