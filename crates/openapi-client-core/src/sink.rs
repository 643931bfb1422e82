//! Delivery of finished source to an execution target.
//!
//! The sink receives the dependency directive strictly before the source
//! text: the generated code references that dependency at parse time, so the
//! two must reach the execution context in order.

// Internal imports (std, crate)
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::postprocess::FinalSource;

// External imports (alphabetized)
use log::debug;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Runtime dependency declaration the generated code requires
pub const DEPENDENCY_DIRECTIVE: &str = r#"#r "System.ComponentModel.DataAnnotations""#;

/// Where the finished client code is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliverySink {
    /// Write directive and source to standard output
    Stdout,
    /// Write directive and source to a file
    File(PathBuf),
}

impl DeliverySink {
    /// Submit the dependency directive, then the source, in that order
    pub async fn submit(&self, source: &FinalSource) -> Result<()> {
        let payload = format!("{}\n\n{}\n", DEPENDENCY_DIRECTIVE, source.text);
        match self {
            DeliverySink::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout
                    .write_all(payload.as_bytes())
                    .await
                    .map_err(|e| Error::submission(format!("failed to write source to stdout: {}", e)))?;
                stdout
                    .flush()
                    .await
                    .map_err(|e| Error::submission(format!("failed to flush stdout: {}", e)))?;
            }
            DeliverySink::File(path) => {
                fs::write(path, payload).await.map_err(|e| {
                    Error::submission(format!(
                        "failed to write source to {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            }
        }
        debug!("submitted source for {}", source.class_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_sink_writes_directive_before_source() -> crate::Result<()> {
        let dir = tempdir()?;
        let out_path = dir.path().join("client.csx");

        let source = FinalSource {
            class_name: "OpenApiClient".to_string(),
            text: "public partial class OpenApiClient { }".to_string(),
        };
        DeliverySink::File(out_path.clone()).submit(&source).await?;

        let written = tokio::fs::read_to_string(&out_path).await?;
        let directive_at = written.find(DEPENDENCY_DIRECTIVE).unwrap();
        let source_at = written.find("public partial class OpenApiClient").unwrap();
        assert!(directive_at < source_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_file_sink_failure_is_a_submission_error() {
        let source = FinalSource {
            class_name: "OpenApiClient".to_string(),
            text: String::new(),
        };
        let err = DeliverySink::File(PathBuf::from("no/such/dir/client.csx"))
            .submit(&source)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Submission(_)));
    }
}
