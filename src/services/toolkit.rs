use crate::error::{BookmarkSplitterError, Result};
use crate::types::ExtractionRequest;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// External PDF toolkit used to read bookmarks and cut page ranges.
pub trait PdfToolkit: Send + Sync + 'static {
    /// Returns the toolkit's text dump of the document metadata.
    fn dump_metadata(&self, input: &Path) -> impl Future<Output = Result<String>> + Send;

    /// Writes `request.page_range` of `request.input` to `request.output`.
    fn extract_pages(&self, request: &ExtractionRequest) -> impl Future<Output = Result<()>> + Send;
}

/// Runs the `pdftk` command line tool.
#[derive(Debug, Clone)]
pub struct Pdftk {
    program: PathBuf,
}

impl Pdftk {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn dump_args(input: &Path) -> Vec<OsString> {
        vec![input.into(), "dump_data_utf8".into()]
    }

    pub fn cat_args(request: &ExtractionRequest) -> Vec<OsString> {
        vec![
            request.input.as_os_str().into(),
            "cat".into(),
            request.page_range.as_str().into(),
            "output".into(),
            request.output.as_os_str().into(),
        ]
    }

    async fn run(&self, args: Vec<OsString>) -> Result<Vec<u8>> {
        debug!("Running {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| BookmarkSplitterError::Toolkit {
                reason: format!("Failed to launch {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BookmarkSplitterError::Toolkit {
                reason: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            });
        }

        Ok(output.stdout)
    }
}

impl Default for Pdftk {
    fn default() -> Self {
        Self::new("pdftk")
    }
}

impl PdfToolkit for Pdftk {
    async fn dump_metadata(&self, input: &Path) -> Result<String> {
        info!("Extracting PDF metadata from {}", input.display());
        let stdout = self.run(Self::dump_args(input)).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    async fn extract_pages(&self, request: &ExtractionRequest) -> Result<()> {
        self.run(Self::cat_args(request)).await.map(|_| ())
    }
}
