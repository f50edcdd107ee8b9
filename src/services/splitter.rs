use crate::error::{BookmarkSplitterError, Result};
use crate::services::toolkit::PdfToolkit;
use crate::types::{
    ExtractionOutcome, ExtractionRequest, ExtractionStatus, SplitConfig, SplitResult, SplitTarget,
};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

pub struct DocumentSplitter;

impl DocumentSplitter {
    /// Extracts every target into `config.output_dir`, reporting each outcome
    /// in list order. A failed extraction does not stop the batch.
    pub async fn split_document<T: PdfToolkit>(
        toolkit: Arc<T>,
        targets: &[SplitTarget],
        config: &SplitConfig,
    ) -> Result<SplitResult> {
        Self::validate_split_config(targets, config)?;

        info!(
            "Splitting '{}' into {} files",
            config.input.display(),
            targets.len()
        );

        let requests: Vec<ExtractionRequest> = targets
            .iter()
            .map(|target| ExtractionRequest::for_target(&config.input, &config.output_dir, target))
            .collect();

        let outcomes = if config.jobs == 1 {
            Self::extract_sequential(toolkit.as_ref(), targets, requests).await
        } else {
            Self::extract_concurrent(toolkit, targets, requests, config.jobs).await?
        };

        let result = SplitResult {
            output_dir: config.output_dir.clone(),
            outcomes,
        };

        let failed = result.failed();
        if failed == 0 {
            info!("Successfully created {} files", result.outcomes.len());
        } else {
            warn!(
                "Created {} files, {} extractions failed",
                result.outcomes.len() - failed,
                failed
            );
        }

        Ok(result)
    }

    async fn extract_sequential<T: PdfToolkit>(
        toolkit: &T,
        targets: &[SplitTarget],
        requests: Vec<ExtractionRequest>,
    ) -> Vec<ExtractionOutcome> {
        let total = targets.len();
        let mut outcomes = Vec::with_capacity(total);

        for (idx, (target, request)) in targets.iter().zip(requests).enumerate() {
            let status = Self::status_of(toolkit.extract_pages(&request).await);
            outcomes.push(Self::report(idx + 1, total, target, status));
        }

        outcomes
    }

    /// Runs up to `jobs` extractions at once and awaits them in list order,
    /// so progress is reported exactly as in a sequential run.
    async fn extract_concurrent<T: PdfToolkit>(
        toolkit: Arc<T>,
        targets: &[SplitTarget],
        requests: Vec<ExtractionRequest>,
        jobs: usize,
    ) -> Result<Vec<ExtractionOutcome>> {
        let total = targets.len();
        let permits = Arc::new(Semaphore::new(jobs));

        let handles: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let toolkit = Arc::clone(&toolkit);
                let permits = Arc::clone(&permits);
                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await.map_err(|e| {
                        BookmarkSplitterError::Toolkit {
                            reason: format!("Extraction queue closed: {}", e),
                        }
                    })?;
                    toolkit.extract_pages(&request).await
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(total);
        for (idx, (target, handle)) in targets.iter().zip(handles).enumerate() {
            let result = handle.await.map_err(|e| BookmarkSplitterError::Toolkit {
                reason: format!("Extraction task failed: {}", e),
            })?;
            outcomes.push(Self::report(idx + 1, total, target, Self::status_of(result)));
        }

        Ok(outcomes)
    }

    fn status_of(result: Result<()>) -> ExtractionStatus {
        match result {
            Ok(()) => ExtractionStatus::Extracted,
            Err(e) => ExtractionStatus::Failed(e.to_string()),
        }
    }

    fn report(
        index: usize,
        total: usize,
        target: &SplitTarget,
        status: ExtractionStatus,
    ) -> ExtractionOutcome {
        match &status {
            ExtractionStatus::Extracted => info!("[{}/{}] {}", index, total, target.file),
            ExtractionStatus::Failed(reason) => {
                error!("[{}/{}] {} failed: {}", index, total, target.file, reason)
            }
        }

        ExtractionOutcome {
            index,
            file: target.file.clone(),
            status,
        }
    }

    fn validate_split_config(targets: &[SplitTarget], config: &SplitConfig) -> Result<()> {
        if config.jobs == 0 {
            return Err(BookmarkSplitterError::SplitConfig {
                reason: "Number of jobs must be greater than 0".to_string(),
            });
        }

        if targets.is_empty() {
            return Err(BookmarkSplitterError::SplitConfig {
                reason: "No bookmarks to extract".to_string(),
            });
        }

        Ok(())
    }

    /// Creates the output directory. An existing directory is an error unless
    /// `force` is set, in which case it is deleted with all its contents first.
    pub async fn prepare_output_directory(output_dir: &Path, force: bool) -> Result<()> {
        if fs::try_exists(output_dir).await? {
            if !force {
                return Err(BookmarkSplitterError::OutputDirectoryExists {
                    path: output_dir.display().to_string(),
                });
            }

            warn!(
                "There's already a {} directory; DELETING it",
                output_dir.display()
            );
            fs::remove_dir_all(output_dir).await.map_err(|e| {
                BookmarkSplitterError::OutputDirectory {
                    reason: format!("Failed to delete {}: {}", output_dir.display(), e),
                }
            })?;
        }

        fs::create_dir_all(output_dir).await.map_err(|e| {
            BookmarkSplitterError::OutputDirectory {
                reason: format!("Failed to create output directory: {}", e),
            }
        })?;
        info!("Created output directory: {}", output_dir.display());

        Ok(())
    }
}
