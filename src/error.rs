use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookmarkSplitterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("No bookmarks found in document metadata")]
    NoBookmarks,

    #[error("Malformed bookmark metadata at line {line}: {reason}")]
    MalformedMetadata { line: usize, reason: String },

    #[error("Output directory already exists: {path} (use --force to delete it)")]
    OutputDirectoryExists { path: String },

    #[error("Output directory error: {reason}")]
    OutputDirectory { reason: String },

    #[error("Split configuration error: {reason}")]
    SplitConfig { reason: String },

    #[error("PDF toolkit error: {reason}")]
    Toolkit { reason: String },

    #[error("{failed} of {total} extractions failed")]
    ExtractionFailed { failed: usize, total: usize },

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BookmarkSplitterError>;
