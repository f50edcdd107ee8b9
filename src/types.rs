use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// One flattened entry of the document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    pub level: u32,
    pub page: u32,
    pub text: String,
}

impl Bookmark {
    pub fn new(level: u32, page: u32, text: impl Into<String>) -> Self {
        Self {
            level,
            page,
            text: text.into(),
        }
    }

    /// Placeholder covering the pages before the first bookmark.
    pub fn start() -> Self {
        Self::new(0, 1, "(start)")
    }
}

/// Inclusive last page of a split target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPage {
    Page(u32),
    /// Last page of the document, resolved by the PDF toolkit.
    DocumentEnd,
}

impl fmt::Display for EndPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndPage::Page(page) => write!(f, "{}", page),
            EndPage::DocumentEnd => f.write_str("end"),
        }
    }
}

impl Serialize for EndPage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EndPage::Page(page) => serializer.serialize_u32(*page),
            EndPage::DocumentEnd => serializer.serialize_str("end"),
        }
    }
}

/// A bookmark with its derived page range and output file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitTarget {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    pub end_page: EndPage,
    pub file: String,
}

impl SplitTarget {
    pub fn is_single_page(&self) -> bool {
        self.end_page == EndPage::Page(self.bookmark.page)
    }

    /// Range in the `start-end` form the PDF toolkit understands.
    pub fn page_range(&self) -> String {
        format!("{}-{}", self.bookmark.page, self.end_page)
    }
}

/// A single page-range extraction handed to the PDF toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub input: PathBuf,
    pub page_range: String,
    pub output: PathBuf,
}

impl ExtractionRequest {
    pub fn for_target(input: &Path, output_dir: &Path, target: &SplitTarget) -> Self {
        Self {
            input: input.to_path_buf(),
            page_range: target.page_range(),
            output: output_dir.join(&target.file),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub skip_duplicates: bool,
    pub force: bool,
    pub json: bool,
    pub metadata_file: Option<PathBuf>,
    pub toolkit: PathBuf,
    pub jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStatus {
    Extracted,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// 1-based position in the batch.
    pub index: usize,
    pub file: String,
    pub status: ExtractionStatus,
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        self.status == ExtractionStatus::Extracted
    }
}

#[derive(Debug, Clone)]
pub struct SplitResult {
    pub output_dir: PathBuf,
    pub outcomes: Vec<ExtractionOutcome>,
}

impl SplitResult {
    pub fn output_files(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| self.output_dir.join(&o.file))
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }
}
