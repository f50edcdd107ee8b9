//! # PDF Bookmark Splitter Library
//!
//! Splits a PDF into one file per bookmark. Bookmarks are read from the text
//! report of `pdftk dump_data_utf8`, turned into contiguous page ranges with
//! numbered file names, and each range is cut out with `pdftk cat`.
//!
//! ## Example Usage
//!
//! ```no_run
//! use pdf_bookmark_splitter::{
//!     DocumentSplitter, MetadataParser, PdfToolkit, Pdftk, RangeDeriver, SplitConfig,
//! };
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let toolkit = Arc::new(Pdftk::default());
//!     let input = PathBuf::from("book.pdf");
//!
//!     // Read and parse bookmarks
//!     let metadata = toolkit.dump_metadata(&input).await?;
//!     let bookmarks = MetadataParser::new()?.parse(&metadata)?;
//!
//!     // Derive page ranges and file names
//!     let targets = RangeDeriver::new()?.plan(bookmarks, true);
//!
//!     let config = SplitConfig {
//!         input,
//!         output_dir: PathBuf::from("out"),
//!         skip_duplicates: true,
//!         force: false,
//!         json: false,
//!         metadata_file: None,
//!         toolkit: PathBuf::from("pdftk"),
//!         jobs: 1,
//!     };
//!
//!     // Extract every range
//!     DocumentSplitter::prepare_output_directory(&config.output_dir, config.force).await?;
//!     let result = DocumentSplitter::split_document(toolkit, &targets, &config).await?;
//!
//!     println!("Created {} files", result.output_files().len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{BookmarkSplitterError, Result};
pub use services::{DocumentSplitter, MetadataParser, PdfToolkit, Pdftk, RangeDeriver};
pub use types::{
    Bookmark, EndPage, ExtractionOutcome, ExtractionRequest, ExtractionStatus, SplitConfig,
    SplitResult, SplitTarget,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
