use clap::Parser;
use pdf_bookmark_splitter::SplitConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-split")]
#[command(about = "Split a large PDF into many small PDFs based on its bookmarks")]
#[command(version)]
pub struct Cli {
    /// PDF file to use as input
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "out")]
    pub output: PathBuf,

    /// Exclude 'duplicate' bookmarks, i.e. bookmarks that start on the same
    /// page as the next one and would only produce a copy of that page
    #[arg(long)]
    pub skip: bool,

    /// Delete the output directory if it already exists
    #[arg(long)]
    pub force: bool,

    /// Print the bookmark list as JSON and exit without extracting
    #[arg(long)]
    pub json: bool,

    /// Read bookmarks from an existing `pdftk dump_data_utf8` report
    #[arg(long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// pdftk executable to run
    #[arg(long, value_name = "PROGRAM", default_value = "pdftk")]
    pub pdftk: PathBuf,

    /// Number of extractions to run at once
    #[arg(short, long, default_value = "1")]
    pub jobs: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            input: self.input.clone(),
            output_dir: self.output.clone(),
            skip_duplicates: self.skip,
            force: self.force,
            json: self.json,
            metadata_file: self.metadata.clone(),
            toolkit: self.pdftk.clone(),
            jobs: self.jobs,
        }
    }
}
