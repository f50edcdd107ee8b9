mod cli;

use clap::Parser;
use cli::Cli;
use pdf_bookmark_splitter::{
    BookmarkSplitterError, DocumentSplitter, MetadataParser, PdfToolkit, Pdftk, RangeDeriver,
    Result, SplitConfig,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so that --json output stays clean
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = handle_split_command(&cli.split_config()).await {
        error!("Operation failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_split_command(config: &SplitConfig) -> Result<()> {
    let toolkit = Arc::new(Pdftk::new(&config.toolkit));

    let metadata = match &config.metadata_file {
        Some(path) => {
            info!("Reading bookmark metadata from {}", path.display());
            ensure_file_exists(path).await?;
            tokio::fs::read_to_string(path).await?
        }
        None => {
            ensure_file_exists(&config.input).await?;
            toolkit.dump_metadata(&config.input).await?
        }
    };

    let bookmarks = MetadataParser::new()?.parse(&metadata)?;
    let targets = RangeDeriver::new()?.plan(bookmarks, config.skip_duplicates);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    ensure_file_exists(&config.input).await?;
    DocumentSplitter::prepare_output_directory(&config.output_dir, config.force).await?;

    let result = DocumentSplitter::split_document(toolkit, &targets, config).await?;

    let failed = result.failed();
    if failed > 0 {
        return Err(BookmarkSplitterError::ExtractionFailed {
            failed,
            total: result.outcomes.len(),
        });
    }

    info!(
        "Wrote {} files to {}",
        result.output_files().len(),
        result.output_dir.display()
    );
    Ok(())
}

async fn ensure_file_exists(path: &Path) -> Result<()> {
    if !tokio::fs::try_exists(path).await? {
        return Err(BookmarkSplitterError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(())
}
