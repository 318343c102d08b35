//! PDF Binder CLI tool
//!
//! Merge a folder of PDFs into one file, or split a PDF into page chunks.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::process;

use pdf_binder::pdf::{
    merge_folder, split_pdf, MergeOptions, MergeOutcome, SplitOptions, DEFAULT_OUTPUT_NAME,
    DEFAULT_SPLIT_SIZE,
};

/// PDF Binder - Merge a folder of PDFs or split a PDF into chunks
#[derive(Parser)]
#[command(name = "pdf-binder")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Merge every PDF in a folder into handouts/merged_output.pdf
    pdf-binder merge handouts

    # Merge with a custom output name
    pdf-binder merge handouts -o print-me.pdf

    # Split a PDF into 10-page chunks
    pdf-binder split book.pdf chunks/ --size 10")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge all PDF files in a folder, in file-name order
    Merge {
        /// Folder containing the PDFs; the output is written here too
        folder: PathBuf,

        /// Output file name (created inside FOLDER)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
        output: String,
    },

    /// Split a PDF into files of a fixed number of pages
    Split {
        /// PDF file to split
        input: PathBuf,

        /// Existing folder that receives output_<start>_to_<end>.pdf files
        output_folder: PathBuf,

        /// Pages per output file
        #[arg(short, long, default_value_t = DEFAULT_SPLIT_SIZE as u64,
              value_parser = clap::value_parser!(u64).range(1..))]
        size: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Merge { folder, output } => cmd_merge(folder, output),
        Commands::Split {
            input,
            output_folder,
            size,
        } => cmd_split(input, output_folder, size),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Merge the PDFs of a folder
fn cmd_merge(folder: PathBuf, output: String) -> anyhow::Result<()> {
    let options = MergeOptions {
        folder,
        output_name: output,
    };

    let outcome = merge_folder(&options)
        .with_context(|| format!("Merging '{}' failed", options.folder.display()))?;

    let report = match outcome {
        MergeOutcome::NothingToMerge { folder } => {
            println!("No PDF files found in '{}'.", folder.display());
            return Ok(());
        }
        MergeOutcome::Merged(report) => report,
    };

    println!("Merged {} PDF files:", report.merged.len());
    for input in &report.merged {
        println!("- {} ({} pages)", display_name(&input.path), input.pages);
    }

    for skipped in &report.skipped {
        println!(
            "Warning: skipped '{}': {}",
            display_name(&skipped.path),
            skipped.error
        );
    }

    println!(
        "\nWrote {} pages to '{}'",
        report.total_pages(),
        report.output.display()
    );

    Ok(())
}

/// Split a PDF into chunks
fn cmd_split(input: PathBuf, output_folder: PathBuf, size: u64) -> anyhow::Result<()> {
    let options = SplitOptions {
        input,
        output_folder,
        split_size: usize::try_from(size).context("Split size does not fit in memory")?,
    };

    let report = split_pdf(&options)
        .with_context(|| format!("Splitting '{}' failed", options.input.display()))?;

    for chunk in &report.chunks {
        println!("Created: {}", chunk.path.display());
    }

    if report.chunks.is_empty() {
        println!("'{}' has no pages; nothing written.", options.input.display());
    }

    Ok(())
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
