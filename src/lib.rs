//! PDF Binder Library
//!
//! Two small operations on PDFs stored on the local filesystem:
//! - Merge every PDF in a folder into one document, ordered by file name
//! - Split one PDF into chunk files of a fixed number of pages
//!
//! # Example
//!
//! ```no_run
//! use pdf_binder::pdf::{merge_folder, split_pdf, MergeOptions, SplitOptions};
//!
//! merge_folder(&MergeOptions::new("handouts")).expect("Failed to merge PDFs");
//!
//! let mut options = SplitOptions::new("handouts/merged_output.pdf", "chunks");
//! options.split_size = 10;
//! split_pdf(&options).expect("Failed to split PDF");
//! ```

pub mod error;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, ErrorKind, Result};
