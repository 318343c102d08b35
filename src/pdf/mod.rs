//! PDF manipulation module

pub mod document;
pub mod merge;
pub mod split;

// Re-export commonly used items
pub use merge::{
    discover_pdfs, merge_folder, MergeOptions, MergeOutcome, MergeReport, MergedInput,
    SkippedInput, DEFAULT_OUTPUT_NAME,
};
pub use split::{
    chunk_ranges, split_pdf, PageRange, SplitOptions, SplitReport, WrittenChunk,
    DEFAULT_SPLIT_SIZE,
};
