//! Splitting a PDF into fixed-size page chunks

use std::path::PathBuf;

use log::info;
use lopdf::{Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::pdf::document::{load_document, page_ids, resolve_inherited, save_document};

/// Pages per chunk when none is given
pub const DEFAULT_SPLIT_SIZE: usize = 4;

/// Options for splitting a PDF
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// PDF to split
    pub input: PathBuf,
    /// Existing folder that receives the chunk files
    pub output_folder: PathBuf,
    /// Pages per chunk; the last chunk holds the remainder
    pub split_size: usize,
}

impl SplitOptions {
    pub fn new(input: impl Into<PathBuf>, output_folder: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_folder: output_folder.into(),
            split_size: DEFAULT_SPLIT_SIZE,
        }
    }
}

/// A run of pages, 1-based and inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Name of the chunk file holding this range, e.g. `output_5_to_8.pdf`
    pub fn file_name(&self) -> String {
        format!("output_{}_to_{}.pdf", self.start, self.end)
    }
}

/// A chunk file written by [`split_pdf`]
#[derive(Debug, Clone)]
pub struct WrittenChunk {
    pub range: PageRange,
    pub path: PathBuf,
}

/// Summary of a split
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// Page count of the source document
    pub total_pages: u32,
    /// Chunks in page order
    pub chunks: Vec<WrittenChunk>,
}

/// Partition `total_pages` pages into consecutive groups of `split_size`
///
/// Every page lands in exactly one range. Returns nothing for an empty
/// document or a zero group size.
pub fn chunk_ranges(total_pages: u32, split_size: usize) -> Vec<PageRange> {
    if split_size == 0 {
        return Vec::new();
    }
    let size = u32::try_from(split_size).unwrap_or(u32::MAX);

    (0..total_pages)
        .step_by(split_size)
        .map(|offset| PageRange {
            start: offset + 1,
            end: offset.saturating_add(size).min(total_pages),
        })
        .collect()
}

/// Split a PDF into chunk files of `split_size` pages
///
/// Chunks are written to `output_folder` as `output_<start>_to_<end>.pdf`.
/// Any failure stops the split; chunks already written are left in place.
///
/// # Example
///
/// ```no_run
/// use pdf_binder::pdf::{split_pdf, SplitOptions};
///
/// let report = split_pdf(&SplitOptions::new("book.pdf", "chunks")).expect("split failed");
/// assert_eq!(report.chunks.len(), (report.total_pages as usize).div_ceil(4));
/// ```
pub fn split_pdf(options: &SplitOptions) -> Result<SplitReport> {
    if options.split_size == 0 {
        return Err(Error::InvalidSplitSize(options.split_size));
    }
    if !options.output_folder.is_dir() {
        return Err(Error::FolderNotFound(options.output_folder.clone()));
    }

    let source = load_document(&options.input)?;
    let source_pages = page_ids(&source);
    let total_pages = source_pages.len() as u32;

    let ranges = chunk_ranges(total_pages, options.split_size);
    info!(
        "Splitting {} ({} pages) into {} chunks",
        options.input.display(),
        total_pages,
        ranges.len()
    );

    let mut chunks = Vec::with_capacity(ranges.len());
    for range in ranges {
        let pages = &source_pages[(range.start - 1) as usize..range.end as usize];
        let mut chunk = extract_pages(&source, pages)?;
        let path = options.output_folder.join(range.file_name());
        save_document(&mut chunk, &path)?;

        info!("Created: {}", path.display());
        chunks.push(WrittenChunk { range, path });
    }

    Ok(SplitReport {
        total_pages,
        chunks,
    })
}

/// Copy of `source` holding only `pages`, in the given order
///
/// The pages are hung directly under the root `Pages` node and everything
/// no longer reachable is pruned, so building a chunk costs one pass over
/// the document whatever its page count.
fn extract_pages(source: &Document, pages: &[ObjectId]) -> Result<Document> {
    let mut chunk = source.clone();
    let root_id = page_tree_root(&chunk)?;

    for &page_id in pages {
        // Intermediate page tree nodes are dropped, so keep what they provided
        resolve_inherited(&mut chunk, page_id)?;
        chunk
            .get_dictionary_mut(page_id)?
            .set("Parent", Object::Reference(root_id));
    }

    let kids: Vec<Object> = pages.iter().map(|&id| Object::Reference(id)).collect();
    let root = chunk.get_dictionary_mut(root_id)?;
    root.set("Kids", Object::Array(kids));
    root.set("Count", Object::Integer(pages.len() as i64));

    chunk.prune_objects();
    chunk.compress();
    Ok(chunk)
}

/// ID of the root `Pages` node, found through the catalog
fn page_tree_root(doc: &Document) -> Result<ObjectId> {
    let catalog_id = doc.trailer.get(b"Root").and_then(Object::as_reference)?;
    let pages_id = doc
        .get_dictionary(catalog_id)?
        .get(b"Pages")
        .and_then(Object::as_reference)?;
    Ok(pages_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 4, vec![(1, 4), (5, 8), (9, 10)])]
    #[case(8, 4, vec![(1, 4), (5, 8)])]
    #[case(3, 4, vec![(1, 3)])]
    #[case(5, 1, vec![(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)])]
    #[case(7, 3, vec![(1, 3), (4, 6), (7, 7)])]
    #[case(0, 4, vec![])]
    fn test_chunk_ranges(#[case] total: u32, #[case] size: usize, #[case] expected: Vec<(u32, u32)>) {
        let ranges: Vec<(u32, u32)> = chunk_ranges(total, size)
            .iter()
            .map(|r| (r.start, r.end))
            .collect();
        assert_eq!(ranges, expected);
    }

    #[test]
    fn test_chunk_ranges_are_exhaustive() {
        for total in 0..40u32 {
            for size in 1..9usize {
                let ranges = chunk_ranges(total, size);
                assert_eq!(ranges.len(), (total as usize).div_ceil(size));
                assert_eq!(ranges.iter().map(PageRange::len).sum::<usize>(), total as usize);

                let mut next = 1;
                for range in &ranges {
                    assert_eq!(range.start, next);
                    next = range.end + 1;
                }
            }
        }
    }

    #[test]
    fn test_chunk_ranges_zero_size() {
        assert!(chunk_ranges(10, 0).is_empty());
    }

    #[test]
    fn test_huge_split_size_is_one_chunk() {
        assert_eq!(chunk_ranges(3, usize::MAX), vec![PageRange { start: 1, end: 3 }]);
    }

    #[test]
    fn test_file_name() {
        let range = PageRange { start: 9, end: 10 };
        assert_eq!(range.file_name(), "output_9_to_10.pdf");
        assert_eq!(range.len(), 2);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_split_rejects_zero_size() {
        let mut options = SplitOptions::new("in.pdf", ".");
        options.split_size = 0;
        assert!(matches!(split_pdf(&options).unwrap_err(), Error::InvalidSplitSize(0)));
    }

    #[test]
    fn test_split_missing_output_folder() {
        let options = SplitOptions::new("in.pdf", "no/such/folder");
        assert!(matches!(split_pdf(&options).unwrap_err(), Error::FolderNotFound(_)));
    }
}
