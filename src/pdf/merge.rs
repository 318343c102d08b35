//! Folder merging using lopdf
//!
//! Every `.pdf` file in a folder is appended, in file-name order, to a
//! single output document written back into that folder.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::pdf::document::{load_document, page_ids, resolve_inherited, save_document};

/// File name used for the merged document when none is given
pub const DEFAULT_OUTPUT_NAME: &str = "merged_output.pdf";

/// Options for merging a folder of PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Folder scanned for input PDFs; the output is written here too
    pub folder: PathBuf,
    /// Output file name, relative to `folder`
    pub output_name: String,
}

impl MergeOptions {
    /// Merge `folder` into the default output file
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }

    /// Full path of the merged document
    pub fn output_path(&self) -> PathBuf {
        self.folder.join(&self.output_name)
    }
}

/// An input that made it into the merged document
#[derive(Debug, Clone)]
pub struct MergedInput {
    pub path: PathBuf,
    pub pages: usize,
}

/// An input that was left out, and why
#[derive(Debug)]
pub struct SkippedInput {
    pub path: PathBuf,
    pub error: Error,
}

/// Summary of a merge that wrote an output file
#[derive(Debug)]
pub struct MergeReport {
    /// Path of the written document
    pub output: PathBuf,
    /// Appended inputs, in merge order
    pub merged: Vec<MergedInput>,
    /// Inputs that failed to load
    pub skipped: Vec<SkippedInput>,
}

impl MergeReport {
    /// Number of pages in the merged document
    pub fn total_pages(&self) -> usize {
        self.merged.iter().map(|input| input.pages).sum()
    }
}

/// What a merge did
#[derive(Debug)]
pub enum MergeOutcome {
    /// Output written
    Merged(MergeReport),
    /// The folder holds no PDFs; nothing was written
    NothingToMerge { folder: PathBuf },
}

/// Merge every PDF in a folder into one document
///
/// Inputs are ordered by file name (raw byte order, independent of locale
/// and of the order the filesystem lists them in). A file that cannot be
/// loaded is skipped and reported in [`MergeReport::skipped`]; it never
/// aborts the merge. The output file itself is never used as an input.
///
/// # Example
///
/// ```no_run
/// use pdf_binder::pdf::{merge_folder, MergeOptions, MergeOutcome};
///
/// match merge_folder(&MergeOptions::new("handouts")).expect("merge failed") {
///     MergeOutcome::Merged(report) => println!("{} pages", report.total_pages()),
///     MergeOutcome::NothingToMerge { .. } => println!("no PDFs found"),
/// }
/// ```
pub fn merge_folder(options: &MergeOptions) -> Result<MergeOutcome> {
    validate_output_name(&options.output_name)?;

    if !options.folder.is_dir() {
        return Err(Error::FolderNotFound(options.folder.clone()));
    }

    let inputs = discover_pdfs(options)?;
    if inputs.is_empty() {
        info!("No PDF files found in {}", options.folder.display());
        return Ok(MergeOutcome::NothingToMerge {
            folder: options.folder.clone(),
        });
    }

    info!("Merging {} PDF files from {}", inputs.len(), options.folder.display());

    let mut binder = Binder::new();
    let mut merged = Vec::new();
    let mut skipped = Vec::new();

    for path in inputs {
        match load_document(&path).and_then(|doc| binder.append(doc)) {
            Ok(pages) => {
                debug!("Appended {} ({} pages)", path.display(), pages);
                merged.push(MergedInput { path, pages });
            }
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                skipped.push(SkippedInput { path, error });
            }
        }
    }

    let output = options.output_path();
    let mut doc = binder.finish();
    save_document(&mut doc, &output)?;

    info!("Merged {} files into {}", merged.len(), output.display());

    Ok(MergeOutcome::Merged(MergeReport {
        output,
        merged,
        skipped,
    }))
}

/// List the PDFs in the merge folder, sorted by file name
///
/// Matches regular files whose name ends in `.pdf`, ignoring ASCII case.
/// The configured output file is excluded.
pub fn discover_pdfs(options: &MergeOptions) -> Result<Vec<PathBuf>> {
    let output_name = OsStr::new(&options.output_name);
    let mut names: Vec<OsString> = Vec::new();

    for entry in fs::read_dir(&options.folder)? {
        let entry = entry?;
        let name = entry.file_name();

        if !has_pdf_suffix(&name) || name.as_os_str() == output_name {
            continue;
        }
        if !entry.path().is_file() {
            debug!("Ignoring non-file entry {}", entry.path().display());
            continue;
        }

        names.push(name);
    }

    names.sort();

    Ok(names
        .into_iter()
        .map(|name| options.folder.join(name))
        .collect())
}

fn has_pdf_suffix(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".pdf")
}

fn validate_output_name(name: &str) -> Result<()> {
    if Path::new(name).file_name() == Some(OsStr::new(name)) {
        Ok(())
    } else {
        Err(Error::InvalidOutputName(name.to_string()))
    }
}

/// Accumulates pages from several documents into one object space
struct Binder {
    max_id: u32,
    page_ids: Vec<ObjectId>,
    objects: BTreeMap<ObjectId, Object>,
}

impl Binder {
    fn new() -> Self {
        Self {
            max_id: 1,
            page_ids: Vec::new(),
            objects: BTreeMap::new(),
        }
    }

    /// Append all pages of `doc`, returning how many were added
    ///
    /// Nothing is committed to the binder unless the whole document is
    /// accepted.
    fn append(&mut self, mut doc: Document) -> Result<usize> {
        // Pages get a new parent, so pull inherited attributes down first
        for page_id in page_ids(&doc) {
            resolve_inherited(&mut doc, page_id)?;
        }

        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(self.max_id);
        self.max_id = doc.max_id + 1;

        let pages = page_ids(&doc);
        let count = pages.len();

        self.page_ids.extend(pages);
        self.objects.extend(doc.objects);

        Ok(count)
    }

    /// Build the output document around the collected pages
    fn finish(self) -> Document {
        let mut merged_doc = Document::with_version("1.5");

        merged_doc.objects.extend(self.objects);

        // new_object_id() must not hand out IDs already taken by the inputs
        merged_doc.max_id = self.max_id - 1;

        let pages_id = merged_doc.new_object_id();

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages_object.set("Kids", Object::Array(kids));

        let catalog_id = merged_doc.new_object_id();
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));

        merged_doc.objects.insert(catalog_id, Object::Dictionary(catalog));
        merged_doc.objects.insert(pages_id, Object::Dictionary(pages_object));
        merged_doc.trailer.set("Root", Object::Reference(catalog_id));

        for &page_id in &self.page_ids {
            if let Ok(Object::Dictionary(dict)) = merged_doc.get_object_mut(page_id) {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }

        // Drop the source catalogs and page trees that nothing points at now
        merged_doc.prune_objects();
        merged_doc.compress();

        merged_doc
    }
}
