//! Loading, page lookup and saving shared by merge and split

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Open and parse a PDF file
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    Document::load(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Page object IDs in page order
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Copy inheritable attributes from the page tree onto the page itself
///
/// A page moved under a different `Pages` node loses whatever it used to
/// inherit (typically `MediaBox` and `Resources`). Only keys the page does
/// not already define are copied; the nearest ancestor wins.
pub fn resolve_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = doc.get_dictionary(page_id)?;

    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();

    let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
    let mut visited = HashSet::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(node_id) = parent {
        if missing.is_empty() || !visited.insert(node_id) {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    if !inherited.is_empty() {
        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}

/// Serialize a document to `path`, creating or overwriting it
pub fn save_document(doc: &mut Document, path: &Path) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| write_error(lopdf::Error::IO(e)))?;
    let mut writer = BufWriter::new(file);
    doc.save_to(&mut writer)
        .map_err(|e| write_error(lopdf::Error::IO(e)))?;
    writer
        .flush()
        .map_err(|e| write_error(lopdf::Error::IO(e)))?;

    Ok(())
}
