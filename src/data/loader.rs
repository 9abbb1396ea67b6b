//! Manifest, taxonomy and per-document metadata loading.
//!
//! All retrieval goes through the [`DocumentSource`] seam so tests can feed
//! in-memory documents. Per-document failures are logged and the document is
//! dropped from its collection; the batch never aborts. Manifest and taxonomy
//! failures are fatal for the caller.

use crate::{
    data::types::{Book, Manifest, Metadata, Note, TagCategory},
    error::DataError,
    frontmatter::{AttributeValue, FrontMatter, extract_front_matter},
    log,
};
use rayon::prelude::*;
use serde_json::Value;
use std::{collections::HashMap, fs, path::PathBuf};

/// Retrieval seam for manifest, taxonomy and document content.
pub trait DocumentSource: Sync {
    fn fetch(&self, path: &str) -> Result<String, DataError>;
}

/// Production source: files under the data directory.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for FsSource {
    fn fetch(&self, path: &str) -> Result<String, DataError> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(DataError::LoadFailure(path.to_string()));
        }
        fs::read_to_string(&full).map_err(|_| DataError::LoadFailure(path.to_string()))
    }
}

/// In-memory source for tests.
#[cfg(test)]
pub struct MapSource(pub HashMap<String, String>);

#[cfg(test)]
impl DocumentSource for MapSource {
    fn fetch(&self, path: &str) -> Result<String, DataError> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| DataError::LoadFailure(path.to_string()))
    }
}

/// Load and shape `manifest.json`.
///
/// A missing file is [`DataError::ResourceNotFound`]; unreadable or
/// non-JSON content is [`DataError::LoadFailure`]. Non-array `books`/`notes`
/// fields are tolerated as empty lists.
pub fn load_manifest(source: &dyn DocumentSource, path: &str) -> Result<Manifest, DataError> {
    let text = source.fetch(path).map_err(|err| match err {
        DataError::LoadFailure(_) => DataError::ResourceNotFound("Manifest"),
        other => other,
    })?;
    let value: Value =
        serde_json::from_str(&text).map_err(|_| DataError::LoadFailure("manifest".to_string()))?;
    Ok(Manifest {
        books: string_array(value.get("books")),
        notes: string_array(value.get("notes")),
    })
}

/// Load and normalize `tags.json` into ordered categories.
///
/// Two shapes are accepted: the legacy flat array (one category named "All")
/// and the keyed object form (one category per key). Anything else is
/// [`DataError::MalformedTaxonomy`].
pub fn load_tags(source: &dyn DocumentSource, path: &str) -> Result<Vec<TagCategory>, DataError> {
    let text = source.fetch(path).map_err(|err| match err {
        DataError::LoadFailure(_) => DataError::ResourceNotFound("Tags"),
        other => other,
    })?;
    let value: Value =
        serde_json::from_str(&text).map_err(|_| DataError::LoadFailure("tags".to_string()))?;

    match value.get("categories") {
        Some(Value::Array(tags)) => Ok(vec![TagCategory {
            name: "All".to_string(),
            tags: tags.iter().filter_map(|t| t.as_str()).map(str::to_string).collect(),
        }]),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .map(|(name, tags)| TagCategory {
                name: name.clone(),
                tags: string_array(Some(tags)),
            })
            .collect()),
        _ => Err(DataError::MalformedTaxonomy),
    }
}

/// Load every document named by the manifest and normalize into records.
///
/// Documents are fetched and parsed in parallel; the output keeps manifest
/// order with failed entries filtered out, not reordered.
pub fn load_all_metadata(source: &dyn DocumentSource, manifest: &Manifest) -> Metadata {
    let books = manifest
        .books
        .par_iter()
        .filter_map(|path| fetch_and_parse(source, path).map(|fm| book_from(path, fm)))
        .collect();
    let notes = manifest
        .notes
        .par_iter()
        .filter_map(|path| fetch_and_parse(source, path).map(|fm| note_from(path, fm)))
        .collect();
    Metadata { books, notes }
}

/// Fetch one document and extract its front matter. Any failure drops the
/// document with a diagnostic line.
fn fetch_and_parse(source: &dyn DocumentSource, path: &str) -> Option<FrontMatter> {
    let text = match source.fetch(path) {
        Ok(text) => text,
        Err(err) => {
            log!("data"; "skipping {path}: {err}");
            return None;
        }
    };
    match extract_front_matter(&text) {
        Ok(fm) => Some(fm),
        Err(err) => {
            log!("data"; "skipping {path}: {err}");
            None
        }
    }
}

fn book_from(path: &str, fm: FrontMatter) -> Book {
    let a = &fm.attributes;
    let progress = a
        .get("progress")
        .and_then(AttributeValue::as_progress)
        .cloned();
    // Percent only exists when both counters are numeric and the total is
    // positive; everything else leaves it absent, not zero.
    let percent = progress.as_ref().and_then(|p| {
        let pages_read = p.get("pagesRead")?.as_num()?;
        let total_pages = p.get("totalPages")?.as_num()?;
        (total_pages > 0.0).then(|| (pages_read / total_pages * 100.0).round() as i64)
    });

    Book {
        id: derive_id(path),
        title: text_attr(a, "title"),
        authors: list_attr(a, "authors"),
        tags: list_attr(a, "tags"),
        start_date: text_attr(a, "startDate"),
        finish_date: text_attr(a, "finishDate"),
        percent,
        progress,
        body: fm.body,
    }
}

fn note_from(path: &str, fm: FrontMatter) -> Note {
    let a = &fm.attributes;
    Note {
        slug: derive_id(path),
        title: text_attr(a, "title"),
        date: text_attr(a, "date"),
        summary: text_attr(a, "summary"),
        tags: list_attr(a, "tags"),
        csv: text_attr(a, "csv"),
        body: fm.body,
    }
}

/// Final path segment without a trailing `.md`.
fn derive_id(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(".md").unwrap_or(name).to_string()
}

fn text_attr(attributes: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    attributes.get(key).and_then(AttributeValue::as_text)
}

/// List attribute, defaulting to empty when absent or not a list.
fn list_attr(attributes: &HashMap<String, AttributeValue>, key: &str) -> Vec<String> {
    attributes
        .get(key)
        .and_then(AttributeValue::as_list)
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
