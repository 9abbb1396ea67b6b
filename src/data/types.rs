//! Record types for books, notes and the tag taxonomy.

use crate::frontmatter::ProgressMap;
use serde::Serialize;

/// Document index: relative paths of every known book and note file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub books: Vec<String>,
    pub notes: Vec<String>,
}

/// A tracked book, normalized from one markdown document.
///
/// `id` is derived from the source path (file name without `.md`) and is the
/// join key the navigation layer uses. `percent` is computed from `progress`
/// at load time, never stored in the source.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub percent: Option<i64>,
    #[serde(skip)]
    pub progress: Option<ProgressMap>,
    #[serde(skip)]
    pub body: String,
}

/// A note, normalized from one markdown document. `slug` mirrors `Book::id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub slug: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    /// Relative path of a CSV file rendered as a table under the body.
    pub csv: Option<String>,
    #[serde(skip)]
    pub body: String,
}

/// One named group of the tag taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCategory {
    pub name: String,
    pub tags: Vec<String>,
}

/// Everything `load_all_metadata` produces.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub books: Vec<Book>,
    pub notes: Vec<Note>,
}
