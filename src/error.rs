//! Error kinds for the data-loading pipeline.
//!
//! Failure policy (see also `data::loader`):
//! - per-document errors are logged and the document is dropped from its
//!   collection, never surfaced to the user individually
//! - manifest/taxonomy errors are fatal for the whole build
//! - there is no retry anywhere; every failure is terminal for its unit of work

use thiserror::Error;

/// Data-pipeline errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// Document does not start with a well-formed `---` delimited header.
    #[error("Malformed front matter")]
    MalformedFrontMatter,

    /// A required resource (manifest, taxonomy) is missing.
    #[error("{0} not found")]
    ResourceNotFound(&'static str),

    /// tags.json exists but `categories` is neither an array nor an object.
    #[error("Malformed tags.json")]
    MalformedTaxonomy,

    /// Generic retrieval or decode failure.
    #[error("Failed to load {0}")]
    LoadFailure(String),
}
