//! Typed records, loading and ordering for the reading-tracker dataset.
//!
//! `loader` turns the manifest + per-document front matter into the `types`
//! records; `sort` holds the pure ordering/filtering functions the page
//! renderers consume.

pub mod loader;
pub mod sort;
pub mod types;
