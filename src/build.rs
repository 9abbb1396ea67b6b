//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── load manifest + taxonomy (fatal on failure)
//!     ├── load all document metadata (bad documents dropped, logged)
//!     ├── filter + sort listings by the selected tags
//!     ├── write index.html
//!     ├── write books/<id>/ and notes/<slug>/ detail pages (rayon)
//!     └── write 404.html
//! ```

use crate::{
    config::SiteConfig,
    csv::{parse_csv, render_csv_error, render_csv_table},
    data::{
        loader::{DocumentSource, FsSource, load_all_metadata, load_manifest, load_tags},
        sort::{filter_by_tags, sort_books, sort_notes},
        types::{Book, Note},
    },
    log,
    render::{
        books::render_book_detail, home::render_home, notes::render_note_detail, render_error,
    },
    router::Route,
    state::SelectedTags,
    utils::minify::minify_page,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Build the entire site into `config.build.output`.
///
/// Manifest or taxonomy failures abort the build; individual documents that
/// fail to load or parse are dropped from the listings, already logged by
/// the loader. Detail pages are written for every loaded document, even
/// ones a tag selection hides from the index.
pub fn build_site(config: &'static SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if config.get_cli().build_args().clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let source = FsSource::new(&config.build.data);
    let manifest = load_manifest(&source, &data_file_name(config, &config.build.manifest))?;
    let categories = load_tags(&source, &data_file_name(config, &config.build.tags))?;
    log!(
        "data";
        "manifest lists {} books, {} notes",
        manifest.books.len(),
        manifest.notes.len()
    );

    let metadata = load_all_metadata(&source, &manifest);

    let selection = SelectedTags::new();
    selection.subscribe(|tags| {
        if !tags.is_empty() {
            log!("build"; "filtering listings by tags: {}", tags.join(", "));
        }
    });
    selection.set(&config.get_cli().selected_tags());
    let selected = selection.get();

    let books = sort_books(filter_by_tags(metadata.books.clone(), &selected));
    let notes = sort_notes(filter_by_tags(metadata.notes.clone(), &selected));

    write_page(
        config,
        &output.join("index.html"),
        &render_home(config, &categories, &books, &notes, &selected),
    )?;

    metadata
        .books
        .par_iter()
        .try_for_each(|book| write_book_page(config, output, book))?;
    metadata
        .notes
        .par_iter()
        .try_for_each(|note| write_note_page(config, &source, output, note))?;

    write_page(
        config,
        &output.join("404.html"),
        &render_error(config, "Not found"),
    )?;

    log!(
        "build";
        "wrote {} pages to {}",
        2 + metadata.books.len() + metadata.notes.len(),
        output.display()
    );
    Ok(())
}

fn write_book_page(config: &SiteConfig, output: &Path, book: &Book) -> Result<()> {
    let path = page_file(output, &Route::BookDetail { id: book.id.clone() });
    write_page(config, &path, &render_book_detail(config, book))
}

fn write_note_page(
    config: &SiteConfig,
    source: &FsSource,
    output: &Path,
    note: &Note,
) -> Result<()> {
    let csv_html = note.csv.as_deref().map(|csv_path| match source.fetch(csv_path) {
        Ok(content) => render_csv_table(&parse_csv(&content), true),
        Err(err) => {
            log!("data"; "csv for note {}: {err}", note.slug);
            render_csv_error()
        }
    });

    let path = page_file(output, &Route::NoteDetail { slug: note.slug.clone() });
    write_page(
        config,
        &path,
        &render_note_detail(config, note, csv_html.as_deref()),
    )
}

/// Output file backing a route: `/books/x/` becomes `books/x/index.html`.
fn page_file(output: &Path, route: &Route) -> PathBuf {
    let rel = route.url_path();
    let rel = rel.trim_matches('/');
    if rel.ends_with(".html") {
        output.join(rel)
    } else {
        output.join(rel).join("index.html")
    }
}

fn write_page(config: &SiteConfig, path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = minify_page(html.as_bytes(), config);
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Manifest/taxonomy path relative to the data directory, as the loader
/// expects. Config normalization joined them onto `data` earlier.
fn data_file_name(config: &SiteConfig, path: &Path) -> String {
    path.strip_prefix(&config.build.data)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn static_config(root: &Path, extra_args: &[&str]) -> &'static SiteConfig {
        let mut args = vec!["readstack", "--root", root.to_str().unwrap(), "build"];
        args.extend_from_slice(extra_args);
        let cli: &'static Cli = Box::leak(Box::new(Cli::parse_from(args)));
        let mut config = SiteConfig::default();
        config.update_with_cli(cli);
        Box::leak(Box::new(config))
    }

    fn write_fixture(root: &Path) {
        let data = root.join("data");
        fs::create_dir_all(data.join("books")).unwrap();
        fs::create_dir_all(data.join("notes")).unwrap();
        fs::write(
            data.join("manifest.json"),
            r#"{"books": ["books/dune.md"], "notes": ["notes/review.md"]}"#,
        )
        .unwrap();
        fs::write(data.join("tags.json"), r#"{"categories": ["scifi", "rust"]}"#).unwrap();
        fs::write(
            data.join("books/dune.md"),
            "---\ntitle: Dune\ntags: [scifi]\nprogress: { pagesRead: 100, totalPages: 400 }\n---\n",
        )
        .unwrap();
        fs::write(
            data.join("notes/review.md"),
            "---\ntitle: Review\ndate: 2024-06-01\ntags: [rust]\ncsv: tables/dbs.csv\n---\n# Notes\nBody text.\n",
        )
        .unwrap();
        fs::create_dir_all(data.join("tables")).unwrap();
        fs::write(data.join("tables/dbs.csv"), "Name,Kind\nredb,embedded\n").unwrap();
    }

    #[test]
    fn test_build_writes_all_pages() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let config = static_config(dir.path(), &[]);

        build_site(config).unwrap();

        let output = &config.build.output;
        assert!(output.join("index.html").is_file());
        assert!(output.join("books/dune/index.html").is_file());
        assert!(output.join("notes/review/index.html").is_file());
        assert!(output.join("404.html").is_file());

        let index = fs::read_to_string(output.join("index.html")).unwrap();
        assert!(index.contains("Dune"));
        assert!(index.contains("Review"));

        let note = fs::read_to_string(output.join("notes/review/index.html")).unwrap();
        assert!(note.contains("<table"));
        assert!(note.contains("redb"));
    }

    #[test]
    fn test_build_tag_selection_filters_index_not_detail_pages() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let config = static_config(dir.path(), &["--tags", "rust"]);

        build_site(config).unwrap();

        let index = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(index.contains("Review"));
        assert!(!index.contains("href=\"/books/dune/\""));
        // the hidden book still gets its detail page
        assert!(config.build.output.join("books/dune/index.html").is_file());
    }

    #[test]
    fn test_build_fails_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        let config = static_config(dir.path(), &[]);

        let err = build_site(config).unwrap_err();
        assert!(err.to_string().contains("Manifest not found"));
    }

    #[test]
    fn test_build_missing_csv_renders_error_paragraph() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::remove_file(dir.path().join("data/tables/dbs.csv")).unwrap();
        let config = static_config(dir.path(), &[]);

        build_site(config).unwrap();
        let note =
            fs::read_to_string(config.build.output.join("notes/review/index.html")).unwrap();
        assert!(note.contains("Failed to load table data"));
    }

    #[test]
    fn test_build_minify_shrinks_output() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let plain = static_config(dir.path(), &[]);
        build_site(plain).unwrap();
        let plain_len = fs::metadata(plain.build.output.join("index.html")).unwrap().len();

        let minified = static_config(dir.path(), &["--minify"]);
        build_site(minified).unwrap();
        let min_len = fs::metadata(minified.build.output.join("index.html")).unwrap().len();

        assert!(min_len < plain_len);
    }
}
