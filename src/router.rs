//! Fragment-based navigation scheme shared by pages and the renderers.
//!
//! Three recognized shapes: root/home, `#/books/<id>` and `#/notes/<slug>`.
//! Anything else resolves to not-found; parsing never fails.

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    BookDetail { id: String },
    NoteDetail { slug: String },
    NotFound,
}

static BOOK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#/books/([^/]+)$").unwrap());
static NOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#/notes/([^/]+)$").unwrap());

impl Route {
    /// Resolve a location fragment. An empty fragment is home.
    pub fn parse(fragment: &str) -> Self {
        let fragment = if fragment.is_empty() { "#/" } else { fragment };
        if fragment == "#" || fragment == "#/" {
            return Route::Home;
        }
        if let Some(caps) = BOOK.captures(fragment) {
            return Route::BookDetail { id: caps[1].to_string() };
        }
        if let Some(caps) = NOTE.captures(fragment) {
            return Route::NoteDetail { slug: caps[1].to_string() };
        }
        Route::NotFound
    }

    /// Fragment this route is addressed by, used when emitting links.
    pub fn href(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::BookDetail { id } => format!("#/books/{id}"),
            Route::NoteDetail { slug } => format!("#/notes/{slug}"),
            Route::NotFound => "#/404".to_string(),
        }
    }

    /// Site-relative URL of the generated page for this route.
    pub fn url_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::BookDetail { id } => format!("/books/{id}/"),
            Route::NoteDetail { slug } => format!("/notes/{slug}/"),
            Route::NotFound => "/404.html".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_variants() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#"), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
    }

    #[test]
    fn test_book_detail() {
        assert_eq!(
            Route::parse("#/books/dune"),
            Route::BookDetail { id: "dune".to_string() }
        );
    }

    #[test]
    fn test_note_detail() {
        assert_eq!(
            Route::parse("#/notes/2024-review"),
            Route::NoteDetail { slug: "2024-review".to_string() }
        );
    }

    #[test]
    fn test_unknown_is_not_found_never_error() {
        assert_eq!(Route::parse("#/books/"), Route::NotFound);
        assert_eq!(Route::parse("#/books/a/b"), Route::NotFound);
        assert_eq!(Route::parse("#/shelves/x"), Route::NotFound);
        assert_eq!(Route::parse("garbage"), Route::NotFound);
    }

    #[test]
    fn test_url_path() {
        assert_eq!(Route::Home.url_path(), "/");
        assert_eq!(
            Route::BookDetail { id: "dune".to_string() }.url_path(),
            "/books/dune/"
        );
        assert_eq!(
            Route::NoteDetail { slug: "x".to_string() }.url_path(),
            "/notes/x/"
        );
    }

    #[test]
    fn test_href_round_trip() {
        for route in [
            Route::Home,
            Route::BookDetail { id: "abc".to_string() },
            Route::NoteDetail { slug: "xyz".to_string() },
        ] {
            assert_eq!(Route::parse(&route.href()), route);
        }
    }
}
