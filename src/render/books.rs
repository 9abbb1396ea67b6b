//! Book list rows and the book detail page.

use super::{chip, page};
use crate::{config::SiteConfig, data::types::Book, router::Route, utils::html::html_escape};

/// Rows for the Books section of the home page.
pub fn render_books_list(books: &[Book]) -> String {
    let mut html = String::from("<div class=\"books-list\">");
    for book in books {
        html.push_str(&render_book_row(book));
    }
    html.push_str("</div>");
    html
}

fn render_book_row(book: &Book) -> String {
    let title = book.title.as_deref().unwrap_or("Untitled");
    let href = Route::BookDetail { id: book.id.clone() }.url_path();
    let mut row = format!(
        "<div class=\"book-row\"><a class=\"book-title\" href=\"{href}\">{}</a>",
        html_escape(title)
    );
    if let Some(percent) = book.percent {
        let percent = percent.clamp(0, 100);
        row.push_str(&format!(
            "<div class=\"progress-bar\"><div class=\"progress-fill\" \
             style=\"width:{percent}%\"></div></div>"
        ));
    }
    row.push_str("</div>");
    row
}

/// Full detail page for one book. Only the fields that are present get a
/// row, matching the listing metadata exactly (no long summary).
pub fn render_book_detail(config: &SiteConfig, book: &Book) -> String {
    let title = book.title.as_deref().unwrap_or("Untitled");
    let mut detail = format!("<div class=\"book-detail\"><h2>{}</h2>", html_escape(title));

    if !book.authors.is_empty() {
        detail.push_str(&format!(
            "<div><strong>Authors:</strong> {}</div>",
            html_escape(&book.authors.join(", "))
        ));
    }
    if let Some(start) = &book.start_date {
        detail.push_str(&format!(
            "<div><strong>Start:</strong> {}</div>",
            html_escape(start)
        ));
    }
    if let Some(finish) = &book.finish_date {
        detail.push_str(&format!(
            "<div><strong>Finish:</strong> {}</div>",
            html_escape(finish)
        ));
    }
    if let Some(percent) = book.percent {
        detail.push_str(&format!(
            "<div><strong>Progress:</strong> {}%</div>",
            percent.clamp(0, 100)
        ));
    }
    if !book.tags.is_empty() {
        let chips: String = book.tags.iter().map(|t| chip(t, false)).collect();
        detail.push_str(&format!("<div><strong>Tags:</strong> {chips}</div>"));
    }
    detail.push_str("</div>");

    page(config, title, &detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: Option<&str>, percent: Option<i64>) -> Book {
        Book {
            id: "b1".to_string(),
            title: title.map(str::to_string),
            percent,
            ..Default::default()
        }
    }

    #[test]
    fn test_row_links_to_detail_page() {
        let html = render_books_list(&[book(Some("Dune"), Some(42))]);
        assert!(html.contains("href=\"/books/b1/\""));
        assert!(html.contains(">Dune</a>"));
    }

    #[test]
    fn test_row_progress_clamped() {
        let html = render_books_list(&[book(Some("x"), Some(250))]);
        assert!(html.contains("width:100%"));
        let html = render_books_list(&[book(Some("x"), Some(-5))]);
        assert!(html.contains("width:0%"));
    }

    #[test]
    fn test_row_without_percent_has_no_bar() {
        let html = render_books_list(&[book(Some("x"), None)]);
        assert!(!html.contains("progress-bar"));
    }

    #[test]
    fn test_missing_title_falls_back_to_untitled() {
        let html = render_books_list(&[book(None, None)]);
        assert!(html.contains(">Untitled</a>"));
    }

    #[test]
    fn test_detail_conditional_rows() {
        let config = SiteConfig::from_str("").unwrap();
        let mut b = book(Some("Dune"), Some(42));
        b.authors = vec!["Frank Herbert".to_string()];
        b.tags = vec!["scifi".to_string()];
        let html = render_book_detail(&config, &b);
        assert!(html.contains("Authors:"));
        assert!(html.contains("Frank Herbert"));
        assert!(html.contains("Progress:"));
        assert!(html.contains("scifi"));
        assert!(!html.contains("Start:"));
        assert!(!html.contains("Finish:"));
    }

    #[test]
    fn test_detail_escapes_title() {
        let config = SiteConfig::from_str("").unwrap();
        let html = render_book_detail(&config, &book(Some("<img>"), None));
        assert!(html.contains("&lt;img&gt;"));
        assert!(!html.contains("<img>"));
    }
}
