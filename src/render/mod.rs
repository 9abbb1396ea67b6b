//! HTML page builders for the generated site.
//!
//! `home` builds the index page, `books` and `notes` the detail pages.
//! Everything is plain string assembly; user-supplied text goes through
//! `html_escape` at the point it is interpolated.

pub mod books;
pub mod home;
pub mod notes;

use crate::{config::SiteConfig, utils::html::html_escape};

const STYLESHEET: &str = "\
:root{--color-primary:#1e293b;--color-bg:#fff;--color-bg-alt:#f8fafc;}\
body{font-family:system-ui,sans-serif;color:#222;background:var(--color-bg);margin:0;}\
a{color:inherit;}\
.page{max-width:900px;margin:2.5rem auto 2rem auto;padding:0 1.5rem;}\
.page-title{font-size:2.5rem;font-weight:800;letter-spacing:-0.02em;margin:0;color:var(--color-primary);}\
.main-section{background:var(--color-bg-alt);border-radius:1.2rem;box-shadow:0 2px 12px 0 rgba(0,0,0,0.04);padding:2rem 1.5rem 1.5rem 1.5rem;margin-bottom:2.5rem;}\
.section-title{font-size:1.5rem;font-weight:700;margin:0 0 1.2rem 0;}\
.book-row{display:flex;align-items:center;gap:1em;padding:0.5em 0;}\
.book-title{font-weight:600;text-decoration:none;}\
.book-title:hover{text-decoration:underline;}\
.progress-bar{flex:0 0 120px;height:8px;background:#e2e8f0;border-radius:4px;overflow:hidden;}\
.progress-fill{height:100%;background:#2563eb;}\
.note-card{background:#fff;border-radius:0.8rem;box-shadow:0 1px 6px 0 rgba(0,0,0,0.06);padding:1.2rem;margin-bottom:1.2rem;}\
.note-header{display:flex;justify-content:space-between;align-items:baseline;}\
.note-title{font-weight:700;}\
.note-date{color:#64748b;font-size:0.9rem;}\
.note-summary{margin:0.5em 0;color:#334155;}\
.note-snippet{color:#64748b;font-size:0.95rem;margin:0.5em 0;}\
.note-tags{margin-top:0.6em;}\
.btn{display:inline-block;margin-top:0.6em;text-decoration:none;font-weight:600;color:#2563eb;}\
.chip{display:inline-block;background:#e2e8f0;border-radius:1em;padding:0.15em 0.7em;margin:0 0.3em 0.3em 0;font-size:0.85rem;}\
.chip.selected{background:#2563eb;color:#fff;}\
.tag-category{margin-bottom:0.4em;}\
.tag-category-name{font-weight:600;margin-right:0.5em;}\
.book-detail div,.note-detail .note-date{margin:0.4em 0;}\
.error-block{color:#b91c1c;font-weight:600;padding:2rem;text-align:center;}";

/// Wrap a body fragment in the full page shell.
pub fn page(config: &SiteConfig, title: &str, body: &str) -> String {
    let site_title = html_escape(&config.base.title);
    let page_title = if title.is_empty() {
        site_title.to_string()
    } else {
        format!("{} | {site_title}", html_escape(title))
    };
    let description = html_escape(&config.base.description);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <title>{page_title}</title>\n<style>{STYLESHEET}</style>\n</head>\n\
         <body>\n<div class=\"page\">\n{body}\n</div>\n</body>\n</html>\n"
    )
}

/// Full-page error state, also used for the 404 page.
pub fn render_error(config: &SiteConfig, message: &str) -> String {
    let body = format!("<div class=\"error-block\">{}</div>", html_escape(message));
    page(config, "Not found", &body)
}

/// A single tag chip, highlighted when selected.
pub(crate) fn chip(tag: &str, selected: bool) -> String {
    let class = if selected { "chip selected" } else { "chip" };
    format!("<span class=\"{class}\">{}</span>", html_escape(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shell_escapes_title() {
        let mut config = SiteConfig::from_str("").unwrap();
        config.base.title = "A <b>Site</b>".to_string();
        let html = page(&config, "", "<p>hi</p>");
        assert!(html.contains("A &lt;b&gt;Site&lt;/b&gt;"));
        assert!(html.contains("<p>hi</p>"));
    }

    #[test]
    fn test_page_title_composition() {
        let config = SiteConfig::from_str("").unwrap();
        let html = page(&config, "Dune", "");
        assert!(html.contains("<title>Dune | ReadStack</title>"));
    }

    #[test]
    fn test_error_page() {
        let config = SiteConfig::from_str("").unwrap();
        let html = render_error(&config, "Not found");
        assert!(html.contains("error-block"));
        assert!(html.contains("Not found"));
    }

    #[test]
    fn test_chip_selected_class() {
        assert!(chip("rust", true).contains("chip selected"));
        assert!(!chip("rust", false).contains("selected"));
    }
}
