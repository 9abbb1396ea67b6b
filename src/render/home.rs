//! Home page: header, tag filter, Books and Notes sections.

use super::{books::render_books_list, chip, notes::render_notes_list, page};
use crate::{
    config::SiteConfig,
    data::types::{Book, Note, TagCategory},
    utils::html::html_escape,
};

/// Build the index page. `books` and `notes` are expected already filtered
/// and sorted; `selected` only affects which chips are highlighted.
pub fn render_home(
    config: &SiteConfig,
    categories: &[TagCategory],
    books: &[Book],
    notes: &[Note],
    selected: &[String],
) -> String {
    let mut body = format!(
        "<header><h1 class=\"page-title\">{}</h1>{}</header>",
        html_escape(&config.base.title),
        render_tag_filter(categories, selected)
    );

    body.push_str(&format!(
        "<section id=\"books-section\" class=\"main-section\">\
         <h2 class=\"section-title\">Books</h2>{}</section>",
        render_books_list(books)
    ));
    body.push_str(&format!(
        "<section id=\"notes-section\" class=\"main-section\">\
         <h2 class=\"section-title\">Notes</h2>{}</section>",
        render_notes_list(notes)
    ));

    page(config, "", &body)
}

fn render_tag_filter(categories: &[TagCategory], selected: &[String]) -> String {
    if categories.iter().all(|c| c.tags.is_empty()) {
        return String::new();
    }
    let mut html = String::from("<div id=\"tag-filter\">");
    for category in categories {
        if category.tags.is_empty() {
            continue;
        }
        let chips: String = category
            .tags
            .iter()
            .map(|tag| chip(tag, selected.contains(tag)))
            .collect();
        html.push_str(&format!(
            "<div class=\"tag-category\"><span class=\"tag-category-name\">{}</span>{chips}</div>",
            html_escape(&category.name)
        ));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<TagCategory> {
        vec![TagCategory {
            name: "Topic".to_string(),
            tags: vec!["rust".to_string(), "scifi".to_string()],
        }]
    }

    #[test]
    fn test_home_has_both_sections() {
        let config = SiteConfig::from_str("").unwrap();
        let html = render_home(&config, &categories(), &[], &[], &[]);
        assert!(html.contains("id=\"books-section\""));
        assert!(html.contains("id=\"notes-section\""));
        assert!(html.contains(">Books</h2>"));
        assert!(html.contains(">Notes</h2>"));
    }

    #[test]
    fn test_selected_tags_highlighted() {
        let config = SiteConfig::from_str("").unwrap();
        let selected = ["rust".to_string()];
        let html = render_home(&config, &categories(), &[], &[], &selected);
        assert!(html.contains("<span class=\"chip selected\">rust</span>"));
        assert!(html.contains("<span class=\"chip\">scifi</span>"));
    }

    #[test]
    fn test_empty_taxonomy_hides_filter() {
        let config = SiteConfig::from_str("").unwrap();
        let html = render_home(&config, &[], &[], &[], &[]);
        assert!(!html.contains("tag-filter"));
    }
}
