//! Note cards and the note detail (reader) page.

use super::{chip, page};
use crate::{
    config::SiteConfig, data::types::Note, markdown::render_markdown, router::Route,
    utils::date::DateTimeUtc, utils::html::html_escape,
};

/// Body snippet length on note cards.
const SNIPPET_LEN: usize = 200;

/// At most this many tag chips are shown per card.
const MAX_CARD_TAGS: usize = 6;

/// Cards for the Notes section of the home page.
pub fn render_notes_list(notes: &[Note]) -> String {
    let mut html = String::from("<div class=\"notes-list\">");
    for note in notes {
        html.push_str(&render_note_card(note));
    }
    html.push_str("</div>");
    html
}

fn render_note_card(note: &Note) -> String {
    let title = note.title.as_deref().unwrap_or("Untitled");
    let mut card = format!(
        "<div class=\"note-card\"><div class=\"note-header\">\
         <div class=\"note-title\">{}</div>",
        html_escape(title)
    );
    if let Some(date) = display_date(note) {
        card.push_str(&format!("<div class=\"note-date\">{date}</div>"));
    }
    card.push_str("</div>");

    if let Some(summary) = &note.summary {
        card.push_str(&format!(
            "<div class=\"note-summary\">{}</div>",
            html_escape(summary)
        ));
    }
    if !note.body.is_empty() {
        card.push_str(&format!(
            "<div class=\"note-snippet\">{}</div>",
            html_escape(&snippet(&note.body))
        ));
    }

    let href = Route::NoteDetail { slug: note.slug.clone() }.url_path();
    card.push_str(&format!("<a class=\"btn\" href=\"{href}\">Read full</a>"));

    if !note.tags.is_empty() {
        let chips: String = note
            .tags
            .iter()
            .take(MAX_CARD_TAGS)
            .map(|t| chip(t, false))
            .collect();
        card.push_str(&format!("<div class=\"note-tags\">{chips}</div>"));
    }
    card.push_str("</div>");
    card
}

/// First 200 characters of the body with newline runs collapsed to spaces;
/// an ellipsis marks truncation.
fn snippet(body: &str) -> String {
    let flattened = body
        .split('\n')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut text: String = flattened.chars().take(SNIPPET_LEN).collect();
    if body.chars().count() > SNIPPET_LEN {
        text.push('…');
    }
    text
}

fn display_date(note: &Note) -> Option<String> {
    let raw = note.date.as_deref()?;
    Some(match DateTimeUtc::parse(raw) {
        Some(dt) => dt.to_display_date(),
        None => html_escape(raw).into_owned(),
    })
}

/// Reader-mode page: title, date and the full markdown body, plus an
/// optional CSV table rendered below it.
pub fn render_note_detail(config: &SiteConfig, note: &Note, csv_html: Option<&str>) -> String {
    let title = note.title.as_deref().unwrap_or("Untitled");
    let mut detail = format!("<div class=\"note-detail\"><h2>{}</h2>", html_escape(title));
    if let Some(date) = display_date(note) {
        detail.push_str(&format!("<div class=\"note-date\">{date}</div>"));
    }
    if !note.body.is_empty() {
        detail.push_str(&format!(
            "<div class=\"note-body\">{}</div>",
            render_markdown(&note.body)
        ));
    }
    if let Some(table) = csv_html {
        detail.push_str(table);
    }
    detail.push_str("</div>");

    page(config, title, &detail)
}
