//! Display ordering and tag filtering.
//!
//! Books partition into Reading / Finished / Unread buckets derived from
//! `percent` and `finishDate`; Unread is hidden from listings entirely.

use crate::{
    data::types::{Book, Note},
    utils::date::DateTimeUtc,
};
use std::cmp::Ordering;

/// Anything that carries tags and can be filtered.
pub trait Taggable {
    fn tags(&self) -> &[String];
}

impl Taggable for Book {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Taggable for Note {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Keep items sharing at least one tag with the selection (OR semantics).
///
/// An empty selection is the identity: the input comes back untouched.
/// With a non-empty selection, untagged items are excluded.
pub fn filter_by_tags<T: Taggable>(items: Vec<T>, selected: &[String]) -> Vec<T> {
    if selected.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.tags().iter().any(|tag| selected.contains(tag)))
        .collect()
}

/// Order books Reading first (percent desc), then Finished (finish date
/// desc). Unread books (no percent or zero, no finish date) are omitted.
pub fn sort_books(books: Vec<Book>) -> Vec<Book> {
    let mut reading = Vec::new();
    let mut finished = Vec::new();
    for book in books {
        match book.percent {
            Some(p) if p > 0 && p < 100 => reading.push(book),
            _ if book.percent == Some(100) || book.finish_date.is_some() => finished.push(book),
            _ => {} // Unread: hidden by default
        }
    }

    reading.sort_by(|a, b| percent_of(b).cmp(&percent_of(a)));
    finished.sort_by(|a, b| match (&a.finish_date, &b.finish_date) {
        (Some(da), Some(db)) => match (DateTimeUtc::parse(db), DateTimeUtc::parse(da)) {
            (Some(db), Some(da)) => db.cmp(&da),
            // unparseable dates keep their relative order
            _ => Ordering::Equal,
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => percent_of(b).cmp(&percent_of(a)),
    });

    reading.extend(finished);
    reading
}

/// Order notes by date descending; notes without a parseable date sort last.
pub fn sort_notes(notes: Vec<Note>) -> Vec<Note> {
    let mut notes = notes;
    notes.sort_by(|a, b| date_of(b).cmp(&date_of(a)));
    notes
}

fn percent_of(book: &Book) -> i64 {
    book.percent.unwrap_or(0)
}

fn date_of(note: &Note) -> Option<DateTimeUtc> {
    note.date.as_deref().and_then(DateTimeUtc::parse)
}
