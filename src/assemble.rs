// src/assemble.rs
//
// Merges fetched chapters into a document or a flat text / list.

use crate::{document::Document, scrape::FetchedChapter};

/// Flattened extraction result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Text(String),
    List(Vec<String>),
}

impl Output {
    pub fn is_empty(&self) -> bool {
        match self {
            Output::Text(t) => t.is_empty(),
            Output::List(v) => v.is_empty(),
        }
    }

    /// Apply `f` to the text, or to every list element.
    pub fn map(self, f: impl Fn(&str) -> String) -> Self {
        match self {
            Output::Text(t) => Output::Text(f(t.as_str())),
            Output::List(v) => Output::List(v.iter().map(|s| f(s.as_str())).collect()),
        }
    }
}

/// Document for `book` in `translation`, chapters keyed by number.
/// The book entry exists even when no chapters were fetched.
pub fn build_document(book: &str, translation: &str, chapters: Vec<FetchedChapter>) -> Document {
    let mut doc = Document::new(translation);
    doc.ensure_book(book);
    for ch in chapters {
        doc.insert_chapter(book, ch.chapter, ch.passages);
    }
    doc
}

/// Each chapter's passages run together and end with a newline; the whole is trimmed.
pub fn flatten_text<'a, I>(chapters: I) -> String
where
    I: IntoIterator<Item = &'a crate::document::Chapter>,
{
    let mut out = String::new();
    for passages in chapters {
        for text in passages.values() {
            out.push_str(text);
        }
        out.push('\n');
    }
    s!(out.trim())
}

/// Every passage in order, optionally trimmed.
pub fn flatten_list<'a, I>(chapters: I, strip: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a crate::document::Chapter>,
{
    chapters
        .into_iter()
        .flat_map(|c| c.values())
        .map(|t| if strip { s!(t.trim()) } else { t.clone() })
        .collect()
}

/// Text or list, per `as_list`.
pub fn flatten<'a, I>(chapters: I, as_list: bool, strip: bool) -> Output
where
    I: IntoIterator<Item = &'a crate::document::Chapter>,
{
    if as_list {
        Output::List(flatten_list(chapters, strip))
    } else {
        Output::Text(flatten_text(chapters))
    }
}
