// src/document.rs
use std::{collections::BTreeMap, fmt};

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::core::catalog;

/// Passage number -> text.
pub type Chapter = BTreeMap<u32, String>;
/// Chapter number -> passages.
pub type Book = BTreeMap<u32, Chapter>;

pub const INFO_KEY: &str = "Info";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Translation")]
    pub translation: String,
}

/// `Info` header plus book -> chapter -> passage text.
///
/// Serialized as one flat map: `{"Info": {...}, "<Book>": {<ch>: {<p>: text}}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub info: Info,
    pub books: BTreeMap<String, Book>,
}

impl Document {
    /// Empty document for `translation` with the language filled in from the catalog.
    pub fn new(translation: &str) -> Self {
        let translation = translation.to_uppercase();
        Self {
            info: Info { language: s!(catalog::language(&translation)), translation },
            books: BTreeMap::new(),
        }
    }

    /// Make sure `book` has an entry, even if it stays empty.
    pub fn ensure_book(&mut self, book: &str) -> &mut Book {
        self.books.entry(s!(book)).or_default()
    }

    pub fn insert_chapter(&mut self, book: &str, chapter: u32, passages: Chapter) {
        self.ensure_book(book).insert(chapter, passages);
    }

    pub fn insert_passage(&mut self, book: &str, chapter: u32, passage: u32, text: String) {
        self.ensure_book(book).entry(chapter).or_default().insert(passage, text);
    }

    pub fn book(&self, name: &str) -> Option<&Book> {
        self.books.get(name)
    }

    /// No passages anywhere.
    pub fn is_empty(&self) -> bool {
        self.books.values().all(|b| b.values().all(|c| c.is_empty()))
    }

    /// Every passage as `(book, chapter, passage, text)`, in key order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, u32, u32, &str)> {
        self.books.iter().flat_map(|(book, chapters)| {
            chapters.iter().flat_map(move |(c, passages)| {
                passages.iter().map(move |(p, text)| (book.as_str(), *c, *p, text.as_str()))
            })
        })
    }

    /// Rewrite every passage text with `f`.
    pub fn map_text(&mut self, f: impl Fn(&str) -> String) {
        for text in self.books.values_mut().flat_map(|b| b.values_mut()).flat_map(|c| c.values_mut()) {
            *text = f(text.as_str());
        }
    }

    /// Trim every passage in place.
    pub fn strip_whitespace(&mut self) {
        self.map_text(|t| s!(t.trim()));
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.books.len() + 1))?;
        map.serialize_entry(INFO_KEY, &self.info)?;
        for (book, chapters) in &self.books {
            map.serialize_entry(book, chapters)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map with an Info entry and book entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Document, A::Error> {
        let mut info = None;
        let mut books = BTreeMap::new();
        while let Some(key) = access.next_key::<String>()? {
            if key == INFO_KEY {
                if info.is_some() {
                    return Err(de::Error::duplicate_field(INFO_KEY));
                }
                info = Some(access.next_value::<Info>()?);
            } else {
                books.insert(key, access.next_value::<Book>()?);
            }
        }
        let info = info.ok_or_else(|| de::Error::missing_field(INFO_KEY))?;
        Ok(Document { info, books })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_info() {
        let d = Document::new("rva");
        assert_eq!(d.info, Info { language: s!("Español"), translation: s!("RVA") });
        assert!(d.is_empty());
    }

    #[test]
    fn rows_are_ordered() {
        let mut d = Document::new("NIV");
        d.insert_passage("Ruth", 2, 1, s!("b"));
        d.insert_passage("Ruth", 1, 10, s!("a2"));
        d.insert_passage("Ruth", 1, 9, s!("a1"));
        let got: Vec<_> = d.rows().map(|(_, c, p, _)| (c, p)).collect();
        assert_eq!(got, vec![(1, 9), (1, 10), (2, 1)]);
    }

    #[test]
    fn strip_trims_each_passage() {
        let mut d = Document::new("NIV");
        d.insert_passage("Jude", 1, 1, s!("  x \n"));
        d.strip_whitespace();
        assert_eq!(d.books["Jude"][&1][&1], "x");
    }
}
