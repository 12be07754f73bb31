// src/source/memory.rs
use crate::{
    core::numbers::remove_superscript_numbers,
    document::Document,
    error::Result,
    range::FetchUnit,
};

use super::PassageSource;

/// Serves passages out of an in-memory document.
///
/// Empty placeholders are skipped, so the output looks like a source that
/// omits those verses. Ranges past the chapter end are cut short.
#[derive(Clone, Debug)]
pub struct DocumentSource {
    document: Document,
}

impl DocumentSource {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl PassageSource for DocumentSource {
    fn fetch(&self, unit: &FetchUnit, _translation: &str, show_numbers: bool) -> Result<Vec<String>> {
        if unit.passage_from > unit.passage_to {
            return Ok(Vec::new());
        }
        let Some(chapter) = self
            .document
            .book(&unit.book)
            .and_then(|b| b.get(&unit.chapter))
        else {
            return Ok(Vec::new());
        };

        Ok(chapter
            .range(unit.passage_from..=unit.passage_to)
            .filter(|(_, text)| !text.is_empty())
            .map(|(_, text)| {
                if show_numbers { text.clone() } else { remove_superscript_numbers(text) }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_placeholders_and_caps_range() {
        let mut d = Document::new("ASV");
        d.insert_passage("Romans", 16, 23, s!("²³ a"));
        d.insert_passage("Romans", 16, 24, s!());
        d.insert_passage("Romans", 16, 25, s!("²⁵ c"));
        let src = DocumentSource::new(d);

        let got = src.fetch(&FetchUnit::new("Romans", 16, 23, 9000), "ASV", false).unwrap();
        assert_eq!(got, vec![s!("a"), s!("c")]);

        let none = src.fetch(&FetchUnit::new("Romans", 16, 26, 9000), "ASV", true).unwrap();
        assert!(none.is_empty());
    }
}
