// src/range.rs
//
// Turns a raw passage range into ordered per-chapter fetch units.

use crate::config::consts::SENTINEL_MAX;
use crate::core::address::{cap_chapter, cap_passage};

/// A request as the caller wrote it. Numbers are raw and may be out of range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassageRange {
    pub book: String,
    pub chapter_from: i64,
    pub passage_from: i64,
    pub chapter_to: i64,
    pub passage_to: i64,
}

impl PassageRange {
    pub fn new(book: &str, chapter_from: i64, passage_from: i64, chapter_to: i64, passage_to: i64) -> Self {
        Self { book: s!(book), chapter_from, passage_from, chapter_to, passage_to }
    }

    /// Split into fetch units for a book with `chapter_count` chapters.
    ///
    /// A range inside one chapter becomes a single unit. A wider range becomes
    /// head (rest of the first chapter), every middle chapter in full, and tail
    /// (start of the last chapter). Reversed ranges produce no units.
    pub fn stitch(&self, chapter_count: u32) -> Vec<FetchUnit> {
        let cf = cap_chapter(self.chapter_from, chapter_count);
        let ct = cap_chapter(self.chapter_to, chapter_count);
        let pf = cap_passage(self.passage_from);
        let pt = cap_passage(self.passage_to);

        let unit = |chapter, from, to| FetchUnit::new(&self.book, chapter, from, to);

        if cf == ct {
            return if pt < pf { Vec::new() } else { vec![unit(cf, pf, pt)] };
        }
        if ct < cf {
            return Vec::new();
        }

        let mut units = Vec::with_capacity((ct - cf + 1) as usize);
        units.push(unit(cf, pf, SENTINEL_MAX));
        units.extend((cf + 1..ct).map(|c| unit(c, 1, SENTINEL_MAX)));
        units.push(unit(ct, 1, pt));
        units
    }
}

/// One contiguous request inside a single chapter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchUnit {
    pub book: String,
    pub chapter: u32,
    pub passage_from: u32,
    pub passage_to: u32,
}

impl FetchUnit {
    pub fn new(book: &str, chapter: u32, passage_from: u32, passage_to: u32) -> Self {
        Self { book: s!(book), chapter, passage_from, passage_to }
    }

    /// Search text understood by the passage site, e.g. `Romans 16:23 - 25`.
    pub fn search_text(&self) -> String {
        format!("{} {}:{} - {}", self.book, self.chapter, self.passage_from, self.passage_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(units: &[FetchUnit]) -> Vec<(u32, u32, u32)> {
        units.iter().map(|u| (u.chapter, u.passage_from, u.passage_to)).collect()
    }

    #[test]
    fn single_chapter_is_one_unit() {
        let r = PassageRange::new("Romans", 16, 23, 16, 25);
        assert_eq!(spans(&r.stitch(16)), vec![(16, 23, 25)]);
    }

    #[test]
    fn head_middle_tail() {
        let r = PassageRange::new("John", 3, 16, 6, 4);
        assert_eq!(
            spans(&r.stitch(21)),
            vec![(3, 16, SENTINEL_MAX), (4, 1, SENTINEL_MAX), (5, 1, SENTINEL_MAX), (6, 1, 4)]
        );
    }

    #[test]
    fn adjacent_chapters_have_no_middle() {
        let r = PassageRange::new("Ruth", 1, 20, 2, 3);
        assert_eq!(spans(&r.stitch(4)), vec![(1, 20, SENTINEL_MAX), (2, 1, 3)]);
    }

    #[test]
    fn reversed_is_empty() {
        assert!(PassageRange::new("Acts", 10, 1, 9, 18).stitch(28).is_empty());
        assert!(PassageRange::new("Acts", 9, 2, 9, 1).stitch(28).is_empty());
    }

    #[test]
    fn chapters_are_capped_to_book() {
        let r = PassageRange::new("Jude", -4, 1, 70, 9000);
        assert_eq!(spans(&r.stitch(1)), vec![(1, 1, 9000)]);
    }

    #[test]
    fn search_text_format() {
        assert_eq!(FetchUnit::new("1 John", 2, 1, 9000).search_text(), "1 John 2:1 - 9000");
    }
}
