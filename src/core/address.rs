// src/core/address.rs
//
// Bounds capping. Out-of-range input is pulled back inside the bounds instead
// of being rejected.

use crate::config::consts::SENTINEL_MAX;

/// `min(max(value, min), max)`. Total: when `min > max` the result is `max`.
pub fn cap_integer(value: i64, min: i64, max: i64) -> i64 {
    value.max(min).min(max)
}

/// Chapter pulled into `1..=chapter_count`. Yields 0 when the book has no chapters.
pub fn cap_chapter(chapter: i64, chapter_count: u32) -> u32 {
    to_u32(cap_integer(chapter, 1, i64::from(chapter_count)))
}

/// Passage pulled into `1..=SENTINEL_MAX`.
pub fn cap_passage(passage: i64) -> u32 {
    to_u32(cap_integer(passage, 1, i64::from(SENTINEL_MAX)))
}

fn to_u32(v: i64) -> u32 {
    u32::try_from(v).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_like_min_of_max() {
        assert_eq!(cap_integer(42, 1, 100), 42);
        assert_eq!(cap_integer(0, 7, 100), 7);
        assert_eq!(cap_integer(42, 1, 7), 7);
        // inverted bounds do not panic
        assert_eq!(cap_integer(5, 10, 3), 3);
    }

    #[test]
    fn chapter_and_passage() {
        assert_eq!(cap_chapter(99, 1), 1);
        assert_eq!(cap_chapter(-3, 50), 1);
        assert_eq!(cap_chapter(3, 0), 0);
        assert_eq!(cap_passage(0), 1);
        assert_eq!(cap_passage(123_456), SENTINEL_MAX);
    }
}
