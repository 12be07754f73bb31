// src/core/numbers.rs
//
// Passage-number and punctuation helpers shared by the sources and extractors.

const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Marker that opens the first passage of a chapter when numbers are shown.
pub const FIRST_PASSAGE_MARKER: &str = "¹ ";

pub fn is_superscript_digit(ch: char) -> bool {
    SUPERSCRIPTS.contains(&ch)
}

/// `"[12]"` -> `"¹²"`. Brackets and parentheses go when `remove_brackets` is set.
pub fn superscript_numbers(text: &str, remove_brackets: bool) -> String {
    text.chars()
        .filter(|c| !(remove_brackets && matches!(c, '[' | ']' | '(' | ')')))
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => SUPERSCRIPTS[d as usize],
            _ => c,
        })
        .collect()
}

/// Drop every run of superscript digits together with one trailing whitespace char.
pub fn remove_superscript_numbers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if !is_superscript_digit(ch) {
            out.push(ch);
            continue;
        }
        while chars.peek().is_some_and(|c| is_superscript_digit(*c)) {
            chars.next();
        }
        if chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
    }
    out
}

/// Curly quotes and em-dashes to their ASCII counterparts.
pub fn to_ascii_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '“' | '”' => '"',
            '‘' | '’' => '\'',
            '—' => '-',
            other => other,
        })
        .collect()
}
