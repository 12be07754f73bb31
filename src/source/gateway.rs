// src/source/gateway.rs
//
// Passage pages from the Bible Gateway print view, reduced to plain passages.

use std::{thread, time::Duration};

use tracing::debug;

use crate::{
    config::consts::{HOST, PASSAGE_PATH, REQUEST_PAUSE_MS},
    core::{
        html::{has_class, Token, Tokens},
        net::{http_get, RetryPolicy},
        numbers::{remove_superscript_numbers, superscript_numbers},
        sanitize::{collapse_inner_spaces, decode_entities},
    },
    error::Result,
    range::FetchUnit,
};

use super::PassageSource;

/// Put in front of every numbered passage while reducing a page, then split on.
pub const PASSAGE_SEPARATOR: &str = "-_-";

#[derive(Clone, Debug)]
pub struct GatewaySource {
    retry: RetryPolicy,
    pause: Duration,
}

impl Default for GatewaySource {
    fn default() -> Self {
        Self { retry: RetryPolicy::default(), pause: Duration::from_millis(REQUEST_PAUSE_MS) }
    }
}

impl GatewaySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw print-view page for a search such as `John 3:16 - 18`.
    pub fn page(&self, search: &str, translation: &str) -> Result<String> {
        let url = join!(HOST, PASSAGE_PATH);
        let query = [("version", translation), ("search", search), ("interface", "print")];
        http_get(&url, &query, &self.retry)
    }
}

impl PassageSource for GatewaySource {
    fn fetch(&self, unit: &FetchUnit, translation: &str, show_numbers: bool) -> Result<Vec<String>> {
        let html = self.page(&unit.search_text(), translation)?;
        thread::sleep(self.pause); // be polite
        Ok(match parse_passages(&html, translation, show_numbers) {
            Some(passages) => passages,
            None => {
                debug!(search = %unit.search_text(), translation, "page has no passage content");
                Vec::new()
            }
        })
    }
}

/* ---------------- Page reduction ---------------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum Frame {
    Content,
    Skip,
    VerseNum,
    Other,
}

fn is_removed(name: &str, attrs: &str, translation: &str) -> bool {
    let any = |classes: &[&str]| classes.iter().any(|c| has_class(attrs, c));
    match name {
        "h1" | "h2" | "h3" | "h4" | "crossref" | "versenum" => true,
        "a" => any(&["full-chap-link", "bibleref"]),
        "sup" => any(&["crossreference", "footnote"]),
        "div" => any(&["footnotes", "dropdowns", "crossrefs", "passage-other-trans"]),
        "p" => {
            has_class(attrs, "translation-note")
                || (translation.eq_ignore_ascii_case("GNV") && has_class(attrs, "first-line-none"))
        }
        _ => false,
    }
}

fn is_interlude(name: &str, attrs: &str) -> bool {
    name == "selah" || (matches!(name, "span" | "i") && has_class(attrs, "selah"))
}

/// Walks the page and collects the text of every `passage-content` block.
#[derive(Default)]
struct Reducer {
    stack: Vec<(String, Frame)>,
    content_depth: usize,
    skip_depth: usize,
    verse: Option<String>,
    current: String,
    blocks: Vec<String>,
    found: bool,
}

impl Reducer {
    fn emitting(&self) -> bool {
        self.content_depth > 0 && self.skip_depth == 0
    }

    fn push_text(&mut self, text: &str) {
        if !self.emitting() {
            return;
        }
        match self.verse.as_mut() {
            Some(v) => v.push_str(text),
            None => self.current.push_str(text),
        }
    }

    fn open(&mut self, name: String, attrs: &str, self_closing: bool, translation: &str) {
        if self_closing {
            if name == "br" {
                self.push_text("\n");
            }
            return;
        }

        let frame = if name == "div" && has_class(attrs, "passage-content") {
            self.found = true;
            Frame::Content
        } else if self.content_depth == 0 {
            Frame::Other
        } else if name == "span" && has_class(attrs, "chapternum") {
            self.push_text("\n");
            Frame::Skip
        } else if is_removed(&name, attrs, translation) {
            Frame::Skip
        } else if name == "sup" && has_class(attrs, "versenum") {
            if self.emitting() {
                self.verse = Some(s!());
            }
            Frame::VerseNum
        } else {
            if name == "p" {
                self.push_text("\n");
            } else if is_interlude(&name, attrs) {
                self.push_text(" ");
            }
            Frame::Other
        };

        match frame {
            Frame::Content => self.content_depth += 1,
            Frame::Skip => self.skip_depth += 1,
            _ => {}
        }
        self.stack.push((name, frame));
    }

    fn close(&mut self, name: &str) {
        // Unclosed children of `name` are closed with it; stray close tags are ignored.
        let Some(at) = self.stack.iter().rposition(|(n, _)| n == name) else { return };
        while self.stack.len() > at {
            let Some((_, frame)) = self.stack.pop() else { break };
            self.end_frame(frame);
        }
    }

    fn end_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Skip => self.skip_depth -= 1,
            Frame::VerseNum => {
                if let Some(num) = self.verse.take() {
                    self.current.push_str(PASSAGE_SEPARATOR);
                    self.current.push_str(&superscript_numbers(&num, true));
                }
            }
            Frame::Content => {
                self.content_depth -= 1;
                if self.content_depth == 0 {
                    let block = std::mem::take(&mut self.current).replace('\u{a0}', " ");
                    self.blocks.push(s!(block.trim()));
                }
            }
            Frame::Other => {}
        }
    }

    fn finish(mut self) -> Option<Vec<String>> {
        while let Some((_, frame)) = self.stack.pop() {
            self.end_frame(frame);
        }
        self.found.then_some(self.blocks)
    }
}

/// Reduce a print-view page to its passages, in page order.
///
/// `None` when the page carries no passage content at all (unknown reference,
/// range past the end of a chapter). Passage numbers appear as superscripts
/// unless `show_numbers` is off.
pub fn parse_passages(html: &str, translation: &str, show_numbers: bool) -> Option<Vec<String>> {
    let mut reducer = Reducer::default();
    for token in Tokens::new(html) {
        match token {
            Token::Open { name, attrs, self_closing } => reducer.open(name, attrs, self_closing, translation),
            Token::Close { name } => reducer.close(&name),
            Token::Text(t) => reducer.push_text(&decode_entities(t)),
        }
    }
    let blocks = reducer.finish()?;

    let joined = blocks.join("\n").replace("[[", "").replace("]]", "");
    let mut text = collapse_inner_spaces(&joined);
    if !show_numbers {
        text = remove_superscript_numbers(&text);
    }
    let text = text.replace(['*', '⌞', '⌟'], "").replace("¶ ", "");

    let trimmed = text.trim();
    let body = trimmed.strip_prefix(PASSAGE_SEPARATOR).unwrap_or(trimmed);
    if body.is_empty() {
        return Some(Vec::new());
    }
    Some(body.split(PASSAGE_SEPARATOR).map(String::from).collect())
}
