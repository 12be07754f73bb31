// src/core/html.rs
//
// Forgiving tag tokenizer. Not a validating parser: it yields open tags, close
// tags and raw text runs, and leaves nesting to the caller.

const VOID: &[&str] = &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr"];

/// ASCII-only lowercase. Byte offsets stay aligned with the input.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Open { name: String, attrs: &'a str, self_closing: bool },
    Close { name: String },
    Text(&'a str),
}

pub struct Tokens<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(s: &'a str) -> Self { Self { s, b: s.as_bytes(), i: 0 } }

    /// Index of the `>` closing the tag that opens at `self.i`, skipping quoted attribute values.
    fn tag_end(&self) -> Option<usize> {
        let mut in_s = false; // '
        let mut in_d = false; // "
        let mut j = self.i + 1;
        while j < self.b.len() {
            match self.b[j] {
                b'\'' if !in_d => in_s = !in_s,
                b'"'  if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => return Some(j),
                _ => {}
            }
            j += 1;
        }
        None
    }

    /// Jump past raw-text element contents (`script`, `style`) to their close tag.
    fn skip_raw(&mut self, name: &str) {
        let needle = join!("</", name);
        let rest = to_lower(&self.s[self.i..]);
        self.i = match rest.find(&needle) {
            Some(off) => self.i + off,
            None => self.b.len(),
        };
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if self.i >= self.b.len() {
                return None;
            }

            if self.b[self.i] != b'<' {
                let start = self.i;
                let end = self.s[start..].find('<').map_or(self.b.len(), |o| start + o);
                self.i = end;
                return Some(Token::Text(&self.s[start..end]));
            }

            let rest = &self.s[self.i..];
            if rest.starts_with("<!--") {
                self.i = rest[4..].find("-->").map_or(self.b.len(), |o| self.i + 4 + o + 3);
                continue;
            }

            let next = self.b.get(self.i + 1).copied().unwrap_or(b' ');
            if !(next.is_ascii_alphabetic() || next == b'/' || next == b'!' || next == b'?') {
                // stray '<' in text
                let start = self.i;
                self.i += 1;
                return Some(Token::Text(&self.s[start..start + 1]));
            }

            let Some(end) = self.tag_end() else {
                self.i = self.b.len();
                return None;
            };
            let inner = &self.s[self.i + 1..end];
            self.i = end + 1;

            if next == b'!' || next == b'?' {
                continue; // doctype / processing instruction
            }

            if let Some(closing) = inner.strip_prefix('/') {
                return Some(Token::Close { name: tag_name(closing) });
            }

            let name = tag_name(inner);
            let attrs = inner[name.len().min(inner.len())..].trim_end_matches('/');
            let self_closing = inner.ends_with('/') || VOID.contains(&name.as_str());

            if name == "script" || name == "style" {
                self.skip_raw(&name);
            }
            return Some(Token::Open { name, attrs, self_closing });
        }
    }
}

fn tag_name(inner: &str) -> String {
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(inner.len());
    to_lower(&inner[..end])
}

/// Value of `attr` in a raw attribute string, quoted or bare.
pub fn attr_value<'a>(attrs: &'a str, attr: &str) -> Option<&'a str> {
    let lc = to_lower(attrs);
    let pat = join!(attr, "=");
    let mut from = 0;
    while let Some(off) = lc[from..].find(&pat) {
        let at = from + off;
        let boundary = at == 0 || lc.as_bytes()[at - 1].is_ascii_whitespace();
        let val_start = at + pat.len();
        if boundary {
            let rest = &attrs[val_start..];
            return Some(match rest.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &rest[1..];
                    &body[..body.find(q).unwrap_or(body.len())]
                }
                _ => &rest[..rest.find(char::is_whitespace).unwrap_or(rest.len())],
            });
        }
        from = val_start;
    }
    None
}

/// Whether the element carries `class` in its class list.
pub fn has_class(attrs: &str, class: &str) -> bool {
    attr_value(attrs, "class")
        .is_some_and(|v| v.split_whitespace().any(|c| c == class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_basic_markup() {
        let toks: Vec<_> = Tokens::new(r#"<div class="a b">x<br/>y</div>"#).collect();
        assert_eq!(toks, vec![
            Token::Open { name: s!("div"), attrs: r#" class="a b""#, self_closing: false },
            Token::Text("x"),
            Token::Open { name: s!("br"), attrs: "", self_closing: true },
            Token::Text("y"),
            Token::Close { name: s!("div") },
        ]);
    }

    #[test]
    fn skips_comments_scripts_and_quoted_gt() {
        let html = r#"<!-- c --><script>if (a<b) {}</script><a title="x>y">t</a>"#;
        let texts: Vec<_> = Tokens::new(html)
            .filter_map(|t| match t { Token::Text(s) => Some(s), _ => None })
            .collect();
        assert_eq!(texts, vec!["t"]);
    }

    #[test]
    fn class_matching() {
        assert!(has_class(r#" class="text passage-content""#, "passage-content"));
        assert!(!has_class(r#" data-class="passage-content""#, "passage-content"));
        assert!(has_class(" class=versenum", "versenum"));
    }
}
