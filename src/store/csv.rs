// src/store/csv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::{
    document::Document,
    error::{Error, Result},
};

use super::DocumentStore;
use crate::config::Format;

const BOM: char = '\u{feff}';
pub const HEADERS: [&str; 6] = ["Book", "Chapter", "Passage", "Text", "Language", "Translation"];

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). Blank lines are skipped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a last line that had no terminator, even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Store ---------------- */

/// One passage per row, with the document info repeated on every row.
pub struct DelimitedStore {
    format: Format,
    sep: char,
}

impl DelimitedStore {
    pub fn csv() -> Self { Self { format: Format::Csv, sep: ',' } }
    pub fn tsv() -> Self { Self { format: Format::Tsv, sep: '\t' } }
}

impl DocumentStore for DelimitedStore {
    fn format(&self) -> Format {
        self.format
    }

    fn encode(&self, doc: &Document) -> Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        write!(buf, "{BOM}")?;
        write_row(&mut buf, &HEADERS, self.sep)?;
        let (lang, tr) = (doc.info.language.as_str(), doc.info.translation.as_str());
        for (book, chapter, passage, text) in doc.rows() {
            let (c, p) = (chapter.to_string(), passage.to_string());
            write_row(&mut buf, &[book, c.as_str(), p.as_str(), text, lang, tr], self.sep)?;
        }
        String::from_utf8(buf).map_err(|e| Error::Csv(e.to_string()))
    }

    fn decode(&self, text: &str) -> Result<Option<Document>> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut rows = parse_rows(text, self.sep).into_iter().enumerate();
        // header
        if rows.next().is_none() {
            return Ok(None);
        }

        let mut doc: Option<Document> = None;
        for (line, row) in rows {
            let [book, chapter, passage, body, language, translation, ..] = row.as_slice() else {
                return Err(Error::Csv(format!("row {}: expected {} fields, found {}", line + 1, HEADERS.len(), row.len())));
            };
            let number = |s: &str| s.trim().parse::<u32>()
                .map_err(|_| Error::Csv(format!("row {}: not a number: {s:?}", line + 1)));
            let (chapter, passage) = (number(chapter.as_str())?, number(passage.as_str())?);

            let doc = doc.get_or_insert_with(|| {
                let mut d = Document::default();
                d.info.language = language.clone();
                d.info.translation = translation.clone();
                d
            });
            doc.insert_passage(book, chapter, passage, body.clone());
        }
        Ok(doc)
    }
}
