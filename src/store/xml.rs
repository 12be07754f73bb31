// src/store/xml.rs
//
// Layout:
//   <root>
//     <Info><Language>English</Language><Translation>NIV</Translation></Info>
//     <Song_Of_Songs><_1><_1>text</_1>...</_1></Song_Of_Songs>
//   </root>
// Spaces in book tags become `_`; tags starting with a digit get a `_` prefix.

use std::mem::take;

use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};

use crate::{
    config::Format,
    core::sanitize::decode_entities,
    document::{Document, INFO_KEY},
    error::{Error, Result},
};

use super::DocumentStore;

const ROOT: &str = "root";
const PREFIX: char = '_';

pub struct XmlStore;

/// `"1 Samuel"` -> `"_1_Samuel"`, `7` -> `"_7"`.
pub fn to_tag(key: &str) -> String {
    let tag = key.replace(' ', "_");
    if tag.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{PREFIX}{tag}")
    } else {
        tag
    }
}

/// Strip the digit prefix only. Used for chapter / passage tags.
fn strip_numeric_prefix(tag: &str) -> &str {
    match tag.strip_prefix(PREFIX) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => tag,
    }
}

/// Inverse of [`to_tag`] for book tags.
pub fn book_from_tag(tag: &str) -> String {
    s!(strip_numeric_prefix(tag).replace(PREFIX, " ").trim())
}

fn number_from_tag(tag: &str) -> Result<u32> {
    strip_numeric_prefix(tag)
        .parse()
        .map_err(|_| Error::Xml(format!("expected a numeric tag, found <{tag}>")))
}

fn write_leaf(w: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        w.write_event(Event::Empty(BytesStart::new(tag)))?;
    } else {
        w.write_event(Event::Start(BytesStart::new(tag)))?;
        w.write_event(Event::Text(BytesText::new(text)))?;
        w.write_event(Event::End(BytesEnd::new(tag)))?;
    }
    Ok(())
}

impl DocumentStore for XmlStore {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn encode(&self, doc: &Document) -> Result<String> {
        let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
        w.write_event(Event::Start(BytesStart::new(ROOT)))?;

        w.write_event(Event::Start(BytesStart::new(INFO_KEY)))?;
        write_leaf(&mut w, "Language", &doc.info.language)?;
        write_leaf(&mut w, "Translation", &doc.info.translation)?;
        w.write_event(Event::End(BytesEnd::new(INFO_KEY)))?;

        for (book, chapters) in &doc.books {
            let book_tag = to_tag(book);
            if chapters.is_empty() {
                w.write_event(Event::Empty(BytesStart::new(book_tag.as_str())))?;
                continue;
            }
            w.write_event(Event::Start(BytesStart::new(book_tag.as_str())))?;
            for (chapter, passages) in chapters {
                let ch_tag = to_tag(&chapter.to_string());
                w.write_event(Event::Start(BytesStart::new(ch_tag.as_str())))?;
                for (passage, text) in passages {
                    write_leaf(&mut w, &to_tag(&passage.to_string()), text)?;
                }
                w.write_event(Event::End(BytesEnd::new(ch_tag.as_str())))?;
            }
            w.write_event(Event::End(BytesEnd::new(book_tag.as_str())))?;
        }

        w.write_event(Event::End(BytesEnd::new(ROOT)))?;
        let mut text = String::from_utf8(w.into_inner()).map_err(|e| Error::Xml(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }

    fn decode(&self, text: &str) -> Result<Option<Document>> {
        let mut reader = Reader::from_str(text.trim_start_matches('\u{feff}'));
        let mut path: Vec<String> = Vec::new();
        let mut buf = s!();
        let mut doc = Document::default();
        let mut saw_info = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let tag = s!(String::from_utf8_lossy(e.name().as_ref()));
                    path.push(tag);
                    buf.clear();
                    open_element(&mut doc, &path, &mut saw_info)?;
                }
                Event::Empty(e) => {
                    let tag = s!(String::from_utf8_lossy(e.name().as_ref()));
                    path.push(tag);
                    open_element(&mut doc, &path, &mut saw_info)?;
                    close_element(&mut doc, &path, s!())?;
                    path.pop();
                }
                Event::Text(e) => buf.push_str(&String::from_utf8_lossy(e.as_ref())),
                Event::CData(e) => buf.push_str(&String::from_utf8_lossy(e.as_ref())),
                Event::GeneralRef(e) => {
                    let name = String::from_utf8_lossy(e.as_ref());
                    buf.push_str(&decode_entities(&join!("&", &name, ";")));
                }
                Event::End(_) => {
                    close_element(&mut doc, &path, take(&mut buf))?;
                    path.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_info {
            if doc.books.is_empty() {
                return Ok(None);
            }
            return Err(Error::Xml(format!("missing <{INFO_KEY}> element")));
        }
        Ok(Some(doc))
    }
}

fn open_element(doc: &mut Document, path: &[String], saw_info: &mut bool) -> Result<()> {
    match path {
        [_, info] if info == INFO_KEY => *saw_info = true,
        [_, book] => {
            doc.ensure_book(&book_from_tag(book));
        }
        [_, book, chapter] if book != INFO_KEY => {
            let chapter = number_from_tag(chapter)?;
            doc.ensure_book(&book_from_tag(book)).entry(chapter).or_default();
        }
        _ => {}
    }
    Ok(())
}

fn close_element(doc: &mut Document, path: &[String], text: String) -> Result<()> {
    match path {
        [_, info, field] if info == INFO_KEY => match field.as_str() {
            "Language" => doc.info.language = text,
            "Translation" => doc.info.translation = text,
            _ => {}
        },
        [_, book, chapter, passage] => {
            let (chapter, passage) = (number_from_tag(chapter)?, number_from_tag(passage)?);
            doc.insert_passage(&book_from_tag(book), chapter, passage, text);
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names() {
        assert_eq!(to_tag("Song Of Songs"), "Song_Of_Songs");
        assert_eq!(to_tag("1 Samuel"), "_1_Samuel");
        assert_eq!(to_tag("12"), "_12");
        assert_eq!(book_from_tag("_1_Samuel"), "1 Samuel");
        assert_eq!(book_from_tag("Song_Of_Songs"), "Song Of Songs");
    }

    #[test]
    fn escapes_and_empty_passages() {
        let mut d = Document::new("ASV");
        d.insert_passage("Romans", 16, 23, s!("a < b & \"c\""));
        d.insert_passage("Romans", 16, 24, s!());
        let xml = XmlStore.encode(&d).unwrap();
        assert!(xml.contains("<_24/>"));
        assert_eq!(XmlStore.decode(&xml).unwrap(), Some(d));
    }

    #[test]
    fn empty_root_is_no_document() {
        assert_eq!(XmlStore.decode("<root></root>").unwrap(), None);
    }
}
