// tests/extract.rs
//
// Extraction through stub sources: range stitching, omissions, capping and
// the sequential / concurrent paths.
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use verse_scrape::assemble::Output;
use verse_scrape::config::FetchOptions;
use verse_scrape::core::numbers::superscript_numbers;
use verse_scrape::document::Document;
use verse_scrape::error::{Error, Result};
use verse_scrape::extractor::Extractor;
use verse_scrape::progress::{NullProgress, Progress};
use verse_scrape::range::{FetchUnit, PassageRange};
use verse_scrape::source::{DocumentSource, PassageSource};
use verse_scrape::store::{json::JsonStore, DocumentStore};

fn numbered(p: u32, text: &str) -> String {
    format!("{} {text} ", superscript_numbers(&p.to_string(), false))
}

/// Romans 15 (33 passages) and 16 (27 passages, 24 left out) in ASV.
fn romans() -> DocumentSource {
    let mut d = Document::new("ASV");
    for p in 1..=33 {
        d.insert_passage("Romans", 15, p, numbered(p, &format!("Romans 15:{p}")));
    }
    for p in 1..=27 {
        let text = if p == 24 { String::new() } else { numbered(p, &format!("Romans 16:{p}")) };
        d.insert_passage("Romans", 16, p, text);
    }
    DocumentSource::new(d)
}

fn philemon() -> DocumentSource {
    let mut d = Document::new("WEB");
    for p in 1..=25 {
        d.insert_passage("Philemon", 1, p, numbered(p, &format!("Philemon 1:{p}")));
    }
    DocumentSource::new(d)
}

fn list_opts() -> FetchOptions {
    FetchOptions { output_as_list: true, ..FetchOptions::default() }
}

#[test]
fn omitted_passage_gets_placeholder() {
    let ex = Extractor::with_source("ASV", list_opts(), romans());
    let out = ex.get_passages("Romans", 16, 23, 25).unwrap();
    assert_eq!(out, Output::List(vec![
        numbered(23, "Romans 16:23"),
        String::new(),
        numbered(25, "Romans 16:25"),
    ]));

    let doc = ex.fetch_document(&PassageRange::new("romans", 16, 23, 16, 25), None).unwrap();
    let keys: Vec<u32> = doc.book("Romans").unwrap()[&16].keys().copied().collect();
    assert_eq!(keys, vec![23, 24, 25]);
    assert_eq!(doc.info.translation, "ASV");
    assert_eq!(doc.info.language, "English");
}

#[test]
fn sequential_and_concurrent_agree() {
    let range = PassageRange::new("Romans", 15, 30, 16, 5);
    let seq = Extractor::with_source("ASV", FetchOptions { use_concurrency: false, ..list_opts() }, romans());
    let par = Extractor::with_source("ASV", FetchOptions { workers: 4, ..list_opts() }, romans());

    assert_eq!(
        seq.get_passage_range("Romans", 15, 30, 16, 5).unwrap(),
        par.get_passage_range("Romans", 15, 30, 16, 5).unwrap(),
    );

    let a = JsonStore.encode(&seq.fetch_document(&range, Some(&mut NullProgress)).unwrap()).unwrap();
    let b = JsonStore.encode(&par.fetch_document(&range, None).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn spans_head_and_tail() {
    let ex = Extractor::with_source("ASV", list_opts(), romans());
    let Output::List(items) = ex.get_passage_range("Romans", 15, 32, 16, 2).unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(items, vec![
        numbered(32, "Romans 15:32"),
        numbered(33, "Romans 15:33"),
        numbered(1, "Romans 16:1"),
        numbered(2, "Romans 16:2"),
    ]);
}

#[test]
fn excessive_start_is_no_results() {
    let ex = Extractor::with_source("ASV", list_opts(), romans());
    match ex.get_passages("Romans", 16, 40, 50) {
        Err(Error::NoResultsForUnit { book, chapter, passage_from, passage_to, translation }) => {
            assert_eq!(book, "Romans");
            assert_eq!((chapter, passage_from, passage_to), (16, 40, 50));
            assert_eq!(translation, "ASV");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn excessive_end_is_capped() {
    let ex = Extractor::with_source("ASV", list_opts(), romans());
    assert_eq!(
        ex.get_passages("Romans", 16, 26, 99_999).unwrap(),
        ex.get_passages("Romans", 16, 26, 27).unwrap(),
    );
}

#[test]
fn whole_book_through_sentinel() {
    let ex = Extractor::with_source("WEB", FetchOptions::default(), philemon());
    let sentinel = ex.get_passage_range("Philemon", 1, 1, 1, 9000).unwrap();
    assert_eq!(sentinel, ex.get_passages("Philemon", 1, 1, 25).unwrap());
    assert_eq!(sentinel, ex.get_book("philemon").unwrap());
    assert_eq!(sentinel, ex.get_chapters("Philemon", 1, 40).unwrap());
}

#[test]
fn single_chapter_range_matches_chapter() {
    let ex = Extractor::with_source("ASV", FetchOptions::default(), romans());
    assert_eq!(
        ex.get_passage_range("Romans", 16, 1, 16, 27).unwrap(),
        ex.get_chapter("Romans", 16).unwrap(),
    );
}

#[test]
fn reversed_ranges_are_empty() {
    let ex = Extractor::with_source("ASV", list_opts(), romans());
    assert!(ex.get_passage_range("Romans", 16, 5, 15, 1).unwrap().is_empty());
    assert!(ex.get_passages("Romans", 16, 5, 3).unwrap().is_empty());
}

#[test]
fn hidden_numbers_and_ascii() {
    let mut d = Document::new("NIV");
    d.insert_passage("John", 11, 35, s("³⁵ “Jesus wept.” "));
    let opts = FetchOptions { show_passage_numbers: false, use_ascii_punctuation: true, ..FetchOptions::default() };
    let ex = Extractor::with_source("NIV", opts, DocumentSource::new(d));
    assert_eq!(ex.get_passage("John", 11, 35).unwrap(), Output::Text(s("\"Jesus wept.\"")));
}

#[test]
fn bad_inputs() {
    let ex = Extractor::with_source("XYZ", FetchOptions::default(), romans());
    assert!(matches!(ex.get_chapter("Romans", 1), Err(Error::UnsupportedTranslation(t)) if t == "XYZ"));

    let ex = Extractor::with_source("ASV", FetchOptions::default(), romans());
    let err = ex.get_passage("Hezekiah", 1, 1).unwrap_err();
    assert!(matches!(err, Error::InvalidPassage { .. }));
    assert_eq!(err.to_string(), "Hezekiah 1:1 is an invalid passage in the ASV translation");
}

/* ---------------- Failing / slow sources ---------------- */

fn s(v: &str) -> String {
    v.to_string()
}

/// Twenty passages per chapter; chapters in `fail` error out.
struct Synthetic {
    fail: HashSet<u32>,
    calls: AtomicUsize,
    stagger: bool,
}

impl Synthetic {
    fn new(fail: &[u32]) -> Self {
        Self { fail: fail.iter().copied().collect(), calls: AtomicUsize::new(0), stagger: false }
    }
}

impl PassageSource for Synthetic {
    fn fetch(&self, unit: &FetchUnit, _translation: &str, _show_numbers: bool) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.stagger {
            // later chapters finish first
            thread::sleep(Duration::from_millis(u64::from(20 - unit.chapter.min(20)) * 3));
        }
        if self.fail.contains(&unit.chapter) {
            return Err(Error::Http(format!("chapter {}", unit.chapter)));
        }
        let to = unit.passage_to.min(20);
        Ok((unit.passage_from..=to).map(|p| format!("{}:{p} ", unit.chapter)).collect())
    }
}

#[test]
fn earliest_failure_is_surfaced() {
    let par = Extractor::with_source("NIV", FetchOptions { workers: 4, ..FetchOptions::default() }, Synthetic::new(&[7, 3]));
    match par.get_chapters("Romans", 1, 10) {
        Err(Error::Http(msg)) => assert_eq!(msg, "chapter 3"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(par.source().calls.load(Ordering::SeqCst), 10);

    let seq = Extractor::with_source(
        "NIV",
        FetchOptions { use_concurrency: false, ..FetchOptions::default() },
        Synthetic::new(&[7, 3]),
    );
    match seq.get_chapters("Romans", 1, 10) {
        Err(Error::Http(msg)) => assert_eq!(msg, "chapter 3"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(seq.source().calls.load(Ordering::SeqCst), 3);
}

#[derive(Default)]
struct Counting {
    total: usize,
    done: Vec<u32>,
    finished: bool,
}

impl Progress for Counting {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, chapter: u32) {
        self.done.push(chapter);
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn pool_keeps_unit_order() {
    let mut src = Synthetic::new(&[]);
    src.stagger = true;
    let ex = Extractor::with_source("NIV", FetchOptions { workers: 6, ..FetchOptions::default() }, src);

    let mut progress = Counting::default();
    let doc = ex.fetch_document(&PassageRange::new("Romans", 2, 5, 12, 3), Some(&mut progress)).unwrap();

    let chapters: Vec<u32> = doc.book("Romans").unwrap().keys().copied().collect();
    assert_eq!(chapters, (2..=12).collect::<Vec<_>>());
    assert_eq!(doc.book("Romans").unwrap()[&2].keys().next(), Some(&5));
    assert_eq!(doc.book("Romans").unwrap()[&12].keys().last(), Some(&3));

    assert_eq!(progress.total, 11);
    assert_eq!(progress.done.len(), 11);
    assert!(progress.finished);
}

struct Broken;

impl PassageSource for Broken {
    fn fetch(&self, unit: &FetchUnit, _translation: &str, _show_numbers: bool) -> Result<Vec<String>> {
        if unit.chapter == 4 {
            panic!("source broke on chapter 4");
        }
        Ok(vec![s("x ")])
    }
}

#[test]
#[should_panic(expected = "a scoped thread panicked")]
fn panicking_worker_is_not_swallowed() {
    let ex = Extractor::with_source("NIV", FetchOptions { workers: 3, ..FetchOptions::default() }, Broken);
    let _ = ex.get_chapters("Romans", 1, 6);
}
