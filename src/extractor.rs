// src/extractor.rs
//
// Read-side entry points: passages as text or as a list, either fetched
// through a passage source or read back from a persisted document.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    assemble::{self, Output},
    config::{consts::SENTINEL_MAX, FetchOptions, Format},
    core::{
        address::cap_integer,
        catalog,
        numbers::{remove_superscript_numbers, to_ascii_punctuation},
    },
    document::{Chapter, Document},
    error::{Error, Result},
    omission::{OmissionTable, BUILTIN},
    progress::Progress,
    range::PassageRange,
    scrape::{self, FetchedChapter, Job},
    source::{GatewaySource, PassageSource},
    store::{self, DocumentStore},
};

/// Fails unless `translation` is on the allow-list. Returns the upper-cased code.
pub fn check_translation(translation: &str) -> Result<String> {
    if catalog::is_supported(translation) {
        Ok(translation.to_uppercase())
    } else {
        Err(Error::UnsupportedTranslation(translation.to_uppercase()))
    }
}

/// Fetches passage ranges through a [`PassageSource`].
pub struct Extractor<S = GatewaySource> {
    translation: String,
    options: FetchOptions,
    source: S,
    omissions: OmissionTable,
}

impl Extractor<GatewaySource> {
    /// Extractor backed by the passage website.
    pub fn new(translation: &str, options: FetchOptions) -> Self {
        Self::with_source(translation, options, GatewaySource::new())
    }
}

impl<S: PassageSource> Extractor<S> {
    pub fn with_source(translation: &str, options: FetchOptions, source: S) -> Self {
        Self { translation: s!(translation), options, source, omissions: BUILTIN.clone() }
    }

    pub fn with_omissions(mut self, omissions: OmissionTable) -> Self {
        self.omissions = omissions;
        self
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn get_passage(&self, book: &str, chapter: i64, passage: i64) -> Result<Output> {
        self.get_passage_range(book, chapter, passage, chapter, passage)
    }

    pub fn get_passages(&self, book: &str, chapter: i64, passage_from: i64, passage_to: i64) -> Result<Output> {
        self.get_passage_range(book, chapter, passage_from, chapter, passage_to)
    }

    pub fn get_chapter(&self, book: &str, chapter: i64) -> Result<Output> {
        self.get_passage_range(book, chapter, 1, chapter, i64::from(SENTINEL_MAX))
    }

    pub fn get_chapters(&self, book: &str, chapter_from: i64, chapter_to: i64) -> Result<Output> {
        self.get_passage_range(book, chapter_from, 1, chapter_to, i64::from(SENTINEL_MAX))
    }

    pub fn get_book(&self, book: &str) -> Result<Output> {
        let last = i64::from(catalog::chapter_count(book, &self.translation));
        self.get_passage_range(book, 1, 1, last, i64::from(SENTINEL_MAX))
    }

    /// Passages from `chapter_from:passage_from` to `chapter_to:passage_to`, inclusive.
    ///
    /// Out-of-range numbers are capped. A reversed range yields empty output.
    pub fn get_passage_range(
        &self,
        book: &str,
        chapter_from: i64,
        passage_from: i64,
        chapter_to: i64,
        passage_to: i64,
    ) -> Result<Output> {
        let range = PassageRange::new(book, chapter_from, passage_from, chapter_to, passage_to);
        let (_, chapters) = self.resolve(&range, None)?;
        let out = assemble::flatten(
            chapters.iter().map(|c| &c.passages),
            self.options.output_as_list,
            self.options.strip_excess_whitespace,
        );
        Ok(if self.options.use_ascii_punctuation { out.map(to_ascii_punctuation) } else { out })
    }

    /// Same range semantics as [`Self::get_passage_range`], assembled into a document.
    pub fn fetch_document(&self, range: &PassageRange, progress: Option<&mut dyn Progress>) -> Result<Document> {
        let (book, chapters) = self.resolve(range, progress)?;
        let mut doc = assemble::build_document(&book, &self.translation, chapters);
        if self.options.use_ascii_punctuation {
            doc.map_text(to_ascii_punctuation);
        }
        Ok(doc)
    }

    /// Validate, stitch and fetch. Returns the canonical book name with its chapters.
    fn resolve(
        &self,
        range: &PassageRange,
        progress: Option<&mut dyn Progress>,
    ) -> Result<(String, Vec<FetchedChapter>)> {
        let translation = check_translation(&self.translation)?;
        let book = catalog::normalize(&range.book);
        let count = catalog::chapter_count(&book, &translation);
        if count == 0 {
            return Err(Error::InvalidPassage {
                book,
                chapter_from: range.chapter_from,
                passage_from: range.passage_from,
                chapter_to: range.chapter_to,
                passage_to: range.passage_to,
                translation,
            });
        }

        let range = PassageRange { book: book.clone(), ..range.clone() };
        let units = range.stitch(count);
        let workers = if self.options.use_concurrency {
            self.options.worker_count(units.len())
        } else {
            1
        };
        info!(%book, %translation, units = units.len(), workers, "fetching");

        let job = Job {
            source: &self.source,
            translation: &translation,
            show_numbers: self.options.show_passage_numbers,
            omissions: &self.omissions,
        };
        let chapters = scrape::run(&job, &units, workers, progress)?;
        Ok((book, chapters))
    }
}

/* ---------------- File-backed extraction ---------------- */

/// Reads passage ranges back out of documents written by the downloader.
pub struct FileExtractor {
    translation: String,
    options: FetchOptions,
    store: Box<dyn DocumentStore>,
    default_dir: PathBuf,
}

impl FileExtractor {
    pub fn new(translation: &str, options: FetchOptions, format: Format, default_dir: impl Into<PathBuf>) -> Self {
        Self {
            translation: s!(translation),
            options,
            store: store::for_format(format),
            default_dir: default_dir.into(),
        }
    }

    /// `<default_dir>/<Book>.<ext>`
    pub fn default_path(&self, book: &str) -> PathBuf {
        self.default_dir.join(join!(&catalog::normalize(book), ".", self.store.extension()))
    }

    pub fn get_passage(&self, book: &str, chapter: i64, passage: i64, file: Option<&Path>) -> Result<Output> {
        self.get_passage_range(book, chapter, passage, chapter, passage, file)
    }

    pub fn get_passages(&self, book: &str, chapter: i64, from: i64, to: i64, file: Option<&Path>) -> Result<Output> {
        self.get_passage_range(book, chapter, from, chapter, to, file)
    }

    pub fn get_chapter(&self, book: &str, chapter: i64, file: Option<&Path>) -> Result<Output> {
        self.get_passage_range(book, chapter, 1, chapter, i64::from(SENTINEL_MAX), file)
    }

    pub fn get_chapters(&self, book: &str, from: i64, to: i64, file: Option<&Path>) -> Result<Output> {
        self.get_passage_range(book, from, 1, to, i64::from(SENTINEL_MAX), file)
    }

    pub fn get_book(&self, book: &str, file: Option<&Path>) -> Result<Output> {
        self.get_passage_range(book, 1, 1, i64::from(SENTINEL_MAX), i64::from(SENTINEL_MAX), file)
    }

    /// Both ends of the range are capped against what the document holds.
    pub fn get_passage_range(
        &self,
        book: &str,
        chapter_from: i64,
        passage_from: i64,
        chapter_to: i64,
        passage_to: i64,
        file: Option<&Path>,
    ) -> Result<Output> {
        let translation = check_translation(&self.translation)?;
        let book = catalog::normalize(book);
        let invalid = || Error::InvalidPassage {
            book: book.clone(),
            chapter_from,
            passage_from,
            chapter_to,
            passage_to,
            translation: translation.clone(),
        };

        let path = file.map_or_else(|| self.default_path(&book), Path::to_path_buf);
        let doc = self.store.read(&path)?.ok_or_else(invalid)?;
        if !catalog::is_matching_translation(&translation, &doc.info.translation) {
            return Err(Error::TranslationMismatch {
                expected: translation.clone(),
                found: doc.info.translation.clone(),
            });
        }

        let chapters = doc.book(&book).ok_or_else(invalid)?;
        let Some(&last_chapter) = chapters.keys().next_back() else {
            return Err(invalid());
        };
        let cf = cap_integer(chapter_from, 1, i64::from(last_chapter));
        let ct = cap_integer(chapter_to, 1, i64::from(last_chapter));

        let mut selected: Vec<Chapter> = Vec::new();
        for chapter in cf..=ct {
            let Some(passages) = u32::try_from(chapter).ok().and_then(|c| chapters.get(&c)) else { continue };
            let Some(&last) = passages.keys().next_back() else { continue };
            let first = if chapter == cf { cap_integer(passage_from, 1, i64::from(last)) } else { 1 };
            let end = if chapter == ct { cap_integer(passage_to, 1, i64::from(last)) } else { i64::from(last) };
            if end < first {
                continue;
            }
            let (first, end) = (u32::try_from(first).unwrap_or(1), u32::try_from(end).unwrap_or(last));
            selected.push(passages.range(first..=end).map(|(k, v)| (*k, v.clone())).collect());
        }

        let out = assemble::flatten(&selected, self.options.output_as_list, self.options.strip_excess_whitespace);
        let out = if self.options.use_ascii_punctuation { out.map(to_ascii_punctuation) } else { out };
        Ok(if self.options.show_passage_numbers { out } else { out.map(remove_superscript_numbers) })
    }
}
