// src/downloader.rs
//
// Write-side entry points: fetch a range into a document and persist it.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    config::{consts::SENTINEL_MAX, ExportOptions, FetchOptions},
    core::catalog,
    document::Document,
    error::Result,
    extractor::Extractor,
    omission::OmissionTable,
    progress::Progress,
    range::PassageRange,
    source::{GatewaySource, PassageSource},
    store::{self, DocumentStore},
};

pub struct Downloader<S = GatewaySource> {
    extractor: Extractor<S>,
    export: ExportOptions,
    store: Box<dyn DocumentStore>,
}

impl Downloader<GatewaySource> {
    pub fn new(translation: &str, fetch: FetchOptions, export: ExportOptions) -> Self {
        Self::with_source(translation, fetch, export, GatewaySource::new())
    }
}

impl<S: PassageSource> Downloader<S> {
    pub fn with_source(translation: &str, fetch: FetchOptions, export: ExportOptions, source: S) -> Self {
        let store = store::for_format(export.format);
        Self { extractor: Extractor::with_source(translation, fetch, source), export, store }
    }

    pub fn with_omissions(mut self, omissions: OmissionTable) -> Self {
        self.extractor = self.extractor.with_omissions(omissions);
        self
    }

    pub fn export(&self) -> &ExportOptions {
        &self.export
    }

    pub fn download_passage(&self, book: &str, chapter: i64, passage: i64, file: Option<&Path>) -> Result<PathBuf> {
        self.download_passage_range(book, chapter, passage, chapter, passage, file, None)
    }

    pub fn download_passages(
        &self, book: &str, chapter: i64, passage_from: i64, passage_to: i64, file: Option<&Path>,
    ) -> Result<PathBuf> {
        self.download_passage_range(book, chapter, passage_from, chapter, passage_to, file, None)
    }

    pub fn download_chapter(&self, book: &str, chapter: i64, file: Option<&Path>) -> Result<PathBuf> {
        self.download_passage_range(book, chapter, 1, chapter, i64::from(SENTINEL_MAX), file, None)
    }

    pub fn download_chapters(
        &self, book: &str, chapter_from: i64, chapter_to: i64, file: Option<&Path>,
    ) -> Result<PathBuf> {
        self.download_passage_range(book, chapter_from, 1, chapter_to, i64::from(SENTINEL_MAX), file, None)
    }

    pub fn download_book(&self, book: &str, file: Option<&Path>, progress: Option<&mut dyn Progress>) -> Result<PathBuf> {
        let last = i64::from(catalog::chapter_count(book, self.extractor.translation()));
        self.download_passage_range(book, 1, 1, last, i64::from(SENTINEL_MAX), file, progress)
    }

    /// Fetch the range and write it. Without `file` the document goes to
    /// `<out_dir>/<Book>.<ext>`. Returns the path written.
    #[allow(clippy::too_many_arguments)]
    pub fn download_passage_range(
        &self,
        book: &str,
        chapter_from: i64,
        passage_from: i64,
        chapter_to: i64,
        passage_to: i64,
        file: Option<&Path>,
        progress: Option<&mut dyn Progress>,
    ) -> Result<PathBuf> {
        let range = PassageRange::new(book, chapter_from, passage_from, chapter_to, passage_to);
        let doc = self.document(&range, progress)?;

        let canonical = catalog::normalize(book);
        let path = match file {
            Some(p) => p.to_path_buf(),
            None => self.export.out_path(&canonical),
        };
        info!(book = %canonical, path = %path.display(), "downloading");
        self.store.write(&path, &doc)
    }

    /// The document a download would write, without writing it.
    pub fn document(&self, range: &PassageRange, progress: Option<&mut dyn Progress>) -> Result<Document> {
        let mut doc = self.extractor.fetch_document(range, progress)?;
        if self.extractor.options().strip_excess_whitespace {
            doc.strip_whitespace();
        }
        Ok(doc)
    }
}
