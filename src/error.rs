// src/error.rs
use thiserror::Error;

/// Every failure the library can surface.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is an unsupported translation")]
    UnsupportedTranslation(String),

    #[error("{book} {} is an invalid passage in the {translation} translation",
        describe_range(.chapter_from, .passage_from, .chapter_to, .passage_to))]
    InvalidPassage {
        book: String,
        chapter_from: i64,
        passage_from: i64,
        chapter_to: i64,
        passage_to: i64,
        translation: String,
    },

    #[error("No passages found for {book} {chapter}:{passage_from} - {passage_to} in the {translation} translation")]
    NoResultsForUnit {
        book: String,
        chapter: u32,
        passage_from: u32,
        passage_to: u32,
        translation: String,
    },

    #[error("The extractor is using the {expected} translation, but attempted to read a file in the {found} translation")]
    TranslationMismatch { expected: String, found: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Malformed delimited file: {0}")]
    Csv(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::Xml(e.to_string())
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => Error::Http(format!("status {code}")),
            other => Error::Http(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// `c:p`, `c:p - p2` or `c:p - c2:p2`, whichever is shortest.
fn describe_range(chapter_from: &i64, passage_from: &i64, chapter_to: &i64, passage_to: &i64) -> String {
    if chapter_from == chapter_to && passage_from == passage_to {
        format!("{chapter_from}:{passage_from}")
    } else if chapter_from == chapter_to {
        format!("{chapter_from}:{passage_from} - {passage_to}")
    } else {
        format!("{chapter_from}:{passage_from} - {chapter_to}:{passage_to}")
    }
}
