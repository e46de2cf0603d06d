//! Per-URL audit records

use crate::audit::{classify, ExtractedFields};
use crate::model::Semaphore;
use std::fmt;

/// Literal written in place of a status code when the fetch failed
pub const FETCH_ERROR_MARKER: &str = "Error";

/// HTTP status of an audited URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpStatus {
    /// The server answered with this status code
    Code(u16),

    /// The request failed before any status was obtained
    FetchError,
}

impl HttpStatus {
    /// Returns true only for an actual `200 OK`
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Code(200))
    }

    /// Returns the numeric code, if the server answered
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::FetchError => None,
        }
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::FetchError => f.write_str(FETCH_ERROR_MARKER),
        }
    }
}

/// The audit outcome for a single input URL
///
/// Records are built once by the batch runner and never change afterwards.
/// The semaphore is always derived from `(status, indexable)`, so there is
/// no constructor that accepts one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditResult {
    url: String,
    status: HttpStatus,
    indexable: bool,
    title: String,
    meta_title: String,
    meta_description: String,
    semaphore: Semaphore,
}

impl AuditResult {
    /// Builds the record for a page that answered `200 OK`
    pub fn from_page(url: impl Into<String>, status: HttpStatus, fields: ExtractedFields) -> Self {
        let semaphore = classify(status, fields.indexable);
        Self {
            url: url.into(),
            status,
            indexable: fields.indexable,
            title: fields.title,
            meta_title: fields.meta_title,
            meta_description: fields.meta_description,
            semaphore,
        }
    }

    /// Builds the record for a page that answered with a non-200 status
    pub fn from_status(url: impl Into<String>, code: u16) -> Self {
        Self::without_page(url, HttpStatus::Code(code))
    }

    /// Builds the record for a URL whose fetch failed outright
    pub fn from_fetch_error(url: impl Into<String>) -> Self {
        Self::without_page(url, HttpStatus::FetchError)
    }

    fn without_page(url: impl Into<String>, status: HttpStatus) -> Self {
        Self {
            url: url.into(),
            status,
            indexable: false,
            title: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            semaphore: classify(status, false),
        }
    }

    /// The input URL, exactly as read from the list
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> HttpStatus {
        self.status
    }

    pub fn indexable(&self) -> bool {
        self.indexable
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn meta_title(&self) -> &str {
        &self.meta_title
    }

    pub fn meta_description(&self) -> &str {
        &self.meta_description
    }

    pub fn semaphore(&self) -> Semaphore {
        self.semaphore
    }
}
