use thiserror::Error;

/// Failure to map one page's lines onto the statistics table.
///
/// These abort the current page only; the rest of the document is still
/// processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected title containing '{marker}', got {found:?}")]
    MissingTitle { marker: &'static str, found: String },

    #[error("{context}: unexpected end of lines at line {line}")]
    UnexpectedEnd { context: String, line: usize },

    #[error("expected section {expected:?}, got {found:?}")]
    SectionMismatch {
        expected: &'static str,
        found: String,
    },
}

/// Document-level failure: the PDF container could not be read at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// A page that looked like a data page but did not match the table layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page {page}: {error}")]
pub struct PageError {
    /// 1-based page number within the document.
    pub page: u32,
    #[source]
    pub error: ParseError,
}
