//! Error types for PPTX to Markdown conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a package or exporting its content.
#[derive(Error, Debug)]
pub enum Error {
    /// The package could not be opened as a ZIP archive.
    #[error("Failed to open '{path}': {reason}")]
    OpenFailed { path: String, reason: String },

    /// A required part is absent from the archive.
    #[error("Part not found in archive: {path}")]
    PartMissing { path: String },

    /// An entry exists but its bytes could not be read.
    #[error("Failed to read '{path}' from archive: {reason}")]
    EntryUnreadable { path: String, reason: String },

    /// A part's XML content could not be decoded.
    #[error("Malformed XML in '{path}': {reason}")]
    MalformedXml { path: String, reason: String },

    /// A slide could not be assembled. Aborts the whole parse.
    #[error("Failed to parse slide '{path}': {cause}")]
    SlideParseFailed {
        path: String,
        #[source]
        cause: Box<Error>,
    },

    /// Requested media is absent from the archive.
    #[error("Media not found: {path}")]
    MediaNotFound { path: String },

    /// An output file or directory could not be written.
    #[error("Failed to write '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The archive was read after it had been closed.
    #[error("Archive has already been closed")]
    ArchiveClosed,
}

impl Error {
    /// Wrap this error as the cause of a slide assembly failure.
    pub fn in_slide(self, path: impl Into<String>) -> Self {
        Error::SlideParseFailed {
            path: path.into(),
            cause: Box::new(self),
        }
    }

    /// Archive path named by this error, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::OpenFailed { path, .. }
            | Error::PartMissing { path }
            | Error::EntryUnreadable { path, .. }
            | Error::MalformedXml { path, .. }
            | Error::SlideParseFailed { path, .. }
            | Error::MediaNotFound { path }
            | Error::WriteFailed { path, .. } => Some(path),
            Error::ArchiveClosed => None,
        }
    }
}
