//! Structural errors raised while scraping a header
//!
//! Any of these aborts the parse of the current file. Whether that aborts a
//! whole batch is the caller's decision; see [`crate::header::driver`].

use super::diagnostics::NullDiagnostics;
use super::preprocess::{preprocess, remove_comments};
use super::source_location::SourcePosition;
use std::fmt;
use std::path::PathBuf;

/// Result alias used throughout the scraper
pub type HeaderResult<T> = Result<T, HeaderError>;

/// Error type for header scraping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// End of text reached before a scope closed
    MalformedScope {
        /// Opening delimiter of the scope
        delimiter: char,
        /// Byte offset where the search started (or the scope opened)
        position: usize,
    },

    /// `/*` without a matching `*/`
    UnterminatedComment {
        /// Byte offset of the `/*`
        position: usize,
    },

    /// `#include` whose `<...>` or `"..."` never closes
    UnterminatedInclude {
        /// Byte offset of the `#include`
        position: usize,
    },

    /// The construct keyword a parser was asked to parse is absent
    MissingKeyword {
        /// The keyword that was expected (`class`, `#define`, ...)
        keyword: &'static str,
        /// Byte offset where the search started
        position: usize,
    },

    /// The construct keyword was found but no name follows it
    MissingName {
        /// What was being parsed
        construct: &'static str,
        /// Byte offset where the name was expected
        position: usize,
    },

    /// Declarations nested deeper than the configured limit
    NestingTooDeep {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max_depth: usize,
    },

    /// Reading a header from disk failed
    Io {
        /// File that could not be read
        path: PathBuf,
        /// OS error message
        message: String,
    },
}

impl HeaderError {
    /// Whether this error comes from the header's structure rather than I/O
    pub fn is_structural(&self) -> bool {
        !matches!(self, HeaderError::Io { .. })
    }

    /// Byte offset associated with the error, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            HeaderError::MalformedScope { position, .. }
            | HeaderError::UnterminatedComment { position }
            | HeaderError::UnterminatedInclude { position }
            | HeaderError::MissingKeyword { position, .. }
            | HeaderError::MissingName { position, .. } => Some(*position),
            HeaderError::NestingTooDeep { .. } | HeaderError::Io { .. } => None,
        }
    }

    /// Add source line/column information to the error message
    ///
    /// `text` must be the text the failing stage scanned. Offsets of
    /// [`HeaderError::UnterminatedComment`] point into the raw header, those
    /// of [`HeaderError::UnterminatedInclude`] into the comment-free text, and
    /// all others into [`Preprocessed::text`](super::preprocess::Preprocessed::text).
    /// Use [`format_in_source`](Self::format_in_source) when only the raw
    /// header is at hand.
    pub fn format_with_position(&self, text: &str) -> String {
        match self.position() {
            Some(offset) => {
                let pos = SourcePosition::from_offset(text, offset);
                format!("{} at {}\n{}", self, pos, pos.render_pointer(text))
            }
            None => self.to_string(),
        }
    }

    /// Like [`format_with_position`](Self::format_with_position), given the
    /// raw header the error came from
    ///
    /// The preprocessor stages are rerun to recover the text the offset
    /// belongs to.
    pub fn format_in_source(&self, source: &str) -> String {
        let stage_text = match self {
            HeaderError::UnterminatedComment { .. } => Ok(source.to_string()),
            HeaderError::UnterminatedInclude { .. } => remove_comments(source, &NullDiagnostics),
            _ => preprocess(source, &NullDiagnostics).map(|cleaned| cleaned.text),
        };
        match stage_text {
            Ok(text) => self.format_with_position(&text),
            Err(_) => self.to_string(),
        }
    }
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::MalformedScope {
                delimiter,
                position,
            } => write!(
                f,
                "Malformed scope: '{}' opened at or after byte {} is never closed",
                delimiter, position
            ),
            HeaderError::UnterminatedComment { position } => {
                write!(f, "Unterminated multi-line comment at byte {}", position)
            }
            HeaderError::UnterminatedInclude { position } => {
                write!(f, "Unterminated #include delimiter at byte {}", position)
            }
            HeaderError::MissingKeyword { keyword, position } => {
                write!(f, "Expected '{}' at or after byte {}", keyword, position)
            }
            HeaderError::MissingName {
                construct,
                position,
            } => write!(f, "Missing {} name at byte {}", construct, position),
            HeaderError::NestingTooDeep { depth, max_depth } => write!(
                f,
                "Declarations nested {} deep exceed limit of {}",
                depth, max_depth
            ),
            HeaderError::Io { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for HeaderError {}
