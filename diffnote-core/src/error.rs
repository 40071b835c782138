//! Error types shared by the diffnote core.
//!
//! Every fallible core operation returns one of these `thiserror` enums. None of
//! them leave the comment store half-mutated: store operations either apply in
//! full or not at all.

use std::path::PathBuf;

use thiserror::Error;

use crate::diff::LineKind;

/// A hunk whose declared line counts cannot be reconciled with its content.
///
/// Carried by [`ParseError::MalformedHunk`] under the abort policy and collected
/// in `ParsedDiff::skipped` under the skip policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedHunk {
    /// Path of the file the hunk belongs to.
    pub file: String,
    /// The raw `@@` header line as it appeared in the input.
    pub header: String,
    /// Human-readable description of the mismatch.
    pub reason: String,
}

impl std::fmt::Display for MalformedHunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.file, self.header, self.reason)
    }
}

/// Errors raised while parsing unified-diff text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Declared hunk lengths do not match the parsed content.
    #[error("malformed hunk in {0}")]
    MalformedHunk(MalformedHunk),

    /// A row was built with line numbers that contradict its kind.
    #[error(transparent)]
    InvalidLine(#[from] InvalidLine),
}

/// A comment action targeted a header row, which has no line identity.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{0:?} rows cannot carry comments")]
pub struct NotCommentable(pub LineKind);

/// A `DiffLine` was constructed with line numbers that contradict its kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind:?} line has old={old:?} new={new:?}")]
pub struct InvalidLine {
    pub kind: LineKind,
    pub old: Option<u32>,
    pub new: Option<u32>,
}

/// Errors raised while serializing or writing the feedback record.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The record could not be encoded as JSON.
    #[error("failed to encode feedback: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
