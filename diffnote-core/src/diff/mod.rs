//! Unified-diff model and parser.
//!
//! `parse_diff` turns raw diff text into a [`DiffModel`] of files, hunks and
//! rows. The model is immutable once built; everything downstream holds it by
//! shared reference or by row index.

mod header;
mod parser;
mod types;

pub use parser::{parse_diff, MalformedPolicy, ParsedDiff};
pub use types::{
    DiffLine, DiffModel, FileDiff, FileStatus, Hunk, HunkRange, LineIdentity, LineKind, Side,
};
