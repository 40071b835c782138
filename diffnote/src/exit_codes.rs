//! Process exit codes for the diffnote binary.
//!
//! - 0: Success (feedback written, possibly with no comments)
//! - 1: Usage or configuration error
//! - 2: Diff acquisition failure (no diff text could be obtained)
//! - 3: Malformed diff rejected under `--strict`
//! - 4: Feedback could not be written (the JSON is printed to stdout instead)

/// Successful execution.
pub const SUCCESS: u8 = 0;

/// Bad arguments or an unusable configuration.
pub const USAGE_ERROR: u8 = 1;

/// Not a repository, no HEAD, or an unreadable diff file.
pub const ACQUISITION_FAILURE: u8 = 2;

/// A hunk contradicted its header and `--strict` was set.
pub const MALFORMED_DIFF: u8 = 3;

/// The feedback file could not be written.
pub const EXPORT_FAILURE: u8 = 4;
