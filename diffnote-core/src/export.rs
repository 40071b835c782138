//! Feedback export.
//!
//! Turns the comment store into the `feedback.json` record consumed by the
//! agent, and writes it atomically: the JSON goes to a temporary file in the
//! target directory, is synced, then renamed over the target. A failed write
//! leaves the in-memory [`Feedback`] untouched so the caller can retry or fall
//! back to another sink.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::comments::CommentStore;
use crate::error::ExportError;

/// Invocation recorded in `diff_command` unless the user overrides it.
pub const DEFAULT_DIFF_COMMAND: &str = "git diff HEAD";

/// Default output file name, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "feedback.json";

/// One exported comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackComment {
    pub file: String,
    /// The numeric half of the line identity (new side when present, else old).
    pub line: u32,
    pub hunk: String,
    pub content: String,
    pub context: String,
}

/// The complete exported session record. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Capture time, RFC 3339 in UTC.
    pub timestamp: String,
    pub diff_command: String,
    pub comments: Vec<FeedbackComment>,
}

impl Feedback {
    /// Pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialize`] if encoding fails.
    pub fn to_json(&self) -> Result<String, ExportError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Builds the feedback record from the store, stamped with `now`.
///
/// Comments are ordered by file path, then line number, then side (old before
/// new), so exporting the same store twice yields the same order. An empty
/// store produces an empty `comments` list.
pub fn build_feedback(store: &CommentStore, diff_command: &str, now: DateTime<Utc>) -> Feedback {
    let comments = store
        .sorted()
        .into_iter()
        .map(|c| FeedbackComment {
            file: c.identity.file_path.clone(),
            line: c.identity.line,
            hunk: c.hunk.clone(),
            content: c.content.clone(),
            context: c.context.clone(),
        })
        .collect();

    Feedback {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        diff_command: diff_command.to_owned(),
        comments,
    }
}

/// Atomically writes `feedback` as JSON to `path`.
///
/// Creates missing parent directories. On crash a `.<name>.tmp` file may remain
/// next to the target.
///
/// # Errors
///
/// Returns [`ExportError::Io`] naming the path that failed, or
/// [`ExportError::Serialize`] if encoding fails.
pub fn write_feedback(path: &Path, feedback: &Feedback) -> Result<(), ExportError> {
    let json = feedback.to_json()?;
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ExportError::Io { path, source }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let tmp = temp_path(path);
    debug!(target = %path.display(), tmp = %tmp.display(), "writing feedback");
    let result = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(path)(source));
    }

    info!(path = %path.display(), comments = feedback.comments.len(), "feedback written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_owned());
    path.with_file_name(format!(".{name}.tmp"))
}
