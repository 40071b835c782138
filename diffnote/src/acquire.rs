//! One-time diff acquisition before the UI starts.
//!
//! The default source is the repository containing the current directory:
//! the HEAD tree against the working tree (staged and unstaged changes, no
//! untracked files) with three lines of context and rename detection, printed
//! as a unified patch. That is what `git diff HEAD` prints. A file or stdin
//! can be used instead.
//!
//! `git2::Repository` is `!Send`; it is opened, used and dropped inside
//! [`acquire`] on the calling thread.

use std::io::Read;
use std::path::{Path, PathBuf};

use git2::{DiffFindOptions, DiffFormat, DiffOptions, ErrorCode, Repository};
use thiserror::Error;
use tracing::{debug, info};

/// Where the diff text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    /// HEAD against the working tree of the enclosing repository.
    Repository,
    File(PathBuf),
    Stdin,
}

/// No diff text could be obtained. Distinct from an empty diff.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("not inside a git repository ({0})")]
    NotARepository(#[source] git2::Error),

    #[error("repository has no commits yet, so there is no HEAD to diff against")]
    NoHead,

    #[error("git diff failed: {0}")]
    Git(#[from] git2::Error),

    #[error("cannot read diff file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read diff from stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

/// Reads the full diff text from `source`.
///
/// # Errors
///
/// Returns [`AcquireError`] when the source is unavailable. An unchanged
/// working tree or an empty file is `Ok("")`, not an error.
pub fn acquire(source: &DiffSource) -> Result<String, AcquireError> {
    let text = match source {
        DiffSource::Repository => {
            let cwd = std::env::current_dir().map_err(|source| AcquireError::File {
                path: PathBuf::from("."),
                source,
            })?;
            diff_head_to_workdir(&cwd)?
        }
        DiffSource::File(path) => std::fs::read_to_string(path)
            .map_err(|source| AcquireError::File { path: path.clone(), source })?,
        DiffSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(AcquireError::Stdin)?;
            text
        }
    };
    info!(?source, bytes = text.len(), "diff acquired");
    Ok(text)
}

/// Produces the `git diff HEAD` patch for the repository enclosing `start`.
///
/// # Errors
///
/// Returns [`AcquireError::NotARepository`] when no repository encloses
/// `start`, [`AcquireError::NoHead`] for an unborn branch, and
/// [`AcquireError::Git`] for any other libgit2 failure.
pub fn diff_head_to_workdir(start: &Path) -> Result<String, AcquireError> {
    let repo = Repository::discover(start).map_err(AcquireError::NotARepository)?;
    debug!(path = %repo.path().display(), "opened repository");

    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            return Err(AcquireError::NoHead);
        }
        Err(e) => return Err(e.into()),
    };
    let head_tree = head.peel_to_tree()?;

    let mut opts = DiffOptions::new();
    opts.context_lines(3);
    let mut diff = repo.diff_tree_to_workdir_with_index(Some(&head_tree), Some(&mut opts))?;
    diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;

    let mut out = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if let origin @ ('+' | '-' | ' ') = line.origin() {
            out.push(origin);
        }
        out.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(out)
}
