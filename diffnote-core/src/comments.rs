//! Line-anchored review comments.
//!
//! The store maps each [`LineIdentity`] to at most one [`Comment`]. Writing to an
//! occupied identity replaces the previous comment in a single map operation, so
//! there is never a moment where two comments share a line or a comment is
//! half-updated.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::diff::{DiffLine, LineIdentity};
use crate::error::NotCommentable;

/// A comment attached to one diff line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub identity: LineIdentity,
    /// Header of the hunk the line belonged to when the comment was written.
    pub hunk: String,
    pub content: String,
    /// The commented line's own text at creation time.
    pub context: String,
}

#[derive(Debug, Clone, Default)]
pub struct CommentStore {
    comments: HashMap<LineIdentity, Comment>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces the comment on `line`.
    ///
    /// The identity, hunk header and context snapshot are all taken from `line`.
    ///
    /// # Errors
    ///
    /// Returns [`NotCommentable`] for file and hunk header rows; the store is
    /// left untouched.
    pub fn upsert(
        &mut self,
        line: &DiffLine,
        content: impl Into<String>,
    ) -> Result<&Comment, NotCommentable> {
        let identity = line.identity().ok_or(NotCommentable(line.kind()))?;
        let comment = Comment {
            identity: identity.clone(),
            hunk: line.hunk_header().to_owned(),
            content: content.into(),
            context: line.text().to_owned(),
        };
        let stored = match self.comments.entry(identity) {
            Entry::Occupied(mut slot) => {
                slot.insert(comment);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(comment),
        };
        Ok(stored)
    }

    /// Deletes the comment at `identity`, returning it. Absent is not an error.
    pub fn remove(&mut self, identity: &LineIdentity) -> Option<Comment> {
        self.comments.remove(identity)
    }

    pub fn get(&self, identity: &LineIdentity) -> Option<&Comment> {
        self.comments.get(identity)
    }

    pub fn contains(&self, identity: &LineIdentity) -> bool {
        self.comments.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Number of comments anchored in `path`.
    pub fn count_for_file(&self, path: &str) -> usize {
        self.comments.keys().filter(|id| id.file_path == path).count()
    }

    /// All comments in export order: file path, then line number, then side.
    pub fn sorted(&self) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self.comments.values().collect();
        comments.sort_by(|a, b| a.identity.cmp(&b.identity));
        comments
    }
}
