//! Core of diffnote: unified-diff parsing, cursor navigation, line-anchored
//! comments, the review session state machine and feedback export.
//!
//! Nothing here touches a terminal. The binary crate decodes key presses into
//! [`session::Input`] values, feeds them to a [`session::ReviewSession`] and
//! renders from its read-only accessors.
//!
//! ```
//! use diffnote_core::diff::{parse_diff, MalformedPolicy};
//! use diffnote_core::session::{Input, ReviewSession};
//!
//! let text = "--- a/f.txt\n+++ b/f.txt\n@@ -1 +1 @@\n-old\n+new\n";
//! let parsed = parse_diff(text, MalformedPolicy::Abort).unwrap();
//! let mut session = ReviewSession::new(parsed.model);
//! session.handle(Input::Move(1));
//! session.handle(Input::Create);
//! for c in "looks good".chars() {
//!     session.handle(Input::Insert(c));
//! }
//! session.handle(Input::Confirm);
//! assert_eq!(session.comments().len(), 1);
//! ```

pub mod comments;
pub mod diff;
pub mod error;
pub mod export;
pub mod navigation;
pub mod session;
