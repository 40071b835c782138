//! Shared diff fixtures for the core integration tests.

#![allow(dead_code)]

use diffnote_core::diff::{parse_diff, DiffLine, DiffModel, MalformedPolicy};
use diffnote_core::session::{Input, ReviewSession};

/// One hunk `@@ -10,5 +10,7 @@` with a deletion at old line 11 and additions at
/// new lines 11, 12 and 15.
pub const SCENARIO: &str = concat!(
    "diff --git a/web/check.js b/web/check.js\n",
    "index 3b18e51..a2f4c7d 100644\n",
    "--- a/web/check.js\n",
    "+++ b/web/check.js\n",
    "@@ -10,5 +10,7 @@\n",
    " function check(value) {\n",
    "-console.log(\"old\");\n",
    "+console.log(\"new\");\n",
    "+return true;\n",
    " }\n",
    " \n",
    "+// helper\n",
    " function helper() {\n",
);

/// Two text files (three hunks) and one binary file.
pub const MULTI_FILE: &str = concat!(
    "diff --git a/src/main.rs b/src/main.rs\n",
    "index abc123..def456 100644\n",
    "--- a/src/main.rs\n",
    "+++ b/src/main.rs\n",
    "@@ -1,5 +1,6 @@ fn main()\n",
    " fn main() {\n",
    "     println!(\"Hello\");\n",
    "+    println!(\"World\");\n",
    " }\n",
    " \n",
    " // end\n",
    "diff --git a/src/lib.rs b/src/lib.rs\n",
    "index 111222..333444 100644\n",
    "--- a/src/lib.rs\n",
    "+++ b/src/lib.rs\n",
    "@@ -10,7 +10,6 @@ impl Foo {\n",
    " impl Foo {\n",
    "     fn bar(&self) {\n",
    "-        // old comment\n",
    "         self.do_thing();\n",
    "     }\n",
    " }\n",
    " \n",
    "@@ -30,2 +29,3 @@ impl Foo {\n",
    " fn tail() {}\n",
    "+fn added() {}\n",
    " // eof\n",
    "diff --git a/assets/logo.png b/assets/logo.png\n",
    "index 0000001..0000002 100644\n",
    "Binary files a/assets/logo.png and b/assets/logo.png differ\n",
);

pub fn parse(text: &str) -> DiffModel {
    parse_diff(text, MalformedPolicy::Abort)
        .expect("fixture should parse")
        .model
}

pub fn session(text: &str) -> ReviewSession {
    ReviewSession::new(parse(text))
}

/// Moves the session cursor to the first row matching `pred`.
pub fn move_to(session: &mut ReviewSession, pred: impl Fn(&DiffLine) -> bool) {
    let nav = session.navigation();
    let target = (0..nav.len())
        .find(|&i| nav.line(session.model(), i).is_some_and(|l| pred(l)))
        .expect("no row matches");
    let delta = target as isize - nav.position() as isize;
    session.handle(Input::Move(delta));
    assert_eq!(session.navigation().position(), target);
}

pub fn type_text(session: &mut ReviewSession, text: &str) {
    for c in text.chars() {
        session.handle(Input::Insert(c));
    }
}
