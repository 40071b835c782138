//! Helpers for the structural lines of a unified diff.

use super::types::HunkRange;

/// Parses a hunk header line.
///
/// Accepts `@@ -a,b +c,d @@`, the short forms `@@ -a +c @@` (length 1) and an
/// optional function-context suffix after the closing `@@`.
///
/// Returns `None` if the ranges cannot be read.
pub(super) fn parse_hunk_header(line: &str) -> Option<HunkRange> {
    let rest = line.strip_prefix("@@ ")?;
    let end = rest.find(" @@")?;
    let mut parts = rest[..end].split_whitespace();

    let (old_start, old_len) = parse_range(parts.next()?.strip_prefix('-')?)?;
    let (new_start, new_len) = parse_range(parts.next()?.strip_prefix('+')?)?;
    if parts.next().is_some() {
        return None;
    }

    Some(HunkRange { old_start, old_len, new_start, new_len })
}

/// Parses `start` or `start,len`.
fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, len)) => Some((start.parse().ok()?, len.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

/// Extracts the new-side path from the remainder of a `diff --git` line.
///
/// The format is `a/<path> b/<path>`. Paths may contain spaces and even
/// ` b/`, so the two identical halves are tried first; for renames the last
/// ` b/` separates the sides.
pub(super) fn parse_diff_git_line(rest: &str) -> Option<String> {
    let rest = rest.trim();
    if let Some(path) = symmetric_path(rest) {
        return Some(path);
    }
    if let Some(pos) = rest.rfind(" b/") {
        return Some(rest[pos + 3..].trim_matches('"').to_owned());
    }
    if let Some(pos) = rest.rfind(" \"b/") {
        return Some(rest[pos + 4..].trim_end_matches('"').to_owned());
    }
    rest.split_whitespace().last().map(|p| unquote(p).to_owned())
}

/// Splits `a/X b/X` at its midpoint when both halves name the same path.
fn symmetric_path(rest: &str) -> Option<String> {
    let inner = rest.strip_prefix("a/")?;
    let half = inner.len().checked_sub(3)?;
    if half % 2 != 0 {
        return None;
    }
    let half = half / 2;
    let old = inner.get(..half)?;
    let new = inner.get(half..)?.strip_prefix(" b/")?;
    (old == new).then(|| new.to_owned())
}

/// Cleans the path of a `---` / `+++` line.
///
/// Strips a trailing tab-separated timestamp (plain `diff -u` output), quotes,
/// and the `a/` / `b/` prefixes. Returns `None` for `/dev/null`.
pub(super) fn clean_path(raw: &str) -> Option<String> {
    let raw = raw.split('\t').next().unwrap_or(raw).trim_end();
    let raw = unquote(raw);
    if raw == "/dev/null" {
        return None;
    }
    let path = raw
        .strip_prefix("a/")
        .or_else(|| raw.strip_prefix("b/"))
        .unwrap_or(raw);
    Some(path.to_owned())
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}
