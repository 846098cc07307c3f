//! Inclusion/exclusion filter matching
//!
//! Patterns are Ant-style: `*` and `?` match within one segment, `**` matches
//! any number of whole segments (including none). A pattern ending with `/`
//! matches everything below that folder, as if `**` had been appended.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::core::path::EntryPath;

/// Match `path` against a single filter pattern
pub fn path_match(pattern: &str, path: &str) -> bool {
    let mut builder = GlobSetBuilder::new();
    if !add_pattern(&mut builder, pattern) {
        return false;
    }
    matches(&builder, path)
}

/// Whether `path` (relative to the entry) is matched by any of `patterns`
pub fn is_excluded_path(path: &EntryPath, patterns: &[EntryPath]) -> bool {
    let mut builder = GlobSetBuilder::new();
    let mut any = false;
    for pattern in patterns {
        any |= add_pattern(&mut builder, &pattern.to_string());
    }
    any && matches(&builder, &path.remove_trailing_separator().to_string())
}

fn matches(builder: &GlobSetBuilder, path: &str) -> bool {
    let set: GlobSet = match builder.build() {
        Ok(set) => set,
        Err(e) => {
            tracing::debug!(error = %e, "filter patterns rejected");
            return false;
        }
    };
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    set.is_match(segments.join("/"))
}

/// Add the globs equivalent to one Ant pattern; false if none compiled
fn add_pattern(builder: &mut GlobSetBuilder, pattern: &str) -> bool {
    let mut added = false;
    for text in ant_globs(pattern) {
        match GlobBuilder::new(&text).literal_separator(true).build() {
            Ok(glob) => {
                builder.add(glob);
                added = true;
            }
            Err(e) => tracing::debug!(pattern, error = %e, "filter pattern ignored"),
        }
    }
    added
}

/// Translate an Ant pattern into glob text.
///
/// A trailing `**` also matches the folder itself in Ant, while `a/**` does
/// not match `a` as a glob, so such patterns yield a second glob without the
/// trailing `**`.
fn ant_globs(pattern: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for segment in pattern.split('/').filter(|s| !s.is_empty()) {
        if segment == "**" && segments.last().map(String::as_str) == Some("**") {
            continue;
        }
        segments.push(escape_segment(segment));
    }
    if pattern.ends_with('/') && segments.last().map(String::as_str) != Some("**") {
        segments.push("**".to_string());
    }

    let mut globs = vec![segments.join("/")];
    if segments.len() > 1 && segments.last().map(String::as_str) == Some("**") {
        globs.push(segments[..segments.len() - 1].join("/"));
    }
    globs
}

/// Quote glob metacharacters that have no meaning in Ant patterns
fn escape_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '[' | ']' | '{' | '}' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        assert!(path_match("sub", "sub"));
        assert!(!path_match("sub", "sub/a.js"));
        assert!(!path_match("sub", "other"));
    }

    #[test]
    fn test_trailing_separator_covers_folder_and_contents() {
        assert!(path_match("sub/", "sub"));
        assert!(path_match("sub/", "sub/deeper/a.js"));
        assert!(!path_match("sub/", "subway"));
    }

    #[test]
    fn test_wildcards() {
        assert!(path_match("*.js", "a.js"));
        assert!(!path_match("*.js", "dir/a.js"));
        assert!(path_match("**/*.js", "dir/a.js"));
        assert!(path_match("**/*.js", "a.js"));
        assert!(path_match("a?c", "abc"));
        assert!(!path_match("a?c", "ac"));
        assert!(path_match("gen/**/out", "gen/x/y/out"));
        assert!(path_match("gen/**/**/out", "gen/out"));
        assert!(path_match("gen/**", "gen"));
    }

    #[test]
    fn test_bracket_characters_are_literal() {
        assert!(path_match("lib[1]/", "lib[1]/a.js"));
        assert!(!path_match("lib[1]/", "lib1/a.js"));
        assert!(path_match("{a,b}", "{a,b}"));
        assert!(!path_match("{a,b}", "a"));
    }

    #[test]
    fn test_is_excluded_path() {
        let patterns = vec![EntryPath::parse("lib/").unwrap()];
        assert!(is_excluded_path(&EntryPath::parse("lib/").unwrap(), &patterns));
        assert!(is_excluded_path(&EntryPath::parse("lib/ext").unwrap(), &patterns));
        assert!(!is_excluded_path(&EntryPath::parse("src").unwrap(), &patterns));
        assert!(!is_excluded_path(&EntryPath::parse("src").unwrap(), &[]));
    }
}
