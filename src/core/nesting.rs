//! Nesting-conflict resolution
//!
//! Source roots must stay disjoint. When one root lies inside another, the
//! outer root gets an exclusion pattern for the inner one, stored relative to
//! the outer root. Results are reported as indices into the slices passed in.

use crate::core::path::EntryPath;
use crate::core::project::Project;
use crate::entities::entry::{Entry, EntryKind};

/// Which side of a pair was modified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PairFix {
    other: bool,
    changed: bool,
}

/// Resolve the conflict between the changed entry `changed` and `other`
fn fix_pair(changed: &mut Entry, other: &mut Entry) -> PairFix {
    let mut fix = PairFix::default();
    if other.kind() != EntryKind::Source || other.path().same_location(changed.path()) {
        return fix;
    }

    if other.path().is_prefix_of(changed.path()) {
        let folder = changed.denotes_folder();
        if other.exclude_nested(changed.path(), folder) {
            tracing::debug!(outer = %other.path(), inner = %changed.path(), "excluded nested entry");
            fix.other = true;
        }
    } else if changed.kind() == EntryKind::Source && changed.path().is_prefix_of(other.path()) {
        if changed.exclude_nested(other.path(), true) {
            tracing::debug!(outer = %changed.path(), inner = %other.path(), "excluded nested entry");
            fix.changed = true;
        }
    }
    fix
}

fn pair_mut(entries: &mut [Entry], a: usize, b: usize) -> (&mut Entry, &mut Entry) {
    if a < b {
        let (left, right) = entries.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = entries.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

fn push_unique(indices: &mut Vec<usize>, index: usize) {
    if !indices.contains(&index) {
        indices.push(index);
    }
}

/// Single-entry fix-up after the entry at `index` changed.
///
/// Returns the indices of every entry that received a new exclusion,
/// sorted. Out-of-range indices yield no changes.
pub fn fix_nesting_conflicts(entries: &mut [Entry], index: usize) -> Vec<usize> {
    let mut modified = Vec::new();
    if index >= entries.len() {
        return modified;
    }
    for other in 0..entries.len() {
        if other == index {
            continue;
        }
        let (changed, existing) = pair_mut(entries, index, other);
        let fix = fix_pair(changed, existing);
        if fix.other {
            push_unique(&mut modified, other);
        }
        if fix.changed {
            push_unique(&mut modified, index);
        }
    }
    modified.sort_unstable();
    modified
}

/// Entries modified by a bulk fix-up, as indices into each slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkFixup {
    pub existing: Vec<usize>,
    pub proposed: Vec<usize>,
}

impl BulkFixup {
    pub fn is_empty(&self) -> bool {
        self.existing.is_empty() && self.proposed.is_empty()
    }
}

/// Bulk fix-up for several proposed entries created together.
///
/// Each proposed entry, in order, is checked against every existing entry
/// and every other proposed entry.
pub fn fix_nesting_conflicts_bulk(existing: &mut [Entry], proposed: &mut [Entry]) -> BulkFixup {
    let mut result = BulkFixup::default();
    for index in 0..proposed.len() {
        for other in 0..existing.len() {
            let fix = fix_pair(&mut proposed[index], &mut existing[other]);
            if fix.other {
                push_unique(&mut result.existing, other);
            }
            if fix.changed {
                push_unique(&mut result.proposed, index);
            }
        }
        for other in 0..proposed.len() {
            if other == index {
                continue;
            }
            let (changed, sibling) = pair_mut(proposed, index, other);
            let fix = fix_pair(changed, sibling);
            if fix.other {
                push_unique(&mut result.proposed, other);
            }
            if fix.changed {
                push_unique(&mut result.proposed, index);
            }
        }
    }
    result.existing.sort_unstable();
    result.proposed.sort_unstable();
    result
}

/// Remove `path` from the inclusion and exclusion filters of every entry.
///
/// Paths inside the project are converted to project-relative folder
/// patterns first. Returns the indices of the modified entries.
pub fn remove_filters(path: &EntryPath, project: &Project, entries: &mut [Entry]) -> Vec<usize> {
    let pattern = match path.relative_to(project.path()) {
        Some(relative) => relative.add_trailing_separator(),
        None => path.clone(),
    };

    let mut modified = Vec::new();
    for (index, entry) in entries.iter_mut().enumerate() {
        let mut changed = false;

        let exclusions = entry.exclusions();
        if exclusions.contains(&pattern) {
            let kept: Vec<EntryPath> = exclusions.iter().filter(|p| **p != pattern).cloned().collect();
            changed |= entry.set_exclusions(kept);
        }

        let inclusions = entry.inclusions();
        if inclusions.contains(&pattern) {
            let kept: Vec<EntryPath> = inclusions.iter().filter(|p| **p != pattern).cloned().collect();
            changed |= entry.set_inclusions(kept);
        }

        if changed {
            modified.push(index);
        }
    }
    modified
}

/// Whether the project root itself is a source root
pub fn is_project_source_folder(entries: &[Entry], project: &Project) -> bool {
    entries
        .iter()
        .any(|e| e.kind() == EntryKind::Source && e.path().same_location(project.path()))
}

/// Find the entry with the given kind and path
pub fn find_entry<'a>(entries: &'a [Entry], kind: EntryKind, path: &EntryPath) -> Option<&'a Entry> {
    entries
        .iter()
        .find(|e| e.kind() == kind && e.path().same_location(path))
}

/// Find the first entry with the given path, regardless of kind
pub fn find_by_path<'a>(entries: &'a [Entry], path: &EntryPath) -> Option<&'a Entry> {
    entries.iter().find(|e| e.path().same_location(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::Host;

    fn p(s: &str) -> EntryPath {
        EntryPath::parse(s).unwrap()
    }

    fn source(host: &Host, path: &str) -> Entry {
        Entry::new(host, EntryKind::Source, p(path))
    }

    fn host() -> Host {
        Host::new(Project::new("proj"))
    }

    #[test]
    fn test_outer_root_excludes_new_inner_root() {
        let host = host();
        let mut entries = vec![source(&host, "/proj"), source(&host, "/proj/sub")];
        let modified = fix_nesting_conflicts(&mut entries, 1);
        assert_eq!(modified, vec![0]);
        assert_eq!(entries[0].exclusions(), &[p("sub/")]);
        assert_eq!(entries[0].exclusions()[0].to_string(), "sub/");
        assert!(entries[1].exclusions().is_empty());
    }

    #[test]
    fn test_new_outer_root_excludes_existing_inner_root() {
        let host = host();
        let mut entries = vec![source(&host, "/proj/a/b"), source(&host, "/proj")];
        let modified = fix_nesting_conflicts(&mut entries, 1);
        assert_eq!(modified, vec![1]);
        assert_eq!(entries[1].exclusions()[0].to_string(), "a/b/");
    }

    #[test]
    fn test_second_pass_adds_nothing() {
        let host = host();
        let mut entries = vec![source(&host, "/proj"), source(&host, "/proj/sub")];
        fix_nesting_conflicts(&mut entries, 1);
        assert!(fix_nesting_conflicts(&mut entries, 1).is_empty());
        assert_eq!(entries[0].exclusions().len(), 1);
    }

    #[test]
    fn test_broader_pattern_counts_as_excluded() {
        let host = host();
        let mut outer = source(&host, "/proj");
        outer.set_exclusions(vec![p("lib/")]);
        let mut entries = vec![outer, source(&host, "/proj/lib/nested")];
        assert!(fix_nesting_conflicts(&mut entries, 1).is_empty());
    }

    #[test]
    fn test_identical_paths_never_conflict() {
        let host = host();
        let mut entries = vec![source(&host, "/proj/src"), source(&host, "/proj/src")];
        assert!(fix_nesting_conflicts(&mut entries, 1).is_empty());
    }

    #[test]
    fn test_library_file_inside_source_excluded_without_separator() {
        let host = host();
        let mut entries = vec![
            source(&host, "/proj"),
            Entry::new(&host, EntryKind::Library, p("/proj/lib/a.js")),
        ];
        assert_eq!(fix_nesting_conflicts(&mut entries, 1), vec![0]);
        assert_eq!(entries[0].exclusions()[0].to_string(), "lib/a.js");
    }

    #[test]
    fn test_bulk_fixup_in_supplied_order() {
        let host = host();
        let mut existing = vec![source(&host, "/proj")];
        let mut proposed = vec![source(&host, "/proj/a"), source(&host, "/proj/a/b")];
        let fixup = fix_nesting_conflicts_bulk(&mut existing, &mut proposed);
        assert_eq!(fixup.existing, vec![0]);
        assert_eq!(fixup.proposed, vec![0]);
        let exclusions: Vec<String> = existing[0].exclusions().iter().map(|p| p.to_string()).collect();
        assert_eq!(exclusions, vec!["a/"]);
        assert_eq!(proposed[0].exclusions()[0].to_string(), "b/");
    }

    #[test]
    fn test_remove_filters() {
        let host = host();
        let mut outer = source(&host, "/proj");
        outer.set_exclusions(vec![p("gen/"), p("gen"), p("out/")]);
        let mut entries = vec![outer, source(&host, "/proj/src")];
        let modified = remove_filters(&p("/proj/gen"), &Project::new("proj"), &mut entries);
        assert_eq!(modified, vec![0]);
        assert_eq!(entries[0].exclusions(), &[p("gen"), p("out/")]);
    }

    #[test]
    fn test_lookup_helpers() {
        let host = host();
        let entries = vec![
            source(&host, "/proj"),
            Entry::new(&host, EntryKind::Library, p("/opt/a.js")),
        ];
        assert!(is_project_source_folder(&entries, host.project()));
        assert!(find_entry(&entries, EntryKind::Library, &p("/opt/a.js")).is_some());
        assert!(find_entry(&entries, EntryKind::Source, &p("/opt/a.js")).is_none());
        assert!(find_entry(&entries, EntryKind::Source, &p("/proj/")).is_some());
        assert_eq!(
            find_by_path(&entries, &p("/proj")).map(Entry::kind),
            Some(EntryKind::Source)
        );
    }
}
