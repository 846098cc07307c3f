//! Build path model
//!
//! `BuildPathModel` owns the top-level entry list of one project together
//! with its host. Every mutation goes through the model so that insertion
//! order, nesting exclusions and the validation report stay consistent.
//! The model is not internally synchronized; a host sharing it across
//! threads wraps it in one lock per project.

use crate::core::config::HostConfig;
use crate::core::encoding::{encode_entries, ChangeTracker};
use crate::core::host::Host;
use crate::core::nesting::{
    find_entry, fix_nesting_conflicts, fix_nesting_conflicts_bulk, is_project_source_folder,
    remove_filters, BulkFixup,
};
use crate::core::ordering;
use crate::core::path::EntryPath;
use crate::core::status::Status;
use crate::core::validation::{validate, ValidationReport};
use crate::entities::entry::{Entry, EntryKind, RawEntry};
use crate::yaml::{parse_yaml, to_yaml, YamlError};

/// Result of adding one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// Position of the new entry
    pub index: usize,
    /// Entries that received nesting exclusions, the new one included
    pub modified: Vec<usize>,
}

/// Result of adding several entries at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedAll {
    /// Final position of each new entry, in the order they were passed
    pub indices: Vec<usize>,
    /// Final positions of every entry that received nesting exclusions
    pub modified: Vec<usize>,
}

#[derive(Debug)]
pub struct BuildPathModel {
    host: Host,
    entries: Vec<Entry>,
    tracker: ChangeTracker,
    report: ValidationReport,
}

impl BuildPathModel {
    /// Empty model
    pub fn new(host: Host) -> Self {
        Self::from_entries(host, Vec::new())
    }

    /// Model for a stored build path; the loaded state becomes the baseline
    pub fn load(host: Host, raws: &[RawEntry]) -> Self {
        let entries = Entry::load_all(&host, raws);
        Self::from_entries(host, entries)
    }

    /// Model for a host configuration document
    pub fn from_config(config: HostConfig) -> Self {
        let (host, raws) = config.into_parts();
        Self::load(host, &raws)
    }

    /// Model for a YAML list of raw entries
    pub fn from_yaml(host: Host, text: &str, name: &str) -> Result<Self, YamlError> {
        let raws: Vec<RawEntry> = parse_yaml(text, name)?;
        Ok(Self::load(host, &raws))
    }

    fn from_entries(host: Host, mut entries: Vec<Entry>) -> Self {
        let report = validate(&mut entries, &host);
        let tracker = ChangeTracker::capture(&entries);
        Self {
            host,
            entries,
            tracker,
            report,
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, kind: EntryKind, path: &EntryPath) -> Option<&Entry> {
        find_entry(&self.entries, kind, path)
    }

    pub fn position(&self, kind: EntryKind, path: &EntryPath) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.kind() == kind && e.path().same_location(path))
    }

    /// Resolved forms of all entries, in order
    pub fn raw_entries(&self) -> Vec<RawEntry> {
        self.entries.iter().map(|e| e.resolved().clone()).collect()
    }

    /// Resolved forms as YAML
    pub fn to_yaml(&self) -> Result<String, YamlError> {
        to_yaml(&self.raw_entries())
    }

    /// New entry for this host, not yet part of the list
    pub fn create_entry(&self, kind: EntryKind, path: EntryPath) -> Entry {
        Entry::from_raw(&self.host, &RawEntry::new(kind, path))
    }

    /// Insert an entry by the kind-grouping policy and exclude it from, or
    /// make it exclude, overlapping source roots
    pub fn add(&mut self, entry: Entry) -> Added {
        let index = ordering::insert(&mut self.entries, entry);
        let modified = fix_nesting_conflicts(&mut self.entries, index);
        self.revalidate();
        Added { index, modified }
    }

    /// Add entries created together. Nesting is fixed in bulk before any of
    /// them is inserted; the returned indices are positions in the list
    /// after every insertion.
    pub fn add_all(&mut self, mut entries: Vec<Entry>) -> AddedAll {
        let BulkFixup { existing, proposed } =
            fix_nesting_conflicts_bulk(&mut self.entries, &mut entries);

        let mut shifted = existing;
        let mut indices: Vec<usize> = Vec::with_capacity(entries.len());
        for entry in entries {
            let index = ordering::insert(&mut self.entries, entry);
            for position in shifted.iter_mut().chain(indices.iter_mut()) {
                if *position >= index {
                    *position += 1;
                }
            }
            indices.push(index);
        }

        let mut modified = shifted;
        modified.extend(proposed.iter().filter_map(|&i| indices.get(i).copied()));
        modified.sort_unstable();
        self.revalidate();
        AddedAll { indices, modified }
    }

    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.revalidate();
        Some(removed)
    }

    /// Remove the entry with the given kind and path
    pub fn remove_entry(&mut self, kind: EntryKind, path: &EntryPath) -> Option<Entry> {
        let index = self.position(kind, path)?;
        self.remove(index)
    }

    /// Edit an entry in place. A source entry is re-checked for nesting
    /// conflicts afterwards.
    pub fn edit<R>(&mut self, index: usize, f: impl FnOnce(&mut Entry) -> R) -> Option<R> {
        let entry = self.entries.get_mut(index)?;
        let result = f(entry);
        if entry.kind() == EntryKind::Source {
            fix_nesting_conflicts(&mut self.entries, index);
        }
        self.revalidate();
        Some(result)
    }

    /// Re-run nesting fix-up for one entry
    pub fn fix_nesting(&mut self, index: usize) -> Vec<usize> {
        let modified = fix_nesting_conflicts(&mut self.entries, index);
        if !modified.is_empty() {
            self.revalidate();
        }
        modified
    }

    /// Strip a location from every inclusion and exclusion filter
    pub fn remove_filters(&mut self, path: &EntryPath) -> Vec<usize> {
        let modified = remove_filters(path, self.host.project(), &mut self.entries);
        if !modified.is_empty() {
            self.revalidate();
        }
        modified
    }

    pub fn move_to_top(&mut self, selected: &[usize]) -> Vec<usize> {
        let moved = ordering::move_to_top(&mut self.entries, selected);
        self.revalidate();
        moved
    }

    pub fn move_to_bottom(&mut self, selected: &[usize]) -> Vec<usize> {
        let moved = ordering::move_to_bottom(&mut self.entries, selected);
        self.revalidate();
        moved
    }

    pub fn move_up(&mut self, selected: &[usize]) -> Vec<usize> {
        let moved = ordering::move_up(&mut self.entries, selected);
        self.revalidate();
        moved
    }

    pub fn move_down(&mut self, selected: &[usize]) -> Vec<usize> {
        let moved = ordering::move_down(&mut self.entries, selected);
        self.revalidate();
        moved
    }

    /// Make the container with `path` the first entry
    pub fn promote_container(&mut self, path: &EntryPath) -> bool {
        let promoted = ordering::promote_container(&mut self.entries, path);
        if promoted {
            self.revalidate();
        }
        promoted
    }

    /// Recompute the children of every container entry
    pub fn refresh_containers(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.refresh_children(&self.host);
        }
        self.revalidate();
    }

    pub fn is_project_source_folder(&self) -> bool {
        is_project_source_folder(&self.entries, self.host.project())
    }

    fn revalidate(&mut self) {
        self.report = validate(&mut self.entries, &self.host);
    }

    /// Validate again and return the report
    pub fn validate(&mut self) -> &ValidationReport {
        self.revalidate();
        &self.report
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Most severe of the entry and conventions statuses
    pub fn status(&self) -> Status {
        self.report.most_severe()
    }

    /// Canonical encoding of the current list
    pub fn encode(&self) -> String {
        encode_entries(&self.entries)
    }

    /// Take the current state as the new baseline
    pub fn initialize_baseline(&mut self) {
        self.tracker.reset(&self.entries);
    }

    pub fn has_changes(&self) -> bool {
        self.tracker.has_changes(&self.entries)
    }
}
