//! Placement and reordering of top-level entries
//!
//! New entries are grouped by kind: they land right after the last entry of
//! the same kind. Explicit moves work on a selection of indices and keep the
//! relative order of everything else.

use crate::core::path::EntryPath;
use crate::entities::entry::{Entry, EntryKind};

/// Index at which a new entry of `kind` is inserted
pub fn insertion_index(entries: &[Entry], kind: EntryKind) -> usize {
    match entries.iter().rposition(|e| e.kind() == kind) {
        Some(last) => last + 1,
        None if kind == EntryKind::Source => 0,
        None => entries.len(),
    }
}

/// Insert `entry` according to the kind-grouping policy, returning its index.
///
/// Duplicates are not rejected here; validation reports them.
pub fn insert(entries: &mut Vec<Entry>, entry: Entry) -> usize {
    let index = insertion_index(entries, entry.kind());
    entries.insert(index, entry);
    index
}

fn selection_mask(len: usize, selected: &[usize]) -> Vec<bool> {
    let mut mask = vec![false; len];
    for &index in selected {
        if index < len {
            mask[index] = true;
        }
    }
    mask
}

fn selected_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &on)| on.then_some(i))
        .collect()
}

/// Move the selected entries to the front, returning their new indices
pub fn move_to_top(entries: &mut Vec<Entry>, selected: &[usize]) -> Vec<usize> {
    let mask = selection_mask(entries.len(), selected);
    let (mut front, back): (Vec<_>, Vec<_>) = std::mem::take(entries)
        .into_iter()
        .zip(mask)
        .partition(|(_, on)| *on);
    let count = front.len();
    front.extend(back);
    entries.extend(front.into_iter().map(|(entry, _)| entry));
    (0..count).collect()
}

/// Move the selected entries to the end, returning their new indices
pub fn move_to_bottom(entries: &mut Vec<Entry>, selected: &[usize]) -> Vec<usize> {
    let mask = selection_mask(entries.len(), selected);
    let (back, mut front): (Vec<_>, Vec<_>) = std::mem::take(entries)
        .into_iter()
        .zip(mask)
        .partition(|(_, on)| *on);
    let count = back.len();
    front.extend(back);
    entries.extend(front.into_iter().map(|(entry, _)| entry));
    let len = entries.len();
    (len - count..len).collect()
}

/// Move each selected entry one step up unless blocked by another selected
/// entry at the top
pub fn move_up(entries: &mut [Entry], selected: &[usize]) -> Vec<usize> {
    let mut mask = selection_mask(entries.len(), selected);
    for i in 1..entries.len() {
        if mask[i] && !mask[i - 1] {
            entries.swap(i - 1, i);
            mask.swap(i - 1, i);
        }
    }
    selected_indices(&mask)
}

/// Move each selected entry one step down unless blocked at the bottom
pub fn move_down(entries: &mut [Entry], selected: &[usize]) -> Vec<usize> {
    let mut mask = selection_mask(entries.len(), selected);
    for i in (0..entries.len().saturating_sub(1)).rev() {
        if mask[i] && !mask[i + 1] {
            entries.swap(i, i + 1);
            mask.swap(i, i + 1);
        }
    }
    selected_indices(&mask)
}

/// Move the container entry with `path` to the front of the list.
///
/// Returns false when no such container exists.
pub fn promote_container(entries: &mut Vec<Entry>, path: &EntryPath) -> bool {
    let Some(index) = entries
        .iter()
        .position(|e| e.kind() == EntryKind::Container && e.path().same_location(path))
    else {
        return false;
    };
    let entry = entries.remove(index);
    entries.insert(0, entry);
    true
}
