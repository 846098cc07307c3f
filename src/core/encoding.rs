//! Canonical encoding for change detection
//!
//! The entry list is serialized into one string; two lists are unchanged
//! exactly when their strings are equal. Every variable-length piece is
//! prefixed with its length in brackets so no delimiter can collide with
//! path or attribute text.

use std::fmt::Write as _;

use crate::core::path::EntryPath;
use crate::entities::attribute::{AttributeKey, AttributeValue};
use crate::entities::entry::Entry;

/// Built-in keys encoded in this order, when present on the entry
const ENCODED_KEYS: [AttributeKey; 4] = [
    AttributeKey::Exclusion,
    AttributeKey::Inclusion,
    AttributeKey::AccessRules,
    AttributeKey::CombineAccessRules,
];

fn push_prefixed(buf: &mut String, text: &str) {
    let _ = write!(buf, "[{}]{}", text.chars().count(), text);
}

fn push_path(buf: &mut String, path: &EntryPath) {
    push_prefixed(buf, &path.to_string());
}

fn push_value(buf: &mut String, value: &AttributeValue) {
    match value {
        AttributeValue::Patterns(patterns) => {
            let _ = write!(buf, "[{}]", patterns.len());
            for pattern in patterns {
                push_path(buf, pattern);
                buf.push(';');
            }
            buf.push(';');
        }
        AttributeValue::AccessRules(rules) => {
            let _ = write!(buf, "[{}]", rules.len());
            for rule in rules {
                push_path(buf, &rule.pattern);
                let _ = write!(buf, ";{};", rule.kind.code());
            }
            buf.push(';');
        }
        AttributeValue::Flag(flag) => {
            let _ = write!(buf, "{};", flag);
        }
        AttributeValue::Text(Some(text)) => push_prefixed(buf, text),
        AttributeValue::Text(None) => buf.push_str("[]"),
    }
}

fn encode_entry(buf: &mut String, entry: &Entry) {
    let _ = write!(buf, "{};", entry.kind().code());
    push_path(buf, entry.path());
    if let Some(target) = entry.link_target() {
        buf.push_str("->");
        push_path(buf, target);
    }
    buf.push(';');
    let _ = write!(buf, "{};", entry.resolved().exported);

    for key in &ENCODED_KEYS {
        if let Some(value) = entry.attribute_value(key) {
            push_value(buf, value);
        }
    }

    for attr in entry.attributes() {
        if matches!(attr.key(), AttributeKey::JavadocLocation | AttributeKey::Custom(_)) {
            push_prefixed(buf, attr.key().as_str());
            push_value(buf, attr.value());
        }
    }
}

/// Encode the ordered entry list into its canonical string
pub fn encode_entries(entries: &[Entry]) -> String {
    let mut buf = String::new();
    let _ = write!(buf, "[{}]", entries.len());
    for entry in entries {
        encode_entry(&mut buf, entry);
    }
    buf
}

/// Dirty check against a captured baseline encoding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    baseline: Option<String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker whose baseline is the current state of `entries`
    pub fn capture(entries: &[Entry]) -> Self {
        Self {
            baseline: Some(encode_entries(entries)),
        }
    }

    /// Replace the baseline, typically after initialization or a save
    pub fn reset(&mut self, entries: &[Entry]) {
        self.baseline = Some(encode_entries(entries));
    }

    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref()
    }

    /// Whether `entries` differs from the baseline. Without a baseline
    /// everything counts as changed.
    pub fn has_changes(&self, entries: &[Entry]) -> bool {
        match &self.baseline {
            Some(baseline) => *baseline != encode_entries(entries),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::Host;
    use crate::core::project::Project;
    use crate::entities::entry::EntryKind;

    fn p(s: &str) -> EntryPath {
        EntryPath::parse(s).unwrap()
    }

    #[test]
    fn test_encode_source_entry() {
        let host = Host::new(Project::new("web"));
        let mut entry = Entry::new(&host, EntryKind::Source, p("/web/src"));
        entry.set_exclusions(vec![p("gen/")]);
        assert_eq!(
            encode_entries(&[entry]),
            "[1]3;[8]/web/src;true;[1][4]gen/;;[0];"
        );
    }

    #[test]
    fn test_encode_library_entry() {
        let host = Host::new(Project::new("web"));
        let entry = Entry::new(&host, EntryKind::Library, p("/opt/a.js"));
        assert_eq!(
            encode_entries(&[entry]),
            "[1]1;[9]/opt/a.js;false;[0];[16]javadoc_location[]"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(encode_entries(&[]), "[0]");
    }

    #[test]
    fn test_tracker_detects_change_and_revert() {
        let host = Host::new(Project::new("web"));
        let mut entries = vec![Entry::new(&host, EntryKind::Source, p("/web/src"))];
        let tracker = ChangeTracker::capture(&entries);
        assert!(!tracker.has_changes(&entries));

        entries[0].set_exclusions(vec![p("gen/")]);
        assert!(tracker.has_changes(&entries));

        entries[0].set_exclusions(Vec::new());
        assert!(!tracker.has_changes(&entries));
    }

    #[test]
    fn test_no_baseline_means_changed() {
        assert!(ChangeTracker::new().has_changes(&[]));
    }
}
