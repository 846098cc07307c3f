//! Build path validation
//!
//! Validation combines two independent checks: the per-entry status (missing
//! entries, deprecated variables) and the whole-list conventions check done
//! by a `ConventionsValidator`. The caller gets the most severe of the two.

use std::collections::{HashMap, HashSet};

use crate::core::host::Host;
use crate::core::path::EntryPath;
use crate::core::pattern::is_excluded_path;
use crate::core::project::Project;
use crate::core::status::{most_severe, Status};
use crate::entities::entry::{Entry, EntryKind, RawEntry};

/// Whole-list conventions check supplied by the host
pub trait ConventionsValidator: Send + Sync {
    fn validate(&self, entries: &[RawEntry], project: &Project) -> Status;
}

/// Source of deprecation messages for path variables
pub trait DeprecationOracle: Send + Sync {
    /// Message for a deprecated variable name, `None` if not deprecated
    fn deprecation_message(&self, variable: &str) -> Option<String>;
}

/// Oracle for hosts without deprecated variables
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeprecations;

impl DeprecationOracle for NoDeprecations {
    fn deprecation_message(&self, _variable: &str) -> Option<String> {
        None
    }
}

/// Oracle backed by a fixed table of variable names
#[derive(Debug, Clone, Default)]
pub struct StaticDeprecations {
    messages: HashMap<String, String>,
}

impl StaticDeprecations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(variable, message);
        self
    }

    pub fn insert(&mut self, variable: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(variable.into(), message.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl DeprecationOracle for StaticDeprecations {
    fn deprecation_message(&self, variable: &str) -> Option<String> {
        self.messages.get(variable).cloned()
    }
}

/// Default conventions: no duplicate entries, source roots inside the
/// project, and nested source roots excluded from their ancestors
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConventions;

impl ConventionsValidator for StandardConventions {
    fn validate(&self, entries: &[RawEntry], project: &Project) -> Status {
        let mut seen: HashSet<(EntryKind, EntryPath)> = HashSet::new();
        for entry in entries {
            if !seen.insert((entry.kind, entry.path.remove_trailing_separator())) {
                return Status::error(format!(
                    "Build path contains duplicate entry: '{}'",
                    entry.path
                ));
            }
        }

        let sources: Vec<&RawEntry> = entries
            .iter()
            .filter(|e| e.kind == EntryKind::Source)
            .collect();

        for source in &sources {
            if !project.contains(&source.path) {
                return Status::error(format!(
                    "Source folder '{}' is not contained in project '{}'",
                    source.path,
                    project.name()
                ));
            }
        }

        for outer in &sources {
            for inner in &sources {
                if outer.path.same_location(&inner.path) {
                    continue;
                }
                let Some(rel) = inner.path.relative_to(&outer.path) else {
                    continue;
                };
                if !is_excluded_path(&rel, &outer.exclusion_patterns) {
                    return Status::error(format!(
                        "Cannot nest '{}' inside '{}'. To enable the nesting exclude '{}' from '{}'",
                        inner.path,
                        outer.path,
                        rel.add_trailing_separator(),
                        outer.path
                    ));
                }
            }
        }

        Status::ok()
    }
}

/// Status derived from the entries themselves.
///
/// Missing entries take precedence over deprecated variables.
pub fn entry_list_status(entries: &[Entry], oracle: &dyn DeprecationOracle) -> Status {
    let missing: Vec<&Entry> = entries.iter().filter(|e| e.is_missing()).collect();
    match missing.as_slice() {
        [] => {}
        [only] => {
            return Status::warning(format!("Build path entry is missing: {}", only.path()));
        }
        many => {
            return Status::warning(format!("{} build path entries are missing.", many.len()));
        }
    }

    entries
        .iter()
        .find_map(|e| e.deprecation_message(oracle))
        .map(Status::warning)
        .unwrap_or_default()
}

/// Outcome of validating an entry list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Missing / deprecation status
    pub entry_status: Status,
    /// Status from the conventions validator
    pub build_path_status: Status,
    /// Number of missing top-level entries
    pub missing: usize,
}

impl ValidationReport {
    /// The most severe of the two statuses
    pub fn most_severe(&self) -> Status {
        most_severe([&self.entry_status, &self.build_path_status])
    }

    pub fn is_error(&self) -> bool {
        self.most_severe().is_error()
    }
}

/// Validate the entry list.
///
/// Source entries are normalized first: each is forced to exported and its
/// export flag is locked.
pub fn validate(entries: &mut [Entry], host: &Host) -> ValidationReport {
    for entry in entries.iter_mut() {
        if entry.kind() == EntryKind::Source {
            entry.set_exported(true);
            entry.lock_export();
        }
    }

    let entry_status = entry_list_status(entries, host.deprecations());
    let raws: Vec<RawEntry> = entries.iter().map(|e| e.resolved().clone()).collect();
    let build_path_status = host.conventions().validate(&raws, host.project());
    let missing = entries.iter().filter(|e| e.is_missing()).count();

    tracing::trace!(
        project = host.project().name(),
        entries = entries.len(),
        missing,
        entry_status = %entry_status,
        build_path_status = %build_path_status,
        "validated build path"
    );

    ValidationReport {
        entry_status,
        build_path_status,
        missing,
    }
}
