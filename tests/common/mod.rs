//! Shared test helpers for integration tests
//!
//! Fake collaborators and small builders used across the test files.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bpt::core::{
    AttributeStatus, ContainerInitializer, ConventionsValidator, Host, InMemoryResources,
    Project, ResolveError, Status,
};
use bpt::entities::AttributeKey;
use bpt::{Entry, EntryKind, EntryPath, RawEntry};
use tempfile::TempDir;

/// Parse a path literal
pub fn p(s: &str) -> EntryPath {
    EntryPath::parse(s).unwrap()
}

/// Host for project `/proj` whose workspace already has the given folders
pub fn host_with_folders(folders: &[&str]) -> Host {
    let mut resources = InMemoryResources::new().with_project(p("/proj"));
    for folder in folders {
        resources = resources.with_folder(p(folder));
    }
    Host::new(Project::new("proj")).with_resources(Arc::new(resources))
}

pub fn test_host() -> Host {
    host_with_folders(&[])
}

pub fn source(host: &Host, path: &str) -> Entry {
    Entry::new(host, EntryKind::Source, p(path))
}

pub fn library(host: &Host, path: &str) -> Entry {
    Entry::new(host, EntryKind::Library, p(path))
}

pub fn missing_library(host: &Host, path: &str) -> Entry {
    let mut entry = library(host, path);
    entry.set_missing(true);
    entry
}

/// Initializer with per-path children and configurable statuses
#[derive(Default)]
pub struct FakeInitializer {
    pub children: HashMap<EntryPath, Vec<RawEntry>>,
    pub can_update: bool,
    pub access_rules: Option<AttributeStatus>,
    pub attributes: HashMap<AttributeKey, AttributeStatus>,
    pub allows_javadoc: bool,
    pub resolve_calls: Mutex<usize>,
}

impl FakeInitializer {
    pub fn new() -> Self {
        Self {
            allows_javadoc: true,
            ..Self::default()
        }
    }

    pub fn with_children(mut self, path: &str, children: Vec<RawEntry>) -> Self {
        self.children.insert(p(path), children);
        self
    }

    pub fn updatable(mut self) -> Self {
        self.can_update = true;
        self
    }

    pub fn with_access_rules(mut self, status: AttributeStatus) -> Self {
        self.access_rules = Some(status);
        self
    }

    pub fn with_attribute(mut self, key: AttributeKey, status: AttributeStatus) -> Self {
        self.attributes.insert(key, status);
        self
    }

    pub fn without_javadoc(mut self) -> Self {
        self.allows_javadoc = false;
        self
    }

    pub fn calls(&self) -> usize {
        *self.resolve_calls.lock().unwrap()
    }
}

impl ContainerInitializer for FakeInitializer {
    fn resolve(
        &self,
        path: &EntryPath,
        _project: &Project,
    ) -> Result<Option<Vec<RawEntry>>, ResolveError> {
        *self.resolve_calls.lock().unwrap() += 1;
        Ok(self.children.get(path).cloned())
    }

    fn can_update(&self, _path: &EntryPath, _project: &Project) -> bool {
        self.can_update
    }

    fn access_rules_status(&self, _path: &EntryPath, _project: &Project) -> AttributeStatus {
        self.access_rules.unwrap_or(AttributeStatus::NotSupported)
    }

    fn attribute_status(
        &self,
        _path: &EntryPath,
        _project: &Project,
        key: &AttributeKey,
    ) -> AttributeStatus {
        self.attributes
            .get(key)
            .copied()
            .unwrap_or(AttributeStatus::Ok)
    }

    fn allows_javadoc(&self) -> bool {
        self.allows_javadoc
    }
}

/// Initializer that always fails
pub struct FailingInitializer;

impl ContainerInitializer for FailingInitializer {
    fn resolve(
        &self,
        path: &EntryPath,
        _project: &Project,
    ) -> Result<Option<Vec<RawEntry>>, ResolveError> {
        Err(ResolveError::Failed {
            path: path.clone(),
            message: "initializer unavailable".to_string(),
        })
    }
}

/// Conventions validator returning a fixed status and recording its input
pub struct FixedConventions {
    status: Status,
    seen: Mutex<Vec<Vec<RawEntry>>>,
}

impl FixedConventions {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Entry lists passed to `validate`, oldest first
    pub fn seen(&self) -> Vec<Vec<RawEntry>> {
        self.seen.lock().unwrap().clone()
    }
}

impl ConventionsValidator for FixedConventions {
    fn validate(&self, entries: &[RawEntry], _project: &Project) -> Status {
        self.seen.lock().unwrap().push(entries.to_vec());
        self.status.clone()
    }
}

/// Write a host configuration into a fresh temp directory
pub fn write_config(yaml: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("host.yaml");
    std::fs::write(&path, yaml).unwrap();
    (tmp, path)
}
