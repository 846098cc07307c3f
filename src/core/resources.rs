//! Resource store contract
//!
//! The build-path model never touches the filesystem itself. It asks a
//! `ResourceStore` whether a workspace member exists, where a linked folder
//! points to, whether an external file exists and what a path variable
//! resolves to. `InMemoryResources` is a store backed by plain maps, used by
//! hosts that describe their workspace declaratively and by tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::core::path::EntryPath;

/// Kind of workspace member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    File,
    Folder,
    Project,
}

/// Handle to a workspace member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    path: EntryPath,
    kind: ResourceKind,
    /// Physical location when the member is a link
    link_location: Option<EntryPath>,
}

impl Resource {
    pub fn new(path: EntryPath, kind: ResourceKind) -> Self {
        Self {
            path,
            kind,
            link_location: None,
        }
    }

    pub fn linked(path: EntryPath, kind: ResourceKind, location: EntryPath) -> Self {
        Self {
            path,
            kind,
            link_location: Some(location),
        }
    }

    pub fn path(&self) -> &EntryPath {
        &self.path
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn is_linked(&self) -> bool {
        self.link_location.is_some()
    }

    pub fn link_location(&self) -> Option<&EntryPath> {
        self.link_location.as_ref()
    }

    /// Folders and projects are containers of other members
    pub fn is_container(&self) -> bool {
        matches!(self.kind, ResourceKind::Folder | ResourceKind::Project)
    }
}

/// Errors from resource creation
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Cannot create folder at empty path")]
    EmptyPath,

    #[error("Parent of '{0}' does not exist")]
    ParentMissing(EntryPath),

    #[error("A file already exists at '{0}'")]
    FileExists(EntryPath),
}

/// Storage collaborator consulted when entries are created
pub trait ResourceStore: Send + Sync {
    /// Look up a workspace member by its full path
    fn find_member(&self, path: &EntryPath) -> Option<Resource>;

    /// Whether `path` names an existing file outside the workspace
    fn is_external_file(&self, path: &EntryPath) -> bool;

    /// Resolve a variable path (`VAR/rest`) to a concrete path
    fn resolve_variable(&self, path: &EntryPath) -> Option<EntryPath>;

    /// Create a folder in the workspace, returning its handle
    fn create_folder(&self, path: &EntryPath) -> Result<Resource, ResourceError>;

    fn exists(&self, path: &EntryPath) -> bool {
        self.find_member(path).is_some() || self.is_external_file(path)
    }
}

/// Map-backed resource store
#[derive(Debug, Default)]
pub struct InMemoryResources {
    members: Mutex<BTreeMap<EntryPath, Resource>>,
    external_files: BTreeSet<EntryPath>,
    variables: BTreeMap<String, EntryPath>,
}

impl InMemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project root
    pub fn with_project(self, path: EntryPath) -> Self {
        self.insert(Resource::new(path, ResourceKind::Project));
        self
    }

    pub fn with_folder(self, path: EntryPath) -> Self {
        self.insert(Resource::new(path, ResourceKind::Folder));
        self
    }

    pub fn with_file(self, path: EntryPath) -> Self {
        self.insert(Resource::new(path, ResourceKind::File));
        self
    }

    /// Register a linked folder pointing at `target`
    pub fn with_linked_folder(self, path: EntryPath, target: EntryPath) -> Self {
        self.insert(Resource::linked(path, ResourceKind::Folder, target));
        self
    }

    pub fn with_external_file(mut self, path: EntryPath) -> Self {
        self.external_files.insert(path.remove_trailing_separator());
        self
    }

    /// Bind a path variable name to a location
    pub fn with_variable(mut self, name: impl Into<String>, path: EntryPath) -> Self {
        self.variables.insert(name.into(), path);
        self
    }

    fn insert(&self, resource: Resource) {
        self.members()
            .insert(resource.path().remove_trailing_separator(), resource);
    }

    /// Lock the member map. A writer that panicked leaves the map itself
    /// intact, so a poisoned lock is recovered rather than reported.
    fn members(&self) -> MutexGuard<'_, BTreeMap<EntryPath, Resource>> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of registered workspace members
    pub fn member_count(&self) -> usize {
        self.members().len()
    }
}

impl ResourceStore for InMemoryResources {
    fn find_member(&self, path: &EntryPath) -> Option<Resource> {
        self.members()
            .get(&path.remove_trailing_separator())
            .cloned()
    }

    fn is_external_file(&self, path: &EntryPath) -> bool {
        self.external_files
            .contains(&path.remove_trailing_separator())
    }

    fn resolve_variable(&self, path: &EntryPath) -> Option<EntryPath> {
        let name = path.segment(0)?;
        let base = self.variables.get(name)?;
        Some(base.append(&path.remove_first_segments(1)))
    }

    fn create_folder(&self, path: &EntryPath) -> Result<Resource, ResourceError> {
        if path.is_empty() {
            return Err(ResourceError::EmptyPath);
        }
        let path = path.remove_trailing_separator();
        let mut members = self.members();
        if let Some(existing) = members.get(&path) {
            if existing.is_container() {
                return Ok(existing.clone());
            }
            return Err(ResourceError::FileExists(path.clone()));
        }
        let parent = path.remove_last_segments(1);
        let parent_ok = members.get(&parent).map(Resource::is_container).unwrap_or(false);
        if !parent_ok {
            return Err(ResourceError::ParentMissing(path.clone()));
        }
        let folder = Resource::new(path, ResourceKind::Folder);
        members.insert(folder.path().clone(), folder.clone());
        Ok(folder)
    }
}
