//! Container resolution
//!
//! A container entry is a path whose children are computed by an external
//! initializer instead of being stored. Initializers are registered by the
//! host, keyed by the first segment of the container path.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::path::EntryPath;
use crate::core::project::Project;
use crate::entities::attribute::AttributeKey;
use crate::entities::entry::RawEntry;

/// Editability of an attribute of a container child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttributeStatus {
    #[default]
    Ok,
    ReadOnly,
    NotSupported,
}

/// Failure reported by an initializer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No container initializer registered for '{0}'")]
    NoInitializer(String),

    #[error("Container '{path}' could not be resolved: {message}")]
    Failed { path: EntryPath, message: String },
}

/// Capability interface implemented by hosts for each container family
pub trait ContainerInitializer: Send + Sync {
    /// Child entries of the container at `path`.
    ///
    /// `Ok(None)` means the container exists in name only and yields no list.
    fn resolve(
        &self,
        path: &EntryPath,
        project: &Project,
    ) -> Result<Option<Vec<RawEntry>>, ResolveError>;

    /// Whether the container at `path` may be updated at all
    fn can_update(&self, _path: &EntryPath, _project: &Project) -> bool {
        false
    }

    /// Editability of access rules on children
    fn access_rules_status(&self, _path: &EntryPath, _project: &Project) -> AttributeStatus {
        AttributeStatus::NotSupported
    }

    /// Editability of any other attribute on children
    fn attribute_status(
        &self,
        _path: &EntryPath,
        _project: &Project,
        key: &AttributeKey,
    ) -> AttributeStatus {
        match key {
            AttributeKey::JavadocLocation => AttributeStatus::Ok,
            _ => AttributeStatus::NotSupported,
        }
    }

    /// Display text for `path`; children without a description are hidden
    fn description(&self, path: &EntryPath, _project: &Project) -> Option<String> {
        Some(path.to_string())
    }

    /// Whether library children may carry a javadoc location
    fn allows_javadoc(&self) -> bool {
        true
    }
}

/// Initializers keyed by container path segment
#[derive(Clone, Default)]
pub struct InitializerRegistry {
    initializers: HashMap<String, Arc<dyn ContainerInitializer>>,
}

impl InitializerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `initializer` for containers whose first segment is `segment`
    pub fn register(&mut self, segment: impl Into<String>, initializer: Arc<dyn ContainerInitializer>) {
        self.initializers.insert(segment.into(), initializer);
    }

    /// Get the initializer registered for a segment
    pub fn get(&self, segment: &str) -> Option<&Arc<dyn ContainerInitializer>> {
        self.initializers.get(segment)
    }

    /// Get the initializer responsible for a container path
    pub fn get_for_path(&self, path: &EntryPath) -> Option<&Arc<dyn ContainerInitializer>> {
        path.segment(0).and_then(|segment| self.get(segment))
    }

    /// Check if an initializer exists for the given segment
    pub fn has_initializer(&self, segment: &str) -> bool {
        self.initializers.contains_key(segment)
    }

    /// Registered segments, sorted
    pub fn segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.initializers.keys().map(String::as_str).collect();
        segments.sort_unstable();
        segments
    }
}

impl std::fmt::Debug for InitializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializerRegistry")
            .field("segments", &self.segments())
            .finish()
    }
}

/// Outcome of resolving one container path
#[derive(Debug, Clone, Default)]
pub struct ContainerResolution {
    /// Children to wrap, already filtered
    pub children: Vec<RawEntry>,
    /// True when the container could not be resolved
    pub missing: bool,
}

/// Resolve the container at `path` through the registry.
///
/// Failures never propagate: an absent initializer, an error or an absent
/// list all yield a missing container with no children.
pub fn resolve_container(
    registry: &InitializerRegistry,
    path: &EntryPath,
    project: &Project,
) -> ContainerResolution {
    let Some(initializer) = registry.get_for_path(path) else {
        tracing::warn!(container = %path, "no container initializer registered");
        return ContainerResolution {
            children: Vec::new(),
            missing: true,
        };
    };

    let entries = match initializer.resolve(path, project) {
        Ok(Some(entries)) => entries,
        Ok(None) => {
            tracing::warn!(container = %path, "container returns no entries");
            return ContainerResolution {
                children: Vec::new(),
                missing: true,
            };
        }
        Err(e) => {
            tracing::warn!(container = %path, error = %e, "container resolution failed");
            return ContainerResolution {
                children: Vec::new(),
                missing: true,
            };
        }
    };

    let mut children = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.path.is_empty() {
            tracing::warn!(container = %path, "empty entry in container");
            continue;
        }
        if initializer.description(&entry.path, project).is_none() {
            continue;
        }
        children.push(entry);
    }

    ContainerResolution {
        children,
        missing: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<RawEntry>);

    impl ContainerInitializer for Fixed {
        fn resolve(
            &self,
            _path: &EntryPath,
            _project: &Project,
        ) -> Result<Option<Vec<RawEntry>>, ResolveError> {
            Ok(Some(self.0.clone()))
        }

        fn description(&self, path: &EntryPath, _project: &Project) -> Option<String> {
            if path.last_segment() == Some("hidden.js") {
                None
            } else {
                Some(path.to_string())
            }
        }
    }

    struct Broken;

    impl ContainerInitializer for Broken {
        fn resolve(
            &self,
            path: &EntryPath,
            _project: &Project,
        ) -> Result<Option<Vec<RawEntry>>, ResolveError> {
            Err(ResolveError::Failed {
                path: path.clone(),
                message: "boom".into(),
            })
        }
    }

    fn p(s: &str) -> EntryPath {
        EntryPath::parse(s).unwrap()
    }

    #[test]
    fn test_registry_lookup_by_first_segment() {
        let mut registry = InitializerRegistry::new();
        registry.register("LIBS", Arc::new(Fixed(Vec::new())));
        assert!(registry.has_initializer("LIBS"));
        assert!(registry.get_for_path(&p("LIBS/browser")).is_some());
        assert!(registry.get_for_path(&p("OTHER/browser")).is_none());
        assert_eq!(registry.segments(), vec!["LIBS"]);
    }

    #[test]
    fn test_resolution_filters_hidden_and_empty_children() {
        let mut registry = InitializerRegistry::new();
        registry.register(
            "LIBS",
            Arc::new(Fixed(vec![
                RawEntry::library(p("/opt/a.js")),
                RawEntry::library(p("/opt/hidden.js")),
                RawEntry::library(EntryPath::default()),
            ])),
        );
        let resolution = resolve_container(&registry, &p("LIBS/browser"), &Project::new("web"));
        assert!(!resolution.missing);
        assert_eq!(resolution.children.len(), 1);
        assert_eq!(resolution.children[0].path, p("/opt/a.js"));
    }

    #[test]
    fn test_failures_yield_missing() {
        let mut registry = InitializerRegistry::new();
        registry.register("BAD", Arc::new(Broken));
        let project = Project::new("web");

        let failed = resolve_container(&registry, &p("BAD/x"), &project);
        assert!(failed.missing);
        assert!(failed.children.is_empty());

        let unregistered = resolve_container(&registry, &p("NONE/x"), &project);
        assert!(unregistered.missing);
    }

    #[test]
    fn test_default_statuses() {
        let init = Fixed(Vec::new());
        let project = Project::new("web");
        let path = p("LIBS/x");
        assert!(!init.can_update(&path, &project));
        assert_eq!(
            init.access_rules_status(&path, &project),
            AttributeStatus::NotSupported
        );
        assert_eq!(
            init.attribute_status(&path, &project, &AttributeKey::JavadocLocation),
            AttributeStatus::Ok
        );
    }
}
