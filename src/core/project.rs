//! The project that owns a build path

use serde::{Deserialize, Serialize};

use crate::core::path::EntryPath;

/// A project as seen by the build-path model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    name: String,
    path: EntryPath,
    exists: bool,
}

impl Project {
    /// Create an existing project rooted at `/<name>`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let path = EntryPath::from_segments(true, [name.clone()]);
        Self {
            name,
            path,
            exists: true,
        }
    }

    /// Override the existence flag (e.g. for a project being created)
    pub fn with_exists(mut self, exists: bool) -> Self {
        self.exists = exists;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Workspace path of the project root
    pub fn path(&self) -> &EntryPath {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Whether `path` lies inside this project (the root itself included)
    pub fn contains(&self, path: &EntryPath) -> bool {
        self.path.is_prefix_of(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root() {
        let project = Project::new("web");
        assert_eq!(project.path().to_string(), "/web");
        assert!(project.exists());
        assert!(project.contains(&EntryPath::parse("/web/src").unwrap()));
        assert!(project.contains(&EntryPath::parse("/web").unwrap()));
        assert!(!project.contains(&EntryPath::parse("/other/src").unwrap()));
    }
}
