//! Declarative host configuration
//!
//! A host that has no live workspace can describe one in YAML: the project,
//! its resources, path variables, container families and the stored build
//! path. Loading the document yields a fully wired `Host`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::container::{AttributeStatus, ContainerInitializer, ResolveError};
use crate::core::host::Host;
use crate::core::path::EntryPath;
use crate::core::project::Project;
use crate::core::resources::InMemoryResources;
use crate::core::validation::StaticDeprecations;
use crate::entities::attribute::AttributeKey;
use crate::entities::entry::RawEntry;
use crate::yaml::{parse_yaml, parse_yaml_file, YamlError};

/// Errors from loading a host configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("Project name must not be empty")]
    #[diagnostic(code(bpt::config::project), help("set `project.name`"))]
    EmptyProjectName,

    #[error("Container path '{path}' does not start with its family segment '{segment}'")]
    #[diagnostic(
        code(bpt::config::container),
        help("list each container path under the family named by its first segment")
    )]
    ContainerSegment { segment: String, path: EntryPath },
}

/// Project section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,

    /// Whether the project exists yet (default: true)
    #[serde(default = "default_true")]
    pub exists: bool,
}

fn default_true() -> bool {
    true
}

/// A linked folder and the location it points to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedFolderConfig {
    pub path: EntryPath,
    pub target: EntryPath,
}

/// Known workspace members and external files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Other project roots in the workspace
    pub projects: Vec<EntryPath>,
    pub folders: Vec<EntryPath>,
    pub files: Vec<EntryPath>,
    pub linked_folders: Vec<LinkedFolderConfig>,
    pub external_files: Vec<EntryPath>,
}

/// A path variable binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableConfig {
    pub path: EntryPath,

    /// Deprecation message, if the variable is deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

/// One container family, keyed by the first path segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerFamilyConfig {
    /// Whether containers of this family accept updates
    #[serde(default)]
    pub can_update: bool,

    /// Whether library children may carry a javadoc location (default: true)
    #[serde(default = "default_true")]
    pub allows_javadoc: bool,

    #[serde(default = "default_access_rules_status")]
    pub access_rules_status: AttributeStatus,

    /// Status per attribute name; unlisted keys fall back to the defaults
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attribute_status: BTreeMap<String, AttributeStatus>,

    /// Child paths that have no description and are hidden
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<EntryPath>,

    /// Children per container path
    #[serde(default)]
    pub paths: BTreeMap<EntryPath, Vec<RawEntry>>,
}

fn default_access_rules_status() -> AttributeStatus {
    AttributeStatus::NotSupported
}

/// Root of the host configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    pub project: ProjectConfig,

    #[serde(default)]
    pub resources: ResourcesConfig,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, VariableConfig>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub containers: BTreeMap<String, ContainerFamilyConfig>,

    /// Stored build path
    #[serde(default)]
    pub build_path: Vec<RawEntry>,
}

impl HostConfig {
    /// Load from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: HostConfig = parse_yaml_file(path)?;
        config.check()?;
        Ok(config)
    }

    /// Parse YAML text; `name` labels diagnostics
    pub fn from_yaml(text: &str, name: &str) -> Result<Self, ConfigError> {
        let config: HostConfig = parse_yaml(text, name)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.project.name.trim().is_empty() {
            return Err(ConfigError::EmptyProjectName);
        }
        for (segment, family) in &self.containers {
            for path in family.paths.keys() {
                if path.segment(0) != Some(segment.as_str()) {
                    return Err(ConfigError::ContainerSegment {
                        segment: segment.clone(),
                        path: path.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Build the host described by this configuration
    pub fn to_host(&self) -> Host {
        let project = Project::new(self.project.name.clone()).with_exists(self.project.exists);

        let mut resources = InMemoryResources::new().with_project(project.path().clone());
        for path in &self.resources.projects {
            resources = resources.with_project(path.clone());
        }
        for path in &self.resources.folders {
            resources = resources.with_folder(path.clone());
        }
        for path in &self.resources.files {
            resources = resources.with_file(path.clone());
        }
        for linked in &self.resources.linked_folders {
            resources = resources.with_linked_folder(linked.path.clone(), linked.target.clone());
        }
        for path in &self.resources.external_files {
            resources = resources.with_external_file(path.clone());
        }

        let mut deprecations = StaticDeprecations::new();
        for (name, variable) in &self.variables {
            resources = resources.with_variable(name.clone(), variable.path.clone());
            if let Some(message) = &variable.deprecated {
                deprecations.insert(name.clone(), message.clone());
            }
        }

        let mut host = Host::new(project)
            .with_resources(Arc::new(resources))
            .with_deprecations(Arc::new(deprecations));
        for (segment, family) in &self.containers {
            host = host.with_initializer(
                segment.clone(),
                Arc::new(StaticContainerInitializer::from_config(family)),
            );
        }
        host
    }

    /// Host plus the stored build path
    pub fn into_parts(self) -> (Host, Vec<RawEntry>) {
        let host = self.to_host();
        (host, self.build_path)
    }
}

/// Container initializer serving fixed child lists
#[derive(Debug, Clone, Default)]
pub struct StaticContainerInitializer {
    can_update: bool,
    allows_javadoc: bool,
    access_rules_status: AttributeStatus,
    attribute_status: HashMap<AttributeKey, AttributeStatus>,
    hidden: Vec<EntryPath>,
    paths: HashMap<EntryPath, Vec<RawEntry>>,
}

impl StaticContainerInitializer {
    pub fn new() -> Self {
        Self {
            allows_javadoc: true,
            access_rules_status: AttributeStatus::NotSupported,
            ..Self::default()
        }
    }

    pub fn from_config(config: &ContainerFamilyConfig) -> Self {
        Self {
            can_update: config.can_update,
            allows_javadoc: config.allows_javadoc,
            access_rules_status: config.access_rules_status,
            attribute_status: config
                .attribute_status
                .iter()
                .map(|(name, status)| (AttributeKey::from_name(name), *status))
                .collect(),
            hidden: config.hidden.clone(),
            paths: config
                .paths
                .iter()
                .map(|(path, entries)| (path.remove_trailing_separator(), entries.clone()))
                .collect(),
        }
    }

    pub fn with_container(mut self, path: EntryPath, children: Vec<RawEntry>) -> Self {
        self.paths.insert(path.remove_trailing_separator(), children);
        self
    }

    pub fn with_can_update(mut self, can_update: bool) -> Self {
        self.can_update = can_update;
        self
    }

    pub fn with_access_rules_status(mut self, status: AttributeStatus) -> Self {
        self.access_rules_status = status;
        self
    }

    pub fn with_attribute_status(mut self, key: AttributeKey, status: AttributeStatus) -> Self {
        self.attribute_status.insert(key, status);
        self
    }

    pub fn with_hidden(mut self, path: EntryPath) -> Self {
        self.hidden.push(path);
        self
    }

    pub fn with_allows_javadoc(mut self, allows: bool) -> Self {
        self.allows_javadoc = allows;
        self
    }
}

impl ContainerInitializer for StaticContainerInitializer {
    fn resolve(
        &self,
        path: &EntryPath,
        _project: &Project,
    ) -> Result<Option<Vec<RawEntry>>, ResolveError> {
        Ok(self.paths.get(&path.remove_trailing_separator()).cloned())
    }

    fn can_update(&self, _path: &EntryPath, _project: &Project) -> bool {
        self.can_update
    }

    fn access_rules_status(&self, _path: &EntryPath, _project: &Project) -> AttributeStatus {
        self.access_rules_status
    }

    fn attribute_status(
        &self,
        _path: &EntryPath,
        _project: &Project,
        key: &AttributeKey,
    ) -> AttributeStatus {
        match self.attribute_status.get(key) {
            Some(status) => *status,
            None if *key == AttributeKey::JavadocLocation => AttributeStatus::Ok,
            None => AttributeStatus::NotSupported,
        }
    }

    fn description(&self, path: &EntryPath, _project: &Project) -> Option<String> {
        if self.hidden.iter().any(|hidden| hidden.same_location(path)) {
            None
        } else {
            Some(path.to_string())
        }
    }

    fn allows_javadoc(&self) -> bool {
        self.allows_javadoc
    }
}
