//! Build-path entries
//!
//! An `Entry` is one record of a project's build path: a source folder, a
//! library, a project reference, a container or a path variable. It owns its
//! attributes and, for containers, the child entries computed by the
//! container initializer. Its externally visible form is the `RawEntry`,
//! computed lazily and dropped whenever a field that feeds it changes.

use std::cell::OnceCell;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::container::{resolve_container, AttributeStatus, ContainerInitializer};
use crate::core::host::Host;
use crate::core::path::EntryPath;
use crate::core::pattern::is_excluded_path;
use crate::core::resources::{Resource, ResourceKind};
use crate::core::validation::DeprecationOracle;
use crate::entities::attribute::{
    AccessRule, Attribute, AttributeError, AttributeKey, AttributeRef, AttributeValue,
};

/// Kind of build-path entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Source,
    Library,
    Project,
    Container,
    Variable,
}

impl EntryKind {
    /// Stable numeric code used in the canonical encoding
    pub fn code(&self) -> u8 {
        match self {
            EntryKind::Library => 1,
            EntryKind::Project => 2,
            EntryKind::Source => 3,
            EntryKind::Variable => 4,
            EntryKind::Container => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Source => "source",
            EntryKind::Library => "library",
            EntryKind::Project => "project",
            EntryKind::Container => "container",
            EntryKind::Variable => "variable",
        }
    }

    pub fn all() -> &'static [EntryKind] {
        &[
            EntryKind::Source,
            EntryKind::Library,
            EntryKind::Project,
            EntryKind::Container,
            EntryKind::Variable,
        ]
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" | "src" => Ok(EntryKind::Source),
            "library" | "lib" => Ok(EntryKind::Library),
            "project" => Ok(EntryKind::Project),
            "container" | "con" => Ok(EntryKind::Container),
            "variable" | "var" => Ok(EntryKind::Variable),
            _ => Err(format!("Unknown entry kind: {}", s)),
        }
    }
}

/// A non-reserved attribute in raw form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraAttribute {
    pub name: String,
    pub value: String,
}

/// Externally visible form of an entry, suitable for a host to persist
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawEntry {
    pub kind: EntryKind,
    pub path: EntryPath,

    /// Always true for source entries
    #[serde(default)]
    pub exported: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inclusion_patterns: Vec<EntryPath>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusion_patterns: Vec<EntryPath>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_rules: Vec<AccessRule>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub combine_access_rules: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_attributes: Vec<ExtraAttribute>,
}

impl RawEntry {
    pub fn new(kind: EntryKind, path: EntryPath) -> Self {
        Self {
            kind,
            path,
            exported: kind == EntryKind::Source,
            inclusion_patterns: Vec::new(),
            exclusion_patterns: Vec::new(),
            access_rules: Vec::new(),
            combine_access_rules: false,
            extra_attributes: Vec::new(),
        }
    }

    pub fn source(path: EntryPath) -> Self {
        Self::new(EntryKind::Source, path)
    }

    pub fn library(path: EntryPath) -> Self {
        Self::new(EntryKind::Library, path)
    }

    pub fn project(path: EntryPath) -> Self {
        Self::new(EntryKind::Project, path)
    }

    pub fn container(path: EntryPath) -> Self {
        Self::new(EntryKind::Container, path)
    }

    pub fn variable(path: EntryPath) -> Self {
        Self::new(EntryKind::Variable, path)
    }

    pub fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn with_exclusions(mut self, patterns: Vec<EntryPath>) -> Self {
        self.exclusion_patterns = patterns;
        self
    }

    pub fn with_inclusions(mut self, patterns: Vec<EntryPath>) -> Self {
        self.inclusion_patterns = patterns;
        self
    }

    pub fn with_access_rules(mut self, rules: Vec<AccessRule>) -> Self {
        self.access_rules = rules;
        self
    }

    pub fn with_combine_access_rules(mut self, combine: bool) -> Self {
        self.combine_access_rules = combine;
        self
    }

    pub fn with_extra_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attributes.push(ExtraAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// Non-owning reference from a child entry to the container that produced it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerRef {
    path: EntryPath,
}

impl ContainerRef {
    pub fn new(path: EntryPath) -> Self {
        Self { path }
    }

    /// Path of the enclosing container
    pub fn path(&self) -> &EntryPath {
        &self.path
    }
}

/// One record of the build path
#[derive(Debug, Clone)]
pub struct Entry {
    kind: EntryKind,
    path: EntryPath,
    original_path: EntryPath,
    resource: Option<Resource>,
    link_target: Option<EntryPath>,
    original_link_target: Option<EntryPath>,
    exported: bool,
    missing: bool,
    export_locked: bool,
    parent_container: Option<ContainerRef>,
    attributes: Vec<Attribute>,
    children: Vec<Entry>,
    resolved: OnceCell<RawEntry>,
}

impl Entry {
    /// Create a top-level entry without a resource
    pub fn new(host: &Host, kind: EntryKind, path: EntryPath) -> Self {
        Self::create(host, None, &[], kind, path, None, None)
    }

    /// Create a top-level entry backed by `resource`
    pub fn with_resource(
        host: &Host,
        kind: EntryKind,
        path: EntryPath,
        resource: Option<Resource>,
        link_target: Option<EntryPath>,
    ) -> Self {
        Self::create(host, None, &[], kind, path, resource, link_target)
    }

    /// `ancestors` lists the containers enclosing the new entry, outermost
    /// first
    fn create(
        host: &Host,
        parent_container: Option<ContainerRef>,
        ancestors: &[EntryPath],
        kind: EntryKind,
        path: EntryPath,
        resource: Option<Resource>,
        link_target: Option<EntryPath>,
    ) -> Self {
        let path = path.remove_trailing_separator();
        let mut entry = Self {
            kind,
            original_path: path.clone(),
            path,
            resource,
            original_link_target: link_target.clone(),
            link_target,
            exported: false,
            missing: false,
            export_locked: false,
            parent_container,
            attributes: Vec::new(),
            children: Vec::new(),
            resolved: OnceCell::new(),
        };

        let allow_javadoc = entry
            .initializer(host)
            .map(|init| init.allows_javadoc())
            .unwrap_or(true);

        match kind {
            EntryKind::Source => {
                entry.push_attribute(AttributeKey::Inclusion);
                entry.push_attribute(AttributeKey::Exclusion);
            }
            EntryKind::Library | EntryKind::Variable => {
                if allow_javadoc {
                    entry.push_attribute(AttributeKey::JavadocLocation);
                }
                entry.push_attribute(AttributeKey::AccessRules);
            }
            EntryKind::Project => {
                entry.push_attribute(AttributeKey::AccessRules);
                entry.push_attribute(AttributeKey::CombineAccessRules);
            }
            EntryKind::Container => {
                entry.push_attribute(AttributeKey::AccessRules);
                entry.resolve_children(host, ancestors);
            }
        }
        entry
    }

    /// Build a top-level entry from its raw form, consulting the resource
    /// store for the backing resource and the missing state
    pub fn from_raw(host: &Host, raw: &RawEntry) -> Self {
        Self::from_raw_in(host, None, &[], raw)
    }

    /// Build entries for a whole raw build path, preserving order
    pub fn load_all(host: &Host, raws: &[RawEntry]) -> Vec<Entry> {
        raws.iter().map(|raw| Entry::from_raw(host, raw)).collect()
    }

    fn from_raw_in(
        host: &Host,
        parent: Option<ContainerRef>,
        ancestors: &[EntryPath],
        raw: &RawEntry,
    ) -> Self {
        let store = host.resources();
        let path = raw.path.remove_trailing_separator();
        let mut resource = None;
        let mut link_target = None;
        let mut missing = false;

        match raw.kind {
            EntryKind::Container => {}
            EntryKind::Variable => {
                missing = match store.resolve_variable(&path) {
                    Some(resolved) => {
                        store.find_member(&resolved).is_none() && !store.is_external_file(&resolved)
                    }
                    None => true,
                };
            }
            EntryKind::Library => match store.find_member(&path) {
                Some(member) => {
                    link_target = member.link_location().cloned();
                    resource = Some(member);
                }
                None => {
                    if !is_archive_path(&path) {
                        let owner = path.remove_last_segments(path.segment_count().saturating_sub(1));
                        if path.segment_count() > 1 && store.find_member(&owner).is_some() {
                            resource = Some(Resource::new(path.clone(), ResourceKind::Folder));
                        }
                    }
                    missing = !store.is_external_file(&path);
                }
            },
            EntryKind::Source => {
                match store.find_member(&path) {
                    Some(member) => {
                        link_target = member.link_location().cloned();
                        resource = Some(member);
                    }
                    None => {
                        resource = Some(Resource::new(path.clone(), ResourceKind::Folder));
                        missing = true;
                    }
                }
            }
            EntryKind::Project => {
                resource = store.find_member(&path);
                missing = resource.is_none();
            }
        }

        let mut entry = Entry::create(host, parent, ancestors, raw.kind, path, resource, link_target);
        entry.exported = raw.exported;
        entry.set_exclusions(raw.exclusion_patterns.clone());
        entry.set_inclusions(raw.inclusion_patterns.clone());
        entry.set_access_rules(raw.access_rules.clone());
        entry.set_combine_access_rules(raw.combine_access_rules);

        for extra in &raw.extra_attributes {
            let key = AttributeKey::from_name(&extra.name);
            let value = AttributeValue::Text(Some(extra.value.clone()));
            if entry.find_attribute(&key).is_some() {
                let _ = entry.set_attribute(&key, value);
            } else if key.is_built_in() {
                tracing::debug!(entry = %entry.path, key = %key, "attribute not applicable, dropped");
            } else {
                entry.attributes.push(Attribute::new(key, value));
            }
        }

        if host.project().exists() {
            if raw.kind != EntryKind::Container {
                entry.missing = missing;
            }
        } else {
            entry.missing = false;
        }
        entry.invalidate();
        entry
    }

    fn push_attribute(&mut self, key: AttributeKey) {
        let value = AttributeValue::default_for(&key);
        self.attributes.push(Attribute::new(key, value));
    }

    fn invalidate(&mut self) {
        self.resolved.take();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn path(&self) -> &EntryPath {
        &self.path
    }

    /// Path at construction time
    pub fn original_path(&self) -> &EntryPath {
        &self.original_path
    }

    /// Backing resource; absent for external libraries and variables
    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    pub fn link_target(&self) -> Option<&EntryPath> {
        self.link_target.as_ref()
    }

    pub fn original_link_target(&self) -> Option<&EntryPath> {
        self.original_link_target.as_ref()
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// Whether the export flag is fixed (source entries, after validation)
    pub fn is_export_locked(&self) -> bool {
        self.export_locked
    }

    pub fn parent_container(&self) -> Option<&ContainerRef> {
        self.parent_container.as_ref()
    }

    /// Children computed by the container initializer
    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    /// Whether the entry denotes a folder-like location rather than one file
    pub fn denotes_folder(&self) -> bool {
        match self.kind {
            EntryKind::Source | EntryKind::Project => true,
            EntryKind::Library => match &self.resource {
                Some(resource) => resource.is_container(),
                None => self.path.file_extension().is_none(),
            },
            EntryKind::Container | EntryKind::Variable => false,
        }
    }

    /// Resolved raw form, computed on first use after any change
    pub fn resolved(&self) -> &RawEntry {
        self.resolved.get_or_init(|| self.build_raw())
    }

    fn build_raw(&self) -> RawEntry {
        let extra_attributes = self
            .attributes
            .iter()
            .filter(|attr| {
                matches!(
                    attr.key(),
                    AttributeKey::JavadocLocation | AttributeKey::Custom(_)
                )
            })
            .filter_map(|attr| {
                attr.value().as_text().map(|value| ExtraAttribute {
                    name: attr.key().as_str().to_string(),
                    value: value.to_string(),
                })
            })
            .collect();

        RawEntry {
            kind: self.kind,
            path: self.path.clone(),
            exported: self.kind == EntryKind::Source || self.exported,
            inclusion_patterns: self.inclusions().to_vec(),
            exclusion_patterns: self.exclusions().to_vec(),
            access_rules: self.access_rules().to_vec(),
            combine_access_rules: self.combine_access_rules(),
            extra_attributes,
        }
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    fn find_attribute(&self, key: &AttributeKey) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.key() == key)
    }

    /// All attributes in display order
    pub fn attributes(&self) -> impl Iterator<Item = AttributeRef<'_>> {
        self.attributes
            .iter()
            .map(move |attr| AttributeRef::new(self, attr))
    }

    /// Attribute with the given key, if it exists for this entry
    pub fn attribute(&self, key: &AttributeKey) -> Option<AttributeRef<'_>> {
        self.find_attribute(key)
            .map(|attr| AttributeRef::new(self, attr))
    }

    pub fn attribute_value(&self, key: &AttributeKey) -> Option<&AttributeValue> {
        self.find_attribute(key).map(Attribute::value)
    }

    pub fn exclusions(&self) -> &[EntryPath] {
        self.attribute_value(&AttributeKey::Exclusion)
            .and_then(AttributeValue::as_patterns)
            .unwrap_or(&[])
    }

    pub fn inclusions(&self) -> &[EntryPath] {
        self.attribute_value(&AttributeKey::Inclusion)
            .and_then(AttributeValue::as_patterns)
            .unwrap_or(&[])
    }

    pub fn access_rules(&self) -> &[AccessRule] {
        self.attribute_value(&AttributeKey::AccessRules)
            .and_then(AttributeValue::as_access_rules)
            .unwrap_or(&[])
    }

    pub fn combine_access_rules(&self) -> bool {
        self.attribute_value(&AttributeKey::CombineAccessRules)
            .and_then(AttributeValue::as_flag)
            .unwrap_or(false)
    }

    pub fn javadoc_location(&self) -> Option<&str> {
        self.attribute_value(&AttributeKey::JavadocLocation)
            .and_then(AttributeValue::as_text)
    }

    pub fn custom_attribute(&self, name: &str) -> Option<&str> {
        self.attribute_value(&AttributeKey::Custom(name.to_string()))
            .and_then(AttributeValue::as_text)
    }

    /// Set an attribute value.
    ///
    /// Returns `Ok(false)` without changing anything when the key was never
    /// created for this entry's kind; a value of the wrong shape is an error.
    pub fn set_attribute(
        &mut self,
        key: &AttributeKey,
        value: AttributeValue,
    ) -> Result<bool, AttributeError> {
        if !value.fits(key) {
            return Err(AttributeError::TypeMismatch {
                key: key.to_string(),
            });
        }
        let kind = self.kind;
        let Some(attr) = self.attributes.iter_mut().find(|attr| attr.key() == key) else {
            tracing::debug!(entry = %self.path, key = %key, kind = %kind, "attribute not present, value ignored");
            return Ok(false);
        };
        attr.set_value(value);
        self.invalidate();
        Ok(true)
    }

    pub fn set_exclusions(&mut self, patterns: Vec<EntryPath>) -> bool {
        matches!(
            self.set_attribute(&AttributeKey::Exclusion, AttributeValue::Patterns(patterns)),
            Ok(true)
        )
    }

    pub fn set_inclusions(&mut self, patterns: Vec<EntryPath>) -> bool {
        matches!(
            self.set_attribute(&AttributeKey::Inclusion, AttributeValue::Patterns(patterns)),
            Ok(true)
        )
    }

    pub fn set_access_rules(&mut self, rules: Vec<AccessRule>) -> bool {
        matches!(
            self.set_attribute(&AttributeKey::AccessRules, AttributeValue::AccessRules(rules)),
            Ok(true)
        )
    }

    pub fn set_combine_access_rules(&mut self, combine: bool) -> bool {
        matches!(
            self.set_attribute(&AttributeKey::CombineAccessRules, AttributeValue::Flag(combine)),
            Ok(true)
        )
    }

    pub fn set_javadoc_location(&mut self, location: Option<String>) -> bool {
        matches!(
            self.set_attribute(&AttributeKey::JavadocLocation, AttributeValue::Text(location)),
            Ok(true)
        )
    }

    /// Set a custom attribute, creating it when absent. Reserved names are
    /// routed to their built-in attribute.
    pub fn set_custom_attribute(
        &mut self,
        name: &str,
        value: Option<String>,
    ) -> Result<bool, AttributeError> {
        let key = AttributeKey::from_name(name);
        if key.is_built_in() || self.find_attribute(&key).is_some() {
            return self.set_attribute(&key, AttributeValue::Text(value));
        }
        self.attributes
            .push(Attribute::new(key, AttributeValue::Text(value)));
        self.invalidate();
        Ok(true)
    }

    /// Remove a custom attribute; built-in attributes cannot be removed
    pub fn remove_custom_attribute(&mut self, name: &str) -> Result<bool, AttributeError> {
        let key = AttributeKey::from_name(name);
        if key.is_built_in() {
            return Err(AttributeError::BuiltInRemoval(name.to_string()));
        }
        let before = self.attributes.len();
        self.attributes.retain(|attr| attr.key() != &key);
        let removed = self.attributes.len() != before;
        if removed {
            self.invalidate();
        }
        Ok(removed)
    }

    /// Copy every attribute value from `existing`, creating custom
    /// attributes this entry does not have yet. Built-in attributes this
    /// entry was created without are skipped.
    pub fn set_attributes_from_existing(&mut self, existing: &Entry) -> Result<(), AttributeError> {
        if existing.kind != self.kind {
            return Err(AttributeError::KindMismatch {
                from: existing.kind,
                into: self.kind,
            });
        }
        for attr in &existing.attributes {
            match self.attributes.iter_mut().find(|a| a.key() == attr.key()) {
                Some(own) => own.set_value(attr.value().clone()),
                None if attr.key().is_built_in() => {
                    tracing::debug!(entry = %self.path, key = %attr.key(), "attribute not applicable, skipped");
                }
                None => self.attributes.push(attr.clone()),
            }
        }
        self.invalidate();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Exclude the location at full `path`; false if already excluded
    pub fn add_to_exclusions(&mut self, path: &EntryPath) -> bool {
        self.add_filter(path, AttributeKey::Exclusion, true)
    }

    /// Include the location at full `path`; false if already included
    pub fn add_to_inclusions(&mut self, path: &EntryPath) -> bool {
        self.add_filter(path, AttributeKey::Inclusion, true)
    }

    /// Remove the folder pattern for the location at full `path`, as added
    /// by `add_to_exclusions`; a file pattern for the same location stays
    pub fn remove_from_exclusions(&mut self, path: &EntryPath) -> bool {
        self.remove_filter(path, AttributeKey::Exclusion)
    }

    pub fn remove_from_inclusions(&mut self, path: &EntryPath) -> bool {
        self.remove_filter(path, AttributeKey::Inclusion)
    }

    /// Exclude a nested location, with a trailing separator only when the
    /// nested location is a folder
    pub(crate) fn exclude_nested(&mut self, nested: &EntryPath, folder: bool) -> bool {
        self.add_filter(nested, AttributeKey::Exclusion, folder)
    }

    fn add_filter(&mut self, path: &EntryPath, key: AttributeKey, folder: bool) -> bool {
        let Some(current) = self.attribute_value(&key).and_then(AttributeValue::as_patterns) else {
            return false;
        };
        let Some(relative) = path.relative_to(&self.path) else {
            return false;
        };
        if relative.is_empty() || is_excluded_path(&relative, current) {
            return false;
        }
        let pattern = if folder {
            relative.add_trailing_separator()
        } else {
            relative
        };
        let mut patterns = current.to_vec();
        patterns.push(pattern);
        matches!(
            self.set_attribute(&key, AttributeValue::Patterns(patterns)),
            Ok(true)
        )
    }

    fn remove_filter(&mut self, path: &EntryPath, key: AttributeKey) -> bool {
        let Some(current) = self.attribute_value(&key).and_then(AttributeValue::as_patterns) else {
            return false;
        };
        let Some(relative) = path.relative_to(&self.path) else {
            return false;
        };
        let pattern = relative.add_trailing_separator();
        if !current.contains(&pattern) {
            return false;
        }
        let patterns: Vec<EntryPath> = current
            .iter()
            .filter(|existing| **existing != pattern)
            .cloned()
            .collect();
        matches!(
            self.set_attribute(&key, AttributeValue::Patterns(patterns)),
            Ok(true)
        )
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    pub fn set_path(&mut self, path: EntryPath) {
        self.path = path.remove_trailing_separator();
        self.invalidate();
    }

    pub fn set_link_target(&mut self, link_target: Option<EntryPath>) {
        self.link_target = link_target;
        self.invalidate();
    }

    pub fn set_exported(&mut self, exported: bool) {
        if exported != self.exported {
            self.exported = exported;
            self.invalidate();
        }
    }

    pub fn set_missing(&mut self, missing: bool) {
        self.missing = missing;
    }

    pub(crate) fn lock_export(&mut self) {
        self.export_locked = true;
    }

    /// Deep copy with a fresh cache
    pub fn copy(&self) -> Entry {
        let mut copy = self.clone();
        copy.invalidate();
        copy
    }

    // ------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------

    /// Initializer of this container, or of the nearest enclosing one
    pub fn initializer<'h>(&self, host: &'h Host) -> Option<&'h Arc<dyn ContainerInitializer>> {
        if self.kind == EntryKind::Container {
            return host.initializers().get_for_path(&self.path);
        }
        self.parent_container
            .as_ref()
            .and_then(|parent| host.initializers().get_for_path(parent.path()))
    }

    fn resolve_children(&mut self, host: &Host, ancestors: &[EntryPath]) {
        if ancestors.iter().any(|a| a.same_location(&self.path)) {
            tracing::warn!(container = %self.path, "container encloses itself, not expanded");
            self.children = Vec::new();
            self.missing = true;
            return;
        }
        let resolution = resolve_container(host.initializers(), &self.path, host.project());
        let parent = ContainerRef::new(self.path.clone());
        let mut chain = ancestors.to_vec();
        chain.push(self.path.clone());
        self.children = resolution
            .children
            .iter()
            .map(|raw| Entry::from_raw_in(host, Some(parent.clone()), &chain, raw))
            .collect();
        self.missing = resolution.missing;
    }

    /// Recompute the children of a container from its initializer
    pub fn refresh_children(&mut self, host: &Host) {
        if self.kind == EntryKind::Container {
            self.resolve_children(host, &[]);
        }
    }

    /// Whether this container's initializer accepts updates
    pub fn can_update_container(&self, host: &Host) -> bool {
        self.kind == EntryKind::Container
            && host
                .initializers()
                .get_for_path(&self.path)
                .map(|init| init.can_update(&self.path, host.project()))
                .unwrap_or(false)
    }

    pub fn is_in_non_modifiable_container(&self, host: &Host) -> bool {
        match &self.parent_container {
            Some(parent) => !host
                .initializers()
                .get_for_path(parent.path())
                .map(|init| init.can_update(parent.path(), host.project()))
                .unwrap_or(false),
            None => self.kind == EntryKind::Container && !self.can_update_container(host),
        }
    }

    /// Whether the enclosing container's path starts with `name`
    pub fn is_in_container(&self, name: &str) -> bool {
        let Some(parent) = &self.parent_container else {
            return false;
        };
        EntryPath::parse(name)
            .map(|prefix| prefix.is_prefix_of(parent.path()))
            .unwrap_or(false)
    }

    /// Editability of attribute `key` as reported by the nearest enclosing
    /// container; `None` for entries outside any container
    pub fn container_child_status(&self, host: &Host, key: &AttributeKey) -> Option<AttributeStatus> {
        let parent = self.parent_container.as_ref()?;
        let project = host.project();
        let status = match host.initializers().get_for_path(parent.path()) {
            Some(init) if init.can_update(parent.path(), project) => match key {
                AttributeKey::AccessRules => init.access_rules_status(parent.path(), project),
                other => init.attribute_status(parent.path(), project, other),
            },
            _ => AttributeStatus::ReadOnly,
        };
        Some(status)
    }

    /// Attributes for generic listings: hides the combine flag of project
    /// entries and anything the enclosing container does not support
    pub fn visible_attributes(&self, host: &Host) -> Vec<AttributeRef<'_>> {
        self.attributes()
            .filter(|attr| {
                !(self.kind == EntryKind::Project && attr.key() == &AttributeKey::CombineAccessRules)
            })
            .filter(|attr| !attr.is_not_supported(host))
            .collect()
    }

    // ------------------------------------------------------------------
    // Deprecation
    // ------------------------------------------------------------------

    /// Deprecation message for variable entries whose variable is deprecated
    pub fn deprecation_message(&self, oracle: &dyn DeprecationOracle) -> Option<String> {
        if self.kind != EntryKind::Variable {
            return None;
        }
        oracle.deprecation_message(self.path.segment(0)?)
    }

    pub fn is_deprecated(&self, oracle: &dyn DeprecationOracle) -> bool {
        self.deprecation_message(oracle).is_some()
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.resolved() == other.resolved()
    }
}

impl Eq for Entry {}

impl std::hash::Hash for Entry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.path.hash(state);
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.path)?;
        if let Some(target) = &self.link_target {
            write!(f, " -> {}", target)?;
        }
        Ok(())
    }
}

fn is_archive_path(path: &EntryPath) -> bool {
    path.file_extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip") || ext.eq_ignore_ascii_case("jar"))
        .unwrap_or(false)
}
