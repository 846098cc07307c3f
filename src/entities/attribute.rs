//! Entry attributes
//!
//! Every entry carries an ordered list of attributes. Five keys are reserved
//! (built-in) and are created eagerly for the kinds they apply to; any other
//! key is a custom attribute that only exists once it has been set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::container::AttributeStatus;
use crate::core::host::Host;
use crate::core::path::EntryPath;
use crate::entities::entry::{Entry, EntryKind};

/// Attribute key, either reserved or custom
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKey {
    Inclusion,
    Exclusion,
    AccessRules,
    CombineAccessRules,
    JavadocLocation,
    Custom(String),
}

impl AttributeKey {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeKey::Inclusion => "inclusion",
            AttributeKey::Exclusion => "exclusion",
            AttributeKey::AccessRules => "accessrules",
            AttributeKey::CombineAccessRules => "combineaccessrules",
            AttributeKey::JavadocLocation => "javadoc_location",
            AttributeKey::Custom(name) => name,
        }
    }

    /// Map a name to a key; reserved names map to their built-in key
    pub fn from_name(name: &str) -> Self {
        match name {
            "inclusion" => AttributeKey::Inclusion,
            "exclusion" => AttributeKey::Exclusion,
            "accessrules" => AttributeKey::AccessRules,
            "combineaccessrules" => AttributeKey::CombineAccessRules,
            "javadoc_location" => AttributeKey::JavadocLocation,
            other => AttributeKey::Custom(other.to_string()),
        }
    }

    pub fn is_built_in(&self) -> bool {
        !matches!(self, AttributeKey::Custom(_))
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accessibility granted by an access rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Accessible,
    NonAccessible,
    Discouraged,
}

impl RuleKind {
    /// Stable numeric code used in the canonical encoding
    pub fn code(&self) -> u8 {
        match self {
            RuleKind::Accessible => 0,
            RuleKind::NonAccessible => 1,
            RuleKind::Discouraged => 2,
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Accessible => write!(f, "accessible"),
            RuleKind::NonAccessible => write!(f, "non_accessible"),
            RuleKind::Discouraged => write!(f, "discouraged"),
        }
    }
}

/// A pattern plus the accessibility it grants
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessRule {
    pub pattern: EntryPath,
    pub kind: RuleKind,
}

impl AccessRule {
    pub fn new(pattern: EntryPath, kind: RuleKind) -> Self {
        Self { pattern, kind }
    }
}

/// Typed attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Inclusion or exclusion patterns, relative to the entry path
    Patterns(Vec<EntryPath>),
    AccessRules(Vec<AccessRule>),
    Flag(bool),
    Text(Option<String>),
}

impl AttributeValue {
    /// Default value for a freshly created attribute
    pub fn default_for(key: &AttributeKey) -> Self {
        match key {
            AttributeKey::Inclusion | AttributeKey::Exclusion => AttributeValue::Patterns(Vec::new()),
            AttributeKey::AccessRules => AttributeValue::AccessRules(Vec::new()),
            AttributeKey::CombineAccessRules => AttributeValue::Flag(false),
            AttributeKey::JavadocLocation | AttributeKey::Custom(_) => AttributeValue::Text(None),
        }
    }

    /// Whether this value has the shape `key` requires
    pub fn fits(&self, key: &AttributeKey) -> bool {
        matches!(
            (key, self),
            (AttributeKey::Inclusion | AttributeKey::Exclusion, AttributeValue::Patterns(_))
                | (AttributeKey::AccessRules, AttributeValue::AccessRules(_))
                | (AttributeKey::CombineAccessRules, AttributeValue::Flag(_))
                | (
                    AttributeKey::JavadocLocation | AttributeKey::Custom(_),
                    AttributeValue::Text(_)
                )
        )
    }

    pub fn as_patterns(&self) -> Option<&[EntryPath]> {
        match self {
            AttributeValue::Patterns(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_access_rules(&self) -> Option<&[AccessRule]> {
        match self {
            AttributeValue::AccessRules(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(t) => t.as_deref(),
            _ => None,
        }
    }
}

/// Errors from attribute edits that indicate a caller bug
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("Value for attribute '{key}' has the wrong type")]
    TypeMismatch { key: String },

    #[error("Built-in attribute '{0}' cannot be removed")]
    BuiltInRemoval(String),

    #[error("Cannot copy attributes from a {from} entry into a {into} entry")]
    KindMismatch { from: EntryKind, into: EntryKind },
}

/// A single attribute record, owned by its entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    key: AttributeKey,
    value: AttributeValue,
}

impl Attribute {
    pub(crate) fn new(key: AttributeKey, value: AttributeValue) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &AttributeKey {
        &self.key
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    pub fn is_built_in(&self) -> bool {
        self.key.is_built_in()
    }

    pub(crate) fn set_value(&mut self, value: AttributeValue) {
        self.value = value;
    }
}

/// An attribute together with its owning entry
#[derive(Debug, Clone, Copy)]
pub struct AttributeRef<'a> {
    entry: &'a Entry,
    attribute: &'a Attribute,
}

impl<'a> AttributeRef<'a> {
    pub(crate) fn new(entry: &'a Entry, attribute: &'a Attribute) -> Self {
        Self { entry, attribute }
    }

    /// The entry that owns this attribute
    pub fn parent(&self) -> &'a Entry {
        self.entry
    }

    pub fn key(&self) -> &'a AttributeKey {
        &self.attribute.key
    }

    pub fn value(&self) -> &'a AttributeValue {
        &self.attribute.value
    }

    pub fn is_built_in(&self) -> bool {
        self.attribute.is_built_in()
    }

    /// Whether the owning entry was produced by a container
    pub fn is_in_container(&self) -> bool {
        self.entry.parent_container().is_some()
    }

    /// Status reported by the enclosing container, `None` for top-level entries
    pub fn status(&self, host: &Host) -> Option<AttributeStatus> {
        self.entry.container_child_status(host, &self.attribute.key)
    }

    /// Whether the enclosing container forbids editing this attribute
    pub fn is_non_modifiable(&self, host: &Host) -> bool {
        matches!(
            self.status(host),
            Some(AttributeStatus::ReadOnly | AttributeStatus::NotSupported)
        )
    }

    /// Whether the enclosing container does not support this attribute at all
    pub fn is_not_supported(&self, host: &Host) -> bool {
        self.status(host) == Some(AttributeStatus::NotSupported)
    }
}
