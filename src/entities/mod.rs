//! Build-path records

pub mod attribute;
pub mod entry;

pub use attribute::{
    AccessRule, Attribute, AttributeError, AttributeKey, AttributeRef, AttributeValue, RuleKind,
};
pub use entry::{ContainerRef, Entry, EntryKind, ExtraAttribute, RawEntry};
