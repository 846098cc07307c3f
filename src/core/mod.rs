//! Core module - paths, collaborator contracts and the build-path engines

pub mod config;
pub mod container;
pub mod encoding;
pub mod host;
pub mod model;
pub mod nesting;
pub mod ordering;
pub mod path;
pub mod pattern;
pub mod project;
pub mod resources;
pub mod status;
pub mod validation;

pub use config::{ConfigError, HostConfig, StaticContainerInitializer};
pub use container::{
    resolve_container, AttributeStatus, ContainerInitializer, ContainerResolution,
    InitializerRegistry, ResolveError,
};
pub use encoding::{encode_entries, ChangeTracker};
pub use host::Host;
pub use model::{Added, AddedAll, BuildPathModel};
pub use nesting::{
    find_by_path, find_entry, fix_nesting_conflicts, fix_nesting_conflicts_bulk,
    is_project_source_folder, remove_filters, BulkFixup,
};
pub use path::{EntryPath, PathError};
pub use pattern::{is_excluded_path, path_match};
pub use project::Project;
pub use resources::{InMemoryResources, Resource, ResourceError, ResourceKind, ResourceStore};
pub use status::{most_severe, Severity, Status};
pub use validation::{
    entry_list_status, validate, ConventionsValidator, DeprecationOracle, NoDeprecations,
    StandardConventions, StaticDeprecations, ValidationReport,
};
