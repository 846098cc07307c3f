//! BPT: Build-Path Toolkit
//!
//! An in-memory model of a project's build path: ordered source, library,
//! project, container and variable entries with typed attributes, container
//! resolution through host-registered initializers, automatic exclusion of
//! nested source roots, validation and change detection.

pub mod core;
pub mod entities;
pub mod yaml;

pub use crate::core::{BuildPathModel, EntryPath, Host, HostConfig, Project, Status};
pub use crate::entities::{Entry, EntryKind, RawEntry};
