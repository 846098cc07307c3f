//! Validation and status aggregation tests

mod common;

use std::sync::Arc;

use bpt::core::{
    entry_list_status, validate, BuildPathModel, InMemoryResources, NoDeprecations, Severity,
    StaticDeprecations,
};
use bpt::{Entry, EntryKind, Host, Project, RawEntry, Status};
use common::{library, missing_library, p, source, test_host, FixedConventions};

// ============================================================================
// Missing entries
// ============================================================================

#[test]
fn test_no_missing_entries_is_ok() {
    let host = test_host();
    let entries = vec![library(&host, "/opt/a.js")];
    assert!(entry_list_status(&entries, &NoDeprecations).is_ok());
}

#[test]
fn test_single_missing_entry_message() {
    let host = test_host();
    let entries = vec![library(&host, "/opt/a.js"), missing_library(&host, "/opt/gone.js")];
    let status = entry_list_status(&entries, &NoDeprecations);
    assert_eq!(status.severity(), Severity::Warning);
    assert_eq!(status.message(), "Build path entry is missing: /opt/gone.js");
}

#[test]
fn test_several_missing_entries_are_counted() {
    let host = test_host();
    let entries = vec![
        missing_library(&host, "/opt/a.js"),
        missing_library(&host, "/opt/b.js"),
        missing_library(&host, "/opt/c.js"),
    ];
    let status = entry_list_status(&entries, &NoDeprecations);
    assert!(status.message().contains('3'));
    assert_eq!(status.message(), "3 build path entries are missing.");
}

#[test]
fn test_missing_detected_from_resource_store() {
    let resources = InMemoryResources::new()
        .with_project(p("/proj"))
        .with_folder(p("/proj/src"))
        .with_external_file(p("/opt/a.js"));
    let host = Host::new(Project::new("proj")).with_resources(Arc::new(resources));
    let model = BuildPathModel::load(
        host,
        &[
            RawEntry::source(p("/proj/src")),
            RawEntry::library(p("/opt/a.js")),
            RawEntry::project(p("/absent")),
        ],
    );
    assert_eq!(model.report().missing, 1);
    assert_eq!(model.status().message(), "Build path entry is missing: /absent");
}

// ============================================================================
// Severity ordering
// ============================================================================

#[test]
fn test_conventions_error_outranks_deprecation_warning() {
    let conventions = Arc::new(FixedConventions::new(Status::error("Conflicting entries")));
    let host = test_host()
        .with_conventions(conventions.clone())
        .with_deprecations(Arc::new(StaticDeprecations::new().with("OLD", "OLD is deprecated")));
    let mut entries = vec![Entry::new(&host, EntryKind::Variable, p("OLD/x.js"))];

    let report = validate(&mut entries, &host);

    assert_eq!(report.entry_status, Status::warning("OLD is deprecated"));
    assert_eq!(report.most_severe(), Status::error("Conflicting entries"));
    assert!(report.is_error());
    assert_eq!(conventions.seen().len(), 1);
}

#[test]
fn test_deprecation_warning_outranks_ok() {
    let host = test_host()
        .with_conventions(Arc::new(FixedConventions::new(Status::ok())))
        .with_deprecations(Arc::new(StaticDeprecations::new().with("OLD", "OLD is deprecated")));
    let mut entries = vec![Entry::new(&host, EntryKind::Variable, p("OLD/x.js"))];
    let report = validate(&mut entries, &host);
    assert_eq!(report.most_severe().severity(), Severity::Warning);
    assert!(entries[0].is_deprecated(host.deprecations()));
}

#[test]
fn test_conventions_warning_outranks_ok_entries() {
    let host = test_host().with_conventions(Arc::new(FixedConventions::new(Status::warning(
        "Output folder overlaps source",
    ))));
    let mut entries = vec![library(&host, "/opt/a.js")];
    let report = validate(&mut entries, &host);
    assert_eq!(report.most_severe().message(), "Output folder overlaps source");
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_validation_forces_sources_exported() {
    let conventions = Arc::new(FixedConventions::new(Status::ok()));
    let host = test_host().with_conventions(conventions.clone());
    let mut entries = vec![source(&host, "/proj/src"), library(&host, "/opt/a.js")];

    validate(&mut entries, &host);

    assert!(entries[0].is_exported());
    assert!(entries[0].is_export_locked());
    assert!(!entries[1].is_exported());
    assert!(!entries[1].is_export_locked());

    let seen = conventions.seen();
    assert_eq!(seen[0].len(), 2);
    assert!(seen[0][0].exported);
    assert_eq!(seen[0][1].path, p("/opt/a.js"));
}

#[test]
fn test_standard_conventions_in_model() {
    let mut model = BuildPathModel::new(test_host());
    let outside = model.create_entry(EntryKind::Source, p("/elsewhere/src"));
    model.add(outside);
    let status = model.status();
    assert!(status.is_error());
    assert!(status.message().contains("not contained in project"));
}
