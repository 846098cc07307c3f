//! Host configuration loading tests

mod common;

use bpt::core::{AttributeStatus, BuildPathModel, ConfigError, HostConfig, Severity};
use bpt::entities::AttributeKey;
use bpt::yaml::YamlError;
use bpt::EntryKind;
use common::{p, write_config};

const WORKSPACE: &str = r#"
project:
  name: shop
resources:
  projects: [/shared]
  folders: [/shop/src, /shop/src/vendor, /shop/test]
  external_files: [/usr/lib/js/lodash.js]
variables:
  JS_LIBS:
    path: /usr/lib/js
  LEGACY:
    path: /usr/lib/legacy
    deprecated: "LEGACY is deprecated; use JS_LIBS"
containers:
  RUNTIME:
    can_update: false
    paths:
      RUNTIME/browser:
        - kind: library
          path: /usr/lib/js/dom.js
  USER_LIBS:
    can_update: true
    access_rules_status: ok
    attribute_status:
      javadoc_location: read_only
    paths:
      USER_LIBS/charts:
        - kind: library
          path: /usr/lib/js/charts.js
build_path:
  - kind: source
    path: /shop/src
    exclusion_patterns: [vendor/]
  - kind: source
    path: /shop/src/vendor
  - kind: container
    path: RUNTIME/browser
  - kind: container
    path: USER_LIBS/charts
  - kind: variable
    path: JS_LIBS/lodash.js
  - kind: project
    path: /shared
    combine_access_rules: true
"#;

#[test]
fn test_load_from_file() {
    let (_tmp, path) = write_config(WORKSPACE);
    let config = HostConfig::load(&path).unwrap();
    assert_eq!(config.project.name, "shop");
    assert_eq!(config.build_path.len(), 6);
    assert_eq!(config.containers.len(), 2);
}

#[test]
fn test_model_from_config_is_clean() {
    let (_tmp, path) = write_config(WORKSPACE);
    let model = BuildPathModel::from_config(HostConfig::load(&path).unwrap());

    assert_eq!(model.len(), 6);
    assert_eq!(model.report().missing, 0);
    assert!(model.status().is_ok(), "{}", model.status());
    assert!(!model.has_changes());

    let shared = model.find(EntryKind::Project, &p("/shared")).unwrap();
    assert!(shared.combine_access_rules());
}

#[test]
fn test_container_statuses_from_config() {
    let (_tmp, path) = write_config(WORKSPACE);
    let model = BuildPathModel::from_config(HostConfig::load(&path).unwrap());
    let host = model.host();

    let runtime = model.find(EntryKind::Container, &p("RUNTIME/browser")).unwrap();
    let dom = &runtime.children()[0];
    assert!(dom
        .attribute(&AttributeKey::AccessRules)
        .unwrap()
        .is_non_modifiable(host));

    let user = model.find(EntryKind::Container, &p("USER_LIBS/charts")).unwrap();
    let charts = &user.children()[0];
    let rules = charts.attribute(&AttributeKey::AccessRules).unwrap();
    assert_eq!(rules.status(host), Some(AttributeStatus::Ok));
    let javadoc = charts.attribute(&AttributeKey::JavadocLocation).unwrap();
    assert_eq!(javadoc.status(host), Some(AttributeStatus::ReadOnly));
    assert!(javadoc.is_non_modifiable(host));
    assert!(!javadoc.is_not_supported(host));
}

#[test]
fn test_deprecated_variable_from_config() {
    let yaml = WORKSPACE
        .replace("JS_LIBS/lodash.js", "LEGACY/old.js")
        .replace(
            "external_files: [/usr/lib/js/lodash.js]",
            "external_files: [/usr/lib/legacy/old.js]",
        );
    let (_tmp, path) = write_config(&yaml);
    let model = BuildPathModel::from_config(HostConfig::load(&path).unwrap());
    assert_eq!(model.report().missing, 0);
    assert_eq!(model.status().severity(), Severity::Warning);
    assert_eq!(model.status().message(), "LEGACY is deprecated; use JS_LIBS");

    let (_tmp, path) = write_config(&yaml.replace("/usr/lib/legacy/old.js", "/elsewhere.js"));
    let model = BuildPathModel::from_config(HostConfig::load(&path).unwrap());
    assert_eq!(
        model.status().message(),
        "Build path entry is missing: LEGACY/old.js"
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = HostConfig::load(&tmp.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(YamlError::Io(_))));
}

#[test]
fn test_syntax_error_reports_file_name() {
    let (_tmp, path) = write_config("project:\n  name: [shop\n");
    match HostConfig::load(&path).unwrap_err() {
        ConfigError::Yaml(YamlError::Syntax(e)) => {
            assert!(e.filename.ends_with("host.yaml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_model_yaml_export_reads_back() {
    let (_tmp, path) = write_config(WORKSPACE);
    let model = BuildPathModel::from_config(HostConfig::load(&path).unwrap());
    let text = model.to_yaml().unwrap();
    let reloaded = BuildPathModel::from_yaml(model.host().clone(), &text, "export.yaml").unwrap();
    assert_eq!(reloaded.raw_entries(), model.raw_entries());
    assert_eq!(reloaded.encode(), model.encode());
}
