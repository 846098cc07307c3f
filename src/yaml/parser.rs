//! YAML reading and writing

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::yaml::diagnostics::{YamlError, YamlSyntaxError};

/// Parse YAML text; `filename` only labels diagnostics
pub fn parse_yaml<T: DeserializeOwned + 'static>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content)
        .map_err(|e| YamlError::Syntax(YamlSyntaxError::from_serde_error(&e, content, filename)))
}

/// Read and parse a YAML file
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content, &path.display().to_string())
}

/// Serialize a value as YAML text
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, YamlError> {
    serde_yml::to_string(value).map_err(|e| YamlError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path::EntryPath;
    use crate::entities::entry::{EntryKind, RawEntry};

    #[test]
    fn test_parse_raw_entry() {
        let yaml = "kind: source\npath: /web/src\nexclusion_patterns: [gen/]\n";
        let entry: RawEntry = parse_yaml(yaml, "entry.yaml").unwrap();
        assert_eq!(entry.kind, EntryKind::Source);
        assert_eq!(entry.path, EntryPath::parse("/web/src").unwrap());
        assert_eq!(entry.exclusion_patterns.len(), 1);
        assert!(!entry.exported);
    }

    #[test]
    fn test_syntax_error_names_file() {
        let yaml = "kind: source\npath: [unclosed\n";
        let err = parse_yaml::<RawEntry>(yaml, "broken.yaml").unwrap_err();
        match err {
            YamlError::Syntax(e) => {
                assert_eq!(e.filename, "broken.yaml");
                assert!(!e.message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let yaml = "kind: folder\npath: /web\n";
        assert!(parse_yaml::<RawEntry>(yaml, "entry.yaml").is_err());
    }

    #[test]
    fn test_written_entry_reads_back() {
        let entry = RawEntry::library(EntryPath::parse("/opt/a.js").unwrap())
            .with_exported(true)
            .with_extra_attribute("optional", "true");
        let text = to_yaml(&entry).unwrap();
        assert!(text.contains("optional"));
        let back: RawEntry = parse_yaml(&text, "entry.yaml").unwrap();
        assert_eq!(back, entry);
    }
}
