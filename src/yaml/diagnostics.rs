//! YAML error reporting
//!
//! Syntax errors carry the source text and a span so `miette` can render the
//! offending line with a label.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A YAML document that could not be parsed or did not match the expected shape
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid YAML in {filename}: {message}")]
#[diagnostic(
    code(bpt::yaml::syntax),
    help("check indentation and field names near the highlighted location")
)]
pub struct YamlSyntaxError {
    pub filename: String,
    pub message: String,
    /// 1-based line, when known
    pub line: Option<usize>,
    /// 1-based column, when known
    pub column: Option<usize>,

    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let location = err.location();
        let span = location.as_ref().map(|loc| {
            let offset = loc.index().min(content.len());
            SourceSpan::from((offset, 0))
        });
        Self {
            filename: filename.to_string(),
            message: err.to_string(),
            line: location.as_ref().map(|loc| loc.line()),
            column: location.as_ref().map(|loc| loc.column()),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }
}

/// Errors from reading or writing YAML
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("Failed to read YAML file: {0}")]
    #[diagnostic(code(bpt::yaml::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize YAML: {0}")]
    #[diagnostic(code(bpt::yaml::serialize))]
    Serialize(String),
}
