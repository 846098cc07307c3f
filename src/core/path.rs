//! Hierarchical entry paths
//!
//! An `EntryPath` is the identifier of a build-path entry: project-relative for
//! source folders and project references, filesystem-like for libraries and
//! opaque-but-segmented for containers and variables. Filter patterns are
//! stored as relative `EntryPath`s too.
//!
//! Equality, ordering and hashing include the trailing separator: as filter
//! patterns `sub/` and `sub` match different things. Use `same_location` to
//! compare the locations two paths point at.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors raised while parsing path text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Path segment '{segment}' is not allowed in '{path}'")]
    InvalidSegment { path: String, segment: String },

    #[error("Path contains a NUL character: {0:?}")]
    NulCharacter(String),
}

/// A slash-separated path made of segments
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryPath {
    absolute: bool,
    segments: Vec<String>,
    trailing: bool,
}

impl EntryPath {
    /// Parse path text. Backslashes are treated as separators and empty
    /// segments are collapsed; `.` segments are dropped.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        if text.contains('\0') {
            return Err(PathError::NulCharacter(text.to_string()));
        }
        let normalized = text.replace('\\', "/");
        let absolute = normalized.starts_with('/');
        let mut segments = Vec::new();
        for segment in normalized.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    return Err(PathError::InvalidSegment {
                        path: text.to_string(),
                        segment: segment.to_string(),
                    })
                }
                s => segments.push(s.to_string()),
            }
        }
        let trailing = !segments.is_empty() && normalized.ends_with('/');
        Ok(Self {
            absolute,
            segments,
            trailing,
        })
    }

    /// The absolute root path `/`
    pub fn root() -> Self {
        Self {
            absolute: true,
            segments: Vec::new(),
            trailing: false,
        }
    }

    /// Build a path from already-split segments
    pub fn from_segments<I, S>(absolute: bool, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            absolute,
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
            trailing: false,
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn has_trailing_separator(&self) -> bool {
        self.trailing
    }

    /// True when the path has no segments (`""` or `/`)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Get segment `index`, if present
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Extension of the last segment, without the dot
    pub fn file_extension(&self) -> Option<&str> {
        let last = self.last_segment()?;
        let (stem, ext) = last.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            None
        } else {
            Some(ext)
        }
    }

    /// Whether `self` is a prefix of `other` (or equal to it).
    ///
    /// Both paths must agree on being absolute.
    pub fn is_prefix_of(&self, other: &EntryPath) -> bool {
        self.absolute == other.absolute
            && self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| a == b)
    }

    /// Drop the first `count` segments; the result is always relative
    pub fn remove_first_segments(&self, count: usize) -> EntryPath {
        let segments: Vec<String> = self.segments.iter().skip(count).cloned().collect();
        let trailing = self.trailing && !segments.is_empty();
        EntryPath {
            absolute: false,
            segments,
            trailing,
        }
    }

    /// Drop the last `count` segments
    pub fn remove_last_segments(&self, count: usize) -> EntryPath {
        let keep = self.segments.len().saturating_sub(count);
        EntryPath {
            absolute: self.absolute,
            segments: self.segments[..keep].to_vec(),
            trailing: false,
        }
    }

    pub fn add_trailing_separator(&self) -> EntryPath {
        let mut path = self.clone();
        path.trailing = !path.segments.is_empty();
        path
    }

    pub fn remove_trailing_separator(&self) -> EntryPath {
        let mut path = self.clone();
        path.trailing = false;
        path
    }

    /// Append a relative path
    pub fn append(&self, tail: &EntryPath) -> EntryPath {
        let mut segments = self.segments.clone();
        segments.extend(tail.segments.iter().cloned());
        let trailing = if tail.segments.is_empty() {
            self.trailing
        } else {
            tail.trailing
        };
        EntryPath {
            absolute: self.absolute,
            segments,
            trailing,
        }
    }

    /// Append a single segment
    pub fn join(&self, segment: &str) -> EntryPath {
        let mut path = self.clone();
        if !segment.is_empty() {
            path.segments.push(segment.to_string());
        }
        path.trailing = false;
        path
    }

    /// Whether both paths name the same location, ignoring any trailing
    /// separator
    pub fn same_location(&self, other: &EntryPath) -> bool {
        self.absolute == other.absolute && self.segments == other.segments
    }

    /// Path of `self` relative to `ancestor`, if `ancestor` is a prefix
    pub fn relative_to(&self, ancestor: &EntryPath) -> Option<EntryPath> {
        if ancestor.is_prefix_of(self) {
            Some(self.remove_first_segments(ancestor.segment_count()))
        } else {
            None
        }
    }
}

impl PartialEq for EntryPath {
    fn eq(&self, other: &Self) -> bool {
        self.absolute == other.absolute
            && self.segments == other.segments
            && self.trailing == other.trailing
    }
}

impl Eq for EntryPath {}

impl Hash for EntryPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute.hash(state);
        self.segments.hash(state);
        self.trailing.hash(state);
    }
}

impl PartialOrd for EntryPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntryPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute
            .cmp(&other.absolute)
            .then_with(|| self.segments.cmp(&other.segments))
            .then_with(|| self.trailing.cmp(&other.trailing))
    }
}

impl std::fmt::Display for EntryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.absolute {
            write!(f, "/")?;
        }
        write!(f, "{}", self.segments.join("/"))?;
        if self.trailing {
            write!(f, "/")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for EntryPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryPath::parse(s)
    }
}

impl TryFrom<String> for EntryPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EntryPath::parse(&value)
    }
}

impl From<EntryPath> for String {
    fn from(path: EntryPath) -> Self {
        path.to_string()
    }
}
