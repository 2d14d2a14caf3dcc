//! # Error Paths
//!
//! An [`ErrorPath`] locates a violation inside a composite subject as the
//! ordered list of keys and indices walked from the root. Paths are
//! values: building a child path always allocates a fresh vector, so a
//! caller may keep or mutate any path it receives without affecting the
//! engine or other violations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of an [`ErrorPath`]: an object key or an array index.
///
/// Serializes untagged, as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Array or tuple position.
    Index(usize),
    /// Object or record key.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => f.write_str(k),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(k: &str) -> Self {
        PathSegment::Key(k.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(k: String) -> Self {
        PathSegment::Key(k)
    }
}

/// Ordered location of a violation, from the root subject downward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPath(Vec<PathSegment>);

impl ErrorPath {
    /// The empty path, locating the root subject.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A fresh path equal to `self` with `segment` appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        make_error_path(Some(self), Some(segment.into()))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<PathSegment> {
        self.0
    }
}

impl From<Vec<PathSegment>> for ErrorPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<PathSegment> for ErrorPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Renders as a JSON-Pointer-like string (`/2/items/0`), or `(root)`.
impl fmt::Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Build a new path from an optional parent and an optional segment.
///
/// - parent and segment: a copy of the parent with the segment appended
/// - parent only: a copy of the parent
/// - segment only: a one-element path
/// - neither: the empty path
///
/// The parent is never returned or modified.
pub fn make_error_path(parent: Option<&ErrorPath>, segment: Option<PathSegment>) -> ErrorPath {
    let extra = usize::from(segment.is_some());
    let mut segments = Vec::with_capacity(parent.map_or(0, ErrorPath::len) + extra);
    if let Some(parent) = parent {
        segments.extend_from_slice(&parent.0);
    }
    segments.extend(segment);
    ErrorPath(segments)
}

/// Build an [`ErrorPath`] from a list of keys and indices.
///
/// ```
/// use conform_core::error_path;
/// let path = error_path![2, "items", 0];
/// assert_eq!(path.to_string(), "/2/items/0");
/// ```
#[macro_export]
macro_rules! error_path {
    () => { $crate::ErrorPath::root() };
    ($($segment:expr),+ $(,)?) => {
        $crate::ErrorPath::from(vec![$($crate::PathSegment::from($segment)),+])
    };
}
