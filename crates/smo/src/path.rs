//! Coding paths: key/index breadcrumbs used for error diagnostics.

use std::fmt;

/// One step of a [`CodingPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Reserved key used for superclass-delegation hops.
    pub const SUPER_KEY: &'static str = "super";

    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }

    pub fn super_key() -> Self {
        PathSegment::Key(Self::SUPER_KEY.to_owned())
    }

    /// The string form of the segment; indices are rendered in decimal.
    pub fn string_value(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_owned())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Ordered path from the top-level value to the value being coded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodingPath(Vec<PathSegment>);

impl CodingPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A new path with `segment` appended.
    pub fn appending(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment.into());
        Self(segments)
    }

    pub fn appending_key(&self, key: &str) -> Self {
        self.appending(PathSegment::key(key))
    }

    pub fn appending_index(&self, index: usize) -> Self {
        self.appending(PathSegment::Index(index))
    }
}

impl From<Vec<PathSegment>> for CodingPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mixes_keys_and_indices() {
        let path = CodingPath::new()
            .appending_key("users")
            .appending_index(2)
            .appending_key("name");
        assert_eq!(path.to_string(), "users[2].name");
        assert_eq!(CodingPath::new().to_string(), "<root>");
        assert_eq!(CodingPath::new().appending_index(0).to_string(), "[0]");
    }

    #[test]
    fn appending_leaves_original_untouched() {
        let base = CodingPath::new().appending_key("a");
        let child = base.appending(PathSegment::super_key());
        assert_eq!(base.len(), 1);
        assert_eq!(child.segments()[1].as_key(), Some("super"));
        assert_eq!(PathSegment::Index(4).string_value(), "4");
    }
}
