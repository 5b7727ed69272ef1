//! Schema Paths
//!
//! Dotted/indexed locations inside the input document, used to qualify every
//! schema error, e.g. `accountUpdates[2].body.preconditions.account.balance`.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a node relative to the document root.
///
/// Paths are cheap to extend: each child call clones the parent and appends
/// one segment, so a node's path never changes once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a named child.
    pub fn key(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Key(name.to_string()));
        next
    }

    /// Path of a list element.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Index(index));
        next
    }

    /// True for the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(name) if i == 0 => write!(f, "{name}")?,
                Segment::Key(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mixes_keys_and_indices() {
        let path = FieldPath::root()
            .key("accountUpdates")
            .index(2)
            .key("body")
            .key("preconditions")
            .key("account")
            .key("balance");
        assert_eq!(
            path.to_string(),
            "accountUpdates[2].body.preconditions.account.balance"
        );
    }

    #[test]
    fn test_root_display() {
        assert_eq!(FieldPath::root().to_string(), "<root>");
        assert!(FieldPath::root().is_root());
        assert_eq!(FieldPath::root().index(0).key("x").to_string(), "[0].x");
    }
}
