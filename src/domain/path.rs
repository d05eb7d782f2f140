//! Positional node addresses.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use itertools::Itertools;

use crate::domain::error::TreeError;

/// Sequence of child indices leading from the root to a node.
///
/// The empty path addresses the root. Paths are positional: removing a lower
/// indexed sibling of any node on the way shifts everything behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        self.0
            .split_last()
            .map(|(_, parent)| NodePath(parent.to_vec()))
    }

    /// Index of the addressed node within its parent, `None` for the root.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of this node's `index`-th child.
    pub fn child(&self, index: usize) -> NodePath {
        let mut segments = self.0.clone();
        segments.push(index);
        NodePath(segments)
    }

    /// True if `other` is this path or lies below it.
    pub fn is_prefix_of(&self, other: &[usize]) -> bool {
        other.starts_with(&self.0)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for NodePath {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[usize]> for NodePath {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(segments: Vec<usize>) -> Self {
        Self(segments)
    }
}

impl From<&[usize]> for NodePath {
    fn from(segments: &[usize]) -> Self {
        Self(segments.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for NodePath {
    fn from(segments: [usize; N]) -> Self {
        Self(segments.to_vec())
    }
}

impl FromIterator<usize> for NodePath {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0.iter().join("/"))
    }
}

/// Parses `/0/1`, `0/1` or `/` (root).
impl FromStr for NodePath {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
        if body.is_empty() {
            return Ok(NodePath::root());
        }

        body.split('/')
            .map(|segment| {
                let segment = segment.trim();
                if segment.starts_with('-') {
                    return Err(TreeError::PathParse {
                        input: s.to_string(),
                        reason: format!("negative index '{}'", segment),
                    });
                }
                if !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(TreeError::PathParse {
                        input: s.to_string(),
                        reason: format!("segment '{}' is not a decimal index", segment),
                    });
                }
                segment.parse::<usize>().map_err(|e| TreeError::PathParse {
                    input: s.to_string(),
                    reason: format!("segment '{}': {}", segment, e),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(NodePath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", vec![])]
    #[case("", vec![])]
    #[case("/0", vec![0])]
    #[case("0/1", vec![0, 1])]
    #[case("/3/0/12", vec![3, 0, 12])]
    fn test_parse_valid_paths(#[case] input: &str, #[case] expected: Vec<usize>) {
        let path: NodePath = input.parse().unwrap();
        assert_eq!(path.as_slice(), expected.as_slice());
    }

    #[rstest]
    #[case("/-1")]
    #[case("/0/x")]
    #[case("/0//1")]
    #[case("/+1")]
    #[case("/1e2")]
    fn test_parse_invalid_paths(#[case] input: &str) {
        let result = input.parse::<NodePath>();
        assert!(matches!(result, Err(TreeError::PathParse { .. })));
    }

    #[test]
    fn test_display_matches_parse_format() {
        assert_eq!(NodePath::root().to_string(), "/");
        assert_eq!(NodePath::from([0, 1]).to_string(), "/0/1");
    }

    #[test]
    fn test_parent_and_child() {
        let path = NodePath::from([2, 4]);
        assert_eq!(path.parent(), Some(NodePath::from([2])));
        assert_eq!(path.last(), Some(4));
        assert_eq!(path.child(7), NodePath::from([2, 4, 7]));
        assert_eq!(NodePath::root().parent(), None);
        assert!(NodePath::from([2]).is_prefix_of(&path));
        assert!(!NodePath::from([3]).is_prefix_of(&path));
    }
}
