use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::ids::{system, NodeId};

/// Separator between ids in a materialized path.
pub const SEPARATOR: char = ',';

/// A materialized path: the comma-joined chain of ancestor ids ending with
/// the node's own id, e.g. `-1,1116,2112`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentPath(String);

impl ContentPath {
    /// Parse a path, rejecting empty input and non-numeric segments.
    pub fn parse(path: impl Into<String>) -> Result<Self, TypesError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(TypesError::InvalidPath {
                path,
                reason: "path is empty".into(),
            });
        }
        if let Some(bad) = path.split(SEPARATOR).find(|s| s.parse::<i32>().is_err()) {
            let reason = format!("segment '{}' is not a node id", bad);
            return Err(TypesError::InvalidPath { path, reason });
        }
        Ok(Self(path))
    }

    /// Path of the tree root.
    pub fn root() -> Self {
        Self(system::ROOT_PATH.to_owned())
    }

    /// Build a path from a chain of ids, root first.
    pub fn from_ids(ids: &[NodeId]) -> Result<Self, TypesError> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self::parse(joined)
    }

    /// Path of a child of this node.
    pub fn child(&self, id: NodeId) -> Self {
        Self(format!("{}{}{}", self.0, SEPARATOR, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ids along the path, root first.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        // segments were validated in `parse`
        self.0
            .split(SEPARATOR)
            .filter_map(|s| s.parse::<i32>().ok())
            .map(NodeId)
    }

    /// The id of the node the path points at.
    pub fn id(&self) -> Option<NodeId> {
        self.ids().next_back()
    }

    /// Whether `id` appears anywhere on the path, the node itself included.
    pub fn contains_id(&self, id: NodeId) -> bool {
        wrap(&self.0).contains(&wrap(&id.to_string()))
    }

    /// Depth below the root; the root path has level 0.
    pub fn level(&self) -> usize {
        self.0.split(SEPARATOR).count().saturating_sub(1)
    }
}

/// Surround a path (or a single id) with separators so that containment
/// tests only match whole segments.
pub fn wrap(path: &str) -> String {
    format!("{}{}{}", SEPARATOR, path, SEPARATOR)
}

/// Whether `prefix` is a segment-aligned prefix of `path`, equality included.
///
/// `-1,5` is a prefix of `-1,5,6` but not of `-1,50`.
pub fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}

impl TryFrom<String> for ContentPath {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContentPath> for String {
    fn from(path: ContentPath) -> Self {
        path.0
    }
}

impl AsRef<str> for ContentPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
