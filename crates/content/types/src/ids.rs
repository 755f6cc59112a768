use serde::{Deserialize, Serialize};

/// Integer identity of a node in the content tree.
///
/// Negative ids are reserved for system nodes, see [`system`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i32);

/// Globally unique key of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(pub uuid::Uuid);

impl NodeKey {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for NodeKey {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeId {
    /// Whether this id is one of the reserved system ids.
    pub fn is_system(self) -> bool {
        self.0 < 0
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

// Rendered bare: ids are joined into materialized paths.
impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// Reserved system node ids.
pub mod system {
    use super::NodeId;

    /// The tree root sentinel. A start node of `ROOT` grants full access.
    pub const ROOT: NodeId = NodeId(-1);

    /// Path of the tree root.
    pub const ROOT_PATH: &str = "-1";

    /// Content recycle bin.
    pub const RECYCLE_BIN_CONTENT: NodeId = NodeId(-20);

    /// Media recycle bin.
    pub const RECYCLE_BIN_MEDIA: NodeId = NodeId(-21);
}
