//! Backoffice users, their groups and the permission sets groups grant.

use std::collections::{BTreeSet, HashMap};

use content_types::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a backoffice user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Permissions a user holds on one node.
///
/// Permissions are opaque verbs such as `"browse"` or `"update"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPermissionSet {
    pub entity_id: NodeId,
    pub permissions: BTreeSet<String>,
}

impl EntityPermissionSet {
    pub fn new<I, P>(entity_id: NodeId, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            entity_id,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty(entity_id: NodeId) -> Self {
        Self {
            entity_id,
            permissions: BTreeSet::new(),
        }
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Whether every permission in `required` is held.
    pub fn contains_all<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> bool {
        required.into_iter().all(|p| self.contains(p))
    }

    pub fn extend<I, P>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

/// A group of backoffice users sharing a start node and permissions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub alias: String,
    pub start_content_id: Option<NodeId>,
    /// Applied wherever no granular set is found on the path
    pub default_permissions: BTreeSet<String>,
    /// Node-specific sets, inherited by descendants
    #[serde(default)]
    pub granular_permissions: HashMap<NodeId, BTreeSet<String>>,
}

impl UserGroup {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            ..Default::default()
        }
    }

    pub fn with_start_content(mut self, id: NodeId) -> Self {
        self.start_content_id = Some(id);
        self
    }

    pub fn with_default_permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.default_permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_granular_permissions<I, P>(mut self, node: NodeId, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.granular_permissions
            .insert(node, permissions.into_iter().map(Into::into).collect());
        self
    }

    /// The set that applies to the node at the end of `path_ids` (root
    /// first): the deepest granular set on the path, else the default.
    pub fn permissions_along<I>(&self, path_ids: I) -> &BTreeSet<String>
    where
        I: DoubleEndedIterator<Item = NodeId>,
    {
        path_ids
            .rev()
            .find_map(|id| self.granular_permissions.get(&id))
            .unwrap_or(&self.default_permissions)
    }
}

/// A backoffice user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackofficeUser {
    pub id: UserId,
    pub name: String,
    /// Start nodes assigned to the user directly
    pub start_content_ids: Vec<NodeId>,
    pub groups: Vec<UserGroup>,
}

impl BackofficeUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            start_content_ids: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_start_content(mut self, id: NodeId) -> Self {
        self.start_content_ids.push(id);
        self
    }

    pub fn with_group(mut self, group: UserGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Start ids from the user and all groups, deduplicated and sorted.
    pub fn all_start_content_ids(&self) -> BTreeSet<NodeId> {
        self.start_content_ids
            .iter()
            .copied()
            .chain(self.groups.iter().filter_map(|g| g.start_content_id))
            .collect()
    }
}
