use std::sync::Arc;

use content_types::{system, ContentPath, ContentSettings, NodeId, NodeKey, TreeSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::PermissionError;
use crate::path::{branch_access, path_access, BranchAccess};
use crate::user::{BackofficeUser, EntityPermissionSet};

/// Lightweight view of a tree entity: identity and position only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySlim {
    pub id: NodeId,
    pub key: NodeKey,
    pub name: String,
    pub parent_id: NodeId,
    pub path: ContentPath,
}

/// Looks up tree entities by id.
pub trait EntityService: Send + Sync {
    fn entity(&self, id: NodeId) -> Option<EntitySlim>;
}

/// Outcome of a content access check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentAccess {
    Granted,
    Denied,
    NotFound,
}

/// Access outcome plus the entity resolved for the checked id, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentAccessCheck {
    pub access: ContentAccess,
    pub entity: Option<EntitySlim>,
}

impl ContentAccessCheck {
    pub fn is_granted(&self) -> bool {
        self.access == ContentAccess::Granted
    }
}

/// Effective start nodes of a user: ids and their paths, in step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartNodes {
    pub ids: Vec<NodeId>,
    pub paths: Vec<String>,
}

/// Effective content start nodes of a user.
///
/// User and group start ids are merged. Root access collapses the set to the
/// root; ids lying under another start id are dropped, as are ids the entity
/// service does not know.
pub fn calculate_content_start_node_ids<E>(user: &BackofficeUser, entities: &E) -> Vec<NodeId>
where
    E: EntityService + ?Sized,
{
    start_nodes(user, entities, system::ROOT).ids
}

fn start_nodes<E>(user: &BackofficeUser, entities: &E, root_id: NodeId) -> StartNodes
where
    E: EntityService + ?Sized,
{
    let candidates = user.all_start_content_ids();
    if candidates.contains(&root_id) {
        return StartNodes {
            ids: vec![root_id],
            paths: vec![root_id.to_string()],
        };
    }

    let resolved: Vec<EntitySlim> = candidates
        .iter()
        .filter_map(|&id| {
            let entity = entities.entity(id);
            if entity.is_none() {
                debug!(user = %user.id, start_node = %id, "start node not found, ignoring");
            }
            entity
        })
        .collect();

    let (ids, paths) = resolved
        .iter()
        .filter(|entity| {
            !resolved
                .iter()
                .any(|other| other.id != entity.id && entity.path.contains_id(other.id))
        })
        .map(|entity| (entity.id, entity.path.as_str().to_owned()))
        .unzip();

    StartNodes { ids, paths }
}

/// Checks backoffice user access to content.
///
/// Start nodes are recomputed per call from the user and the entity service.
pub struct ContentPermissions<E> {
    entities: Arc<E>,
    tree: TreeSettings,
}

impl<E: EntityService> ContentPermissions<E> {
    pub fn new(entities: Arc<E>) -> Self {
        Self {
            entities,
            tree: TreeSettings::default(),
        }
    }

    pub fn from_settings(settings: &ContentSettings, entities: Arc<E>) -> Self {
        Self::new(entities).with_tree_settings(settings.tree.clone())
    }

    pub fn with_tree_settings(mut self, tree: TreeSettings) -> Self {
        self.tree = tree;
        self
    }

    /// Effective start ids and paths of the user.
    pub fn start_nodes(&self, user: &BackofficeUser) -> StartNodes {
        start_nodes(user, self.entities.as_ref(), self.tree.root_id)
    }

    pub fn has_content_root_access(&self, user: &BackofficeUser) -> bool {
        self.start_nodes(user).ids.contains(&self.tree.root_id)
    }

    /// Only root access reaches the recycle bin.
    pub fn has_content_bin_access(&self, user: &BackofficeUser) -> bool {
        let bin_path = self.tree.content_recycle_bin_id.to_string();
        self.has_content_path_access(user, &bin_path)
            .unwrap_or(false)
    }

    pub fn has_content_path_access(
        &self,
        user: &BackofficeUser,
        path: &str,
    ) -> Result<bool, PermissionError> {
        let start = self.start_nodes(user);
        path_access(
            path,
            &start.ids,
            self.tree.root_id,
            self.tree.content_recycle_bin_id,
        )
    }

    pub fn branch_access(
        &self,
        user: &BackofficeUser,
        path: &str,
    ) -> Result<BranchAccess, PermissionError> {
        let start = self.start_nodes(user);
        branch_access(path, &start.ids, &start.paths, self.tree.root_id)
    }

    /// Permissions the user holds on the node at `path`.
    ///
    /// Each group contributes the granular set of the deepest node on the
    /// path that has one, or its default set. Groups are unioned.
    pub fn permissions_for_path(
        &self,
        user: &BackofficeUser,
        path: &str,
    ) -> Result<EntityPermissionSet, PermissionError> {
        if path.trim().is_empty() {
            return Err(PermissionError::EmptyPath);
        }
        let path = ContentPath::parse(path)?;
        let entity_id = path.id().unwrap_or(self.tree.root_id);

        let mut set = EntityPermissionSet::empty(entity_id);
        for group in &user.groups {
            set.extend(group.permissions_along(path.ids()).iter().cloned());
        }

        trace!(user = %user.id, path = %path, permissions = ?set.permissions, "resolved path permissions");
        Ok(set)
    }

    /// Check that the user may access `node_id` with all of `permissions`.
    ///
    /// The root and the content recycle bin are checked through root and bin
    /// access; any other id must resolve to an entity.
    pub fn check_permissions(
        &self,
        node_id: NodeId,
        user: &BackofficeUser,
        permissions: &[&str],
    ) -> Result<ContentAccessCheck, PermissionError> {
        let (has_access, entity) = if node_id == self.tree.root_id {
            (self.has_content_root_access(user), None)
        } else if node_id == self.tree.content_recycle_bin_id {
            (self.has_content_bin_access(user), None)
        } else {
            let Some(entity) = self.entities.entity(node_id) else {
                debug!(user = %user.id, node = %node_id, "content not found");
                return Ok(ContentAccessCheck {
                    access: ContentAccess::NotFound,
                    entity: None,
                });
            };
            let has_access = self.has_content_path_access(user, entity.path.as_str())?;
            (has_access, Some(entity))
        };

        if !has_access {
            debug!(user = %user.id, node = %node_id, "content path access denied");
            return Ok(ContentAccessCheck {
                access: ContentAccess::Denied,
                entity,
            });
        }

        if permissions.is_empty() {
            return Ok(ContentAccessCheck {
                access: ContentAccess::Granted,
                entity,
            });
        }

        // system nodes have no entity; their id is their path
        let path = entity
            .as_ref()
            .map(|e| e.path.as_str().to_owned())
            .unwrap_or_else(|| node_id.to_string());
        let held = self.permissions_for_path(user, &path)?;

        let access = if held.contains_all(permissions.iter().copied()) {
            ContentAccess::Granted
        } else {
            debug!(
                user = %user.id,
                node = %node_id,
                required = ?permissions,
                "missing content permissions"
            );
            ContentAccess::Denied
        };

        Ok(ContentAccessCheck { access, entity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::InMemoryEntityService;
    use crate::user::UserGroup;

    /// -1
    /// ├── 1050 home
    /// │   └── 1060 about
    /// │       └── 1070 team
    /// └── 2000 archive
    fn entities() -> InMemoryEntityService {
        let mut service = InMemoryEntityService::new();
        service.insert(system::ROOT, NodeId(1050), "home").unwrap();
        service.insert(NodeId(1050), NodeId(1060), "about").unwrap();
        service.insert(NodeId(1060), NodeId(1070), "team").unwrap();
        service.insert(system::ROOT, NodeId(2000), "archive").unwrap();
        service
    }

    #[test]
    fn start_nodes_collapse_descendants() {
        let entities = entities();
        let user = BackofficeUser::new("ana")
            .with_start_content(NodeId(1060))
            .with_group(UserGroup::new("editors").with_start_content(NodeId(1050)))
            .with_group(UserGroup::new("archivists").with_start_content(NodeId(2000)))
            .with_group(UserGroup::new("ghosts").with_start_content(NodeId(9999)));

        assert_eq!(
            calculate_content_start_node_ids(&user, &entities),
            vec![NodeId(1050), NodeId(2000)]
        );
    }

    #[test]
    fn start_nodes_root_wins() {
        let entities = entities();
        let user = BackofficeUser::new("admin")
            .with_start_content(NodeId(1060))
            .with_group(UserGroup::new("admins").with_start_content(system::ROOT));

        assert_eq!(
            calculate_content_start_node_ids(&user, &entities),
            vec![system::ROOT]
        );
    }

    #[test]
    fn root_and_bin_access() {
        let permissions = ContentPermissions::new(Arc::new(entities()));
        let admin = BackofficeUser::new("admin").with_start_content(system::ROOT);
        let editor = BackofficeUser::new("editor").with_start_content(NodeId(1050));

        assert!(permissions.has_content_root_access(&admin));
        assert!(permissions.has_content_bin_access(&admin));
        assert!(!permissions.has_content_root_access(&editor));
        assert!(!permissions.has_content_bin_access(&editor));
    }

    #[test]
    fn check_permissions_outcomes() {
        let permissions = ContentPermissions::new(Arc::new(entities()));
        let editor = BackofficeUser::new("editor").with_group(
            UserGroup::new("editors")
                .with_start_content(NodeId(1050))
                .with_default_permissions(["browse"])
                .with_granular_permissions(NodeId(1060), ["browse", "update"]),
        );

        let check = permissions
            .check_permissions(NodeId(1070), &editor, &["update"])
            .unwrap();
        assert_eq!(check.access, ContentAccess::Granted);
        assert_eq!(check.entity.map(|e| e.name), Some("team".to_string()));

        let check = permissions
            .check_permissions(NodeId(1050), &editor, &["update"])
            .unwrap();
        assert_eq!(check.access, ContentAccess::Denied);

        let check = permissions
            .check_permissions(NodeId(2000), &editor, &[])
            .unwrap();
        assert_eq!(check.access, ContentAccess::Denied);
        assert!(check.entity.is_some());

        let check = permissions
            .check_permissions(NodeId(4242), &editor, &[])
            .unwrap();
        assert_eq!(check.access, ContentAccess::NotFound);
        assert!(check.entity.is_none());

        let check = permissions
            .check_permissions(system::ROOT, &editor, &[])
            .unwrap();
        assert_eq!(check.access, ContentAccess::Denied);
    }

    #[test]
    fn permissions_union_across_groups() {
        let permissions = ContentPermissions::new(Arc::new(entities()));
        let user = BackofficeUser::new("ana")
            .with_group(UserGroup::new("writers").with_default_permissions(["browse", "update"]))
            .with_group(
                UserGroup::new("publishers")
                    .with_default_permissions(["browse"])
                    .with_granular_permissions(NodeId(1050), ["publish"]),
            );

        let set = permissions
            .permissions_for_path(&user, "-1,1050,1060")
            .unwrap();
        assert_eq!(set.entity_id, NodeId(1060));
        assert!(set.contains_all(["browse", "update", "publish"]));

        let set = permissions.permissions_for_path(&user, "-1,2000").unwrap();
        assert!(!set.contains("publish"));

        assert!(matches!(
            permissions.permissions_for_path(&user, " "),
            Err(PermissionError::EmptyPath)
        ));
    }
}
