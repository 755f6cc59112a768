use std::collections::HashMap;

use content_types::{system, ContentPath, NodeId, NodeKey};

use crate::service::{EntityService, EntitySlim};

/// In-memory entity service for testing.
#[derive(Debug, Default)]
pub struct InMemoryEntityService {
    entities: HashMap<NodeId, EntitySlim>,
}

impl InMemoryEntityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity under `parent`. The root and the content recycle bin
    /// are valid parents without being inserted first.
    ///
    /// Returns `None` if the parent is unknown.
    pub fn insert(
        &mut self,
        parent: NodeId,
        id: NodeId,
        name: impl Into<String>,
    ) -> Option<EntitySlim> {
        let parent_path = if parent == system::ROOT {
            ContentPath::root()
        } else if parent == system::RECYCLE_BIN_CONTENT {
            ContentPath::root().child(system::RECYCLE_BIN_CONTENT)
        } else {
            self.entities.get(&parent)?.path.clone()
        };

        let entity = EntitySlim {
            id,
            key: NodeKey::new(),
            name: name.into(),
            parent_id: parent,
            path: parent_path.child(id),
        };
        self.entities.insert(id, entity.clone());
        Some(entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityService for InMemoryEntityService {
    fn entity(&self, id: NodeId) -> Option<EntitySlim> {
        self.entities.get(&id).cloned()
    }
}
