use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ParentRef};

/// Canonical category record: a node in the taxonomy, linked to its parent by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub parent: ParentRef,
}

impl Category {
    /// A category with no parent.
    pub fn root(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            parent: ParentRef::Root,
        }
    }

    /// A category placed under `parent`.
    pub fn child(id: CategoryId, name: impl Into<String>, parent: CategoryId) -> Self {
        Self {
            parent: ParentRef::Child(parent),
            ..Self::root(id, name)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_root()
    }

    pub fn parent_id(&self) -> Option<&CategoryId> {
        self.parent.parent_id()
    }

    /// Whether this category names itself as its parent.
    pub fn is_own_parent(&self) -> bool {
        self.parent_id() == Some(&self.id)
    }
}
