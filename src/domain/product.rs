use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, PictureRef, ProductId};

/// A sellable catalog item, linked to exactly one category by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub picture: PictureRef,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category_id,
            picture: PictureRef::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_picture(mut self, picture: impl Into<PictureRef>) -> Self {
        self.picture = picture.into();
        self
    }

    pub fn belongs_to(&self, category_id: &CategoryId) -> bool {
        &self.category_id == category_id
    }
}
