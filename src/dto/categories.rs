use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{CategoryId, ParentRef};

/// Serialized category: the canonical fields plus the embedded parent view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub parent_category: ParentCategoryView,
    pub parent_category_id: ParentRef,
}

/// Embedded view of the parent node: its direct children.
///
/// Denormalized; nothing guarantees it agrees with the `parentCategoryId`
/// links unless the producer materialized it from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentCategoryView {
    pub children: Vec<CategoryRecord>,
}

impl ParentCategoryView {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Ids of the embedded children, in their embedded order.
    pub fn child_ids(&self) -> impl Iterator<Item = &CategoryId> {
        self.children.iter().map(|child| &child.id)
    }
}

impl CategoryRecord {
    pub fn with_children(mut self, children: Vec<CategoryRecord>) -> Self {
        self.parent_category = ParentCategoryView { children };
        self
    }
}

impl From<Category> for CategoryRecord {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            parent_category: ParentCategoryView::default(),
            parent_category_id: value.parent,
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(value: CategoryRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            parent: value.parent_category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_root_category() {
        let value = json!({
            "id": "c1",
            "name": "Electronics",
            "description": "",
            "parentCategory": { "children": [] },
            "parentCategoryId": null
        });

        let record: CategoryRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.id, "c1");
        assert!(record.parent_category_id.is_root());
        assert!(record.parent_category.is_empty());
    }

    #[test]
    fn reads_child_category() {
        let value = json!({
            "id": "c2",
            "name": "Laptops",
            "description": "",
            "parentCategory": { "children": [] },
            "parentCategoryId": "c1"
        });

        let record: CategoryRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            record.parent_category_id.parent_id().map(CategoryId::as_str),
            Some("c1")
        );
    }

    #[test]
    fn requires_parent_category_id() {
        let value = json!({
            "id": "c1",
            "name": "Electronics",
            "description": "",
            "parentCategory": { "children": [] }
        });

        let err = serde_json::from_value::<CategoryRecord>(value).unwrap_err();
        assert!(err.to_string().contains("parentCategoryId"));
    }

    #[test]
    fn requires_description_and_parent_view() {
        let value = json!({
            "id": "c1",
            "name": "Electronics",
            "parentCategoryId": null
        });

        assert!(serde_json::from_value::<CategoryRecord>(value).is_err());
    }

    #[test]
    fn writes_camel_case_fields() {
        let category = Category::child(
            CategoryId::new("c2").unwrap(),
            "Laptops",
            CategoryId::new("c1").unwrap(),
        );
        let value = serde_json::to_value(CategoryRecord::from(category)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "c2",
                "name": "Laptops",
                "description": "",
                "parentCategory": { "children": [] },
                "parentCategoryId": "c1"
            })
        );
    }

    #[test]
    fn round_trips_nested_children() {
        let child = CategoryRecord::from(Category::child(
            CategoryId::new("c2").unwrap(),
            "Laptops",
            CategoryId::new("c1").unwrap(),
        ));
        let record = CategoryRecord::from(
            Category::child(
                CategoryId::new("c3").unwrap(),
                "Phones",
                CategoryId::new("c1").unwrap(),
            )
            .with_description("Handheld devices"),
        )
        .with_children(vec![child]);

        let text = serde_json::to_string(&record).unwrap();
        let parsed: CategoryRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn conversion_drops_the_embedded_view() {
        let child = CategoryRecord::from(Category::root(CategoryId::new("c9").unwrap(), "X"));
        let record = CategoryRecord::from(Category::root(CategoryId::new("c1").unwrap(), "A"))
            .with_children(vec![child]);

        let category = Category::from(record);
        let back = CategoryRecord::from(category);
        assert!(back.parent_category.is_empty());
    }
}
