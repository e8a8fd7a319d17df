use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::{CategoryId, PictureRef, ProductId};
use crate::dto::categories::CategoryRecord;

/// Serialized product, optionally carrying a copy of its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub picture: PictureRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRecord>,
}

impl ProductRecord {
    pub fn with_category(mut self, category: CategoryRecord) -> Self {
        self.category = Some(category);
        self
    }

    /// `false` only when an embedded category names a different id than
    /// `categoryId`. An absent embed is consistent.
    pub fn embed_matches(&self) -> bool {
        self.category
            .as_ref()
            .is_none_or(|category| category.id == self.category_id)
    }
}

impl From<Product> for ProductRecord {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            category_id: value.category_id,
            picture: value.picture,
            category: None,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(value: ProductRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            category_id: value.category_id,
            picture: value.picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use serde_json::json;

    fn widget() -> ProductRecord {
        ProductRecord::from(
            Product::new(
                ProductId::new("p1").unwrap(),
                "Widget",
                CategoryId::new("c2").unwrap(),
            )
            .with_picture("widget.png"),
        )
    }

    #[test]
    fn reads_product_without_embed() {
        let value = json!({
            "id": "p1",
            "name": "Widget",
            "description": "",
            "categoryId": "c2",
            "picture": "widget.png"
        });

        let record: ProductRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record, widget());
        assert!(record.category.is_none());
        assert!(record.embed_matches());
    }

    #[test]
    fn omits_absent_embed_when_writing() {
        let value = serde_json::to_value(widget()).unwrap();
        assert!(value.get("category").is_none());
        assert_eq!(value["categoryId"], "c2");
    }

    #[test]
    fn rejects_missing_required_fields() {
        let value = json!({
            "id": "p1",
            "name": "Widget",
            "description": "",
            "categoryId": "c2"
        });

        assert!(serde_json::from_value::<ProductRecord>(value).is_err());
    }

    #[test]
    fn accepts_inconsistent_embed_but_reports_it() {
        let value = json!({
            "id": "p1",
            "name": "Widget",
            "description": "",
            "categoryId": "c2",
            "picture": "widget.png",
            "category": {
                "id": "c1",
                "name": "Electronics",
                "description": "",
                "parentCategory": { "children": [] },
                "parentCategoryId": null
            }
        });

        let record: ProductRecord = serde_json::from_value(value).unwrap();
        assert!(!record.embed_matches());
    }

    #[test]
    fn round_trips_with_embed() {
        let category = Category::child(
            CategoryId::new("c2").unwrap(),
            "Laptops",
            CategoryId::new("c1").unwrap(),
        );
        let record = widget().with_category(category.into());

        let text = serde_json::to_string(&record).unwrap();
        let parsed: ProductRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.embed_matches());
    }
}
