use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dto::categories::CategoryRecord;
use crate::dto::products::ProductRecord;
use crate::repository::Catalog;

/// A catalog exchanged as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

impl CatalogDocument {
    /// Index the document, dropping embedded views.
    pub fn to_catalog(&self) -> Catalog {
        Catalog::from_records(self.categories.clone(), self.products.clone())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_document(text: &str) -> Result<CatalogDocument, LoadError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_document(path: &Path) -> Result<CatalogDocument, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let document = parse_document(&text)?;
    log::info!(
        "Loaded {} categories and {} products from {}",
        document.categories.len(),
        document.products.len(),
        path.display()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{CategoryReader, ProductListQuery, ProductReader};

    const DOCUMENT: &str = r#"{
        "categories": [
            {"id": "c1", "name": "Electronics", "description": "",
             "parentCategory": {"children": []}, "parentCategoryId": null},
            {"id": "c2", "name": "Laptops", "description": "",
             "parentCategory": {"children": []}, "parentCategoryId": "c1"}
        ],
        "products": [
            {"id": "p1", "name": "Widget", "description": "", "categoryId": "c2",
             "picture": "widget.png"}
        ]
    }"#;

    #[test]
    fn parses_and_indexes_a_document() {
        let document = parse_document(DOCUMENT).unwrap();
        let catalog = document.to_catalog();

        assert_eq!(catalog.list_root_categories().unwrap().len(), 1);
        let (total, _) = catalog.list_products(ProductListQuery::default()).unwrap();
        assert_eq!(total, 1);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let document = parse_document("{}").unwrap();
        assert_eq!(document, CatalogDocument::default());
    }

    #[test]
    fn rejects_records_with_blank_ids() {
        let err = parse_document(r#"{"products": [{"id": " ", "name": "", "description": "",
            "categoryId": "c1", "picture": ""}]}"#)
        .unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_document(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
