//! Helpers for integration tests.

use std::io::Write;

use serde_json::{Value, json};
use tempfile::NamedTempFile;

/// Catalog document written to a temporary file.
pub struct TestDocument {
    file: NamedTempFile,
}

impl TestDocument {
    pub fn new(document: &Value) -> Self {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{document}").expect("Failed to write catalog document");
        TestDocument { file }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

pub fn category(id: &str, name: &str, parent: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "parentCategory": { "children": [] },
        "parentCategoryId": parent
    })
}

pub fn product(id: &str, name: &str, category_id: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "categoryId": category_id,
        "picture": format!("{id}.png")
    })
}
