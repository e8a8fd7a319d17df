use std::collections::HashMap;

use thiserror::Error;

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::{CategoryId, ProductId};
use crate::dto::categories::CategoryRecord;
use crate::dto::products::ProductRecord;

pub mod category;
pub mod product;

pub use category::{Ancestry, AncestryEnd, ancestry, descendants};

/// Errors raised by catalog readers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Page selection for list queries. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// Query parameters used when listing or searching products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Filter by category identifier.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category records.
pub trait CategoryReader {
    /// List every category record, ordered by name. Records sharing an id are
    /// all returned.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>>;
    /// List the direct children of `parent_id`, ordered by name.
    fn list_child_categories(&self, parent_id: &CategoryId) -> RepositoryResult<Vec<Category>>;
    /// List categories without a parent, ordered by name.
    fn list_root_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Read-only operations for product records.
pub trait ProductReader {
    /// List products matching the supplied query parameters. Returns the
    /// total match count before pagination alongside the page.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
}

/// In-memory catalog: category and product arenas with id and child indexes.
///
/// Built once and never mutated. When several records share an id the first
/// one is indexed; the others stay in the arena so they can be reported.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    category_index: HashMap<CategoryId, usize>,
    product_index: HashMap<ProductId, usize>,
    children: HashMap<CategoryId, Vec<usize>>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let mut category_index = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            category_index.entry(category.id.clone()).or_insert(position);
        }

        let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        for (position, category) in categories.iter().enumerate() {
            if category_index.get(&category.id) != Some(&position) {
                continue;
            }
            if let Some(parent_id) = category.parent_id() {
                children.entry(parent_id.clone()).or_default().push(position);
            }
        }

        let mut product_index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            product_index.entry(product.id.clone()).or_insert(position);
        }

        Self {
            categories,
            products,
            category_index,
            product_index,
            children,
        }
    }

    /// Build a catalog from wire records, dropping their embedded views.
    pub fn from_records(categories: Vec<CategoryRecord>, products: Vec<ProductRecord>) -> Self {
        Self::new(
            categories.into_iter().map(Into::into).collect(),
            products.into_iter().map(Into::into).collect(),
        )
    }

    /// Borrow the indexed category for `id`.
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.category_index.get(id).map(|&i| &self.categories[i])
    }

    /// Borrow the indexed product for `id`.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.product_index.get(id).map(|&i| &self.products[i])
    }

    /// Borrow the direct children of `id` in arena order.
    pub fn children(&self, id: &CategoryId) -> impl Iterator<Item = &Category> {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .map(|&i| &self.categories[i])
    }
}

fn sort_categories(mut categories: Vec<Category>) -> Vec<Category> {
    categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    categories
}
