//! Opt-in consistency checks over catalog data.
//!
//! Nothing here rejects a record. Problems are collected as [`Finding`]s so a
//! consumer can decide what to do with stale embeds, dangling references and
//! broken hierarchies.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::domain::types::{CategoryId, ProductId};
use crate::dto::categories::CategoryRecord;
use crate::dto::products::ProductRecord;
use crate::repository::{Catalog, CategoryReader, ProductListQuery, ProductReader, ancestry};

use super::{ServiceError, ServiceResult};

/// A single consistency problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    DuplicateCategoryId {
        category: CategoryId,
    },
    DuplicateProductId {
        product: ProductId,
    },
    SelfParent {
        category: CategoryId,
    },
    DanglingParent {
        category: CategoryId,
        parent: CategoryId,
    },
    /// The category is its own transitive ancestor.
    ParentCycle {
        category: CategoryId,
    },
    DanglingCategory {
        product: ProductId,
        category: CategoryId,
    },
    /// The embedded `category` names a different id than `categoryId`.
    EmbeddedCategoryMismatch {
        product: ProductId,
        expected: CategoryId,
        embedded: CategoryId,
    },
    /// The embedded `parentCategory.children` disagrees with the parent links.
    StaleChildrenView {
        category: CategoryId,
    },
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCategoryId { category } => {
                write!(f, "category id {category} is used more than once")
            }
            Self::DuplicateProductId { product } => {
                write!(f, "product id {product} is used more than once")
            }
            Self::SelfParent { category } => write!(f, "category {category} is its own parent"),
            Self::DanglingParent { category, parent } => {
                write!(f, "category {category} has unknown parent {parent}")
            }
            Self::ParentCycle { category } => {
                write!(f, "category {category} is its own ancestor")
            }
            Self::DanglingCategory { product, category } => {
                write!(f, "product {product} has unknown category {category}")
            }
            Self::EmbeddedCategoryMismatch {
                product,
                expected,
                embedded,
            } => write!(
                f,
                "product {product} embeds category {embedded} but references {expected}"
            ),
            Self::StaleChildrenView { category } => {
                write!(f, "category {category} embeds a stale children view")
            }
        }
    }
}

/// Aggregated outcome of a consistency run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsistencyReport {
    pub categories_checked: usize,
    pub products_checked: usize,
    pub findings: Vec<Finding>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Record a finding unless the same one is already present.
    pub fn push(&mut self, finding: Finding) {
        if !self.findings.contains(&finding) {
            self.findings.push(finding);
        }
    }
}

/// Flag a product whose embedded category does not match `categoryId`.
pub fn check_product_embed(record: &ProductRecord) -> Option<Finding> {
    let embedded = record.category.as_ref()?;
    if embedded.id == record.category_id {
        None
    } else {
        Some(Finding::EmbeddedCategoryMismatch {
            product: record.id.clone(),
            expected: record.category_id.clone(),
            embedded: embedded.id.clone(),
        })
    }
}

/// Flag a category whose non-empty children view differs from the parent's
/// actual children. Ids are compared as a set; an empty view counts as
/// not materialized and is never flagged.
pub fn check_category_embed<R>(record: &CategoryRecord, repo: &R) -> ServiceResult<Option<Finding>>
where
    R: CategoryReader + ?Sized,
{
    if record.parent_category.is_empty() {
        return Ok(None);
    }

    let expected: BTreeSet<CategoryId> = match record.parent_category_id.parent_id() {
        None => BTreeSet::new(),
        Some(parent_id) => match repo.list_child_categories(parent_id) {
            Ok(children) => children.into_iter().map(|c| c.id).collect(),
            Err(e) => {
                log::error!("Failed to list children of category {parent_id}: {e}");
                return Err(ServiceError::Internal);
            }
        },
    };
    let embedded: BTreeSet<CategoryId> = record.parent_category.child_ids().cloned().collect();

    if expected == embedded {
        Ok(None)
    } else {
        Ok(Some(Finding::StaleChildrenView {
            category: record.id.clone(),
        }))
    }
}

fn repeated<'a, T, I>(ids: I) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash + Ord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for id in ids {
        *counts.entry(id).or_default() += 1;
    }
    let mut repeated: Vec<T> = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(id, _)| id.clone())
        .collect();
    repeated.sort();
    repeated
}

/// Check identifiers and references across every record in `repo`.
pub fn check_catalog<R>(repo: &R) -> ServiceResult<ConsistencyReport>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;
    let (_total, products) = repo
        .list_products(ProductListQuery::default())
        .map_err(|e| {
            log::error!("Failed to list products: {e}");
            ServiceError::Internal
        })?;

    let mut report = ConsistencyReport {
        categories_checked: categories.len(),
        products_checked: products.len(),
        findings: Vec::new(),
    };

    for category in repeated(categories.iter().map(|c| &c.id)) {
        report.push(Finding::DuplicateCategoryId { category });
    }
    for product in repeated(products.iter().map(|p| &p.id)) {
        report.push(Finding::DuplicateProductId { product });
    }

    for category in &categories {
        if category.is_own_parent() {
            report.push(Finding::SelfParent {
                category: category.id.clone(),
            });
            continue;
        }
        let Some(parent_id) = category.parent_id() else {
            continue;
        };

        let parent = repo.get_category_by_id(parent_id).map_err(|e| {
            log::error!("Failed to get category {parent_id}: {e}");
            ServiceError::Internal
        })?;
        if parent.is_none() {
            report.push(Finding::DanglingParent {
                category: category.id.clone(),
                parent: parent_id.clone(),
            });
            continue;
        }

        // Walks resolve ids through the index, so only the indexed record of a
        // duplicated id can be judged for cycles.
        let indexed = repo.get_category_by_id(&category.id).map_err(|e| {
            log::error!("Failed to get category {}: {e}", category.id);
            ServiceError::Internal
        })?;
        if indexed.as_ref() != Some(category) {
            continue;
        }

        let ancestry = ancestry(repo, category).map_err(|e| {
            log::error!("Failed to resolve ancestors of category {}: {e}", category.id);
            ServiceError::Internal
        })?;
        if ancestry.loops_back_to(&category.id) {
            report.push(Finding::ParentCycle {
                category: category.id.clone(),
            });
        }
    }

    for product in &products {
        let category = repo.get_category_by_id(&product.category_id).map_err(|e| {
            log::error!("Failed to get category {}: {e}", product.category_id);
            ServiceError::Internal
        })?;
        if category.is_none() {
            report.push(Finding::DanglingCategory {
                product: product.id.clone(),
                category: product.category_id.clone(),
            });
        }
    }

    Ok(report)
}

/// Check raw wire records: references and identifiers, then the embedded
/// views the records carry.
pub fn check_records(
    categories: &[CategoryRecord],
    products: &[ProductRecord],
) -> ServiceResult<ConsistencyReport> {
    let catalog = Catalog::from_records(categories.to_vec(), products.to_vec());
    let mut report = check_catalog(&catalog)?;

    for record in products {
        if let Some(finding) = check_product_embed(record) {
            report.push(finding);
        }
    }
    for record in categories {
        if let Some(finding) = check_category_embed(record, &catalog)? {
            report.push(finding);
        }
    }

    Ok(report)
}
