use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryRecord;
use crate::repository::{AncestryEnd, CategoryReader, ancestry};

use super::{ServiceError, ServiceResult};

fn fetch_category<R>(id: &CategoryId, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Wire record for a category with its `parentCategory` view filled in.
///
/// The view lists the parent's direct children, the requested category
/// included, each embedded without further nesting. Roots get an empty view.
pub fn materialize_category<R>(id: &CategoryId, repo: &R) -> ServiceResult<CategoryRecord>
where
    R: CategoryReader + ?Sized,
{
    let category = fetch_category(id, repo)?;

    let siblings = match category.parent_id() {
        None => Vec::new(),
        Some(parent_id) => match repo.list_child_categories(parent_id) {
            Ok(children) => children,
            Err(e) => {
                log::error!("Failed to list children of category {parent_id}: {e}");
                return Err(ServiceError::Internal);
            }
        },
    };

    let children = siblings.into_iter().map(CategoryRecord::from).collect();
    Ok(CategoryRecord::from(category).with_children(children))
}

/// Categories from the root down to `id`, inclusive.
///
/// A dangling or cyclic parent chain yields the part that could be resolved;
/// the break is logged at `warn`.
pub fn category_path<R>(id: &CategoryId, repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    let category = fetch_category(id, repo)?;

    let ancestry = match ancestry(repo, &category) {
        Ok(ancestry) => ancestry,
        Err(e) => {
            log::error!("Failed to resolve ancestors of category {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match &ancestry.end {
        AncestryEnd::Root => {}
        AncestryEnd::Dangling(parent) => {
            log::warn!("Category path of {id} stops at unknown parent {parent}");
        }
        AncestryEnd::Cycle(repeated) => {
            log::warn!("Category path of {id} loops back to {repeated}");
        }
    }

    let mut path = ancestry.chain;
    path.reverse();
    path.push(category);
    Ok(path)
}
