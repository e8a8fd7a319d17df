use std::collections::{HashSet, VecDeque};

use crate::domain::category::Category;
use crate::domain::types::{CategoryId, ParentRef};
use crate::repository::{Catalog, CategoryReader, RepositoryResult, sort_categories};

impl CategoryReader for Catalog {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(sort_categories(self.categories.clone()))
    }

    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self.category(id).cloned())
    }

    fn list_child_categories(&self, parent_id: &CategoryId) -> RepositoryResult<Vec<Category>> {
        Ok(sort_categories(self.children(parent_id).cloned().collect()))
    }

    fn list_root_categories(&self) -> RepositoryResult<Vec<Category>> {
        let roots = self
            .categories
            .iter()
            .enumerate()
            .filter(|(position, category)| {
                category.is_root() && self.category_index.get(&category.id) == Some(position)
            })
            .map(|(_, category)| category.clone())
            .collect();
        Ok(sort_categories(roots))
    }
}

/// Where an upward walk through `parentCategoryId` links stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AncestryEnd {
    /// Reached a category without a parent.
    Root,
    /// The next parent id does not resolve to a category.
    Dangling(CategoryId),
    /// The next parent id was already visited.
    Cycle(CategoryId),
}

/// Ancestors of a category, nearest first, and how the walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry {
    pub chain: Vec<Category>,
    pub end: AncestryEnd,
}

impl Ancestry {
    /// Whether the walk came back to `id`, i.e. `id` is its own ancestor.
    pub fn loops_back_to(&self, id: &CategoryId) -> bool {
        matches!(&self.end, AncestryEnd::Cycle(repeated) if repeated == id)
    }
}

/// Walk the parent links of `category` until a root, a dangling link or a
/// repeated node.
pub fn ancestry<R>(repo: &R, category: &Category) -> RepositoryResult<Ancestry>
where
    R: CategoryReader + ?Sized,
{
    let mut visited = HashSet::from([category.id.clone()]);
    let mut chain = Vec::new();
    let mut next = category.parent.clone();

    loop {
        let parent_id = match next {
            ParentRef::Root => {
                return Ok(Ancestry {
                    chain,
                    end: AncestryEnd::Root,
                });
            }
            ParentRef::Child(id) => id,
        };

        if !visited.insert(parent_id.clone()) {
            return Ok(Ancestry {
                chain,
                end: AncestryEnd::Cycle(parent_id),
            });
        }

        let Some(parent) = repo.get_category_by_id(&parent_id)? else {
            return Ok(Ancestry {
                chain,
                end: AncestryEnd::Dangling(parent_id),
            });
        };

        next = parent.parent.clone();
        chain.push(parent);
    }
}

/// All categories below `id`, breadth-first. Each node is returned once even
/// on cyclic data, and `id` itself is never included.
pub fn descendants<R>(repo: &R, id: &CategoryId) -> RepositoryResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    let mut visited = HashSet::from([id.clone()]);
    let mut queue = VecDeque::from([id.clone()]);
    let mut found = Vec::new();

    while let Some(current) = queue.pop_front() {
        for child in repo.list_child_categories(&current)? {
            if visited.insert(child.id.clone()) {
                queue.push_back(child.id.clone());
                found.push(child);
            }
        }
    }

    Ok(found)
}
