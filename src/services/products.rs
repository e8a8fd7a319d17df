use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::dto::categories::CategoryRecord;
use crate::dto::products::ProductRecord;
use crate::repository::{CategoryReader, ProductListQuery, ProductReader};

use super::{ServiceError, ServiceResult};

/// Attach the product's category when it resolves. A dangling `categoryId`
/// leaves the embed absent.
fn embed_category<R>(product: Product, repo: &R) -> ServiceResult<ProductRecord>
where
    R: CategoryReader + ?Sized,
{
    let category = match repo.get_category_by_id(&product.category_id) {
        Ok(category) => category,
        Err(e) => {
            log::error!("Failed to get category {}: {e}", product.category_id);
            return Err(ServiceError::Internal);
        }
    };

    let record = ProductRecord::from(product);
    match category {
        Some(category) => Ok(record.with_category(CategoryRecord::from(category))),
        None => {
            log::warn!(
                "Product {} references unknown category {}",
                record.id,
                record.category_id
            );
            Ok(record)
        }
    }
}

/// Wire record for a product with its `category` embed filled in.
pub fn materialize_product<R>(id: &ProductId, repo: &R) -> ServiceResult<ProductRecord>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let product = match repo.get_product_by_id(id) {
        Ok(Some(product)) => product,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    embed_category(product, repo)
}

/// List products matching `query`, each with its category embedded.
///
/// Returns the total match count before pagination alongside the page.
pub fn show_products<R>(
    query: ProductListQuery,
    repo: &R,
) -> ServiceResult<(usize, Vec<ProductRecord>)>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let (total, products) = match repo.list_products(query) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Failed to list products: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let records = products
        .into_iter()
        .map(|product| embed_category(product, repo))
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok((total, records))
}
