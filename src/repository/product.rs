use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::repository::{Catalog, ProductListQuery, ProductReader, RepositoryResult};

impl ProductReader for Catalog {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let search = query.search.as_deref().map(str::to_lowercase);

        let mut items: Vec<Product> = self
            .products
            .iter()
            .filter(|p| query.category_id.as_ref().is_none_or(|id| p.belongs_to(id)))
            .filter(|p| {
                search
                    .as_deref()
                    .is_none_or(|s| p.name.to_lowercase().contains(s))
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let total = items.len();

        // Apply pagination if requested
        if let Some(pagination) = &query.pagination {
            items = items
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .collect();
        }

        Ok((total, items))
    }

    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.product(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::{category_id, child, product, product_id, root};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![root("c1", "Electronics"), child("c2", "Laptops", "c1")],
            vec![
                product("p1", "Widget", "c2"),
                product("p2", "Gadget", "c2"),
                product("p3", "Charger", "c1"),
                product("p4", "Wide cable", "c1"),
            ],
        )
    }

    #[test]
    fn lists_all_products_by_name() {
        let (total, items) = catalog().list_products(ProductListQuery::default()).unwrap();
        assert_eq!(total, 4);
        let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Charger", "Gadget", "Wide cable", "Widget"]);
    }

    #[test]
    fn filters_by_category() {
        let query = ProductListQuery::default().category(category_id("c2"));
        let (total, items) = catalog().list_products(query).unwrap();
        assert_eq!(total, 2);
        assert!(items.iter().all(|p| p.category_id == "c2"));
    }

    #[test]
    fn searches_names_case_insensitively() {
        let query = ProductListQuery::default().search("WID");
        let (total, items) = catalog().list_products(query).unwrap();
        assert_eq!(total, 2);
        assert_eq!(items[0].id, "p4");
    }

    #[test]
    fn paginates_after_counting() {
        let query = ProductListQuery::default().paginate(2, 3);
        let (total, items) = catalog().list_products(query).unwrap();
        assert_eq!(total, 4);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Widget");

        let first = ProductListQuery::default().paginate(0, 3);
        let (_, items) = catalog().list_products(first).unwrap();
        assert_eq!(items[0].name, "Charger");
    }

    #[test]
    fn huge_page_number_yields_empty_page() {
        let query = ProductListQuery::default().paginate(usize::MAX, 2);
        let (total, items) = catalog().list_products(query).unwrap();
        assert_eq!(total, 4);
        assert!(items.is_empty());
    }

    #[test]
    fn gets_product_by_id() {
        let catalog = catalog();
        let found = catalog.get_product_by_id(&product_id("p3")).unwrap();
        assert_eq!(found.map(|p| p.name), Some("Charger".to_string()));
        assert!(catalog.get_product_by_id(&product_id("p9")).unwrap().is_none());
    }
}
