//! In-memory product catalog with a category index.
//!
//! The primary store maps ids to products in insertion order. The category index
//! maps each category to the ids filed under it, in the order they were filed.
//! Both are only ever changed together through [`Catalog`] methods, so every
//! product sits in exactly one bucket and no bucket is ever empty.

mod allocator;
mod error;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::warn;

use crate::domain::{Product, ProductId, ProductPatch};

pub use allocator::*;
pub use error::*;

/// Quantities before and after a stock update.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub id: ProductId,
    pub name: String,
    pub before: u32,
    pub after: u32,
}

/// Per-category line of a [`CatalogSummary`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub product_count: usize,
    pub total_value: f64,
}

/// Aggregate view of the whole catalog. Categories are in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    pub product_count: usize,
    pub category_count: usize,
    pub total_value: f64,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: IndexMap<ProductId, Product>,
    categories: BTreeMap<String, Vec<ProductId>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Inserts a product under its pre-assigned id and files it in its category.
    ///
    /// Ids are not checked for uniqueness. A colliding id replaces the stored
    /// product, which is unfiled from its bucket and returned.
    pub fn add(&mut self, product: Product) -> Option<Product> {
        let id = product.id;
        let category = product.category.clone();

        let displaced = self.products.shift_remove(&id);
        if let Some(old) = &displaced {
            warn!(product_id = id, old_name = %old.name, "Product id collision, replacing stored product");
            self.unfile(&old.category, id);
        }

        self.products.insert(id, product);
        self.categories.entry(category).or_default().push(id);
        displaced
    }

    /// Removes a product from the store and its bucket, dropping the bucket if it empties.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let product = self.products.shift_remove(&id)?;
        self.unfile(&product.category, id);
        Some(product)
    }

    /// Adds `delta` to a product's quantity, clamping the result at zero.
    pub fn update_stock(&mut self, id: ProductId, delta: i64) -> Result<StockChange, CatalogError> {
        let product = self.products.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        let before = product.adjust_stock(delta);
        Ok(StockChange {
            id,
            name: product.name.clone(),
            before,
            after: product.quantity,
        })
    }

    /// Edits product fields in place. A new category moves the product to the
    /// end of that category's bucket.
    pub fn update(&mut self, id: ProductId, patch: ProductPatch) -> Result<&Product, CatalogError> {
        let product = self.products.get_mut(&id).ok_or(CatalogError::NotFound(id))?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(supplier) = patch.supplier {
            product.supplier = supplier;
        }

        let moved_from = match patch.category {
            Some(category) if category != product.category => {
                Some(std::mem::replace(&mut product.category, category))
            }
            _ => None,
        };

        if let Some(old_category) = moved_from {
            let new_category = product.category.clone();
            self.unfile(&old_category, id);
            self.categories.entry(new_category).or_default().push(id);
        }

        self.products.get(&id).ok_or(CatalogError::NotFound(id))
    }

    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Case-insensitive substring match on names, in store order.
    pub fn find_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.products
            .values()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Products filed under `category` (exact match), in bucket order.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.categories
            .get(category)
            .map(|ids| self.resolve(ids))
            .unwrap_or_default()
    }

    /// Every bucket, categories ascending.
    pub fn grouped(&self) -> Vec<(&str, Vec<&Product>)> {
        self.categories
            .iter()
            .map(|(category, ids)| (category.as_str(), self.resolve(ids)))
            .collect()
    }

    pub fn all(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// Products with `quantity <= threshold`, ascending by quantity. Ties keep store order.
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        let mut low: Vec<&Product> = self
            .products
            .values()
            .filter(|product| product.is_low_stock(threshold))
            .collect();
        low.sort_by_key(|product| product.quantity);
        low
    }

    pub fn total_value(&self) -> f64 {
        self.products.values().map(Product::total_value).sum()
    }

    pub fn summary(&self) -> CatalogSummary {
        let categories = self
            .grouped()
            .into_iter()
            .map(|(category, products)| CategorySummary {
                category: category.to_string(),
                product_count: products.len(),
                total_value: products.iter().map(|product| product.total_value()).sum(),
            })
            .collect();

        CatalogSummary {
            product_count: self.len(),
            category_count: self.category_count(),
            total_value: self.total_value(),
            categories,
        }
    }

    fn resolve(&self, ids: &[ProductId]) -> Vec<&Product> {
        ids.iter().filter_map(|id| self.products.get(id)).collect()
    }

    fn unfile(&mut self, category: &str, id: ProductId) {
        if let Some(ids) = self.categories.get_mut(category) {
            ids.retain(|filed| *filed != id);
            if ids.is_empty() {
                self.categories.remove(category);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: ProductId, name: &str, category: &str, price: f64, quantity: u32) -> Product {
        Product::new(id, name, category, price, quantity, "Acme")
    }

    fn ids(products: &[&Product]) -> Vec<ProductId> {
        products.iter().map(|product| product.id).collect()
    }

    /// Every stored product is filed exactly once, under its own category, and
    /// every bucket is non-empty.
    fn assert_index_consistent(catalog: &Catalog) {
        let filed: usize = catalog.categories.values().map(Vec::len).sum();
        assert_eq!(filed, catalog.products.len());
        for (category, bucket) in &catalog.categories {
            assert!(!bucket.is_empty(), "empty bucket for {category}");
            for id in bucket {
                let product = catalog.products.get(id).expect("filed id must be stored");
                assert_eq!(&product.category, category);
            }
        }
        for product in catalog.products.values() {
            let count = catalog
                .categories
                .values()
                .flatten()
                .filter(|id| **id == product.id)
                .count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn widget_scenario_clamps_stock() {
        let mut catalog = Catalog::new();
        let mut allocator = IdAllocator::new();
        let id = allocator.next_id();
        catalog.add(product(id, "Widget", "Tools", 9.99, 3));

        assert_eq!(id, 1001);
        assert_eq!(ids(&catalog.low_stock(5)), vec![1001]);

        let change = catalog.update_stock(1001, -5).unwrap();
        assert_eq!(change.before, 3);
        assert_eq!(change.after, 0);
        assert_eq!(catalog.find_by_id(1001).unwrap().quantity, 0);
    }

    #[test]
    fn removing_last_product_drops_bucket() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "Hammer", "Tools", 12.0, 4));
        catalog.add(product(1002, "Saw", "Tools", 20.0, 2));

        assert!(catalog.remove(1001).is_some());
        assert_eq!(ids(&catalog.by_category("Tools")), vec![1002]);

        assert!(catalog.remove(1002).is_some());
        assert!(catalog.by_category("Tools").is_empty());
        assert_eq!(catalog.category_count(), 0);
    }

    #[test]
    fn remove_unknown_id_reports_absence() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "Hammer", "Tools", 12.0, 4));
        assert_eq!(catalog.remove(4242), None);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn update_stock_unknown_id_is_not_found() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.update_stock(1001, 1), Err(CatalogError::NotFound(1001)));
    }

    #[test]
    fn find_by_name_is_case_insensitive_substring() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "Widget", "Tools", 9.99, 3));
        catalog.add(product(1002, "Gadget", "Tools", 5.0, 1));

        assert_eq!(ids(&catalog.find_by_name("wid")), vec![1001]);
        assert_eq!(ids(&catalog.find_by_name("DGET")), vec![1001, 1002]);
        assert!(catalog.find_by_name("sprocket").is_empty());
    }

    #[test]
    fn by_category_is_case_sensitive() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "Widget", "Tools", 9.99, 3));
        assert!(catalog.by_category("tools").is_empty());
        assert_eq!(catalog.by_category("Tools").len(), 1);
    }

    #[test]
    fn low_stock_ties_keep_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "A", "X", 1.0, 2));
        catalog.add(product(1002, "B", "Y", 1.0, 1));
        catalog.add(product(1003, "C", "X", 1.0, 2));
        catalog.add(product(1004, "D", "Z", 1.0, 9));

        assert_eq!(ids(&catalog.low_stock(2)), vec![1002, 1001, 1003]);
    }

    #[test]
    fn summary_lists_categories_in_order() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "Rake", "Garden", 10.0, 2));
        catalog.add(product(1002, "Saw", "Tools", 20.0, 1));
        catalog.add(product(1003, "Hose", "Garden", 5.0, 4));

        let summary = catalog.summary();
        assert_eq!(summary.product_count, 3);
        assert_eq!(summary.category_count, 2);
        assert_eq!(summary.total_value, 60.0);
        assert_eq!(
            summary.categories,
            vec![
                CategorySummary { category: "Garden".into(), product_count: 2, total_value: 40.0 },
                CategorySummary { category: "Tools".into(), product_count: 1, total_value: 20.0 },
            ]
        );
    }

    #[test]
    fn update_moves_product_between_buckets() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "Hose", "Tools", 5.0, 4));
        catalog.add(product(1002, "Rake", "Garden", 10.0, 2));

        let patch = ProductPatch {
            category: Some("Garden".into()),
            price: Some(6.5),
            ..ProductPatch::default()
        };
        let updated = catalog.update(1001, patch).unwrap();
        assert_eq!(updated.category, "Garden");
        assert_eq!(updated.price, 6.5);

        assert!(catalog.by_category("Tools").is_empty());
        assert_eq!(ids(&catalog.by_category("Garden")), vec![1002, 1001]);
        assert_index_consistent(&catalog);
    }

    #[test]
    fn update_keeps_bucket_position_when_category_unchanged() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "Hose", "Garden", 5.0, 4));
        catalog.add(product(1002, "Rake", "Garden", 10.0, 2));

        let patch = ProductPatch {
            name: Some("Garden Hose".into()),
            category: Some("Garden".into()),
            ..ProductPatch::default()
        };
        catalog.update(1001, patch).unwrap();
        assert_eq!(ids(&catalog.by_category("Garden")), vec![1001, 1002]);
        assert_eq!(catalog.find_by_id(1001).unwrap().name, "Garden Hose");
    }

    #[test]
    fn colliding_id_replaces_and_unfiles_previous_product() {
        let mut catalog = Catalog::new();
        catalog.add(product(1001, "Hose", "Garden", 5.0, 4));
        let displaced = catalog.add(product(1001, "Saw", "Tools", 20.0, 1));

        assert_eq!(displaced.map(|p| p.name), Some("Hose".to_string()));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.by_category("Garden").is_empty());
        assert_index_consistent(&catalog);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add { name: String, category: String, cents: u32, quantity: u32 },
        Remove(usize),
        Stock(usize, i64),
        Recategorize(usize, String),
    }

    fn category() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["Tools", "Garden", "Toys", "tools"]).prop_map(String::from)
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            ("[a-zA-Z]{1,8}", category(), 0u32..10_000, 0u32..50).prop_map(
                |(name, category, cents, quantity)| Op::Add { name, category, cents, quantity }
            ),
            (0usize..64).prop_map(Op::Remove),
            (0usize..64, -60i64..60).prop_map(|(slot, delta)| Op::Stock(slot, delta)),
            (0usize..64, category()).prop_map(|(slot, category)| Op::Recategorize(slot, category)),
        ]
    }

    /// Replays `ops` against a catalog fed from one allocator.
    fn build(ops: &[Op]) -> Catalog {
        let mut catalog = Catalog::new();
        let mut allocator = IdAllocator::new();
        for op in ops {
            let existing: Vec<ProductId> = catalog.products.keys().copied().collect();
            let pick = |slot: &usize| existing.get(slot % existing.len().max(1)).copied();
            match op {
                Op::Add { name, category, cents, quantity } => {
                    let id = allocator.next_id();
                    let price = f64::from(*cents) / 100.0;
                    assert!(catalog.add(product(id, name, category, price, *quantity)).is_none());
                }
                Op::Remove(slot) => {
                    if let Some(id) = pick(slot) {
                        catalog.remove(id);
                    }
                }
                Op::Stock(slot, delta) => {
                    if let Some(id) = pick(slot) {
                        catalog.update_stock(id, *delta).unwrap();
                    }
                }
                Op::Recategorize(slot, category) => {
                    if let Some(id) = pick(slot) {
                        let patch = ProductPatch { category: Some(category.clone()), ..ProductPatch::default() };
                        catalog.update(id, patch).unwrap();
                    }
                }
            }
        }
        catalog
    }

    proptest! {
        #[test]
        fn index_stays_consistent(ops in prop::collection::vec(op(), 0..40)) {
            let catalog = build(&ops);
            assert_index_consistent(&catalog);
        }

        #[test]
        fn add_then_remove_restores_state(
            ops in prop::collection::vec(op(), 0..30),
            bucket in category(),
            quantity in 0u32..50,
        ) {
            let mut catalog = build(&ops);
            let before = catalog.clone();
            let before_order = ids(&before.all());

            let id = 900_000;
            catalog.add(product(id, "Probe", &bucket, 1.0, quantity));
            prop_assert_eq!(catalog.find_by_id(id).map(|p| p.id), Some(id));
            prop_assert!(ids(&catalog.by_category(&bucket)).contains(&id));
            assert_index_consistent(&catalog);

            prop_assert!(catalog.remove(id).is_some());
            prop_assert!(catalog.find_by_id(id).is_none());
            prop_assert!(!ids(&catalog.by_category(&bucket)).contains(&id));
            prop_assert_eq!(ids(&catalog.all()), before_order);
            prop_assert_eq!(catalog, before);
        }

        #[test]
        fn stock_update_is_clamped_sum(quantity in 0u32..1000, delta in -2000i64..2000) {
            let mut catalog = Catalog::new();
            catalog.add(product(1001, "Widget", "Tools", 1.0, quantity));
            let change = catalog.update_stock(1001, delta).unwrap();
            let expected = (i64::from(quantity) + delta).max(0) as u32;
            prop_assert_eq!(change.before, quantity);
            prop_assert_eq!(change.after, expected);
        }

        #[test]
        fn total_value_matches_recomputation(ops in prop::collection::vec(op(), 0..40)) {
            let catalog = build(&ops);
            let recomputed: f64 = catalog
                .all()
                .iter()
                .map(|p| p.price * f64::from(p.quantity))
                .sum();
            prop_assert!((catalog.total_value() - recomputed).abs() < 1e-6);
        }

        #[test]
        fn low_stock_is_sorted_subset(ops in prop::collection::vec(op(), 0..40), threshold in 0u32..60) {
            let catalog = build(&ops);
            let low = catalog.low_stock(threshold);

            let expected = catalog.all().iter().filter(|p| p.quantity <= threshold).count();
            prop_assert_eq!(low.len(), expected);
            prop_assert!(low.iter().all(|p| p.quantity <= threshold));
            prop_assert!(low.windows(2).all(|pair| pair[0].quantity <= pair[1].quantity));
        }
    }
}
