use std::fmt;

/// Catalog-assigned product identifier.
pub type ProductId = u32;

/// Represents a product in the inventory.
///
/// `id` is assigned by the catalog's allocator and never changes afterwards.
/// The total value of a product is always derived from `price` and `quantity`,
/// see [`Product::total_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
    pub supplier: String,
}

/// Payload for creating a new product. The id is allocated by the inventory service.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
    pub supplier: String,
}

/// Payload for editing an existing product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub supplier: Option<String>,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u32,
        supplier: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
            supplier: supplier.into(),
        }
    }

    /// Builds the product for a freshly allocated id.
    pub fn from_create(id: ProductId, payload: ProductCreate) -> Self {
        Self::new(
            id,
            payload.name,
            payload.category,
            payload.price,
            payload.quantity,
            payload.supplier,
        )
    }

    /// Applies a signed stock change, clamping at zero.
    ///
    /// Returns the quantity before the change.
    pub fn adjust_stock(&mut self, delta: i64) -> u32 {
        let before = self.quantity;
        let after = i64::from(before).saturating_add(delta).clamp(0, i64::from(u32::MAX));
        self.quantity = after as u32;
        before
    }

    pub fn total_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity <= threshold
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {:<20} | Category: {:<15} | Price: ${:.2} | Quantity: {} | Supplier: {}",
            self.id, self.name, self.category, self.price, self.quantity, self.supplier
        )
    }
}
