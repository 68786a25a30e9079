use crate::domain::ProductId;

/// First id handed out by a fresh allocator.
pub const FIRST_PRODUCT_ID: ProductId = 1001;

/// Monotonic product id source.
///
/// The catalog never checks ids for uniqueness on insert; handing every `add`
/// an id from one allocator is what keeps them distinct.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: ProductId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(FIRST_PRODUCT_ID)
    }

    pub fn starting_at(first: ProductId) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> ProductId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
