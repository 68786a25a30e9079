use thiserror::Error;

use crate::domain::ProductId;

/// Errors reported by catalog mutations. Lookups report absence with `Option` instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
}
