use thiserror::Error;

use crate::catalog::CatalogError;
use crate::domain::ProductId;

/// Errors surfaced by the inventory client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CatalogError> for InventoryError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => InventoryError::NotFound(id),
        }
    }
}
