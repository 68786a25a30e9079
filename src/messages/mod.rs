use tokio::sync::oneshot;

use crate::app_system::InventoryError;
use crate::catalog::{CatalogSummary, StockChange};
use crate::domain::{Product, ProductCreate, ProductId, ProductPatch};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// One category bucket as sent across the channel.
pub type CategoryListing = (String, Vec<Product>);

/// Typed messages for the inventory service. Each variant carries its parameters
/// and a oneshot channel for the response.
#[derive(Debug)]
pub enum InventoryRequest {
    CreateProduct {
        product: ProductCreate,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    RemoveProduct {
        id: ProductId,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    UpdateStock {
        id: ProductId,
        delta: i64,
        respond_to: ServiceResponse<StockChange, InventoryError>,
    },
    UpdateProduct {
        id: ProductId,
        patch: ProductPatch,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    GetProduct {
        id: ProductId,
        respond_to: ServiceResponse<Option<Product>, InventoryError>,
    },
    SearchByName {
        query: String,
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    ListByCategory {
        respond_to: ServiceResponse<Vec<CategoryListing>, InventoryError>,
    },
    ProductsInCategory {
        category: String,
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    LowStock {
        threshold: u32,
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    TotalValue {
        respond_to: ServiceResponse<f64, InventoryError>,
    },
    Summary {
        respond_to: ServiceResponse<CatalogSummary, InventoryError>,
    },
    Shutdown,
    #[cfg(test)]
    GetCategoryCount {
        respond_to: ServiceResponse<usize, InventoryError>,
    },
}
