use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::app_system::InventoryError;
use crate::catalog::{CatalogSummary, StockChange};
use crate::domain::{Product, ProductCreate, ProductId, ProductPatch};
use crate::messages::{CategoryListing, InventoryRequest};

/// Cloneable handle to the inventory service.
#[derive(Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    /// Asks the service to stop. No response is awaited.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), InventoryError> {
        debug!("Sending shutdown request");
        self.sender
            .send(InventoryRequest::Shutdown)
            .await
            .map_err(|e| InventoryError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(InventoryClient => fn create_product(product: ProductCreate) -> Product as InventoryRequest::CreateProduct, Error = InventoryError);
client_method!(InventoryClient => fn remove_product(id: ProductId) -> Product as InventoryRequest::RemoveProduct, Error = InventoryError);
client_method!(InventoryClient => fn update_stock(id: ProductId, delta: i64) -> StockChange as InventoryRequest::UpdateStock, Error = InventoryError);
client_method!(InventoryClient => fn update_product(id: ProductId, patch: ProductPatch) -> Product as InventoryRequest::UpdateProduct, Error = InventoryError);
client_method!(InventoryClient => fn get_product(id: ProductId) -> Option<Product> as InventoryRequest::GetProduct, Error = InventoryError);
client_method!(InventoryClient => fn search_by_name(query: String) -> Vec<Product> as InventoryRequest::SearchByName, Error = InventoryError);
client_method!(InventoryClient => fn list_products() -> Vec<Product> as InventoryRequest::ListProducts, Error = InventoryError);
client_method!(InventoryClient => fn list_by_category() -> Vec<CategoryListing> as InventoryRequest::ListByCategory, Error = InventoryError);
client_method!(InventoryClient => fn products_in_category(category: String) -> Vec<Product> as InventoryRequest::ProductsInCategory, Error = InventoryError);
client_method!(InventoryClient => fn low_stock(threshold: u32) -> Vec<Product> as InventoryRequest::LowStock, Error = InventoryError);
client_method!(InventoryClient => fn total_value() -> f64 as InventoryRequest::TotalValue, Error = InventoryError);
client_method!(InventoryClient => fn summary() -> CatalogSummary as InventoryRequest::Summary, Error = InventoryError);

#[cfg(test)]
client_method!(InventoryClient => fn get_category_count() -> usize as InventoryRequest::GetCategoryCount, Error = InventoryError);
