use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::app_system::InventoryError;
use crate::catalog::{Catalog, CatalogSummary, IdAllocator, StockChange};
use crate::clients::InventoryClient;
use crate::domain::{Product, ProductCreate, ProductId, ProductPatch};
use crate::messages::{CategoryListing, InventoryRequest, ServiceResponse};

// =============================================================================
// INVENTORY SERVICE
// =============================================================================

/// Sole owner of the catalog and its id allocator.
///
/// Requests are handled one at a time off the mailbox, so the primary store and
/// the category index are always updated together, whatever number of clients
/// share the channel.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    catalog: Catalog,
    ids: IdAllocator,
}

impl InventoryService {
    pub fn new(buffer_size: usize) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            catalog: Catalog::new(),
            ids: IdAllocator::new(),
        };
        let client = InventoryClient::new(sender);
        (service, client)
    }

    #[instrument(name = "inventory_service", skip(self))]
    pub async fn run(mut self) {
        info!("InventoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::CreateProduct { product, respond_to } => {
                    self.handle_create_product(product, respond_to);
                }
                InventoryRequest::RemoveProduct { id, respond_to } => {
                    self.handle_remove_product(id, respond_to);
                }
                InventoryRequest::UpdateStock { id, delta, respond_to } => {
                    self.handle_update_stock(id, delta, respond_to);
                }
                InventoryRequest::UpdateProduct { id, patch, respond_to } => {
                    self.handle_update_product(id, patch, respond_to);
                }
                InventoryRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                InventoryRequest::SearchByName { query, respond_to } => {
                    self.handle_search_by_name(query, respond_to);
                }
                InventoryRequest::ListProducts { respond_to } => {
                    let products = owned(self.catalog.all());
                    let _ = respond_to.send(Ok(products));
                }
                InventoryRequest::ListByCategory { respond_to } => {
                    self.handle_list_by_category(respond_to);
                }
                InventoryRequest::ProductsInCategory { category, respond_to } => {
                    self.handle_products_in_category(category, respond_to);
                }
                InventoryRequest::LowStock { threshold, respond_to } => {
                    self.handle_low_stock(threshold, respond_to);
                }
                InventoryRequest::TotalValue { respond_to } => {
                    let _ = respond_to.send(Ok(self.catalog.total_value()));
                }
                InventoryRequest::Summary { respond_to } => {
                    self.handle_summary(respond_to);
                }
                InventoryRequest::Shutdown => {
                    info!("InventoryService shutting down");
                    break;
                }
                #[cfg(test)]
                InventoryRequest::GetCategoryCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.catalog.category_count()));
                }
            }
        }

        info!("InventoryService stopped");
    }

    #[instrument(fields(name = %payload.name, category = %payload.category), skip(self, payload, respond_to))]
    fn handle_create_product(&mut self, payload: ProductCreate, respond_to: ServiceResponse<Product, InventoryError>) {
        debug!("Processing create_product request");

        let id = self.ids.next_id();
        let product = Product::from_create(id, payload);
        self.catalog.add(product.clone());

        info!(product_id = id, "Product added");
        let _ = respond_to.send(Ok(product));
    }

    #[instrument(fields(product_id = id), skip(self, respond_to))]
    fn handle_remove_product(&mut self, id: ProductId, respond_to: ServiceResponse<Product, InventoryError>) {
        debug!("Processing remove_product request");

        let result = match self.catalog.remove(id) {
            Some(product) => {
                info!(category = %product.category, "Product removed");
                Ok(product)
            }
            None => {
                debug!("Product not found");
                Err(InventoryError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = id), skip(self, respond_to))]
    fn handle_update_stock(&mut self, id: ProductId, delta: i64, respond_to: ServiceResponse<StockChange, InventoryError>) {
        debug!("Processing update_stock request");

        let result = self.catalog.update_stock(id, delta).map_err(InventoryError::from);
        match &result {
            Ok(change) => info!(before = change.before, after = change.after, "Stock updated"),
            Err(_) => debug!("Product not found"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = id), skip(self, patch, respond_to))]
    fn handle_update_product(&mut self, id: ProductId, patch: ProductPatch, respond_to: ServiceResponse<Product, InventoryError>) {
        debug!(?patch, "Processing update_product request");

        let result = self
            .catalog
            .update(id, patch)
            .map(Product::clone)
            .map_err(InventoryError::from);
        match &result {
            Ok(product) => info!(category = %product.category, "Product updated"),
            Err(_) => debug!("Product not found"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = id), skip(self, respond_to))]
    fn handle_get_product(&self, id: ProductId, respond_to: ServiceResponse<Option<Product>, InventoryError>) {
        debug!("Processing get_product request");

        let product = self.catalog.find_by_id(id).cloned();
        match &product {
            Some(product) => debug!(name = %product.name, "Product found"),
            None => debug!("Product not found"),
        }

        let _ = respond_to.send(Ok(product));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_search_by_name(&self, query: String, respond_to: ServiceResponse<Vec<Product>, InventoryError>) {
        let matches = owned(self.catalog.find_by_name(&query));
        debug!(match_count = matches.len(), "Searched by name");
        let _ = respond_to.send(Ok(matches));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_by_category(&self, respond_to: ServiceResponse<Vec<CategoryListing>, InventoryError>) {
        let listing: Vec<CategoryListing> = self
            .catalog
            .grouped()
            .into_iter()
            .map(|(category, products)| (category.to_string(), owned(products)))
            .collect();
        debug!(category_count = listing.len(), "Listed categories");
        let _ = respond_to.send(Ok(listing));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_products_in_category(&self, category: String, respond_to: ServiceResponse<Vec<Product>, InventoryError>) {
        let products = owned(self.catalog.by_category(&category));
        debug!(product_count = products.len(), "Listed category");
        let _ = respond_to.send(Ok(products));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_low_stock(&self, threshold: u32, respond_to: ServiceResponse<Vec<Product>, InventoryError>) {
        let products = owned(self.catalog.low_stock(threshold));
        info!(low_count = products.len(), "Low stock report");
        let _ = respond_to.send(Ok(products));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_summary(&self, respond_to: ServiceResponse<CatalogSummary, InventoryError>) {
        let summary = self.catalog.summary();
        debug!(
            product_count = summary.product_count,
            category_count = summary.category_count,
            "Built summary"
        );
        let _ = respond_to.send(Ok(summary));
    }
}

fn owned(products: Vec<&Product>) -> Vec<Product> {
    products.into_iter().cloned().collect()
}
