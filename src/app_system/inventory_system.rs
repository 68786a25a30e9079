use tracing::{error, info};

use crate::actors::InventoryService;
use crate::app_system::InventoryError;
use crate::clients::InventoryClient;
use crate::domain::ProductCreate;

/// Starts the inventory service and owns its task until shutdown.
pub struct InventorySystem {
    pub inventory_client: InventoryClient,
    handle: tokio::task::JoinHandle<()>,
}

impl InventorySystem {
    /// Spawns the service with a mailbox of `channel_capacity` requests.
    /// Must be called from within a tokio runtime.
    pub fn new(channel_capacity: usize) -> Self {
        let (service, inventory_client) = InventoryService::new(channel_capacity);
        let handle = tokio::spawn(service.run());

        Self {
            inventory_client,
            handle,
        }
    }

    /// Adds the demo products. Returns how many were added.
    pub async fn load_sample_data(&self) -> Result<usize, InventoryError> {
        let samples = sample_products();
        let count = samples.len();
        for product in samples {
            self.inventory_client.create_product(product).await?;
        }
        info!(count, "Loaded sample data");
        Ok(count)
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.inventory_client
            .shutdown()
            .await
            .map_err(|e| e.to_string())?;

        if let Err(e) = self.handle.await {
            error!("Inventory task failed: {:?}", e);
            return Err(format!("Inventory task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn sample_products() -> Vec<ProductCreate> {
    [
        ("Laptop", "Electronics", 999.99, 15, "TechCorp"),
        ("Wireless Mouse", "Electronics", 24.99, 4, "TechCorp"),
        ("Office Chair", "Furniture", 149.50, 8, "ComfortCo"),
        ("Standing Desk", "Furniture", 399.00, 2, "ComfortCo"),
        ("Notebook", "Stationery", 3.25, 120, "PaperWorks"),
    ]
    .into_iter()
    .map(|(name, category, price, quantity, supplier)| ProductCreate {
        name: name.to_string(),
        category: category.to_string(),
        price,
        quantity,
        supplier: supplier.to_string(),
    })
    .collect()
}
