//! # Mock Framework
//!
//! Utilities for testing code that talks to the inventory service without
//! spinning one up.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! mailbox, then the `expect_*` helpers to assert on each request and answer it.

use tokio::sync::mpsc;

use crate::app_system::InventoryError;
use crate::catalog::StockChange;
use crate::clients::InventoryClient;
use crate::domain::{Product, ProductCreate, ProductId};
use crate::messages::{InventoryRequest, ServiceResponse};

/// Creates a client whose requests land on the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (InventoryClient, mpsc::Receiver<InventoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (InventoryClient::new(sender), receiver)
}

/// Next message must be a CreateProduct request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductCreate, ServiceResponse<Product, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::CreateProduct { product, respond_to }) => Some((product, respond_to)),
        _ => None,
    }
}

/// Next message must be a GetProduct request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, ServiceResponse<Option<Product>, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be an UpdateStock request
pub async fn expect_update_stock(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, i64, ServiceResponse<StockChange, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::UpdateStock { id, delta, respond_to }) => Some((id, delta, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            let product = ProductCreate {
                name: "Widget".to_string(),
                category: "Tools".to_string(),
                price: 9.99,
                quantity: 3,
                supplier: "Acme".to_string(),
            };
            client.create_product(product).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Widget");
        let product = Product::from_create(1001, payload);
        responder.send(Ok(product.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(product));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move { client.get_product(1001).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 1001);
        drop(responder);

        let result = task.await.unwrap();
        assert!(matches!(result, Err(InventoryError::ActorCommunicationError(_))));
    }
}
