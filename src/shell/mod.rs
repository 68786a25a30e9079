//! Interactive menu driver.
//!
//! Reads one answer per line and turns each menu action into calls on an
//! [`InventoryClient`]. Bad input and unknown ids are reported and the menu comes
//! back; only I/O failures or a dead service end the loop with an error.

mod input;
pub mod render;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::app_system::InventoryError;
use crate::clients::InventoryClient;
use crate::domain::{ProductCreate, ProductId, ProductPatch};

pub use input::*;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("end of input")]
    EndOfInput,
}

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    client: InventoryClient,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, client: InventoryClient) -> Self {
        Self {
            input,
            output,
            client,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu until the user picks Exit or input ends.
    pub async fn run(&mut self) -> Result<(), ShellError> {
        self.write("Welcome to Inventory Management System!\n").await?;

        loop {
            self.write(&render::menu()).await?;

            match self.dispatch().await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    self.write("\nThank you for using Inventory Management System!\nGoodbye!\n")
                        .await?;
                    return Ok(());
                }
                Err(ShellError::Input(e)) => {
                    debug!(error = %e, "Rejected input");
                    self.write(&format!("Invalid input! Please enter a valid number ({e}).\n"))
                        .await?;
                }
                Err(ShellError::Inventory(InventoryError::NotFound(id))) => {
                    debug!(product_id = id, "Product not found");
                    self.write(&format!("{}\n", render::NOT_FOUND)).await?;
                }
                Err(ShellError::EndOfInput) => {
                    info!("Input closed, leaving menu");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn dispatch(&mut self) -> Result<Flow, ShellError> {
        let choice = parse_count(&self.prompt("Enter your choice: ").await?)?;
        debug!(choice, "Menu choice");

        match choice {
            1 => self.add_product().await?,
            2 => self.remove_product().await?,
            3 => self.update_stock().await?,
            4 => self.search().await?,
            5 => {
                let products = self.client.list_products().await?;
                self.write(&render::inventory_list(&products)).await?;
            }
            6 => {
                let listing = self.client.list_by_category().await?;
                self.write(&render::category_listing(&listing)).await?;
            }
            7 => self.view_category().await?,
            8 => {
                let threshold = parse_count(&self.prompt("Enter low stock threshold: ").await?)?;
                let products = self.client.low_stock(threshold).await?;
                self.write(&render::low_stock_report(threshold, &products)).await?;
            }
            9 => {
                let summary = self.client.summary().await?;
                self.write(&render::summary_report(&summary)).await?;
            }
            10 => {
                let value = self.client.total_value().await?;
                self.write(&render::total_value(value)).await?;
            }
            11 => self.edit_product().await?,
            0 => return Ok(Flow::Exit),
            _ => self.write("Invalid choice! Please try again.\n").await?,
        }

        Ok(Flow::Continue)
    }

    async fn add_product(&mut self) -> Result<(), ShellError> {
        self.write("\n--- Add New Product ---\n").await?;

        let name = self.prompt("Enter product name: ").await?;
        let category = self.prompt("Enter category: ").await?;
        let price = parse_price(&self.prompt("Enter price: $").await?)?;
        let quantity = parse_count(&self.prompt("Enter quantity: ").await?)?;
        let supplier = self.prompt("Enter supplier: ").await?;

        let product = self
            .client
            .create_product(ProductCreate {
                name,
                category,
                price,
                quantity,
                supplier,
            })
            .await?;

        self.write(&format!("Product added successfully! (ID: {})\n", product.id))
            .await
    }

    async fn remove_product(&mut self) -> Result<(), ShellError> {
        let id = self.prompt_id("Enter Product ID to remove: ").await?;
        self.client.remove_product(id).await?;
        self.write("Product removed successfully!\n").await
    }

    async fn update_stock(&mut self) -> Result<(), ShellError> {
        self.write("\n--- Update Stock ---\n").await?;

        let id = self.prompt_id("Enter Product ID: ").await?;
        let product = self
            .client
            .get_product(id)
            .await?
            .ok_or(InventoryError::NotFound(id))?;

        self.write(&format!("Current stock for {}: {}\n", product.name, product.quantity))
            .await?;
        let delta = parse_delta(&self.prompt("Enter stock change (+/- amount): ").await?)?;

        let change = self.client.update_stock(id, delta).await?;
        self.write(&render::stock_change(&change)).await
    }

    async fn search(&mut self) -> Result<(), ShellError> {
        self.write("\n--- Search Products ---\n1. Search by ID\n2. Search by Name\n")
            .await?;

        match parse_count(&self.prompt("Choose option: ").await?)? {
            1 => {
                let id = self.prompt_id("Enter Product ID: ").await?;
                let product = self
                    .client
                    .get_product(id)
                    .await?
                    .ok_or(InventoryError::NotFound(id))?;
                self.write(&format!("\nProduct Found:\n{}", render::product_detail(&product)))
                    .await
            }
            2 => {
                let query = self.prompt("Enter product name (partial match): ").await?;
                let results = self.client.search_by_name(query).await?;
                if results.is_empty() {
                    self.write("No products found!\n").await
                } else {
                    self.write(&format!("\nSearch Results:\n{}", render::product_rows(&results)))
                        .await
                }
            }
            _ => self.write("Invalid choice!\n").await,
        }
    }

    async fn view_category(&mut self) -> Result<(), ShellError> {
        let category = self.prompt("Enter category name: ").await?;
        let products = self.client.products_in_category(category.clone()).await?;

        if products.is_empty() {
            self.write("No products found in this category!\n").await
        } else {
            self.write(&format!("\nProducts in {category}:\n{}", render::product_rows(&products)))
                .await
        }
    }

    async fn edit_product(&mut self) -> Result<(), ShellError> {
        self.write("\n--- Edit Product ---\n").await?;

        let id = self.prompt_id("Enter Product ID: ").await?;
        let product = self
            .client
            .get_product(id)
            .await?
            .ok_or(InventoryError::NotFound(id))?;
        self.write(&render::product_detail(&product)).await?;
        self.write("Leave a field blank to keep its current value.\n").await?;

        let name = non_blank(self.prompt("New name: ").await?);
        let category = non_blank(self.prompt("New category: ").await?);
        let price = match non_blank(self.prompt("New price: $").await?) {
            Some(raw) => Some(parse_price(&raw)?),
            None => None,
        };
        let supplier = non_blank(self.prompt("New supplier: ").await?);

        let patch = ProductPatch {
            name,
            category,
            price,
            supplier,
        };
        let updated = self.client.update_product(id, patch).await?;
        self.write(&format!("Product updated successfully!\n{updated}\n")).await
    }

    async fn prompt_id(&mut self, label: &str) -> Result<ProductId, ShellError> {
        Ok(parse_count(&self.prompt(label).await?)?)
    }

    /// Writes `label` and reads one line, without its line ending or surrounding blanks.
    async fn prompt(&mut self, label: &str) -> Result<String, ShellError> {
        self.write(label).await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    async fn write(&mut self, text: &str) -> Result<(), ShellError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

fn non_blank(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}
