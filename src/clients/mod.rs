//! Client handles for talking to the inventory service.

#[macro_use]
mod macros;
mod inventory_client;

pub use inventory_client::*;
