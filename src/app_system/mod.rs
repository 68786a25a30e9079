//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod inventory_system;
pub mod telemetry;

pub use error::*;
pub use inventory_system::*;
pub use telemetry::*;
