//! Inventory domain module: locations, quants and the on-hand stock query
//! used to weight analytic revaluations.
//!
//! Pure domain logic plus an in-memory store for tests/dev.

pub mod location;
pub mod quant;
pub mod quant_set;
pub mod store;

pub use location::{AnalyticDefaults, Location, LocationUsage};
pub use quant::{InventoryMoveValues, NewQuant, StockQuant};
pub use quant_set::QuantSet;
pub use store::{InMemoryQuantStore, QuantSource};
