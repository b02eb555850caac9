//! `stockledger-core`: shared domain building blocks.
//!
//! Error model and strongly-typed identifiers. No infrastructure concerns.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{AnalyticAccountId, AnalyticTagId, LineId, LocationId, ProductId, QuantId};
