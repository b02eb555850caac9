//! Accounting module: journal-entry values and the analytic split of
//! inventory revaluation entries.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod config;
pub mod context;
pub mod entry;
pub mod journal;
pub mod revaluation;
pub mod trigger;

pub use config::RevaluationConfig;
pub use context::{OperationContext, activate_on};
pub use entry::JournalEntryHook;
pub use journal::{LineCommand, LineItemTemplate, LineRole, MoveVals};
pub use revaluation::{AnalyticQuantRevaluator, Revaluator, line_by_role};
pub use trigger::{ProductWrite, context_for_product_write};
