//! Per-operation context passed explicitly through journal-entry creation.

use serde::{Deserialize, Serialize};

/// Flags scoped to one logical operation (e.g. one product price update and
/// the journal entries it creates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationContext {
    /// Set when the next journal entry created in this operation must be
    /// split by the analytic accounts of the product's on-hand quants.
    pub revaluate_analytic: bool,
}

impl OperationContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Return a copy of `ctx` marked as requiring an analytic revaluation.
pub fn activate_on(ctx: &OperationContext) -> OperationContext {
    let mut next = *ctx;
    next.revaluate_analytic = true;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_on_sets_flag_without_touching_input() {
        let ctx = OperationContext::new();
        let active = activate_on(&ctx);
        assert!(active.revaluate_analytic);
        assert!(!ctx.revaluate_analytic);
    }

    #[test]
    fn activate_on_is_idempotent() {
        let once = activate_on(&OperationContext::new());
        assert_eq!(activate_on(&once), once);
    }
}
