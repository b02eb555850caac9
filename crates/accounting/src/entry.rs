//! Journal-entry creation with analytic revaluation applied on demand.

use stockledger_core::DomainResult;

use crate::context::OperationContext;
use crate::journal::MoveVals;
use crate::revaluation::Revaluator;

/// Finalizes journal-entry values before they are handed to the ledger.
#[derive(Debug, Clone)]
pub struct JournalEntryHook<R> {
    revaluator: R,
}

impl<R: Revaluator> JournalEntryHook<R> {
    pub fn new(revaluator: R) -> Self {
        Self { revaluator }
    }

    pub fn revaluator(&self) -> &R {
        &self.revaluator
    }

    /// Run the revaluator if `ctx` asks for it, then check the entry balances.
    pub fn create(&self, ctx: &OperationContext, mut vals: MoveVals) -> DomainResult<MoveVals> {
        if self.revaluator.is_revaluation_required(ctx) {
            let changed = self.revaluator.revaluate(&mut vals)?;
            tracing::debug!(reference = %vals.reference, changed, "analytic revaluation checked");
        }

        vals.ensure_balanced()?;
        Ok(vals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::activate_on;
    use crate::journal::{LineCommand, LineItemTemplate};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::cell::Cell;
    use stockledger_core::DomainError;

    /// Records calls and appends nothing.
    #[derive(Default)]
    struct CountingRevaluator {
        calls: Cell<u32>,
    }

    impl Revaluator for CountingRevaluator {
        fn is_revaluation_required(&self, ctx: &OperationContext) -> bool {
            ctx.revaluate_analytic
        }

        fn revaluate(&self, _vals: &mut MoveVals) -> DomainResult<bool> {
            self.calls.set(self.calls.get() + 1);
            Ok(false)
        }
    }

    fn vals(debit: rust_decimal::Decimal, credit: rust_decimal::Decimal) -> MoveVals {
        MoveVals::new(
            "REVAL/010",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            vec![
                LineCommand::Create(LineItemTemplate::debit("Stock", "1400", debit)),
                LineCommand::Create(LineItemTemplate::credit("Diff", "5400", credit)),
            ],
        )
    }

    #[test]
    fn revaluator_runs_only_when_flagged() {
        let hook = JournalEntryHook::new(CountingRevaluator::default());

        hook.create(&OperationContext::new(), vals(dec!(5), dec!(5))).unwrap();
        assert_eq!(hook.revaluator().calls.get(), 0);

        hook.create(&activate_on(&OperationContext::new()), vals(dec!(5), dec!(5)))
            .unwrap();
        assert_eq!(hook.revaluator().calls.get(), 1);
    }

    #[test]
    fn unbalanced_entry_fails() {
        let hook = JournalEntryHook::new(CountingRevaluator::default());
        let err = hook
            .create(&OperationContext::new(), vals(dec!(5), dec!(4)))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}
