//! Decides when a product update must revalue its journal entry analytically.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::context::{OperationContext, activate_on};

/// Fields changed by a product update. `None` means unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWrite {
    pub name: Option<String>,
    pub list_price: Option<Decimal>,
    pub standard_price: Option<Decimal>,
}

impl ProductWrite {
    pub fn standard_price(price: Decimal) -> Self {
        Self {
            standard_price: Some(price),
            ..Self::default()
        }
    }

    pub fn touches_standard_price(&self) -> bool {
        self.standard_price.is_some()
    }
}

/// Context to run `write` under: activated when the standard price changes,
/// since that is what produces a stock revaluation entry.
pub fn context_for_product_write(ctx: &OperationContext, write: &ProductWrite) -> OperationContext {
    if write.touches_standard_price() {
        activate_on(ctx)
    } else {
        *ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn standard_price_change_activates_revaluation() {
        let ctx = context_for_product_write(
            &OperationContext::new(),
            &ProductWrite::standard_price(dec!(12.5)),
        );
        assert!(ctx.revaluate_analytic);
    }

    #[test]
    fn other_changes_leave_context_alone() {
        let write = ProductWrite {
            name: Some("Chair".to_string()),
            list_price: Some(dec!(99)),
            standard_price: None,
        };
        let ctx = context_for_product_write(&OperationContext::new(), &write);
        assert!(!ctx.revaluate_analytic);
    }
}
