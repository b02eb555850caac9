use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{AnalyticAccountId, AnalyticTagId, LocationId, ProductId, QuantId};

use crate::location::{AnalyticDefaults, Location};

/// A quantity of one product held at one location, optionally attributed to
/// an analytic account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQuant {
    pub id: QuantId,
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub quantity: Decimal,
    pub analytic_account_id: Option<AnalyticAccountId>,
    pub analytic_tag_ids: Vec<AnalyticTagId>,
}

/// Request to create a quant. Analytic fields left empty are filled from the
/// location defaults, then from the company defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuant {
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub quantity: Decimal,
    pub analytic_account_id: Option<AnalyticAccountId>,
    pub analytic_tag_ids: Vec<AnalyticTagId>,
}

impl NewQuant {
    pub fn new(product_id: ProductId, location_id: LocationId, quantity: Decimal) -> Self {
        Self {
            product_id,
            location_id,
            quantity,
            analytic_account_id: None,
            analytic_tag_ids: Vec::new(),
        }
    }

    pub fn with_analytic_account(mut self, account: AnalyticAccountId) -> Self {
        self.analytic_account_id = Some(account);
        self
    }

    pub fn with_analytic_tags(mut self, tags: Vec<AnalyticTagId>) -> Self {
        self.analytic_tag_ids = tags;
        self
    }

    /// Build the quant, resolving the analytic account and the tags
    /// independently: explicit value, then location default, then company default.
    pub fn into_quant(self, location: &Location, company: &AnalyticDefaults) -> StockQuant {
        let analytic_account_id = self
            .analytic_account_id
            .or(location.default_analytic_account_id)
            .or(company.analytic_account_id);

        let analytic_tag_ids = if !self.analytic_tag_ids.is_empty() {
            self.analytic_tag_ids
        } else if !location.default_analytic_tag_ids.is_empty() {
            location.default_analytic_tag_ids.clone()
        } else {
            company.analytic_tag_ids.clone()
        };

        StockQuant {
            id: QuantId::new(),
            product_id: self.product_id,
            location_id: self.location_id,
            quantity: self.quantity,
            analytic_account_id,
            analytic_tag_ids,
        }
    }
}

/// Values for the stock move that books an inventory adjustment of a quant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMoveValues {
    pub product_id: ProductId,
    pub quantity: Decimal,
    pub location_id: LocationId,
    pub location_dest_id: LocationId,
    pub analytic_account_id: Option<AnalyticAccountId>,
    pub analytic_tag_ids: Vec<AnalyticTagId>,
}

impl StockQuant {
    /// Move values for adjusting this quant by `quantity` against the
    /// inventory-loss location `adjustment_location`.
    ///
    /// `out = true` moves stock out of the quant's location; otherwise stock
    /// moves in. The quant's analytic account and tags travel with the move.
    pub fn inventory_move_values(
        &self,
        quantity: Decimal,
        adjustment_location: LocationId,
        out: bool,
    ) -> InventoryMoveValues {
        let (location_id, location_dest_id) = if out {
            (self.location_id, adjustment_location)
        } else {
            (adjustment_location, self.location_id)
        };

        InventoryMoveValues {
            product_id: self.product_id,
            quantity,
            location_id,
            location_dest_id,
            analytic_account_id: self.analytic_account_id,
            analytic_tag_ids: self.analytic_tag_ids.clone(),
        }
    }
}
