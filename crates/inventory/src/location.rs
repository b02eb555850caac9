use serde::{Deserialize, Serialize};

use stockledger_core::{AnalyticAccountId, AnalyticTagId, LocationId};

/// Location classification. Only `Internal` and `Transit` stock is on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationUsage {
    Supplier,
    View,
    Internal,
    Customer,
    Inventory,
    Production,
    Transit,
}

impl LocationUsage {
    /// Whether stock held at a location of this usage counts as on hand
    /// (and therefore takes part in a revaluation).
    pub fn is_on_hand(self) -> bool {
        matches!(self, LocationUsage::Internal | LocationUsage::Transit)
    }
}

/// Storage location with optional analytic defaults for quants created there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub usage: LocationUsage,
    /// Applied to new quants that carry no explicit analytic account.
    pub default_analytic_account_id: Option<AnalyticAccountId>,
    /// Applied to new quants that carry no explicit analytic tags.
    pub default_analytic_tag_ids: Vec<AnalyticTagId>,
}

impl Location {
    pub fn new(name: impl Into<String>, usage: LocationUsage) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            usage,
            default_analytic_account_id: None,
            default_analytic_tag_ids: Vec::new(),
        }
    }

    pub fn with_default_analytic_account(mut self, account: AnalyticAccountId) -> Self {
        self.default_analytic_account_id = Some(account);
        self
    }

    pub fn with_default_analytic_tags(mut self, tags: Vec<AnalyticTagId>) -> Self {
        self.default_analytic_tag_ids = tags;
        self
    }
}

/// Company-wide analytic defaults, used when neither the quant nor its
/// location specify anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticDefaults {
    pub analytic_account_id: Option<AnalyticAccountId>,
    pub analytic_tag_ids: Vec<AnalyticTagId>,
}
