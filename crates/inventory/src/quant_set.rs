//! Quantity-weighted partition of on-hand stock by analytic account.

use rust_decimal::Decimal;

use stockledger_core::AnalyticAccountId;

use crate::quant::StockQuant;

/// An ordered collection of quants, queried as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantSet {
    quants: Vec<StockQuant>,
}

impl QuantSet {
    pub fn new(quants: Vec<StockQuant>) -> Self {
        Self { quants }
    }

    pub fn is_empty(&self) -> bool {
        self.quants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quants.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockQuant> {
        self.quants.iter()
    }

    /// Analytic accounts referenced by the quants, without duplicates, in the
    /// order they are first seen.
    pub fn distinct_analytic_accounts(&self) -> Vec<AnalyticAccountId> {
        let mut accounts: Vec<AnalyticAccountId> = Vec::new();
        for account in self.quants.iter().filter_map(|q| q.analytic_account_id) {
            if !accounts.contains(&account) {
                accounts.push(account);
            }
        }
        accounts
    }

    /// `true` if at least one quant has no analytic account.
    pub fn has_any_unset_analytic_account(&self) -> bool {
        self.quants.iter().any(|q| q.analytic_account_id.is_none())
    }

    /// Quants whose analytic account equals `account`. `None` selects the
    /// quants without an analytic account.
    pub fn filter_by_analytic_account(&self, account: Option<AnalyticAccountId>) -> QuantSet {
        QuantSet::new(
            self.quants
                .iter()
                .filter(|q| q.analytic_account_id == account)
                .cloned()
                .collect(),
        )
    }

    /// Sum of the quantities. Zero for an empty set.
    pub fn total_quantity(&self) -> Decimal {
        self.quants.iter().map(|q| q.quantity).sum()
    }
}

impl FromIterator<StockQuant> for QuantSet {
    fn from_iter<I: IntoIterator<Item = StockQuant>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for QuantSet {
    type Item = StockQuant;
    type IntoIter = std::vec::IntoIter<StockQuant>;

    fn into_iter(self) -> Self::IntoIter {
        self.quants.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use stockledger_core::{LocationId, ProductId, QuantId};

    fn quant(quantity: Decimal, account: Option<AnalyticAccountId>) -> StockQuant {
        StockQuant {
            id: QuantId::new(),
            product_id: ProductId::new(),
            location_id: LocationId::new(),
            quantity,
            analytic_account_id: account,
            analytic_tag_ids: Vec::new(),
        }
    }

    #[test]
    fn empty_set_has_zero_quantity_and_no_accounts() {
        let set = QuantSet::default();
        assert_eq!(set.total_quantity(), Decimal::ZERO);
        assert!(set.distinct_analytic_accounts().is_empty());
        assert!(!set.has_any_unset_analytic_account());
    }

    #[test]
    fn distinct_accounts_keep_first_seen_order() {
        let a = AnalyticAccountId::new();
        let b = AnalyticAccountId::new();
        let set = QuantSet::new(vec![
            quant(dec!(1), Some(b)),
            quant(dec!(2), None),
            quant(dec!(3), Some(a)),
            quant(dec!(4), Some(b)),
        ]);

        assert_eq!(set.distinct_analytic_accounts(), vec![b, a]);
        assert!(set.has_any_unset_analytic_account());
    }

    #[test]
    fn filter_by_none_selects_unset_quants() {
        let a = AnalyticAccountId::new();
        let set = QuantSet::new(vec![
            quant(dec!(1.5), Some(a)),
            quant(dec!(2), None),
            quant(dec!(0.5), None),
        ]);

        assert_eq!(set.filter_by_analytic_account(None).total_quantity(), dec!(2.5));
        assert_eq!(set.filter_by_analytic_account(Some(a)).total_quantity(), dec!(1.5));
        assert!(set
            .filter_by_analytic_account(Some(AnalyticAccountId::new()))
            .is_empty());
    }

    proptest! {
        /// Filtering by every group (including "unset") partitions the set.
        #[test]
        fn groups_partition_total_quantity(
            entries in prop::collection::vec((1u32..10_000u32, 0usize..4usize), 0..20)
        ) {
            let accounts: Vec<AnalyticAccountId> = (0..3).map(|_| AnalyticAccountId::new()).collect();
            let set: QuantSet = entries
                .iter()
                .map(|(qty, slot)| quant(Decimal::from(*qty), accounts.get(*slot).copied()))
                .collect();

            let mut groups: Vec<Option<AnalyticAccountId>> =
                set.distinct_analytic_accounts().into_iter().map(Some).collect();
            if set.has_any_unset_analytic_account() {
                groups.push(None);
            }

            let grouped: Decimal = groups
                .into_iter()
                .map(|g| set.filter_by_analytic_account(g).total_quantity())
                .sum();
            prop_assert_eq!(grouped, set.total_quantity());
        }
    }
}
