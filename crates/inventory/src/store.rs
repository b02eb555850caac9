//! Quant lookup seam and an in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use stockledger_core::{DomainError, DomainResult, LocationId, ProductId};

use crate::location::{AnalyticDefaults, Location};
use crate::quant::{NewQuant, StockQuant};
use crate::quant_set::QuantSet;

/// Read-only access to on-hand stock, used by the revaluation allocator.
pub trait QuantSource {
    /// All quants of `product_id` held at internal or transit locations.
    fn find_on_hand_by_product(&self, product_id: ProductId) -> DomainResult<QuantSet>;
}

impl<T: QuantSource + ?Sized> QuantSource for &T {
    fn find_on_hand_by_product(&self, product_id: ProductId) -> DomainResult<QuantSet> {
        (**self).find_on_hand_by_product(product_id)
    }
}

/// In-memory quant + location store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryQuantStore {
    company: AnalyticDefaults,
    locations: RwLock<HashMap<LocationId, Location>>,
    quants: RwLock<Vec<StockQuant>>,
}

impl InMemoryQuantStore {
    pub fn new(company: AnalyticDefaults) -> Self {
        Self {
            company,
            ..Self::default()
        }
    }

    pub fn add_location(&self, location: Location) -> DomainResult<LocationId> {
        let id = location.id;
        self.locations
            .write()
            .map_err(|_| DomainError::invariant("location store lock poisoned"))?
            .insert(id, location);
        Ok(id)
    }

    /// Create a quant, filling in analytic defaults from its location and the
    /// company.
    pub fn create_quant(&self, new: NewQuant) -> DomainResult<StockQuant> {
        let quant = {
            let locations = self
                .locations
                .read()
                .map_err(|_| DomainError::invariant("location store lock poisoned"))?;
            let location = locations
                .get(&new.location_id)
                .ok_or_else(|| DomainError::not_found(format!("location {}", new.location_id)))?;
            new.into_quant(location, &self.company)
        };

        tracing::debug!(
            quant_id = %quant.id,
            product_id = %quant.product_id,
            analytic_account_id = ?quant.analytic_account_id,
            "quant created"
        );

        self.quants
            .write()
            .map_err(|_| DomainError::invariant("quant store lock poisoned"))?
            .push(quant.clone());
        Ok(quant)
    }
}

impl QuantSource for InMemoryQuantStore {
    fn find_on_hand_by_product(&self, product_id: ProductId) -> DomainResult<QuantSet> {
        let locations = self
            .locations
            .read()
            .map_err(|_| DomainError::invariant("location store lock poisoned"))?;
        let quants = self
            .quants
            .read()
            .map_err(|_| DomainError::invariant("quant store lock poisoned"))?;

        Ok(quants
            .iter()
            .filter(|q| q.product_id == product_id)
            .filter(|q| {
                locations
                    .get(&q.location_id)
                    .is_some_and(|l| l.usage.is_on_hand())
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationUsage;
    use rust_decimal_macros::dec;
    use stockledger_core::AnalyticAccountId;

    #[test]
    fn on_hand_query_skips_other_products_and_non_stock_locations() {
        let store = InMemoryQuantStore::default();
        let stock = store
            .add_location(Location::new("WH/Stock", LocationUsage::Internal))
            .unwrap();
        let transit = store
            .add_location(Location::new("Transit", LocationUsage::Transit))
            .unwrap();
        let customers = store
            .add_location(Location::new("Customers", LocationUsage::Customer))
            .unwrap();

        let product = ProductId::new();
        store.create_quant(NewQuant::new(product, stock, dec!(5))).unwrap();
        store.create_quant(NewQuant::new(product, transit, dec!(2))).unwrap();
        store.create_quant(NewQuant::new(product, customers, dec!(100))).unwrap();
        store
            .create_quant(NewQuant::new(ProductId::new(), stock, dec!(7)))
            .unwrap();

        let on_hand = store.find_on_hand_by_product(product).unwrap();
        assert_eq!(on_hand.len(), 2);
        assert_eq!(on_hand.total_quantity(), dec!(7));
    }

    #[test]
    fn create_quant_applies_location_default() {
        let account = AnalyticAccountId::new();
        let store = InMemoryQuantStore::new(AnalyticDefaults::default());
        let stock = store
            .add_location(
                Location::new("WH/Stock", LocationUsage::Internal)
                    .with_default_analytic_account(account),
            )
            .unwrap();

        let quant = store
            .create_quant(NewQuant::new(ProductId::new(), stock, dec!(1)))
            .unwrap();
        assert_eq!(quant.analytic_account_id, Some(account));
    }

    #[test]
    fn create_quant_rejects_unknown_location() {
        let store = InMemoryQuantStore::default();
        let err = store
            .create_quant(NewQuant::new(ProductId::new(), LocationId::new(), dec!(1)))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
