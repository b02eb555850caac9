//! Analytic split of inventory revaluation entries.
//!
//! A standard price change produces a journal entry with exactly one debit and
//! one credit line carrying the revalued amount, but no analytic account. The
//! allocator here rewrites that pair into one debit/credit pair per analytic
//! account found on the product's on-hand quants, weighted by quantity.
//! Quants without an account form their own "unset" group, emitted first.
//!
//! Factors and group values are rounded to a fixed precision. Any drift
//! between the rounded group values and the original total is pushed onto the
//! first debit line and the first credit line, so the entry still sums to the
//! original total. Groups whose share rounds to zero are dropped.

use rust_decimal::{Decimal, RoundingStrategy};

use stockledger_core::{AnalyticAccountId, DomainError, DomainResult, ProductId};
use stockledger_inventory::{QuantSet, QuantSource};

use crate::config::RevaluationConfig;
use crate::context::OperationContext;
use crate::journal::{LineCommand, LineItemTemplate, LineRole, MoveVals};

/// Hook used by journal-entry creation to split revaluation entries.
///
/// Hosts with different grouping rules provide their own implementation.
pub trait Revaluator {
    /// Whether entries created under `ctx` must be revalued.
    fn is_revaluation_required(&self, ctx: &OperationContext) -> bool;

    /// Rewrite `vals.line_ids` in place. Returns `true` if the lines changed.
    fn revaluate(&self, vals: &mut MoveVals) -> DomainResult<bool>;
}

/// Splits revaluation entries by the analytic accounts of on-hand quants.
#[derive(Debug, Clone)]
pub struct AnalyticQuantRevaluator<S> {
    source: S,
    config: RevaluationConfig,
}

impl<S: QuantSource> AnalyticQuantRevaluator<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, RevaluationConfig::default())
    }

    pub fn with_config(source: S, config: RevaluationConfig) -> Self {
        Self { source, config }
    }

    pub fn precision(&self) -> u32 {
        self.config.precision
    }

    /// Check the shape of a revaluation entry and return its product.
    ///
    /// Requires exactly two `Create` lines referencing the same product.
    pub fn check_lines(&self, lines: &[LineCommand]) -> DomainResult<ProductId> {
        let [first, second] = lines else {
            return Err(DomainError::validation(format!(
                "expected two lines, got {}",
                lines.len()
            )));
        };

        let (LineCommand::Create(first), LineCommand::Create(second)) = (first, second) else {
            return Err(DomainError::validation(format!(
                "expected create commands but found {} and {}",
                first.kind(),
                second.kind()
            )));
        };

        let product_id = first
            .product_id
            .ok_or_else(|| DomainError::validation("no product id found"))?;

        if second.product_id != Some(product_id) {
            return Err(DomainError::validation("product ids of the lines do not match"));
        }

        Ok(product_id)
    }

    /// Compute the analytic split for a two-line revaluation entry.
    ///
    /// Returns `Ok(None)` when the split would have no effect: no quant carries
    /// an analytic account, the on-hand quantity nets to zero, or every group
    /// share rounds to zero.
    pub fn compute_lines(&self, lines: &[LineCommand]) -> DomainResult<Option<Vec<LineCommand>>> {
        let product_id = self.check_lines(lines)?;

        let debit_line = line_by_role(lines, LineRole::Debit)?;
        let credit_line = line_by_role(lines, LineRole::Credit)?;
        let total_value = debit_line.debit;
        if total_value <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "revaluation total must be positive, got {total_value}"
            )));
        }

        let quants = self.source.find_on_hand_by_product(product_id)?;

        let accounts = quants.distinct_analytic_accounts();
        if accounts.is_empty() {
            tracing::debug!(%product_id, "no analytic accounts on quants; nothing to revaluate");
            return Ok(None);
        }

        let mut groups: Vec<Option<AnalyticAccountId>> = Vec::with_capacity(accounts.len() + 1);
        if quants.has_any_unset_analytic_account() {
            groups.push(None);
        }
        groups.extend(accounts.into_iter().map(Some));

        let total_quantity = quants.total_quantity();
        if total_quantity.is_zero() {
            tracing::warn!(%product_id, "on-hand quantity nets to zero; skipping analytic revaluation");
            return Ok(None);
        }

        let mut revaluated = Vec::with_capacity(groups.len() * 2);
        for account in groups {
            let factor = self.compute_factor(&quants, account, total_quantity)?;
            let group_value = self.compute_group_value(factor, total_value)?;
            if group_value.is_zero() {
                tracing::info!(
                    analytic_account_id = ?account,
                    %factor,
                    "excluding quants from revaluation since factor is too small"
                );
                continue;
            }

            let (debit, credit) = create_pair(debit_line, credit_line, account, group_value);
            revaluated.push(LineCommand::Create(debit));
            revaluated.push(LineCommand::Create(credit));
        }

        if revaluated.is_empty() {
            return Ok(None);
        }

        if self.correct_numeric_discrepancy(&mut revaluated, total_value)? {
            tracing::info!(%product_id, "performed numeric correction for analytic quant revaluation");
        }

        Ok(Some(revaluated))
    }

    fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.config.precision, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Share of `account`'s quantity in `total_quantity`, rounded.
    fn compute_factor(
        &self,
        quants: &QuantSet,
        account: Option<AnalyticAccountId>,
        total_quantity: Decimal,
    ) -> DomainResult<Decimal> {
        let group_quantity = quants.filter_by_analytic_account(account).total_quantity();
        let factor = group_quantity
            .checked_div(total_quantity)
            .ok_or_else(|| DomainError::invariant("revaluation factor out of range"))?;
        Ok(self.round(factor))
    }

    fn compute_group_value(&self, factor: Decimal, total_value: Decimal) -> DomainResult<Decimal> {
        let value = factor
            .checked_mul(total_value)
            .ok_or_else(|| DomainError::invariant("revaluation group value out of range"))?;
        Ok(self.round(value))
    }

    fn needs_numeric_correction(&self, total_computed: Decimal, expected: Decimal) -> bool {
        self.round(total_computed) != self.round(expected)
    }

    /// Push the rounding drift onto the first debit and first credit line.
    /// Returns whether a correction was applied.
    fn correct_numeric_discrepancy(
        &self,
        lines: &mut [LineCommand],
        expected: Decimal,
    ) -> DomainResult<bool> {
        let total_computed: Decimal = lines
            .iter()
            .filter_map(LineCommand::as_create)
            .map(|line| line.debit)
            .sum();

        if !self.needs_numeric_correction(total_computed, expected) {
            return Ok(false);
        }

        let difference = expected - total_computed;
        for role in [LineRole::Debit, LineRole::Credit] {
            let line = line_by_role_mut(lines, role)?;
            let amount = line.amount_mut(role);
            *amount = self.round(*amount + difference).abs();
        }

        tracing::debug!(%difference, %expected, %total_computed, "rounding drift corrected");
        Ok(true)
    }
}

impl<S: QuantSource> Revaluator for AnalyticQuantRevaluator<S> {
    fn is_revaluation_required(&self, ctx: &OperationContext) -> bool {
        ctx.revaluate_analytic
    }

    fn revaluate(&self, vals: &mut MoveVals) -> DomainResult<bool> {
        if vals.line_ids.len() != 2 {
            return Err(DomainError::validation(format!(
                "expected two lines, got {}",
                vals.line_ids.len()
            )));
        }

        match self.compute_lines(&vals.line_ids)? {
            Some(lines) => {
                tracing::debug!(
                    reference = %vals.reference,
                    pairs = lines.len() / 2,
                    "revaluation split by analytic account"
                );
                vals.line_ids = lines;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// First `Create` line with a nonzero amount on `role`.
pub fn line_by_role(lines: &[LineCommand], role: LineRole) -> DomainResult<&LineItemTemplate> {
    lines
        .iter()
        .filter_map(LineCommand::as_create)
        .find(|line| !line.amount(role).is_zero())
        .ok_or_else(|| missing_role(role))
}

fn line_by_role_mut(lines: &mut [LineCommand], role: LineRole) -> DomainResult<&mut LineItemTemplate> {
    lines
        .iter_mut()
        .filter_map(LineCommand::as_create_mut)
        .find(|line| !line.amount(role).is_zero())
        .ok_or_else(|| missing_role(role))
}

fn missing_role(role: LineRole) -> DomainError {
    DomainError::validation(format!("failed to find journal line of type '{role}'"))
}

/// Copy the templates into a debit/credit pair of `value` for `account`.
fn create_pair(
    template_debit: &LineItemTemplate,
    template_credit: &LineItemTemplate,
    account: Option<AnalyticAccountId>,
    value: Decimal,
) -> (LineItemTemplate, LineItemTemplate) {
    let value = value.abs();

    let mut debit = template_debit.clone();
    debit.debit = value;
    debit.credit = Decimal::ZERO;
    debit.analytic_account_id = account;

    let mut credit = template_credit.clone();
    credit.debit = Decimal::ZERO;
    credit.credit = value;
    credit.analytic_account_id = account;

    (debit, credit)
}
