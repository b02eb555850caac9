use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{AnalyticAccountId, AnalyticTagId, DomainError, DomainResult, LineId, ProductId};

/// Side of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    Debit,
    Credit,
}

impl core::fmt::Display for LineRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LineRole::Debit => f.write_str("debit"),
            LineRole::Credit => f.write_str("credit"),
        }
    }
}

/// One journal line as passed to journal-entry creation.
///
/// A well-formed line has exactly one of `debit`/`credit` positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemTemplate {
    pub name: String,
    pub account_code: String, // e.g. "1400"
    pub product_id: Option<ProductId>,
    pub quantity: Decimal,
    pub debit: Decimal,
    pub credit: Decimal,
    pub analytic_account_id: Option<AnalyticAccountId>,
    pub analytic_tag_ids: Vec<AnalyticTagId>,
}

impl LineItemTemplate {
    pub fn debit(name: impl Into<String>, account_code: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amounts(name, account_code, amount, Decimal::ZERO)
    }

    pub fn credit(name: impl Into<String>, account_code: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amounts(name, account_code, Decimal::ZERO, amount)
    }

    fn with_amounts(
        name: impl Into<String>,
        account_code: impl Into<String>,
        debit: Decimal,
        credit: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            account_code: account_code.into(),
            product_id: None,
            quantity: Decimal::ZERO,
            debit,
            credit,
            analytic_account_id: None,
            analytic_tag_ids: Vec::new(),
        }
    }

    pub fn for_product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_analytic_tags(mut self, tags: Vec<AnalyticTagId>) -> Self {
        self.analytic_tag_ids = tags;
        self
    }

    pub fn amount(&self, role: LineRole) -> Decimal {
        match role {
            LineRole::Debit => self.debit,
            LineRole::Credit => self.credit,
        }
    }

    pub fn amount_mut(&mut self, role: LineRole) -> &mut Decimal {
        match role {
            LineRole::Debit => &mut self.debit,
            LineRole::Credit => &mut self.credit,
        }
    }
}

/// Operation on a journal entry's lines.
///
/// Revaluation only ever rewrites `Create` commands; the other variants exist
/// so hosts can pass whatever they received and get a clear rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum LineCommand {
    Create(LineItemTemplate),
    Update { id: LineId, values: LineItemTemplate },
    Delete { id: LineId },
    Link { id: LineId },
}

impl LineCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            LineCommand::Create(_) => "create",
            LineCommand::Update { .. } => "update",
            LineCommand::Delete { .. } => "delete",
            LineCommand::Link { .. } => "link",
        }
    }

    /// Line values of a `Create` command.
    pub fn as_create(&self) -> Option<&LineItemTemplate> {
        match self {
            LineCommand::Create(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_create_mut(&mut self) -> Option<&mut LineItemTemplate> {
        match self {
            LineCommand::Create(line) => Some(line),
            _ => None,
        }
    }
}

/// Values for creating one journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveVals {
    pub reference: String,
    pub date: NaiveDate,
    pub line_ids: Vec<LineCommand>,
}

impl MoveVals {
    pub fn new(reference: impl Into<String>, date: NaiveDate, line_ids: Vec<LineCommand>) -> Self {
        Self {
            reference: reference.into(),
            date,
            line_ids,
        }
    }

    /// Sum of `role` amounts over the `Create` lines.
    pub fn total(&self, role: LineRole) -> Decimal {
        self.line_ids
            .iter()
            .filter_map(LineCommand::as_create)
            .map(|line| line.amount(role))
            .sum()
    }

    /// Ensure the created lines form a balanced double entry.
    pub fn ensure_balanced(&self) -> DomainResult<()> {
        if self.line_ids.is_empty() {
            return Err(DomainError::validation("journal entry must have lines"));
        }

        for line in self.line_ids.iter().filter_map(LineCommand::as_create) {
            if line.debit.is_sign_negative() || line.credit.is_sign_negative() {
                return Err(DomainError::validation("amounts cannot be negative"));
            }
        }

        let debit_total = self.total(LineRole::Debit);
        let credit_total = self.total(LineRole::Credit);
        if debit_total != credit_total {
            return Err(DomainError::invariant(format!(
                "debits must equal credits (debit: {debit_total}, credit: {credit_total})"
            )));
        }
        Ok(())
    }
}
