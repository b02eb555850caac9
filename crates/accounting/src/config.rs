//! Revaluation settings.

use serde::{Deserialize, Serialize};

/// Environment variable overriding the rounding precision.
pub const PRECISION_ENV: &str = "STOCKLEDGER_REVALUATION_PRECISION";

/// Number of decimal places factors and group values are rounded to.
pub const DEFAULT_PRECISION: u32 = 4;

/// Largest scale `rust_decimal` can represent.
const MAX_PRECISION: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevaluationConfig {
    pub precision: u32,
}

impl Default for RevaluationConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl RevaluationConfig {
    /// Read the config from the process environment, falling back to the
    /// defaults (with a warning) on bad input.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(PRECISION_ENV).ok().as_deref())
    }

    fn from_value(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        match raw.trim().parse::<u32>() {
            Ok(precision) if precision <= MAX_PRECISION => Self { precision },
            _ => {
                tracing::warn!(
                    value = raw,
                    default = DEFAULT_PRECISION,
                    "{PRECISION_ENV} is not a valid precision; using default"
                );
                Self::default()
            }
        }
    }
}
