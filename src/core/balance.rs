//! Total inventory value
//!
//! The balance is a best-effort summary and never fails. It is computed by
//! the first tier that succeeds:
//!
//! 1. a single store-side aggregation,
//! 2. a row-by-row sum in process, skipping rows that cannot be coerced,
//! 3. zero.
//!
//! Every tier rounds its result to 2 decimal places.

use crate::core::service::BalanceSource;
use crate::core::validation::validators::round_price;
use serde::Serialize;
use std::sync::Arc;

/// Which tier produced a balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceTier {
    Aggregate,
    RowByRow,
    Fallback,
}

/// A computed balance and the tier it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    pub total: f64,
    pub tier: BalanceTier,
}

/// Computes the total inventory value over a [`BalanceSource`]
#[derive(Clone)]
pub struct BalanceCalculator {
    source: Arc<dyn BalanceSource>,
}

impl BalanceCalculator {
    pub fn new(source: Arc<dyn BalanceSource>) -> Self {
        Self { source }
    }

    /// Total inventory value, rounded to 2 decimal places
    pub async fn total_balance(&self) -> f64 {
        self.compute().await.total
    }

    /// Run the fallback chain and report which tier answered
    pub async fn compute(&self) -> Balance {
        match self.source.aggregate_total().await {
            Ok(total) if round_price(total).is_finite() => {
                return Balance {
                    total: round_price(total),
                    tier: BalanceTier::Aggregate,
                };
            }
            Ok(total) => {
                tracing::warn!(total, "aggregate balance is not a finite number, summing rows");
            }
            Err(e) => {
                tracing::warn!(error = %e, "aggregate balance query failed, summing rows");
            }
        }

        let lines = match self.source.stock_lines().await {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(error = %e, "row-by-row balance failed, reporting zero");
                return Balance {
                    total: 0.0,
                    tier: BalanceTier::Fallback,
                };
            }
        };

        let mut total = 0.0;
        let mut skipped = 0usize;
        for line in lines {
            match line {
                Ok(line) if line.value().is_finite() => total += line.value(),
                Ok(_) | Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "skipped malformed rows while summing balance");
        }

        let total = round_price(total);
        if !total.is_finite() {
            tracing::warn!(total, "row-by-row balance overflowed, reporting zero");
            return Balance {
                total: 0.0,
                tier: BalanceTier::Fallback,
            };
        }

        Balance {
            total,
            tier: BalanceTier::RowByRow,
        }
    }
}
