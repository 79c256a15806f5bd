// 📊 Monthly Summary - Console eyeball check for generated tables
//
// Informational only: row count plus per-month transaction count and sales
// total, so the Q4 slump is visible at a glance after a run.

use crate::transaction::TransactionRow;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotals {
    pub transactions: usize,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_rows: usize,
    /// Keyed by `YYYY-MM`, so iteration is chronological
    pub months: BTreeMap<String, MonthTotals>,
}

impl MonthlySummary {
    pub fn from_rows(rows: &[TransactionRow]) -> Self {
        let mut months: BTreeMap<String, MonthTotals> = BTreeMap::new();

        for row in rows {
            let key = row.transaction_date.format("%Y-%m").to_string();
            let entry = months.entry(key).or_default();
            entry.transactions += 1;
            entry.total_sales += row.total_sales;
        }

        MonthlySummary {
            total_rows: rows.len(),
            months,
        }
    }

    pub fn total_sales(&self) -> i64 {
        self.months.values().map(|m| m.total_sales).sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows across {} months, total sales {}",
            self.total_rows,
            self.months.len(),
            self.total_sales()
        )
    }

    /// One line per month, for the console
    pub fn lines(&self) -> Vec<String> {
        self.months
            .iter()
            .map(|(month, totals)| {
                format!(
                    "{}  {:>6} trx  {:>15}",
                    month, totals.transactions, totals.total_sales
                )
            })
            .collect()
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to encode summary")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
