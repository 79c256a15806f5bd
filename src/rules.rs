// 📏 Eligibility Rules - Who and what may be sampled for a row
//
// Rules narrow the candidate pools before a uniform pick:
// - expensive treatments need a doctor (both generators)
// - time-windowed scenario anomalies remove a product or a staff member
//
// A rule never leaves a required pool empty: when a restriction would strand
// the pick, the unrestricted pool is used instead.

use crate::catalog::{Branch, Product, StaffMember};
use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// MONTH WINDOW
// ============================================================================

/// Inclusive range of calendar months (1 = January)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub first: u32,
    pub last: u32,
}

impl MonthWindow {
    pub fn new(first: u32, last: u32) -> Result<Self> {
        let window = MonthWindow { first, last };
        window.validate()?;
        Ok(window)
    }

    /// Fields are public, so windows built as literals are checked here
    pub fn validate(&self) -> Result<()> {
        let months = 1..=12;
        if !months.contains(&self.first) || !months.contains(&self.last) || self.first > self.last {
            bail!("Invalid month window {}..={}", self.first, self.last);
        }
        Ok(())
    }

    /// Window from `first` through December
    pub fn from_month(first: u32) -> Result<Self> {
        Self::new(first, 12)
    }

    pub fn contains_month(&self, month: u32) -> bool {
        month >= self.first && month <= self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.contains_month(date.month())
    }
}

// ============================================================================
// STAFF RULE
// ============================================================================

/// Staff allowed to attend a sale of `product`.
///
/// Expensive treatments are restricted to doctors. If `pool` holds no doctor,
/// the whole pool is returned unchanged.
pub fn staff_for_product<'a>(pool: &[&'a StaffMember], product: &Product) -> Vec<&'a StaffMember> {
    if product.is_expensive_treatment() {
        let doctors: Vec<&StaffMember> = pool.iter().copied().filter(|s| s.is_doctor()).collect();
        if !doctors.is_empty() {
            return doctors;
        }
    }
    pool.to_vec()
}

// ============================================================================
// SCENARIO ANOMALIES
// ============================================================================

/// A product that mostly disappears from sale during a window.
///
/// On each draw inside the window the product is withheld with probability
/// `removal_probability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyDisruption {
    pub product_code: String,
    pub window: MonthWindow,
    pub removal_probability: f64,
}

impl SupplyDisruption {
    /// Candidates for this draw. `withhold` is the outcome of the caller's
    /// Bernoulli trial, taken only when the date is inside the window.
    ///
    /// Falls back to every product when the disrupted one is all there is.
    pub fn candidates<'a>(&self, products: &'a [Product], withhold: bool) -> Vec<&'a Product> {
        let available: Vec<&Product> = products
            .iter()
            .filter(|p| !(withhold && p.code == self.product_code))
            .collect();
        if available.is_empty() {
            return products.iter().collect();
        }
        available
    }
}

/// A staff member absent from one branch during a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingGap {
    pub branch_code: String,
    pub staff_id: String,
    pub window: MonthWindow,
}

impl StaffingGap {
    pub fn applies(&self, branch: &Branch, date: NaiveDate) -> bool {
        branch.code == self.branch_code && self.window.contains(date)
    }

    /// Staff available at `branch` on `date`.
    ///
    /// Falls back to the full roster when the absent member is the only one.
    pub fn candidates<'a>(
        &self,
        staff: &'a [StaffMember],
        branch: &Branch,
        date: NaiveDate,
    ) -> Vec<&'a StaffMember> {
        let absent = self.applies(branch, date);
        let on_shift: Vec<&StaffMember> = staff
            .iter()
            .filter(|s| !(absent && s.id == self.staff_id))
            .collect();
        if on_shift.is_empty() {
            return staff.iter().collect();
        }
        on_shift
    }
}

// ============================================================================
// TESTS
// ============================================================================
