// 🎰 Uniform Generator - N independent rows over a date range
//
// Every row is drawn independently from the catalog. Dates are scattered
// uniformly over the range (no daily clustering), then the whole batch is
// stable-sorted by transaction date.

use crate::catalog::{Catalog, StaffMember};
use crate::rules::staff_for_product;
use crate::sampling::{chance, pick, random_day, WeightedChoice};
use crate::transaction::{customer_id, CustomerDraw, Gender, TransactionRow};
use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

pub const DEFAULT_ROWS: usize = 5000;
/// Upper bound on a single run; rows are held in memory until written
pub const MAX_ROWS: usize = 10_000_000;

/// Customer ids are drawn from CUST1000..=CUST9999
const CUSTOMER_ID_RANGE: std::ops::RangeInclusive<u32> = 1000..=9999;

const AGE_MEAN: f64 = 30.0;
const AGE_STD_DEV: f64 = 8.0;
const AGE_MIN: i32 = 15;
const AGE_MAX: i32 = 70;

const NEW_CUSTOMER_PROBABILITY: f64 = 0.3;
const NEW_CUSTOMER_DAYS: std::ops::RangeInclusive<i64> = 0..=30;
const RETURNING_CUSTOMER_DAYS: std::ops::RangeInclusive<i64> = 60..=1000;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct UniformConfig {
    /// Exact number of rows to produce
    pub rows: usize,
    /// First transaction day (inclusive)
    pub start: NaiveDate,
    /// Last transaction day (inclusive)
    pub end: NaiveDate,
}

impl Default for UniformConfig {
    fn default() -> Self {
        UniformConfig {
            rows: DEFAULT_ROWS,
            start: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid date"),
        }
    }
}

impl UniformConfig {
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows > MAX_ROWS {
            bail!("Row count {} exceeds the limit of {}", self.rows, MAX_ROWS);
        }
        if self.start > self.end {
            bail!(
                "Date range is inverted: start {} is after end {}",
                self.start,
                self.end
            );
        }
        Ok(())
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

pub struct UniformGenerator<'a> {
    catalog: &'a Catalog,
    config: UniformConfig,
    /// Quantity 1 is three times as likely as 2
    quantity: WeightedChoice<u32>,
    /// Skincare clientele is mostly female (3:1)
    gender: WeightedChoice<Gender>,
    age: Normal<f64>,
}

impl<'a> UniformGenerator<'a> {
    pub fn new(catalog: &'a Catalog, config: UniformConfig) -> Result<Self> {
        config.validate()?;

        Ok(UniformGenerator {
            catalog,
            config,
            quantity: WeightedChoice::new(vec![(1, 3), (2, 1)])?,
            gender: WeightedChoice::new(vec![(Gender::F, 3), (Gender::M, 1)])?,
            age: Normal::new(AGE_MEAN, AGE_STD_DEV).context("Invalid age distribution")?,
        })
    }

    /// Produce exactly `config.rows` rows, sorted by transaction date.
    ///
    /// Ties keep their generation order (stable sort).
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<TransactionRow>> {
        info!(
            "Generating {} uniform rows between {} and {}",
            self.config.rows, self.config.start, self.config.end
        );

        let mut rows = Vec::with_capacity(self.config.rows);
        for _ in 0..self.config.rows {
            rows.push(self.generate_row(rng)?);
        }

        rows.sort_by_key(|row| row.transaction_date);

        debug!("Sorted {} rows by transaction date", rows.len());
        Ok(rows)
    }

    fn generate_row<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TransactionRow> {
        let branch = pick(rng, self.catalog.branches()).context("Catalog has no branches")?;
        let product = pick(rng, self.catalog.products()).context("Catalog has no products")?;
        let quantity = *self.quantity.sample(rng);

        let pool: Vec<&StaffMember> = self.catalog.staff().iter().collect();
        let eligible = staff_for_product(&pool, product);
        let staff = *pick(rng, &eligible).context("Catalog has no staff")?;

        let payment = pick(rng, self.catalog.payments()).context("Catalog has no payment methods")?;

        let customer_id = customer_id(rng.gen_range(CUSTOMER_ID_RANGE));
        let gender = *self.gender.sample(rng);
        let age = (self.age.sample(rng) as i32).clamp(AGE_MIN, AGE_MAX);

        let transaction_date = random_day(rng, self.config.start, self.config.end);

        let days_before = if chance(rng, NEW_CUSTOMER_PROBABILITY) {
            rng.gen_range(NEW_CUSTOMER_DAYS)
        } else {
            rng.gen_range(RETURNING_CUSTOMER_DAYS)
        };
        let registration_date = transaction_date - Duration::days(days_before);

        let customer = CustomerDraw {
            customer_id,
            gender,
            age,
            registration_date,
        };

        Ok(TransactionRow::new(
            transaction_date,
            branch,
            customer,
            product,
            quantity,
            payment.payment_type,
            &payment.name,
            staff,
        ))
    }
}

// ============================================================================
// TESTS
// ============================================================================
