// 📉 Scenario Generator - A calendar year with planted anomalies
//
// Walks every day of the year in order and draws a day-specific volume.
// Three patterns are planted for downstream analysis to find:
// 1. Demand slump: Q4 days draw a lower transaction volume
// 2. Supply disruption: the laser product mostly vanishes from Nov
// 3. Staffing gap: the top doctor leaves the flagship branch from Sep
//
// Known quirks kept on purpose: ages are not clamped, and the payment name is
// drawn independently of the Cashless/Cash type.

use crate::catalog::{Catalog, PaymentType};
use crate::rules::{staff_for_product, MonthWindow, StaffingGap, SupplyDisruption};
use crate::sampling::{chance, pick, WeightedChoice};
use crate::transaction::{customer_id, CustomerDraw, Gender, TransactionRow};
use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::ops::RangeInclusive;
use tracing::{debug, info};

pub const FLAGSHIP_BRANCH: &str = "CH001";
pub const TOP_DOCTOR: &str = "DR001";
pub const LASER_PRODUCT: &str = "TRT002";
pub const SCENARIO_YEAR: i32 = 2023;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub year: i32,

    /// Daily volume outside the slump window
    pub normal_volume: RangeInclusive<usize>,
    /// Daily volume inside the slump window
    pub slump_volume: RangeInclusive<usize>,
    pub slump_window: MonthWindow,

    pub supply_disruption: SupplyDisruption,
    pub staffing_gap: StaffingGap,

    /// Repeat customers come from a small id pool
    pub customer_ids: RangeInclusive<u32>,
    pub new_customer_probability: f64,
    /// Days between registration and purchase for returning customers
    pub returning_customer_days: RangeInclusive<i64>,

    pub cashless_probability: f64,

    pub age_mean: f64,
    pub age_std_dev: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            year: SCENARIO_YEAR,
            normal_volume: 20..=35,
            slump_volume: 10..=15,
            slump_window: MonthWindow { first: 10, last: 12 },
            supply_disruption: SupplyDisruption {
                product_code: LASER_PRODUCT.to_string(),
                window: MonthWindow { first: 11, last: 12 },
                removal_probability: 0.9,
            },
            staffing_gap: StaffingGap {
                branch_code: FLAGSHIP_BRANCH.to_string(),
                staff_id: TOP_DOCTOR.to_string(),
                window: MonthWindow { first: 9, last: 12 },
            },
            customer_ids: 1000..=2999,
            new_customer_probability: 0.2,
            returning_customer_days: 30..=800,
            cashless_probability: 0.7,
            age_mean: 32.0,
            age_std_dev: 7.0,
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<()> {
        if self.normal_volume.is_empty() || self.slump_volume.is_empty() {
            bail!("Daily volume ranges must not be empty");
        }
        if self.customer_ids.is_empty() || self.returning_customer_days.is_empty() {
            bail!("Customer id and tenure ranges must not be empty");
        }
        if *self.returning_customer_days.start() < 0 {
            bail!("Registration can not be after the transaction date");
        }
        self.slump_window.validate().context("slump_window")?;
        self.supply_disruption
            .window
            .validate()
            .context("supply_disruption.window")?;
        self.staffing_gap.window.validate().context("staffing_gap.window")?;
        for (name, p) in [
            ("removal_probability", self.supply_disruption.removal_probability),
            ("new_customer_probability", self.new_customer_probability),
            ("cashless_probability", self.cashless_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("{} must be within [0, 1], got {}", name, p);
            }
        }
        Ok(())
    }

    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 1, 1)
            .with_context(|| format!("Year {} is out of range", self.year))
    }

    pub fn last_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 12, 31)
            .with_context(|| format!("Year {} is out of range", self.year))
    }

    /// Volume band that applies on `date`
    pub fn volume_for(&self, date: NaiveDate) -> RangeInclusive<usize> {
        if self.slump_window.contains(date) {
            self.slump_volume.clone()
        } else {
            self.normal_volume.clone()
        }
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

pub struct ScenarioGenerator<'a> {
    catalog: &'a Catalog,
    config: ScenarioConfig,
    quantity: WeightedChoice<u32>,
    gender: WeightedChoice<Gender>,
    age: Normal<f64>,
}

impl<'a> ScenarioGenerator<'a> {
    pub fn new(catalog: &'a Catalog, config: ScenarioConfig) -> Result<Self> {
        config.validate()?;
        let age = Normal::new(config.age_mean, config.age_std_dev)
            .context("Invalid age distribution")?;

        Ok(ScenarioGenerator {
            catalog,
            config,
            quantity: WeightedChoice::new(vec![(1, 80), (2, 15), (3, 5)])?,
            gender: WeightedChoice::new(vec![(Gender::F, 85), (Gender::M, 15)])?,
            age,
        })
    }

    /// Generate the whole year, already in chronological order
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<TransactionRow>> {
        let first = self.config.first_day()?;
        let last = self.config.last_day()?;

        info!("Generating scenario year {} ({} to {})", self.config.year, first, last);

        let mut rows = Vec::new();
        for day in first.iter_days().take_while(|d| *d <= last) {
            let volume = rng.gen_range(self.config.volume_for(day));
            debug!("{}: {} transactions", day, volume);

            for _ in 0..volume {
                rows.push(self.generate_row(rng, day)?);
            }
        }

        info!("Scenario produced {} rows", rows.len());
        Ok(rows)
    }

    fn generate_row<R: Rng + ?Sized>(&self, rng: &mut R, day: NaiveDate) -> Result<TransactionRow> {
        let branch = pick(rng, self.catalog.branches()).context("Catalog has no branches")?;

        // Supply disruption: roll only inside the window
        let disruption = &self.config.supply_disruption;
        let withhold =
            disruption.window.contains(day) && chance(rng, disruption.removal_probability);
        let products = disruption.candidates(self.catalog.products(), withhold);
        let product = *pick(rng, &products).context("No product available")?;

        // Staffing gap, then the doctor rule with fallback
        let on_shift = self
            .config
            .staffing_gap
            .candidates(self.catalog.staff(), branch, day);
        let eligible = staff_for_product(&on_shift, product);
        let staff = *pick(rng, &eligible).context("No staff available")?;

        let quantity = *self.quantity.sample(rng);

        let customer_id = customer_id(rng.gen_range(self.config.customer_ids.clone()));
        let registration_date = if chance(rng, self.config.new_customer_probability) {
            day
        } else {
            day - Duration::days(rng.gen_range(self.config.returning_customer_days.clone()))
        };
        let gender = *self.gender.sample(rng);
        let age = self.age.sample(rng) as i32;

        let payment_type = if chance(rng, self.config.cashless_probability) {
            PaymentType::Cashless
        } else {
            PaymentType::Cash
        };
        // Name comes from the catalog, independent of the Cashless/Cash type
        let payment_name = &pick(rng, self.catalog.payments())
            .context("Catalog has no payment methods")?
            .name;

        let customer = CustomerDraw {
            customer_id,
            gender,
            age,
            registration_date,
        };

        Ok(TransactionRow::new(
            day,
            branch,
            customer,
            product,
            quantity,
            payment_type,
            payment_name,
            staff,
        ))
    }
}

// ============================================================================
// TESTS
// ============================================================================
