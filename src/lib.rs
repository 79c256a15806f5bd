// Clinic Sales Generator - Core Library
// Synthetic point-of-sale tables for a skincare clinic chain.
// Exposes all modules for use in the CLI and tests

pub mod catalog;     // Static reference data
pub mod sampling;    // Seeded random source + weighted choice
pub mod rules;       // Eligibility rules and scenario anomalies
pub mod transaction; // Row value type
pub mod uniform;     // N independent rows
pub mod scenario;    // Calendar year with planted anomalies
pub mod writer;      // CSV output
pub mod summary;     // Monthly console summary

// Re-export commonly used types
pub use catalog::{
    Branch, Catalog, PaymentMethod, PaymentType, Product, ProductType, StaffJob, StaffMember,
    EXPENSIVE_TREATMENT_THRESHOLD,
};
pub use sampling::{chance, pick, random_day, seeded_rng, WeightedChoice};
pub use rules::{staff_for_product, MonthWindow, StaffingGap, SupplyDisruption};
pub use transaction::{CustomerDraw, Gender, TransactionRow, COLUMNS};
pub use uniform::{UniformConfig, UniformGenerator, DEFAULT_ROWS, MAX_ROWS};
pub use scenario::{
    ScenarioConfig, ScenarioGenerator, FLAGSHIP_BRANCH, LASER_PRODUCT, SCENARIO_YEAR, TOP_DOCTOR,
};
pub use writer::{load_csv, rows_to_csv, sha256_hex, write_csv, write_rows, WriteReport};
pub use summary::{MonthTotals, MonthlySummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
