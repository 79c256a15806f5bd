// End-to-end: generate, write to disk, read back

use clinic_sales_gen::{
    load_csv, rows_to_csv, seeded_rng, write_csv, Catalog, MonthlySummary, ScenarioConfig,
    ScenarioGenerator, StaffJob, TransactionRow, UniformConfig, UniformGenerator,
};
use std::fs;

fn uniform_rows(rows: usize, seed: u64) -> Vec<TransactionRow> {
    let catalog = Catalog::standard();
    let generator =
        UniformGenerator::new(&catalog, UniformConfig::default().with_rows(rows)).unwrap();
    let (mut rng, _) = seeded_rng(Some(seed));
    generator.generate(&mut rng).unwrap()
}

fn scenario_rows(seed: u64) -> Vec<TransactionRow> {
    let catalog = Catalog::standard();
    let generator = ScenarioGenerator::new(&catalog, ScenarioConfig::default()).unwrap();
    let (mut rng, _) = seeded_rng(Some(seed));
    generator.generate(&mut rng).unwrap()
}

#[test]
fn test_seeded_uniform_run_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let report1 = write_csv(&first, &uniform_rows(10, 20230101)).unwrap();
    let report2 = write_csv(&second, &uniform_rows(10, 20230101)).unwrap();

    assert_eq!(report1.rows, 10);
    assert_eq!(report1.sha256, report2.sha256);
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    // 10 records plus header
    let text = fs::read_to_string(&first).unwrap();
    assert_eq!(text.lines().count(), 11);
}

#[test]
fn test_different_seeds_differ() {
    let a = rows_to_csv(&uniform_rows(10, 1)).unwrap();
    let b = rows_to_csv(&uniform_rows(10, 2)).unwrap();

    assert_ne!(a, b);
}

#[test]
fn test_written_table_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    let rows = uniform_rows(500, 5);

    write_csv(&path, &rows).unwrap();
    let loaded = load_csv(&path).unwrap();

    assert_eq!(loaded, rows);
    // No temp file left behind
    assert!(!dir.path().join("sales.csv.tmp").exists());
}

#[test]
fn test_write_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    fs::write(&path, "stale").unwrap();

    write_csv(&path, &uniform_rows(3, 9)).unwrap();

    assert!(fs::read_to_string(&path).unwrap().starts_with("TransactionDate,"));
}

#[test]
fn test_unwritable_path_fails_without_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("sales.csv");

    let result = write_csv(&path, &uniform_rows(3, 9));

    assert!(result.is_err());
    assert!(!path.exists());
    assert!(!dir.path().join("missing").join("sales.csv.tmp").exists());
}

#[test]
fn test_denormalized_fields_match_catalog() {
    let catalog = Catalog::standard();
    let mut rows = uniform_rows(1000, 31);
    rows.extend(scenario_rows(31));

    for row in &rows {
        let branch = catalog.branch(&row.channel_code).unwrap();
        assert_eq!(row.channel_store_name, branch.name);
        assert_eq!(row.city, branch.city);

        let product = catalog.product(&row.product_code).unwrap();
        assert_eq!(row.product_name, product.name);

        let staff = catalog.staff_member(&row.staff_id).unwrap();
        assert_eq!(row.staff_name, staff.name);
        assert_eq!(row.staff_job, staff.job);
    }
}

#[test]
fn test_scenario_table_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("case_study.csv");
    let json_path = dir.path().join("summary.json");

    let rows = scenario_rows(42);
    let report = write_csv(&csv_path, &rows).unwrap();
    assert_eq!(report.rows, rows.len());

    let summary = MonthlySummary::from_rows(&load_csv(&csv_path).unwrap());
    summary.save_json(&json_path).unwrap();

    assert_eq!(summary.months.len(), 12);
    let jan_sep: usize = (1..=9)
        .map(|m| summary.months[&format!("2023-{:02}", m)].transactions)
        .sum();
    let average = jan_sep as f64 / 9.0;
    for m in 10..=12 {
        assert!((summary.months[&format!("2023-{:02}", m)].transactions as f64) < average);
    }

    let saved: MonthlySummary =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(saved, summary);
}

#[test]
fn test_expensive_treatments_always_doctor_end_to_end() {
    let catalog = Catalog::standard();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");

    write_csv(&path, &scenario_rows(77)).unwrap();

    for row in load_csv(&path).unwrap() {
        if catalog.product(&row.product_code).unwrap().is_expensive_treatment() {
            assert_eq!(row.staff_job, StaffJob::Doctor);
        }
    }
}
