// 💾 Output Writer - Rows → CSV table
//
// One header line, one record per row, columns in TransactionRow field order.
// Files are written to a sibling `.tmp` path and renamed into place only after
// the bytes are synced, so the target path never holds a partial table.

use crate::transaction::{TransactionRow, COLUMNS};
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What ended up on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: usize,
    /// SHA-256 of the file contents, lowercase hex
    pub sha256: String,
}

/// Serialize rows as CSV into any writer.
///
/// The header is written explicitly so an empty batch still yields one.
pub fn write_rows<W: Write>(writer: W, rows: &[TransactionRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS).context("Failed to write header")?;
    for row in rows {
        wtr.serialize(row).context("Failed to serialize row")?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Render rows to an in-memory CSV table
pub fn rows_to_csv(rows: &[TransactionRow]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_rows(&mut buf, rows)?;
    Ok(buf)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write rows to `path`, replacing any existing file
pub fn write_csv(path: &Path, rows: &[TransactionRow]) -> Result<WriteReport> {
    let bytes = rows_to_csv(rows)?;
    let temp_path = temp_path_for(path);

    if let Err(e) = write_and_sync(&temp_path, &bytes) {
        // Leftover temp file is not worth a second error
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    debug!("Wrote {} bytes to {}", bytes.len(), temp_path.display());

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e)
            .with_context(|| format!("Failed to move output into place: {}", path.display()));
    }

    let report = WriteReport {
        path: path.to_path_buf(),
        rows: rows.len(),
        bytes: bytes.len(),
        sha256: sha256_hex(&bytes),
    };
    info!("Saved {} rows to {}", report.rows, report.path.display());
    Ok(report)
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync output file: {}", path.display()))?;
    Ok(())
}

/// Read a table written by `write_csv` back into rows
pub fn load_csv(path: &Path) -> Result<Vec<TransactionRow>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: TransactionRow = result.context("Failed to deserialize row")?;
        rows.push(row);
    }

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, PaymentType};
    use crate::transaction::{customer_id, CustomerDraw, Gender};
    use chrono::NaiveDate;

    fn create_test_rows() -> Vec<TransactionRow> {
        let catalog = Catalog::standard();
        let day = NaiveDate::from_ymd_opt(2023, 5, 2).unwrap();

        vec![
            TransactionRow::new(
                day,
                catalog.branch("CH004").unwrap(),
                CustomerDraw {
                    customer_id: customer_id(1234),
                    gender: Gender::M,
                    age: 41,
                    registration_date: NaiveDate::from_ymd_opt(2021, 8, 9).unwrap(),
                },
                catalog.product("PRD001").unwrap(),
                2,
                PaymentType::Card,
                "Debit Mandiri",
                catalog.staff_member("NS002").unwrap(),
            ),
            TransactionRow::new(
                day,
                catalog.branch("CH005").unwrap(),
                CustomerDraw {
                    customer_id: customer_id(2001),
                    gender: Gender::F,
                    age: 23,
                    registration_date: day,
                },
                catalog.product("TRT002").unwrap(),
                1,
                PaymentType::Cashless,
                "OVO",
                catalog.staff_member("DR003").unwrap(),
            ),
        ]
    }

    #[test]
    fn test_header_and_record_layout() {
        let bytes = rows_to_csv(&create_test_rows()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "TransactionDate,ChannelCode,ChannelStoreName,City,CustomerID,Gender,Age,TglReg,\
             ProductCode,ProductName,TotalSales,PaymentMethodType,PaymentMethodName,\
             DoctorID,DoctorName,MedicalJobdesk"
        );
        assert_eq!(
            lines[1],
            "2023-05-02,CH004,Erha Clinic Surabaya,Surabaya,CUST1234,M,41,2021-08-09,\
             PRD001,Acne Sunblock SPF30,240000,Card,Debit Mandiri,NS002,Ns. Eko,Nurse"
        );
        assert!(lines[2].starts_with("2023-05-02,CH005,"));
        assert!(lines[2].contains(",1500000,Cashless,OVO,DR003,"));
    }

    #[test]
    fn test_empty_rows_still_get_header() {
        let bytes = rows_to_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("TransactionDate,ChannelCode,"));
    }

    #[test]
    fn test_header_matches_serde_names() {
        let bytes = rows_to_csv(&create_test_rows()).unwrap();
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());

        let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, COLUMNS);

        let rows: Vec<TransactionRow> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, create_test_rows());
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_temp_path_appends_suffix() {
        assert_eq!(
            temp_path_for(Path::new("out/sales.csv")),
            PathBuf::from("out/sales.csv.tmp")
        );
    }
}
