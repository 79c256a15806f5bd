// 🧾 TransactionRow - One synthesized point-of-sale record
//
// The only value created at runtime. Branch, product and staff fields are
// copied from catalog entries inside `TransactionRow::new`, which is the one
// place rows are built, so denormalized fields always match the catalog.

use crate::catalog::{Branch, PaymentType, Product, StaffJob, StaffMember};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    F,
    M,
}

/// Customer attributes drawn for a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraw {
    pub customer_id: String,
    pub gender: Gender,
    pub age: i32,
    pub registration_date: NaiveDate,
}

/// Customer ids look like `CUST1000`
pub fn customer_id(number: u32) -> String {
    format!("CUST{}", number)
}

/// Output table header, in column order
pub const COLUMNS: [&str; 16] = [
    "TransactionDate",
    "ChannelCode",
    "ChannelStoreName",
    "City",
    "CustomerID",
    "Gender",
    "Age",
    "TglReg",
    "ProductCode",
    "ProductName",
    "TotalSales",
    "PaymentMethodType",
    "PaymentMethodName",
    "DoctorID",
    "DoctorName",
    "MedicalJobdesk",
];

/// A generated sales row.
///
/// Field order and serde names must line up with `COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "TransactionDate")]
    pub transaction_date: NaiveDate,

    #[serde(rename = "ChannelCode")]
    pub channel_code: String,

    #[serde(rename = "ChannelStoreName")]
    pub channel_store_name: String,

    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    #[serde(rename = "Gender")]
    pub gender: Gender,

    /// Not clamped by every generator, so signed
    #[serde(rename = "Age")]
    pub age: i32,

    #[serde(rename = "TglReg")]
    pub registration_date: NaiveDate,

    #[serde(rename = "ProductCode")]
    pub product_code: String,

    #[serde(rename = "ProductName")]
    pub product_name: String,

    #[serde(rename = "TotalSales")]
    pub total_sales: i64,

    #[serde(rename = "PaymentMethodType")]
    pub payment_type: PaymentType,

    #[serde(rename = "PaymentMethodName")]
    pub payment_name: String,

    #[serde(rename = "DoctorID")]
    pub staff_id: String,

    #[serde(rename = "DoctorName")]
    pub staff_name: String,

    #[serde(rename = "MedicalJobdesk")]
    pub staff_job: StaffJob,
}

impl TransactionRow {
    /// Build a row from catalog references. `total_sales` is
    /// `product.base_price * quantity`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transaction_date: NaiveDate,
        branch: &Branch,
        customer: CustomerDraw,
        product: &Product,
        quantity: u32,
        payment_type: PaymentType,
        payment_name: &str,
        staff: &StaffMember,
    ) -> Self {
        TransactionRow {
            transaction_date,
            channel_code: branch.code.clone(),
            channel_store_name: branch.name.clone(),
            city: branch.city.clone(),
            customer_id: customer.customer_id,
            gender: customer.gender,
            age: customer.age,
            registration_date: customer.registration_date,
            product_code: product.code.clone(),
            product_name: product.name.clone(),
            total_sales: product.base_price * i64::from(quantity),
            payment_type,
            payment_name: payment_name.to_string(),
            staff_id: staff.id.clone(),
            staff_name: staff.name.clone(),
            staff_job: staff.job,
        }
    }

    /// Days between registration and this purchase
    pub fn tenure_days(&self) -> i64 {
        (self.transaction_date - self.registration_date).num_days()
    }
}

// ============================================================================
// TESTS
// ============================================================================
