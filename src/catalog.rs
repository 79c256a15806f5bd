// 🏥 Catalog - Static reference data for both generators
// Branches, products, medical staff and payment methods.
//
// Built once at startup, read-only afterwards. Generators borrow entries
// from here and copy them into rows, so a row can never drift from its
// catalog entry.

use serde::{Deserialize, Serialize};

/// Base price above which a treatment is considered "expensive" and must be
/// handled by a doctor.
pub const EXPENSIVE_TREATMENT_THRESHOLD: i64 = 500_000;

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    Treatment,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffJob {
    Doctor,
    Nurse,
}

/// Payment type as written to the table.
///
/// The uniform generator uses the concrete types (Cash, Card, E-Wallet,
/// Insurance); the scenario generator only distinguishes Cashless from Cash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Card,
    #[serde(rename = "E-Wallet")]
    EWallet,
    Insurance,
    Cashless,
}

// ============================================================================
// CATALOG ENTRIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub code: String,
    pub name: String,
    pub city: String,
}

impl Branch {
    pub fn new(code: &str, name: &str, city: &str) -> Self {
        Branch {
            code: code.to_string(),
            name: name.to_string(),
            city: city.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub name: String,
    pub product_type: ProductType,
    /// Integer currency units (IDR)
    pub base_price: i64,
}

impl Product {
    pub fn new(code: &str, name: &str, product_type: ProductType, base_price: i64) -> Self {
        Product {
            code: code.to_string(),
            name: name.to_string(),
            product_type,
            base_price,
        }
    }

    /// Treatments priced above the threshold need a doctor in attendance
    pub fn is_expensive_treatment(&self) -> bool {
        self.product_type == ProductType::Treatment
            && self.base_price > EXPENSIVE_TREATMENT_THRESHOLD
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub job: StaffJob,
}

impl StaffMember {
    pub fn new(id: &str, name: &str, job: StaffJob) -> Self {
        StaffMember {
            id: id.to_string(),
            name: name.to_string(),
            job,
        }
    }

    pub fn is_doctor(&self) -> bool {
        self.job == StaffJob::Doctor
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub payment_type: PaymentType,
    pub name: String,
}

impl PaymentMethod {
    pub fn new(payment_type: PaymentType, name: &str) -> Self {
        PaymentMethod {
            payment_type,
            name: name.to_string(),
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Read-only lookup tables shared by the generators
#[derive(Debug, Clone)]
pub struct Catalog {
    branches: Vec<Branch>,
    products: Vec<Product>,
    staff: Vec<StaffMember>,
    payments: Vec<PaymentMethod>,
}

impl Catalog {
    pub fn new(
        branches: Vec<Branch>,
        products: Vec<Product>,
        staff: Vec<StaffMember>,
        payments: Vec<PaymentMethod>,
    ) -> Self {
        Catalog {
            branches,
            products,
            staff,
            payments,
        }
    }

    /// The clinic chain's compiled-in reference data
    pub fn standard() -> Self {
        let branches = vec![
            Branch::new("CH001", "Erha Derma Center Kemanggisan", "Jakarta Barat"),
            Branch::new("CH002", "Erha Apothecary PIK", "Jakarta Utara"),
            Branch::new("CH003", "Erha Clinic Bandung", "Bandung"),
            Branch::new("CH004", "Erha Clinic Surabaya", "Surabaya"),
            Branch::new("CH005", "Erha Apothecary Senayan City", "Jakarta Pusat"),
        ];

        let products = vec![
            Product::new("TRT001", "Acne Peeling", ProductType::Treatment, 450_000),
            Product::new("TRT002", "Laser Rejuvenation", ProductType::Treatment, 1_500_000),
            Product::new("TRT003", "Hair Growth Therapy", ProductType::Treatment, 750_000),
            Product::new("PRD001", "Acne Sunblock SPF30", ProductType::Product, 120_000),
            Product::new("PRD002", "Brightening Night Cream", ProductType::Product, 185_000),
            Product::new("PRD003", "Collagen Supplement", ProductType::Product, 300_000),
        ];

        let staff = vec![
            StaffMember::new("DR001", "dr. Amanda Sp.KK", StaffJob::Doctor),
            StaffMember::new("DR002", "dr. Budi Santoso", StaffJob::Doctor),
            StaffMember::new("DR003", "dr. Citra Lestari", StaffJob::Doctor),
            StaffMember::new("NS001", "Ns. Diana", StaffJob::Nurse),
            StaffMember::new("NS002", "Ns. Eko", StaffJob::Nurse),
        ];

        let payments = vec![
            PaymentMethod::new(PaymentType::Cash, "Cash"),
            PaymentMethod::new(PaymentType::Card, "Credit Card BCA"),
            PaymentMethod::new(PaymentType::Card, "Debit Mandiri"),
            PaymentMethod::new(PaymentType::EWallet, "GoPay"),
            PaymentMethod::new(PaymentType::EWallet, "OVO"),
            PaymentMethod::new(PaymentType::Insurance, "Admedika"),
        ];

        Catalog::new(branches, products, staff, payments)
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    pub fn payments(&self) -> &[PaymentMethod] {
        &self.payments
    }

    pub fn branch(&self, code: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.code == code)
    }

    pub fn product(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    pub fn staff_member(&self, id: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================
