//! Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use salespulse::prelude::*;

/// Build one transaction with the fields the tests care about
///
/// Everything not passed explicitly gets a stable default so assertions
/// stay readable.
pub struct TxBuilder {
    tx: Transaction,
}

impl TxBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            tx: Transaction {
                transaction_id: id,
                date: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
                customer_id: format!("C-{id}"),
                customer_name: format!("Customer {id}"),
                phone_number: format!("+47000000{id:02}"),
                gender: "Female".to_string(),
                age: 30,
                customer_region: "North".to_string(),
                customer_type: "New".to_string(),
                product_id: format!("P-{id}"),
                product_name: format!("Product {id}"),
                brand: "Acme".to_string(),
                product_category: "Electronics".to_string(),
                tags: vec![],
                quantity: 1,
                price_per_unit: 100.0,
                discount_percentage: 0.0,
                total_amount: 100.0,
                final_amount: 100.0,
                payment_method: "Card".to_string(),
                order_status: "Delivered".to_string(),
                delivery_type: "Home".to_string(),
                store_id: "S-1".to_string(),
                store_location: "Bergen".to_string(),
                salesperson_id: "E-1".to_string(),
                employee_name: "Mona Lid".to_string(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.tx.customer_name = name.to_string();
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.tx.phone_number = phone.to_string();
        self
    }

    pub fn date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.tx.date = Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.tx.age = age;
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.tx.customer_region = region.to_string();
        self
    }

    pub fn gender(mut self, gender: &str) -> Self {
        self.tx.gender = gender.to_string();
        self
    }

    pub fn brand(mut self, brand: &str) -> Self {
        self.tx.brand = brand.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.tx.product_category = category.to_string();
        self
    }

    pub fn product(mut self, name: &str) -> Self {
        self.tx.product_name = name.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tx.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn payment(mut self, method: &str) -> Self {
        self.tx.payment_method = method.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.tx.order_status = status.to_string();
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.tx.quantity = quantity;
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.tx.total_amount = amount;
        self.tx.final_amount = amount;
        self
    }

    pub fn discount(mut self, pct: f64) -> Self {
        self.tx.discount_percentage = pct;
        self
    }

    pub fn build(self) -> Transaction {
        self.tx
    }
}

/// Convenience shorthand
pub fn tx(id: i64) -> TxBuilder {
    TxBuilder::new(id)
}

/// A store pre-seeded with the given rows
pub async fn seeded_store(rows: Vec<Transaction>) -> Arc<dyn TransactionStore> {
    let store: Arc<dyn TransactionStore> = Arc::new(InMemoryTransactionStore::new());
    store.insert_many(rows).await.expect("seed should succeed");
    store
}

/// A report service over a pre-seeded store
pub async fn seeded_reports(rows: Vec<Transaction>) -> ReportService {
    ReportService::new(seeded_store(rows).await)
}
