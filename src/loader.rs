//! CSV dataset loader
//!
//! Reads the retail transaction export into the store at startup. Rows
//! that fail to parse are skipped with a warning rather than aborting the
//! whole load; a partially loaded dataset beats no dataset for a batch
//! ingest tool.

use crate::core::transaction::Transaction;
use crate::store::TransactionStore;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Rows per `insert_many` batch
const BATCH_SIZE: usize = 5000;

/// One row of the CSV export, by header name
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Transaction ID")]
    transaction_id: i64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Phone Number")]
    phone_number: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Customer Region")]
    customer_region: String,
    #[serde(rename = "Customer Type")]
    customer_type: String,
    #[serde(rename = "Product ID")]
    product_id: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Product Category")]
    product_category: String,
    #[serde(rename = "Tags", default)]
    tags: String,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "Price per Unit")]
    price_per_unit: f64,
    #[serde(rename = "Discount Percentage")]
    discount_percentage: f64,
    #[serde(rename = "Total Amount")]
    total_amount: f64,
    #[serde(rename = "Final Amount")]
    final_amount: f64,
    #[serde(rename = "Payment Method")]
    payment_method: String,
    #[serde(rename = "Order Status")]
    order_status: String,
    #[serde(rename = "Delivery Type")]
    delivery_type: String,
    #[serde(rename = "Store ID")]
    store_id: String,
    #[serde(rename = "Store Location")]
    store_location: String,
    #[serde(rename = "Salesperson ID")]
    salesperson_id: String,
    #[serde(rename = "Employee Name")]
    employee_name: String,
}

impl CsvRow {
    fn into_transaction(self) -> Result<Transaction> {
        let date = parse_date(&self.date)
            .with_context(|| format!("unparseable date '{}'", self.date))?;

        Ok(Transaction {
            transaction_id: self.transaction_id,
            date,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            gender: self.gender,
            age: self.age,
            customer_region: self.customer_region,
            customer_type: self.customer_type,
            product_id: self.product_id,
            product_name: self.product_name,
            brand: self.brand,
            product_category: self.product_category,
            tags: parse_tags(&self.tags),
            quantity: self.quantity,
            price_per_unit: self.price_per_unit,
            discount_percentage: self.discount_percentage,
            total_amount: self.total_amount,
            final_amount: self.final_amount,
            payment_method: self.payment_method,
            order_status: self.order_status,
            delivery_type: self.delivery_type,
            store_id: self.store_id,
            store_location: self.store_location,
            salesperson_id: self.salesperson_id,
            employee_name: self.employee_name,
        })
    }
}

/// Load a CSV dataset into the store in batches
///
/// Returns the number of rows inserted. Unparseable rows are skipped with
/// a warning.
pub async fn load_csv(store: &Arc<dyn TransactionStore>, path: &Path) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;

    let mut batch = Vec::with_capacity(BATCH_SIZE);
    let mut inserted = 0usize;
    let mut skipped = 0usize;

    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!("Skipping row {}: {}", index + 1, err);
                skipped += 1;
                continue;
            }
        };

        match row.into_transaction() {
            Ok(tx) => batch.push(tx),
            Err(err) => {
                tracing::warn!("Skipping row {}: {}", index + 1, err);
                skipped += 1;
                continue;
            }
        }

        if batch.len() >= BATCH_SIZE {
            inserted += batch.len();
            store.insert_many(std::mem::take(&mut batch)).await?;
        }
    }

    if !batch.is_empty() {
        inserted += batch.len();
        store.insert_many(batch).await?;
    }

    tracing::info!(
        "Dataset loaded: {} rows inserted, {} skipped",
        inserted,
        skipped
    );
    Ok(inserted)
}

/// Parse a dataset date: RFC 3339 or a plain calendar date at midnight UTC
fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = s.parse::<NaiveDate>()?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Split a quoted comma-separated tag cell into individual labels
fn parse_tags(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.replace('"', "")
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
