//! The transaction record served and aggregated by every report
//!
//! A transaction is read-only from this crate's perspective: it is produced
//! upstream (dataset import) and only filtered, sorted and summed here.
//! `final_amount` is derived from `total_amount` and `discount_percentage`
//! by the producer and is never recomputed.

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single retail transaction
///
/// Wire format uses camelCase keys to stay compatible with the dashboard
/// consumers, e.g. `{"transactionId": 1, "customerName": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: i64,
    pub date: DateTime<Utc>,

    // Customer attributes
    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: String,
    pub age: i64,
    pub customer_region: String,
    pub customer_type: String,

    // Product attributes
    pub product_id: String,
    pub product_name: String,
    pub brand: String,
    pub product_category: String,
    /// Free-text labels, zero or more per transaction
    #[serde(default)]
    pub tags: Vec<String>,

    // Commercial attributes
    pub quantity: i64,
    pub price_per_unit: f64,
    pub discount_percentage: f64,
    pub total_amount: f64,
    pub final_amount: f64,

    // Fulfillment attributes
    pub payment_method: String,
    pub order_status: String,
    pub delivery_type: String,
    pub store_id: String,
    pub store_location: String,
    pub salesperson_id: String,
    pub employee_name: String,
}

impl Transaction {
    /// Look up a field by its wire name, for dynamic sorting
    ///
    /// Returns `None` for unknown field names; callers fall back to the
    /// default sort field in that case.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "transactionId" => FieldValue::Integer(self.transaction_id),
            "date" => FieldValue::DateTime(self.date),
            "customerId" => FieldValue::String(self.customer_id.clone()),
            "customerName" => FieldValue::String(self.customer_name.clone()),
            "phoneNumber" => FieldValue::String(self.phone_number.clone()),
            "gender" => FieldValue::String(self.gender.clone()),
            "age" => FieldValue::Integer(self.age),
            "customerRegion" => FieldValue::String(self.customer_region.clone()),
            "customerType" => FieldValue::String(self.customer_type.clone()),
            "productId" => FieldValue::String(self.product_id.clone()),
            "productName" => FieldValue::String(self.product_name.clone()),
            "brand" => FieldValue::String(self.brand.clone()),
            "productCategory" => FieldValue::String(self.product_category.clone()),
            "quantity" => FieldValue::Integer(self.quantity),
            "pricePerUnit" => FieldValue::Float(self.price_per_unit),
            "discountPercentage" => FieldValue::Float(self.discount_percentage),
            "totalAmount" => FieldValue::Float(self.total_amount),
            "finalAmount" => FieldValue::Float(self.final_amount),
            "paymentMethod" => FieldValue::String(self.payment_method.clone()),
            "orderStatus" => FieldValue::String(self.order_status.clone()),
            "deliveryType" => FieldValue::String(self.delivery_type.clone()),
            "storeId" => FieldValue::String(self.store_id.clone()),
            "storeLocation" => FieldValue::String(self.store_location.clone()),
            "salespersonId" => FieldValue::String(self.salesperson_id.clone()),
            "employeeName" => FieldValue::String(self.employee_name.clone()),
            _ => return None,
        };
        Some(value)
    }
}
