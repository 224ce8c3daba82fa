//! The transaction store: query/aggregation seam and its implementations
//!
//! Reports never touch the collection directly; they go through the
//! [`TransactionStore`] trait so the storage engine can be swapped and
//! tests can run against an isolated in-memory collection. The shipped
//! implementation is [`InMemoryTransactionStore`].

pub mod memory;

pub use memory::InMemoryTransactionStore;

use crate::core::filter::Predicate;
use crate::core::query::SortSpec;
use crate::core::transaction::Transaction;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// The field a grouped aggregation buckets by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    ProductCategory,
    Brand,
    CustomerRegion,
    PaymentMethod,
    OrderStatus,
    ProductName,
    /// Calendar month of the transaction date; bucket keys are `"YYYY-MM"`
    Month,
}

impl GroupKey {
    /// Extract the bucket key for one transaction
    pub fn key_of(&self, tx: &Transaction) -> String {
        match self {
            GroupKey::ProductCategory => tx.product_category.clone(),
            GroupKey::Brand => tx.brand.clone(),
            GroupKey::CustomerRegion => tx.customer_region.clone(),
            GroupKey::PaymentMethod => tx.payment_method.clone(),
            GroupKey::OrderStatus => tx.order_status.clone(),
            GroupKey::ProductName => tx.product_name.clone(),
            GroupKey::Month => {
                use chrono::Datelike;
                format!("{:04}-{:02}", tx.date.year(), tx.date.month())
            }
        }
    }
}

/// Ordering applied to grouped buckets before an optional truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketOrder {
    /// Descending by summed final amount
    TotalSalesDesc,
    /// Descending by row count
    CountDesc,
    /// Ascending by bucket key; with zero-padded month keys this is
    /// chronological order
    KeyAsc,
}

/// One bucket of a grouped aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBucket {
    pub key: String,
    pub total_sales: f64,
    pub total_quantity: i64,
    pub count: u64,
}

/// The overview measure set over a filtered collection
///
/// An empty matching set yields all zeros, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: f64,
    pub total_transactions: u64,
    pub total_quantity: i64,
    pub avg_order_value: f64,
    pub avg_discount: f64,
}

/// Fields supporting a distinct-values query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    Brand,
    ProductCategory,
    CustomerRegion,
    OrderStatus,
    /// Tag sets are flattened before deduplication
    Tags,
}

/// A queryable transaction collection
///
/// All operations are read-only except [`insert_many`](Self::insert_many),
/// which exists for dataset loading and test seeding. Implementations must
/// be cheap to share (`Arc`) across concurrent requests.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Count rows matching the predicate
    async fn count(&self, filter: &Predicate) -> Result<u64>;

    /// Fetch a filtered, sorted window of rows
    async fn find(
        &self,
        filter: &Predicate,
        sort: &SortSpec,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Transaction>>;

    /// Grouped aggregation: bucket matching rows by `key`, summing final
    /// amount and quantity and counting rows, then order and optionally
    /// truncate the buckets
    async fn aggregate(
        &self,
        filter: &Predicate,
        key: GroupKey,
        order: BucketOrder,
        limit: Option<usize>,
    ) -> Result<Vec<GroupBucket>>;

    /// The overview measure set over matching rows
    async fn summary(&self, filter: &Predicate) -> Result<SalesSummary>;

    /// Distinct values of a field across the whole collection, sorted;
    /// the tags field is flattened and blank values are removed
    async fn distinct(&self, field: DistinctField) -> Result<Vec<String>>;

    /// Bulk-insert rows (dataset loading, test seeding)
    async fn insert_many(&self, rows: Vec<Transaction>) -> Result<()>;
}
