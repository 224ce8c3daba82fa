//! In-memory implementation of the transaction store
//!
//! The collection is held behind an `RwLock`: every report is a read, so
//! concurrent requests never block each other; writes only happen during
//! dataset loading and test seeding.

use crate::core::filter::Predicate;
use crate::core::query::SortSpec;
use crate::core::transaction::Transaction;
use crate::store::{
    BucketOrder, DistinctField, GroupBucket, GroupKey, SalesSummary, TransactionStore,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// In-memory transaction store
///
/// Cheap to clone; clones share the same underlying collection.
#[derive(Clone)]
pub struct InMemoryTransactionStore {
    rows: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of rows currently loaded
    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching(&self, filter: &Predicate) -> Result<Vec<Transaction>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(rows.iter().filter(|tx| filter.matches(tx)).cloned().collect())
    }
}

impl Default for InMemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn count(&self, filter: &Predicate) -> Result<u64> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(rows.iter().filter(|tx| filter.matches(tx)).count() as u64)
    }

    async fn find(
        &self,
        filter: &Predicate,
        sort: &SortSpec,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        let mut rows = self.matching(filter)?;

        // Unknown sort fields leave the incoming order untouched.
        rows.sort_by(|a, b| {
            let ordering = match (a.field(&sort.field), b.field(&sort.field)) {
                (Some(va), Some(vb)) => va.compare(&vb),
                _ => std::cmp::Ordering::Equal,
            };
            if sort.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        Ok(rows.into_iter().skip(skip).take(limit).collect())
    }

    async fn aggregate(
        &self,
        filter: &Predicate,
        key: GroupKey,
        order: BucketOrder,
        limit: Option<usize>,
    ) -> Result<Vec<GroupBucket>> {
        let rows = self.matching(filter)?;

        let mut buckets: HashMap<String, GroupBucket> = HashMap::new();
        for tx in &rows {
            let bucket = buckets.entry(key.key_of(tx)).or_default();
            bucket.total_sales += tx.final_amount;
            bucket.total_quantity += tx.quantity;
            bucket.count += 1;
        }

        let mut buckets: Vec<GroupBucket> = buckets
            .into_iter()
            .map(|(key, mut bucket)| {
                bucket.key = key;
                bucket
            })
            .collect();

        match order {
            BucketOrder::TotalSalesDesc => buckets.sort_by(|a, b| {
                b.total_sales
                    .partial_cmp(&a.total_sales)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            BucketOrder::CountDesc => buckets.sort_by(|a, b| b.count.cmp(&a.count)),
            BucketOrder::KeyAsc => buckets.sort_by(|a, b| a.key.cmp(&b.key)),
        }

        if let Some(limit) = limit {
            buckets.truncate(limit);
        }

        Ok(buckets)
    }

    async fn summary(&self, filter: &Predicate) -> Result<SalesSummary> {
        let rows = self.matching(filter)?;
        if rows.is_empty() {
            return Ok(SalesSummary::default());
        }

        let count = rows.len() as u64;
        let total_sales: f64 = rows.iter().map(|tx| tx.final_amount).sum();
        let total_quantity: i64 = rows.iter().map(|tx| tx.quantity).sum();
        let total_discount: f64 = rows.iter().map(|tx| tx.discount_percentage).sum();

        Ok(SalesSummary {
            total_sales,
            total_transactions: count,
            total_quantity,
            avg_order_value: total_sales / count as f64,
            avg_discount: total_discount / count as f64,
        })
    }

    async fn distinct(&self, field: DistinctField) -> Result<Vec<String>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        // BTreeSet gives deduplication and lexicographic order in one pass.
        let values: BTreeSet<String> = match field {
            DistinctField::Brand => rows.iter().map(|tx| tx.brand.clone()).collect(),
            DistinctField::ProductCategory => {
                rows.iter().map(|tx| tx.product_category.clone()).collect()
            }
            DistinctField::CustomerRegion => {
                rows.iter().map(|tx| tx.customer_region.clone()).collect()
            }
            DistinctField::OrderStatus => rows.iter().map(|tx| tx.order_status.clone()).collect(),
            DistinctField::Tags => rows
                .iter()
                .flat_map(|tx| tx.tags.iter())
                .filter(|t| !t.is_empty())
                .cloned()
                .collect(),
        };

        Ok(values.into_iter().collect())
    }

    async fn insert_many(&self, mut new_rows: Vec<Transaction>) -> Result<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        rows.append(&mut new_rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(id: i64, name: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            transaction_id: id,
            date: chrono::Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
            customer_id: format!("C-{id}"),
            customer_name: name.to_string(),
            phone_number: format!("+1555000{id:04}"),
            gender: "Female".to_string(),
            age: 30,
            customer_region: "North".to_string(),
            customer_type: "New".to_string(),
            product_id: format!("P-{id}"),
            product_name: format!("Product {id}"),
            brand: "Acme".to_string(),
            product_category: category.to_string(),
            tags: vec!["sale".to_string()],
            quantity: 2,
            price_per_unit: amount / 2.0,
            discount_percentage: 5.0,
            total_amount: amount,
            final_amount: amount,
            payment_method: "Card".to_string(),
            order_status: "Delivered".to_string(),
            delivery_type: "Home".to_string(),
            store_id: "S-1".to_string(),
            store_location: "Oslo".to_string(),
            salesperson_id: "E-1".to_string(),
            employee_name: "Jo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_count() {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many(vec![tx(1, "Ann", 10.0, "Toys"), tx(2, "Ben", 20.0, "Games")])
            .await
            .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.count(&Predicate::default()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_count_respects_predicate() {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many(vec![tx(1, "Ann", 10.0, "Toys"), tx(2, "Ben", 20.0, "Games")])
            .await
            .unwrap();

        let filter = Predicate {
            categories: vec!["Toys".to_string()],
            ..Default::default()
        };
        assert_eq!(store.count(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_sorts_and_paginates() {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many(vec![
                tx(1, "Cara", 10.0, "Toys"),
                tx(2, "Ann", 20.0, "Toys"),
                tx(3, "Ben", 30.0, "Toys"),
            ])
            .await
            .unwrap();

        let sort = SortSpec::default(); // customerName ascending
        let rows = store.find(&Predicate::default(), &sort, 0, 10).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|t| t.customer_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Ben", "Cara"]);

        let second_page = store.find(&Predicate::default(), &sort, 2, 10).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].customer_name, "Cara");
    }

    #[tokio::test]
    async fn test_find_descending_numeric() {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many(vec![
                tx(1, "Ann", 10.0, "Toys"),
                tx(2, "Ben", 30.0, "Toys"),
                tx(3, "Cara", 20.0, "Toys"),
            ])
            .await
            .unwrap();

        let sort = SortSpec {
            field: "finalAmount".to_string(),
            descending: true,
        };
        let rows = store.find(&Predicate::default(), &sort, 0, 10).await.unwrap();
        let amounts: Vec<f64> = rows.iter().map(|t| t.final_amount).collect();
        assert_eq!(amounts, vec![30.0, 20.0, 10.0]);
    }

    #[tokio::test]
    async fn test_aggregate_groups_and_orders() {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many(vec![
                tx(1, "Ann", 10.0, "Toys"),
                tx(2, "Ben", 40.0, "Games"),
                tx(3, "Cara", 20.0, "Toys"),
            ])
            .await
            .unwrap();

        let buckets = store
            .aggregate(
                &Predicate::default(),
                GroupKey::ProductCategory,
                BucketOrder::TotalSalesDesc,
                None,
            )
            .await
            .unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "Games");
        assert_eq!(buckets[0].total_sales, 40.0);
        assert_eq!(buckets[1].key, "Toys");
        assert_eq!(buckets[1].total_sales, 30.0);
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].total_quantity, 4);
    }

    #[tokio::test]
    async fn test_aggregate_limit_truncates() {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many(vec![
                tx(1, "Ann", 10.0, "A"),
                tx(2, "Ben", 30.0, "B"),
                tx(3, "Cara", 20.0, "C"),
            ])
            .await
            .unwrap();

        let buckets = store
            .aggregate(
                &Predicate::default(),
                GroupKey::ProductCategory,
                BucketOrder::TotalSalesDesc,
                Some(2),
            )
            .await
            .unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "B");
    }

    #[tokio::test]
    async fn test_summary_on_empty_match_is_zeroed() {
        let store = InMemoryTransactionStore::new();
        store.insert_many(vec![tx(1, "Ann", 10.0, "Toys")]).await.unwrap();

        let filter = Predicate {
            categories: vec!["NoSuchCategory".to_string()],
            ..Default::default()
        };
        let summary = store.summary(&filter).await.unwrap();
        assert_eq!(summary, SalesSummary::default());
    }

    #[tokio::test]
    async fn test_summary_averages() {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many(vec![tx(1, "Ann", 10.0, "Toys"), tx(2, "Ben", 30.0, "Toys")])
            .await
            .unwrap();

        let summary = store.summary(&Predicate::default()).await.unwrap();
        assert_eq!(summary.total_sales, 40.0);
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.total_quantity, 4);
        assert_eq!(summary.avg_order_value, 20.0);
        assert_eq!(summary.avg_discount, 5.0);
    }

    #[tokio::test]
    async fn test_distinct_tags_flattened_and_sorted() {
        let store = InMemoryTransactionStore::new();
        let mut a = tx(1, "Ann", 10.0, "Toys");
        a.tags = vec!["b".to_string(), "a".to_string()];
        let mut b = tx(2, "Ben", 20.0, "Toys");
        b.tags = vec!["a".to_string(), "".to_string()];
        store.insert_many(vec![a, b]).await.unwrap();

        let tags = store.distinct(DistinctField::Tags).await.unwrap();
        assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
    }
}
