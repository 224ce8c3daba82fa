//! Report queries: the read-only aggregation surface of the API
//!
//! Every report is a pure function of (filter parameters, optional extras):
//! build the predicate once, run one store query, reshape the buckets into
//! the response rows the dashboard renders. Nothing here mutates state and
//! no report retries on failure; reports are idempotent reads, so callers
//! may retry safely if they want to.

use crate::core::error::ApiResult;
use crate::core::filter::{FilterParams, Predicate};
use crate::core::query::{ListParams, TransactionPage};
use crate::store::{BucketOrder, DistinctField, GroupBucket, GroupKey, SalesSummary, TransactionStore};
use serde::Serialize;
use std::sync::Arc;

/// Default truncation for the top-products report
const DEFAULT_TOP_LIMIT: usize = 10;

/// One row of a grouped sales report (category, brand, region, payment
/// method, order status)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesByGroup {
    pub key: String,
    pub total_sales: f64,
    pub count: u64,
}

impl From<GroupBucket> for SalesByGroup {
    fn from(bucket: GroupBucket) -> Self {
        Self {
            key: bucket.key,
            total_sales: bucket.total_sales,
            count: bucket.count,
        }
    }
}

/// One month of the sales-trends report; `month` is `"YYYY-MM"`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    pub total_sales: f64,
    pub count: u64,
}

/// One row of the top-products report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product: String,
    pub total_sales: f64,
    pub total_quantity: i64,
    pub count: u64,
}

/// Available values for the dashboard's filter controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    pub statuses: Vec<String>,
    pub tags: Vec<String>,
}

/// The report query service
///
/// Holds the store handle explicitly; there is no ambient connection
/// state, so tests can run against isolated in-memory collections in
/// parallel.
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn TransactionStore>,
}

impl ReportService {
    /// Create a report service over the given store
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Paginated transaction list
    ///
    /// Totals come from a distinct count query over the same predicate,
    /// so pagination past the last page returns an empty row set with the
    /// totals still correct.
    pub async fn list(
        &self,
        filters: &FilterParams,
        params: &ListParams,
    ) -> ApiResult<TransactionPage> {
        let predicate = Predicate::build(filters).with_search(params.search.as_deref());
        let page = params.page();
        let limit = params.limit();
        // Page numbers come straight off the query string, so the offset
        // saturates instead of overflowing on absurd values.
        let skip = page.saturating_sub(1).saturating_mul(limit);

        let total = self.store.count(&predicate).await?;
        let rows = self
            .store
            .find(&predicate, &params.sort_spec(), skip, limit)
            .await?;

        Ok(TransactionPage::new(rows, page, limit, total))
    }

    /// KPI overview: totals and averages over the filtered collection
    pub async fn overview(&self, filters: &FilterParams) -> ApiResult<SalesSummary> {
        let predicate = Predicate::build(filters);
        Ok(self.store.summary(&predicate).await?)
    }

    /// Sales per product category, descending by summed final amount
    pub async fn category_sales(&self, filters: &FilterParams) -> ApiResult<Vec<SalesByGroup>> {
        self.sales_by(filters, GroupKey::ProductCategory, BucketOrder::TotalSalesDesc)
            .await
    }

    /// Sales per brand, descending by summed final amount
    pub async fn brand_sales(&self, filters: &FilterParams) -> ApiResult<Vec<SalesByGroup>> {
        self.sales_by(filters, GroupKey::Brand, BucketOrder::TotalSalesDesc)
            .await
    }

    /// Sales per customer region, descending by summed final amount
    pub async fn region_sales(&self, filters: &FilterParams) -> ApiResult<Vec<SalesByGroup>> {
        self.sales_by(filters, GroupKey::CustomerRegion, BucketOrder::TotalSalesDesc)
            .await
    }

    /// Payment method distribution, descending by row count
    pub async fn payment_methods(&self, filters: &FilterParams) -> ApiResult<Vec<SalesByGroup>> {
        self.sales_by(filters, GroupKey::PaymentMethod, BucketOrder::CountDesc)
            .await
    }

    /// Order status distribution, descending by row count
    pub async fn order_status(&self, filters: &FilterParams) -> ApiResult<Vec<SalesByGroup>> {
        self.sales_by(filters, GroupKey::OrderStatus, BucketOrder::CountDesc)
            .await
    }

    /// Monthly sales trend, chronological, keyed `"YYYY-MM"`
    pub async fn sales_trends(&self, filters: &FilterParams) -> ApiResult<Vec<TrendPoint>> {
        let predicate = Predicate::build(filters);
        let buckets = self
            .store
            .aggregate(&predicate, GroupKey::Month, BucketOrder::KeyAsc, None)
            .await?;

        Ok(buckets
            .into_iter()
            .map(|b| TrendPoint {
                month: b.key,
                total_sales: b.total_sales,
                count: b.count,
            })
            .collect())
    }

    /// Best-selling products by summed final amount, truncated to `limit`
    /// (default 10)
    pub async fn top_products(
        &self,
        filters: &FilterParams,
        limit: Option<usize>,
    ) -> ApiResult<Vec<TopProduct>> {
        let predicate = Predicate::build(filters);
        let buckets = self
            .store
            .aggregate(
                &predicate,
                GroupKey::ProductName,
                BucketOrder::TotalSalesDesc,
                Some(limit.unwrap_or(DEFAULT_TOP_LIMIT)),
            )
            .await?;

        Ok(buckets
            .into_iter()
            .map(|b| TopProduct {
                product: b.key,
                total_sales: b.total_sales,
                total_quantity: b.total_quantity,
                count: b.count,
            })
            .collect())
    }

    /// Distinct values for the dashboard's filter controls
    ///
    /// The five distinct queries are independent reads and run
    /// concurrently.
    pub async fn filter_options(&self) -> ApiResult<FilterOptions> {
        let (brands, categories, regions, statuses, tags) = tokio::try_join!(
            self.store.distinct(DistinctField::Brand),
            self.store.distinct(DistinctField::ProductCategory),
            self.store.distinct(DistinctField::CustomerRegion),
            self.store.distinct(DistinctField::OrderStatus),
            self.store.distinct(DistinctField::Tags),
        )?;

        Ok(FilterOptions {
            brands,
            categories,
            regions,
            statuses,
            tags,
        })
    }

    async fn sales_by(
        &self,
        filters: &FilterParams,
        key: GroupKey,
        order: BucketOrder,
    ) -> ApiResult<Vec<SalesByGroup>> {
        let predicate = Predicate::build(filters);
        let buckets = self.store.aggregate(&predicate, key, order, None).await?;
        Ok(buckets.into_iter().map(SalesByGroup::from).collect())
    }
}
