//! HTTP handlers for the report endpoints
//!
//! Each handler is a thin translation layer: extract the filter parameters
//! (and per-report extras) from the query string, call the report service,
//! return JSON. Failures become the typed API error response; each report
//! endpoint fails independently, so one broken chart never takes down the
//! rest of a dashboard fan-out.

use crate::core::error::ApiError;
use crate::core::filter::FilterParams;
use crate::core::query::{ListParams, TransactionPage};
use crate::reports::{FilterOptions, SalesByGroup, TopProduct, TrendPoint};
use crate::server::AppState;
use crate::store::SalesSummary;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

/// Extra parameters for the top-products report
///
/// `limit` is parsed permissively like the pagination parameters: junk
/// falls back to the default of 10.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopProductsParams {
    pub limit: Option<String>,
}

impl TopProductsParams {
    fn limit(&self) -> Option<usize> {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|v| *v > 0)
    }
}

/// GET /api/transactions — paginated transaction list
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
    Query(params): Query<ListParams>,
) -> Result<Json<TransactionPage>, ApiError> {
    Ok(Json(state.reports.list(&filters, &params).await?))
}

/// GET /api/overview — KPI summary stats
pub async fn overview(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
) -> Result<Json<SalesSummary>, ApiError> {
    Ok(Json(state.reports.overview(&filters).await?))
}

/// GET /api/category-sales — sales per product category
pub async fn category_sales(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
) -> Result<Json<Vec<SalesByGroup>>, ApiError> {
    Ok(Json(state.reports.category_sales(&filters).await?))
}

/// GET /api/sales-trends — monthly sales trend
pub async fn sales_trends(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    Ok(Json(state.reports.sales_trends(&filters).await?))
}

/// GET /api/top-products — best sellers, truncated to `limit`
pub async fn top_products(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
    Query(params): Query<TopProductsParams>,
) -> Result<Json<Vec<TopProduct>>, ApiError> {
    Ok(Json(
        state.reports.top_products(&filters, params.limit()).await?,
    ))
}

/// GET /api/brand-sales — sales per brand
pub async fn brand_sales(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
) -> Result<Json<Vec<SalesByGroup>>, ApiError> {
    Ok(Json(state.reports.brand_sales(&filters).await?))
}

/// GET /api/region-sales — sales per customer region
pub async fn region_sales(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
) -> Result<Json<Vec<SalesByGroup>>, ApiError> {
    Ok(Json(state.reports.region_sales(&filters).await?))
}

/// GET /api/payment-methods — payment method distribution
pub async fn payment_methods(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
) -> Result<Json<Vec<SalesByGroup>>, ApiError> {
    Ok(Json(state.reports.payment_methods(&filters).await?))
}

/// GET /api/order-status — order status distribution
pub async fn order_status(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
) -> Result<Json<Vec<SalesByGroup>>, ApiError> {
    Ok(Json(state.reports.order_status(&filters).await?))
}

/// GET /api/filters — available filter options
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, ApiError> {
    Ok(Json(state.reports.filter_options().await?))
}
