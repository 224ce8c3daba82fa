//! REST exposure for the analytics reports
//!
//! This module is the only transport-aware part of the crate: it wires the
//! report service into an Axum router and serves it. The report layer knows
//! nothing about HTTP; handlers translate query parameters in and typed
//! errors out.

pub mod handlers;

use crate::reports::ReportService;
use crate::store::TransactionStore;
use anyhow::Result;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportService>,
}

impl AppState {
    /// Build state over the given store handle
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self {
            reports: Arc::new(ReportService::new(store)),
        }
    }
}

/// Build the full application router
///
/// One GET route per report under `/api`, plus health checks. The dashboard
/// is served from another origin, so CORS is permissive; request tracing
/// covers every route.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/transactions", get(handlers::list_transactions))
        .route("/overview", get(handlers::overview))
        .route("/category-sales", get(handlers::category_sales))
        .route("/sales-trends", get(handlers::sales_trends))
        .route("/top-products", get(handlers::top_products))
        .route("/brand-sales", get(handlers::brand_sales))
        .route("/region-sales", get(handlers::region_sales))
        .route("/payment-methods", get(handlers::payment_methods))
        .route("/order-status", get(handlers::order_status))
        .route("/filters", get(handlers::filter_options))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "service": "salespulse"
    }))
}

/// Serve the application with graceful shutdown
///
/// Binds the address, serves requests, and handles SIGTERM and Ctrl+C.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
