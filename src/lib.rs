//! # salespulse
//!
//! A retail-transactions analytics service: filter-driven aggregate reports
//! over a flat transaction collection, served as JSON for a dashboard UI.
//!
//! ## Architecture
//!
//! - **Filter layer** ([`core::filter`]): collapses the two historical
//!   request vocabularies (legacy scalars, structured multi-selects) into
//!   one normalized [`Predicate`](core::filter::Predicate) with the
//!   precedence rules resolved once at construction.
//! - **Store** ([`store`]): the [`TransactionStore`](store::TransactionStore)
//!   trait — filtered counts, sorted/paginated retrieval, grouped
//!   aggregation, distinct values — with an in-memory implementation.
//! - **Reports** ([`reports`]): eight read-only report shapes plus the
//!   filter-options query, every one a pure function of (predicate, extras).
//! - **Server** ([`server`]): the Axum REST exposure, one GET route per
//!   report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salespulse::prelude::*;
//!
//! let store: Arc<dyn TransactionStore> = Arc::new(InMemoryTransactionStore::new());
//! let state = AppState::new(store);
//! salespulse::server::serve(state, "0.0.0.0:5000").await?;
//! ```

pub mod config;
pub mod core;
pub mod loader;
pub mod reports;
pub mod server;
pub mod store;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core types ===
    pub use crate::core::{
        error::{ApiError, ApiResult, ConfigError, StoreError},
        filter::{FilterParams, MultiParam, Predicate, RangeParam},
        query::{ListParams, SortSpec, TransactionPage},
        transaction::Transaction,
    };

    // === Store ===
    pub use crate::store::{
        BucketOrder, DistinctField, GroupBucket, GroupKey, InMemoryTransactionStore,
        SalesSummary, TransactionStore,
    };

    // === Reports ===
    pub use crate::reports::{
        FilterOptions, ReportService, SalesByGroup, TopProduct, TrendPoint,
    };

    // === Server ===
    pub use crate::server::{build_router, AppState};

    // === Config ===
    pub use crate::config::AppConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
