//! Core types: the transaction record, filter construction and errors

pub mod error;
pub mod field;
pub mod filter;
pub mod query;
pub mod transaction;

pub use error::{ApiError, ApiResult, ConfigError, StoreError};
pub use field::FieldValue;
pub use filter::{FilterParams, MultiParam, Predicate, RangeParam};
pub use query::{ListParams, SortSpec, TransactionPage};
pub use transaction::Transaction;
