//! Listing parameters and pagination types
//!
//! The listing endpoint accepts pagination, sorting and free-text search
//! alongside the filter parameters. All values are parsed permissively:
//! an absent or unparseable page/limit falls back to the default instead
//! of rejecting the request.

use crate::core::transaction::Transaction;
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// Pagination, sorting and search parameters for the transaction list
///
/// # Example
/// ```text
/// GET /api/transactions?page=2&limit=25&sort=finalAmount&order=desc&search=asha
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Page number (starts at 1); kept as a raw string so junk degrades
    /// to the default instead of a 400
    pub page: Option<String>,

    /// Rows per page
    pub limit: Option<String>,

    /// Sort field, by wire name (e.g. `customerName`, `finalAmount`)
    pub sort: Option<String>,

    /// Sort direction: `desc` for descending, anything else ascending
    pub order: Option<String>,

    /// Free-text search over customer name and phone number
    pub search: Option<String>,
}

impl ListParams {
    /// Page number, defaulting to 1 on absent/invalid/non-positive input
    pub fn page(&self) -> usize {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    /// Rows per page, defaulting to 10 on absent/invalid/non-positive input
    pub fn limit(&self) -> usize {
        parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }

    /// Resolved sort specification
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            field: self
                .sort
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "customerName".to_string()),
            descending: self.order.as_deref() == Some("desc"),
        }
    }
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

/// A resolved sort field and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: "customerName".to_string(),
            descending: false,
        }
    }
}

/// One page of the transaction list
///
/// Totals come from a count query over the same predicate, so a page past
/// the end returns an empty row set with correct totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_transactions: u64,
}

impl TransactionPage {
    /// Assemble a page; `total_pages` is the ceiling of total over limit
    pub fn new(transactions: Vec<Transaction>, page: usize, limit: usize, total: u64) -> Self {
        let limit = limit.max(1) as u64;
        Self {
            transactions,
            current_page: page,
            total_pages: total.div_ceil(limit) as usize,
            total_transactions: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ListParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.sort_spec(), SortSpec::default());
    }

    #[test]
    fn test_invalid_page_and_limit_fall_back() {
        let params = ListParams {
            page: Some("zero-ish".to_string()),
            limit: Some("-3".to_string()),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_zero_page_falls_back() {
        let params = ListParams {
            page: Some("0".to_string()),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_explicit_values_parse() {
        let params = ListParams {
            page: Some("3".to_string()),
            limit: Some("25".to_string()),
            sort: Some("finalAmount".to_string()),
            order: Some("desc".to_string()),
            search: None,
        };
        assert_eq!(params.page(), 3);
        assert_eq!(params.limit(), 25);
        let spec = params.sort_spec();
        assert_eq!(spec.field, "finalAmount");
        assert!(spec.descending);
    }

    #[test]
    fn test_non_desc_order_is_ascending() {
        let params = ListParams {
            order: Some("ascending".to_string()),
            ..Default::default()
        };
        assert!(!params.sort_spec().descending);
    }

    #[test]
    fn test_page_math() {
        let page = TransactionPage::new(vec![], 1, 10, 145);
        assert_eq!(page.total_pages, 15);
        assert_eq!(page.total_transactions, 145);

        let empty = TransactionPage::new(vec![], 1, 10, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
