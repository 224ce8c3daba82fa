//! Filter construction: raw request parameters into a normalized predicate
//!
//! Filter parameters arrive in two historical shapes: a legacy flat vocabulary
//! (`startDate`/`endDate`, single-valued `region`, `category`, ...) and the
//! structured vocabulary the dashboard sends today (`dateRange`, plural
//! multi-select sets, `ageRange`). Both collapse here into one [`Predicate`]
//! with the precedence rules resolved once, at construction:
//!
//! 1. `dateRange` overwrites the legacy `startDate`/`endDate` pair.
//! 2. Plural sets win over their legacy scalar counterparts; the scalar is
//!    applied only when the plural parameter was not sent at all.
//! 3. `brand` and `status` have no plural counterpart and always apply.
//!
//! Parsing is deliberately permissive: malformed JSON-encoded parameters,
//! unparseable dates and non-numeric age bounds all degrade to "constraint
//! absent" rather than an error. A zero or empty range bound is also dropped
//! entirely; downstream consumers rely on this exact behavior, so an
//! `ageRange` of `{min: 0, max: 50}` applies no lower bound.

use crate::core::transaction::Transaction;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// A multi-select parameter: native array or JSON-encoded array string
///
/// Query strings can only carry strings, so the dashboard sends
/// `regions=["North","South"]`; structured callers (tests, non-HTTP
/// embedding) pass the array directly. Both decode to the same value set.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MultiParam {
    /// Native array of values
    Values(Vec<String>),
    /// JSON-encoded array, e.g. `["North","South"]`
    Encoded(String),
}

impl MultiParam {
    /// Decode into the allowed-value set
    ///
    /// Malformed JSON degrades to an empty set, i.e. no constraint.
    pub fn values(&self) -> Vec<String> {
        match self {
            MultiParam::Values(v) => v.clone(),
            MultiParam::Encoded(s) => serde_json::from_str(s).unwrap_or_default(),
        }
    }
}

/// A range parameter: native object or JSON-encoded object string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RangeParam<T> {
    /// Native object form
    Object(T),
    /// JSON-encoded object, e.g. `{"start":"2024-01-01","end":"2024-02-01"}`
    Encoded(String),
}

impl<T: DeserializeOwned + Clone> RangeParam<T> {
    /// Decode the range object; malformed JSON degrades to `None`
    pub fn decode(&self) -> Option<T> {
        match self {
            RangeParam::Object(t) => Some(t.clone()),
            RangeParam::Encoded(s) => serde_json::from_str(s).ok(),
        }
    }
}

/// Bounds of a structured `dateRange` parameter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DateBounds {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Bounds of an `ageRange` parameter
///
/// Bounds are kept as raw JSON values because callers send both numbers
/// and numeric strings; coercion happens during predicate construction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgeBounds {
    pub min: Option<Value>,
    pub max: Option<Value>,
}

/// Raw filter parameters as they arrive with a report request
///
/// Every field is optional and independently applied. The struct
/// deserializes both from a query string (where every value is a string)
/// and from structured JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterParams {
    // Legacy date pair
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Structured date range; takes precedence over the legacy pair
    pub date_range: Option<RangeParam<DateBounds>>,

    // Multi-select sets
    pub regions: Option<MultiParam>,
    pub genders: Option<MultiParam>,
    pub categories: Option<MultiParam>,
    pub payment_methods: Option<MultiParam>,
    pub tags: Option<MultiParam>,

    pub age_range: Option<RangeParam<AgeBounds>>,

    // Legacy single-valued filters
    pub brand: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
    pub payment_method: Option<String>,
}

/// Normalized, request-scoped predicate over transactions
///
/// Constructed once per request from [`FilterParams`], consumed by one
/// store query, then discarded. Construction guarantees the precedence
/// rules, so a legacy scalar and its plural set are never both populated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,

    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub tags: Vec<String>,

    pub age_min: Option<i64>,
    pub age_max: Option<i64>,

    /// Case-insensitive substring over customer name OR phone number
    pub search: Option<String>,

    // Legacy equality filters
    pub brand: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
    pub payment_method: Option<String>,
}

impl Predicate {
    /// Build a predicate from raw filter parameters
    pub fn build(params: &FilterParams) -> Self {
        let mut predicate = Predicate::default();

        // Legacy date pair first, then the structured range overwrites it
        // wholesale when either of its bounds is set (last writer wins).
        if let Some(start) = non_empty(params.start_date.as_deref()) {
            predicate.date_from = parse_date_bound(start);
        }
        if let Some(end) = non_empty(params.end_date.as_deref()) {
            predicate.date_to = parse_date_bound(end);
        }
        if let Some(bounds) = params.date_range.as_ref().and_then(RangeParam::decode) {
            let start = non_empty(bounds.start.as_deref());
            let end = non_empty(bounds.end.as_deref());
            if start.is_some() || end.is_some() {
                predicate.date_from = start.and_then(parse_date_bound);
                predicate.date_to = end.and_then(parse_date_bound);
            }
        }

        predicate.regions = decode_set(params.regions.as_ref());
        predicate.genders = decode_set(params.genders.as_ref());
        predicate.categories = decode_set(params.categories.as_ref());
        predicate.payment_methods = decode_set(params.payment_methods.as_ref());
        predicate.tags = decode_set(params.tags.as_ref());

        if let Some(bounds) = params.age_range.as_ref().and_then(RangeParam::decode) {
            // Zero bounds are dropped, not applied (compatibility quirk).
            predicate.age_min = coerce_bound(bounds.min.as_ref()).filter(|v| *v != 0);
            predicate.age_max = coerce_bound(bounds.max.as_ref()).filter(|v| *v != 0);
        }

        // Legacy scalars are skipped whenever the plural parameter was sent,
        // even if it decoded to an empty set.
        predicate.brand = non_empty_owned(params.brand.as_deref());
        predicate.status = non_empty_owned(params.status.as_deref());
        if params.categories.is_none() {
            predicate.category = non_empty_owned(params.category.as_deref());
        }
        if params.regions.is_none() {
            predicate.region = non_empty_owned(params.region.as_deref());
        }
        if params.genders.is_none() {
            predicate.gender = non_empty_owned(params.gender.as_deref());
        }
        if params.payment_methods.is_none() {
            predicate.payment_method = non_empty_owned(params.payment_method.as_deref());
        }

        predicate
    }

    /// Attach a free-text search clause (customer name OR phone number)
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = non_empty_owned(search.map(str::trim));
        self
    }

    /// Whether the predicate constrains anything at all
    pub fn is_empty(&self) -> bool {
        *self == Predicate::default()
    }

    /// Evaluate the predicate against a single transaction
    ///
    /// This is the membership test the in-memory store runs per row; every
    /// populated constraint must hold.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(from) = self.date_from {
            if tx.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if tx.date > to {
                return false;
            }
        }

        if !self.regions.is_empty() && !self.regions.contains(&tx.customer_region) {
            return false;
        }
        if !self.genders.is_empty() && !self.genders.contains(&tx.gender) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&tx.product_category) {
            return false;
        }
        if !self.payment_methods.is_empty() && !self.payment_methods.contains(&tx.payment_method) {
            return false;
        }
        // Tag sets intersect: any shared tag qualifies the row.
        if !self.tags.is_empty() && !tx.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        if let Some(min) = self.age_min {
            if tx.age < min {
                return false;
            }
        }
        if let Some(max) = self.age_max {
            if tx.age > max {
                return false;
            }
        }

        if let Some(brand) = &self.brand {
            if &tx.brand != brand {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &tx.product_category != category {
                return false;
            }
        }
        if let Some(region) = &self.region {
            if &tx.customer_region != region {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &tx.order_status != status {
                return false;
            }
        }
        if let Some(gender) = &self.gender {
            if &tx.gender != gender {
                return false;
            }
        }
        if let Some(method) = &self.payment_method {
            if &tx.payment_method != method {
                return false;
            }
        }

        if let Some(query) = &self.search {
            let query = query.to_lowercase();
            let name_hit = tx.customer_name.to_lowercase().contains(&query);
            let phone_hit = tx.phone_number.to_lowercase().contains(&query);
            if !name_hit && !phone_hit {
                return false;
            }
        }

        true
    }
}

fn decode_set(param: Option<&MultiParam>) -> Vec<String> {
    param.map(MultiParam::values).unwrap_or_default()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn non_empty_owned(value: Option<&str>) -> Option<String> {
    non_empty(value).map(String::from)
}

/// Parse a date bound: RFC 3339 or a plain calendar date at midnight UTC
///
/// Anything else degrades to an open bound.
fn parse_date_bound(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = s.parse::<NaiveDate>() {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    None
}

/// Coerce an age bound to an integer: numbers directly, numeric strings parsed
fn coerce_bound(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}
