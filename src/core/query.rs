//! Query parameters describing user input events

use crate::core::criteria::{FilterCriteria, PriceRange};
use crate::core::error::{CriteriaError, QueryError};
use crate::core::pagination::PageState;
use crate::core::pipeline::{Pipeline, QueryState};
use crate::core::record::Record;
use crate::core::sort::SortSpec;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Largest page size a caller may request
pub const MAX_LIMIT: usize = 100;

/// Query parameters for pagination, filtering and sorting
///
/// This mirrors how a collection screen encodes its state in a query
/// string, so a deep link or a browser back button can restore it.
///
/// # Example
/// ```text
/// GET /products?page=2&limit=10
/// GET /products?filter={"categories": ["Laptop bags"], "price<=": 2000}
/// GET /admin/products?filter={"status": "draft", "search": "bag"}&sort=stock:desc
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of items per page, the screen's page size when absent
    pub limit: Option<usize>,

    /// Filters as JSON object
    ///
    /// # Format
    /// - Multi-select: `{"categories": [...], "brands": [...], "variants": [...]}`
    /// - Price range: `{"price>=": 10, "price<=": 500}`
    /// - Search: `{"search": "bag"}`
    /// - Exact match: any other key, e.g. `{"status": "active", "capacity": "35L"}`
    pub filter: Option<String>,

    /// Sort field and direction
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub sort: Option<String>,
}

fn default_page() -> usize {
    1
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, falling back to `default` and capped at [`MAX_LIMIT`]
    pub fn limit(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }

    /// Parse filter JSON string into an object
    pub fn filter_value(&self) -> Result<Option<Map<String, Value>>, CriteriaError> {
        let Some(raw) = self.filter.as_deref() else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(CriteriaError::InvalidFilter {
                message: "filter must be a JSON object".to_string(),
            }),
            Err(e) => Err(CriteriaError::InvalidFilter {
                message: e.to_string(),
            }),
        }
    }

    /// Parse the filter into [`FilterCriteria`]
    ///
    /// Price bounds are clamped into `[0, price_ceiling]`.
    pub fn criteria(&self, price_ceiling: f64) -> Result<FilterCriteria, CriteriaError> {
        let mut criteria = FilterCriteria::default();
        let Some(filter) = self.filter_value()? else {
            return Ok(criteria);
        };

        let mut min = None;
        let mut max = None;

        for (key, value) in filter {
            match key.as_str() {
                "categories" => criteria.categories = string_set(&key, value)?,
                "brands" => criteria.brands = string_set(&key, value)?,
                "variants" => criteria.variants = string_set(&key, value)?,
                "price>=" => min = Some(number(&key, &value)?),
                "price<=" => max = Some(number(&key, &value)?),
                "search" => match value {
                    Value::String(token) => criteria.set_search(token),
                    Value::Null => {}
                    _ => return Err(invalid(&key, "expected a string")),
                },
                _ => match value {
                    Value::String(s) => criteria.select(key, s),
                    Value::Number(n) => criteria.select(key, n.to_string()),
                    Value::Bool(b) => criteria.select(key, b.to_string()),
                    Value::Null => {}
                    _ => return Err(invalid(&key, "expected a scalar value")),
                },
            }
        }

        if min.is_some() || max.is_some() {
            criteria.price = Some(PriceRange::clamped(
                min.unwrap_or(0.0),
                max.unwrap_or(price_ceiling),
                price_ceiling,
            ));
        }

        Ok(criteria)
    }

    /// Build the full [`QueryState`] for `pipeline`
    pub fn to_state<T: Record>(
        &self,
        pipeline: &Pipeline<T>,
        price_ceiling: f64,
    ) -> Result<QueryState, QueryError> {
        let sort = match self.sort.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<SortSpec>()?,
            _ => pipeline.default_sort(),
        };
        pipeline.validate_sort(&sort)?;

        Ok(QueryState {
            criteria: self.criteria(price_ceiling)?,
            sort,
            page: PageState::new(self.page(), self.limit(pipeline.page_size())),
        })
    }
}

fn invalid(key: &str, reason: &str) -> CriteriaError {
    CriteriaError::InvalidFilter {
        message: format!("'{key}': {reason}"),
    }
}

fn string_set(key: &str, value: Value) -> Result<BTreeSet<String>, CriteriaError> {
    match value {
        Value::Null => Ok(BTreeSet::new()),
        Value::String(s) => Ok(BTreeSet::from([s])),
        Value::Array(values) => values
            .into_iter()
            .map(|v| match v {
                Value::String(s) => Ok(s),
                _ => Err(invalid(key, "expected an array of strings")),
            })
            .collect(),
        _ => Err(invalid(key, "expected a string or an array of strings")),
    }
}

fn number(key: &str, value: &Value) -> Result<f64, CriteriaError> {
    value
        .as_f64()
        .ok_or_else(|| invalid(key, "expected a number"))
}
