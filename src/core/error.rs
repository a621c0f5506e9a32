//! Typed error handling for the storefront query engine
//!
//! The engine itself handles almost every edge case by policy (null-safe
//! facets, page clamping, range clamping). What remains are configuration
//! mistakes made when a pipeline is assembled and malformed criteria coming
//! from user input.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: a pipeline or configuration file is inconsistent
//! - [`CriteriaError`]: criteria supplied by a caller cannot be interpreted
//!
//! # Example
//!
//! ```rust,ignore
//! match view.set_sort(SortSpec::desc(SortField::Stock)) {
//!     Ok(()) => {}
//!     Err(QueryError::Config(ConfigError::UnsortableField { field })) => {
//!         println!("column {} is not sortable here", field);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for the query engine
#[derive(Debug, Error)]
pub enum QueryError {
    /// Pipeline or configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Caller supplied criteria that cannot be interpreted
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
}

impl QueryError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::Config(e) => e.error_code(),
            QueryError::Criteria(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while assembling a pipeline or loading its configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A sort was requested on a field with no registered comparator
    #[error("Field '{field}' is not sortable in this collection")]
    UnsortableField { field: String },

    /// Two facets were registered under the same name
    #[error("Facet '{name}' is registered twice")]
    DuplicateFacet { name: String },

    /// Page size must be strictly positive
    #[error("Invalid page size {size}: must be at least 1")]
    InvalidPageSize { size: usize },

    /// Price ceiling must be a finite, positive number
    #[error("Invalid price ceiling {value}: must be finite and positive")]
    InvalidPriceCeiling { value: f64 },

    /// A configuration value could not be parsed
    #[error("Invalid configuration: {message}")]
    Parse { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::UnsortableField { .. } => "UNSORTABLE_FIELD",
            ConfigError::DuplicateFacet { .. } => "DUPLICATE_FACET",
            ConfigError::InvalidPageSize { .. } => "INVALID_PAGE_SIZE",
            ConfigError::InvalidPriceCeiling { .. } => "INVALID_PRICE_CEILING",
            ConfigError::Parse { .. } => "CONFIG_PARSE_ERROR",
        }
    }
}

// =============================================================================
// Criteria Errors
// =============================================================================

/// Errors related to user-supplied filter and sort criteria
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    /// Lower bound is above upper bound
    #[error("Price range is inverted: min {min} > max {max}")]
    InvertedRange { min: f64, max: f64 },

    /// A bound lies outside `[0, ceiling]`
    #[error("Price {value} is outside the allowed range [0, {ceiling}]")]
    OutOfDomain { value: f64, ceiling: f64 },

    /// A bound is not a number
    #[error("Price bound is not a number")]
    InvalidPrice,

    /// Sort field name is not one of the sortable fields
    #[error("Unknown sort field: {name}")]
    UnknownSortField { name: String },

    /// Sort direction is neither `asc` nor `desc`
    #[error("Unknown sort direction: {direction}")]
    UnknownDirection { direction: String },

    /// Filter expression could not be interpreted
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },
}

impl CriteriaError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CriteriaError::InvertedRange { .. } => "INVERTED_PRICE_RANGE",
            CriteriaError::OutOfDomain { .. } => "PRICE_OUT_OF_DOMAIN",
            CriteriaError::InvalidPrice => "INVALID_PRICE",
            CriteriaError::UnknownSortField { .. } => "UNKNOWN_SORT_FIELD",
            CriteriaError::UnknownDirection { .. } => "UNKNOWN_SORT_DIRECTION",
            CriteriaError::InvalidFilter { .. } => "INVALID_FILTER",
        }
    }
}

/// Result alias used throughout the engine
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnsortableField {
            field: "stock".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Field 'stock' is not sortable in this collection"
        );
        assert_eq!(err.error_code(), "UNSORTABLE_FIELD");
    }

    #[test]
    fn test_query_error_delegates_code_and_message() {
        let err: QueryError = CriteriaError::InvertedRange {
            min: 30.0,
            max: 10.0,
        }
        .into();
        assert_eq!(err.error_code(), "INVERTED_PRICE_RANGE");
        assert_eq!(err.to_string(), "Price range is inverted: min 30 > max 10");
    }

    #[test]
    fn test_query_error_from_config() {
        let err: QueryError = ConfigError::InvalidPageSize { size: 0 }.into();
        assert!(matches!(err, QueryError::Config(_)));
        assert_eq!(err.error_code(), "INVALID_PAGE_SIZE");
    }
}
