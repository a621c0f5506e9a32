//! Filter criteria value objects

use crate::core::error::CriteriaError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Upper bound of the price slider when no configuration overrides it
pub const DEFAULT_PRICE_CEILING: f64 = 2000.0;

/// A closed price interval `[min, max]` with `0 <= min <= max <= ceiling`
///
/// Deserialized ranges go through [`PriceRange::try_new`]; the upper bound
/// is only checked against a screen's ceiling where that ceiling is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawPriceRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = CriteriaError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        Self::try_new(raw.min, raw.max, f64::MAX)
    }
}

impl PriceRange {
    /// Build a range, rejecting anything that breaks the interval invariant
    pub fn try_new(min: f64, max: f64, ceiling: f64) -> Result<Self, CriteriaError> {
        if min.is_nan() || max.is_nan() {
            return Err(CriteriaError::InvalidPrice);
        }
        for value in [min, max] {
            if !(0.0..=ceiling).contains(&value) {
                return Err(CriteriaError::OutOfDomain { value, ceiling });
            }
        }
        if min > max {
            return Err(CriteriaError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Build a range, clamping bounds into `[0, ceiling]`
    ///
    /// A NaN lower bound becomes 0, a NaN upper bound becomes the ceiling,
    /// and an inverted pair is swapped.
    pub fn clamped(min: f64, max: f64, ceiling: f64) -> Self {
        let ceiling = if ceiling.is_finite() && ceiling > 0.0 {
            ceiling
        } else {
            DEFAULT_PRICE_CEILING
        };
        let min = if min.is_nan() { 0.0 } else { min.clamp(0.0, ceiling) };
        let max = if max.is_nan() {
            ceiling
        } else {
            max.clamp(0.0, ceiling)
        };
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// The full `[0, ceiling]` range
    pub fn full(ceiling: f64) -> Self {
        Self::clamped(0.0, ceiling, ceiling)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Inclusive at both ends
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// The user-selected filter criteria of one collection screen
///
/// Every facet defaults to "no constraint": an empty selection set means the
/// facet is not filtering, not that everything is excluded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Multi-select category checkboxes
    #[serde(default)]
    pub categories: BTreeSet<String>,

    /// Multi-select variant facet values (e.g. capacities)
    #[serde(default)]
    pub variants: BTreeSet<String>,

    /// Multi-select brand checkboxes
    #[serde(default)]
    pub brands: BTreeSet<String>,

    /// Price slider, `None` when untouched
    #[serde(default)]
    pub price: Option<PriceRange>,

    /// Free-text search token
    #[serde(default)]
    pub search: Option<String>,

    /// Exact-match dropdown selectors (field -> value)
    #[serde(default)]
    pub selectors: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no facet constrains the collection
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.variants.is_empty()
            && self.brands.is_empty()
            && self.price.is_none()
            && self.search.is_none()
            && self.selectors.is_empty()
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    pub fn with_search(mut self, token: impl Into<String>) -> Self {
        self.set_search(token);
        self
    }

    pub fn with_selector(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.select(field, value);
        self
    }

    /// Checkbox toggle: add the category if absent, remove it if present
    pub fn toggle_category(&mut self, category: impl Into<String>) {
        toggle(&mut self.categories, category.into());
    }

    pub fn toggle_brand(&mut self, brand: impl Into<String>) {
        toggle(&mut self.brands, brand.into());
    }

    pub fn toggle_variant(&mut self, value: impl Into<String>) {
        toggle(&mut self.variants, value.into());
    }

    /// Set the search token; blank input clears the search
    pub fn set_search(&mut self, token: impl Into<String>) {
        let token = token.into();
        let trimmed = token.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Dropdown selection; an empty value means "All" and clears the selector
    pub fn select(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if value.is_empty() {
            self.selectors.remove(&field);
        } else {
            self.selectors.insert(field, value);
        }
    }

    pub fn clear_selector(&mut self, field: &str) {
        self.selectors.remove(field);
    }

    pub fn selector(&self, field: &str) -> Option<&str> {
        self.selectors.get(field).map(String::as_str)
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
