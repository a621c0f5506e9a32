//! Facet predicates for the filter stage
//!
//! A facet is one independently-toggleable filtering dimension. Facets are
//! combined with AND; multi-valued facets match when ANY selected value
//! matches. An inactive facet (nothing selected) always passes.

use crate::core::criteria::FilterCriteria;
use crate::core::record::Record;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

type Activation = Arc<dyn Fn(&FilterCriteria) -> bool + Send + Sync>;
type Predicate<T> = Arc<dyn Fn(&T, &FilterCriteria) -> bool + Send + Sync>;

/// A named predicate over records, gated by whether the criteria use it
pub struct Facet<T> {
    name: String,
    active: Activation,
    predicate: Predicate<T>,
}

impl<T> Facet<T> {
    /// Create a custom facet
    ///
    /// `predicate` is only consulted while `active` returns true.
    pub fn new<A, P>(name: impl Into<String>, active: A, predicate: P) -> Self
    where
        A: Fn(&FilterCriteria) -> bool + Send + Sync + 'static,
        P: Fn(&T, &FilterCriteria) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            active: Arc::new(active),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the criteria constrain this facet at all
    pub fn is_active(&self, criteria: &FilterCriteria) -> bool {
        (self.active)(criteria)
    }

    /// Evaluate the facet; inactive facets always pass
    pub fn matches(&self, item: &T, criteria: &FilterCriteria) -> bool {
        !self.is_active(criteria) || (self.predicate)(item, criteria)
    }
}

impl<T> Clone for Facet<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            active: Arc::clone(&self.active),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facet").field("name", &self.name).finish()
    }
}

/// Which multi-select set of [`FilterCriteria`] a facet reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Categories,
    Brands,
    Variants,
}

impl Selection {
    fn values(self, criteria: &FilterCriteria) -> &BTreeSet<String> {
        match self {
            Selection::Categories => &criteria.categories,
            Selection::Brands => &criteria.brands,
            Selection::Variants => &criteria.variants,
        }
    }
}

/// Multi-select checkbox facet over a text field
///
/// Passes when the item's `field` equals any selected value.
pub fn any_of<T: Record + 'static>(
    name: impl Into<String>,
    field: impl Into<String>,
    selection: Selection,
) -> Facet<T> {
    let field = field.into();
    Facet::new(
        name,
        move |criteria| !selection.values(criteria).is_empty(),
        move |item: &T, criteria| {
            item.field_value(&field)
                .and_then(|value| value.as_text())
                .is_some_and(|value| selection.values(criteria).contains(value))
        },
    )
}

/// Multi-select facet over a variant attribute (e.g. capacity)
///
/// Passes when any variant in the item's variant list carries one of the
/// selected values.
pub fn variant_any<T: Record + 'static>(attribute: impl Into<String>) -> Facet<T> {
    let attribute = attribute.into();
    Facet::new(
        format!("variant:{attribute}"),
        |criteria| !criteria.variants.is_empty(),
        move |item: &T, criteria| {
            item.variants().into_iter().any(|variant| {
                variant
                    .attribute(&attribute)
                    .is_some_and(|value| criteria.variants.contains(value))
            })
        },
    )
}

/// Inclusive price range facet over the `price` field
pub fn price_range<T: Record + 'static>() -> Facet<T> {
    Facet::new(
        "price",
        |criteria| criteria.price.is_some(),
        |item: &T, criteria| {
            let Some(range) = criteria.price else {
                return true;
            };
            item.field_value("price")
                .and_then(|value| value.as_number())
                .is_some_and(|price| range.contains(price))
        },
    )
}

/// Case-insensitive substring search over one or more text fields
pub fn search<T, I, S>(fields: I) -> Facet<T>
where
    T: Record + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
    Facet::new(
        "search",
        |criteria| criteria.search.as_deref().is_some_and(|t| !t.trim().is_empty()),
        move |item: &T, criteria| {
            let Some(token) = criteria.search.as_deref() else {
                return true;
            };
            let needle = token.trim().to_lowercase();
            fields.iter().any(|field| {
                item.field_value(field)
                    .is_some_and(|value| value.contains_folded(&needle))
            })
        },
    )
}

/// Exact-match dropdown facet: the item's `field` must equal the selector
pub fn exact<T: Record + 'static>(field: impl Into<String>) -> Facet<T> {
    let field = field.into();
    let key = field.clone();
    Facet::new(
        format!("exact:{field}"),
        move |criteria| criteria.selector(&key).is_some(),
        move |item: &T, criteria| {
            let Some(expected) = criteria.selector(&field) else {
                return true;
            };
            item.field_value(&field)
                .is_some_and(|value| value.equals(expected))
        },
    )
}

/// Exact-match dropdown facet over a variant attribute
///
/// The selector is keyed by the attribute name (e.g. `capacity`).
pub fn variant_exact<T: Record + 'static>(attribute: impl Into<String>) -> Facet<T> {
    let attribute = attribute.into();
    let key = attribute.clone();
    Facet::new(
        format!("exact:{attribute}"),
        move |criteria| criteria.selector(&key).is_some(),
        move |item: &T, criteria| {
            let Some(expected) = criteria.selector(&attribute) else {
                return true;
            };
            item.variants()
                .into_iter()
                .any(|variant| variant.attribute(&attribute) == Some(expected))
        },
    )
}

/// Distinct values of a text field with their counts, in first-seen order
///
/// Used to populate the checkbox lists of the catalog sidebar.
pub fn facet_counts<T: Record>(items: &[T], field: &str) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for value in items
        .iter()
        .filter_map(|item| item.field_value(field))
        .filter_map(|value| value.as_text())
    {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// AND across all facets
pub(crate) fn matches_all<T>(facets: &[Facet<T>], item: &T, criteria: &FilterCriteria) -> bool {
    facets.iter().all(|facet| facet.matches(item, criteria))
}
