//! Sort specification and comparator registry

use crate::core::error::CriteriaError;
use crate::core::record::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// How values of a sortable field compare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
    Timestamp,
}

/// The closed set of sortable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Sku,
    Category,
    Brand,
    Status,
    Price,
    Stock,
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Name,
        SortField::Sku,
        SortField::Category,
        SortField::Brand,
        SortField::Status,
        SortField::Price,
        SortField::Stock,
        SortField::CreatedAt,
    ];

    /// The record field name this sort reads
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Sku => "sku",
            SortField::Category => "category",
            SortField::Brand => "brand",
            SortField::Status => "status",
            SortField::Price => "price",
            SortField::Stock => "stock",
            SortField::CreatedAt => "created_at",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            SortField::Price | SortField::Stock => FieldKind::Numeric,
            SortField::CreatedAt => FieldKind::Timestamp,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| CriteriaError::UnknownSortField {
                name: name.to_string(),
            })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CriteriaError::UnknownDirection {
                direction: other.to_string(),
            }),
        }
    }
}

/// One field plus a direction
///
/// # Format
/// - `field` or `field:asc` (ascending)
/// - `field:desc` (descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::asc(SortField::Name)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field, direction)
    }
}

impl FromStr for SortSpec {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, direction)) => Ok(Self::new(field.parse()?, direction.parse()?)),
            None => Ok(Self::asc(s.parse()?)),
        }
    }
}

/// An ascending comparator between two records
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Compare two strings the way a catalog reader expects
///
/// Accents and case are ignored first, so "Éclair" sorts between "Apple"
/// and "Zebra". Ties fall back to the case-folded text and then the raw
/// strings to keep the order total.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| a.cmp(b))
}

/// Canonical decomposition with combining marks stripped, lowercased
fn collation_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Registry mapping sortable fields to comparators
///
/// Each collection screen registers only the columns it can sort by;
/// sorting on anything else is a configuration error.
pub struct SortRegistry<T> {
    comparators: IndexMap<SortField, Comparator<T>>,
}

impl<T: Record + 'static> SortRegistry<T> {
    pub fn new() -> Self {
        Self {
            comparators: IndexMap::new(),
        }
    }

    /// Register a comparator derived from the field's kind
    pub fn field(self, field: SortField) -> Self {
        match field.kind() {
            FieldKind::Text => self.text(field),
            FieldKind::Numeric => self.numeric(field),
            FieldKind::Timestamp => self.timestamp(field),
        }
    }

    /// Register a text comparator reading `field`
    pub fn text(self, field: SortField) -> Self {
        let name = field.as_str();
        self.custom(field, move |a: &T, b: &T| {
            let a = a.field_value(name).and_then(|v| v.as_text());
            let b = b.field_value(name).and_then(|v| v.as_text());
            match (a, b) {
                (Some(a), Some(b)) => compare_text(a, b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            }
        })
    }

    /// Register a numeric comparator reading `field`
    pub fn numeric(self, field: SortField) -> Self {
        let name = field.as_str();
        self.custom(field, move |a: &T, b: &T| {
            let a = a.field_value(name).and_then(|v| v.as_number());
            let b = b.field_value(name).and_then(|v| v.as_number());
            match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            }
        })
    }

    /// Register a chronological comparator reading `field`
    pub fn timestamp(self, field: SortField) -> Self {
        let name = field.as_str();
        self.custom(field, move |a: &T, b: &T| {
            let a = a.field_value(name).and_then(|v| v.as_timestamp());
            let b = b.field_value(name).and_then(|v| v.as_timestamp());
            a.cmp(&b)
        })
    }

    /// Register an arbitrary ascending comparator
    pub fn custom<F>(mut self, field: SortField, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.comparators.insert(field, Arc::new(compare));
        self
    }
}

impl<T> SortRegistry<T> {
    pub fn get(&self, field: SortField) -> Option<&Comparator<T>> {
        self.comparators.get(&field)
    }

    pub fn contains(&self, field: SortField) -> bool {
        self.comparators.contains_key(&field)
    }
}

impl<T: Record + 'static> Default for SortRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SortRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            comparators: self.comparators.clone(),
        }
    }
}

impl<T> fmt::Debug for SortRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.comparators.keys()).finish()
    }
}

/// Stable in-place sort with a direction applied to the comparator
///
/// `slice::sort_by` is stable, and reversing the comparison result never
/// swaps equal elements, so ties keep their input order in both directions.
pub(crate) fn sort_with<'a, T: 'a, U, K>(
    items: &mut [U],
    key: K,
    compare: &Comparator<T>,
    direction: SortDirection,
) where
    K: Fn(&U) -> &'a T,
{
    items.sort_by(|a, b| direction.apply(compare(key(a), key(b))));
}
