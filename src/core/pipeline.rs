//! The filter → sort → paginate pipeline
//!
//! A [`Pipeline`] is the generic engine both collection screens share. It is
//! parameterized over a list of facets and a comparator registry, and holds
//! no state between invocations: every method is a pure function of its
//! inputs.

use crate::core::criteria::FilterCriteria;
use crate::core::error::{ConfigError, QueryError};
use crate::core::facet::{self, Facet};
use crate::core::pagination::{DEFAULT_PAGE_SIZE, Page, PageState, paginate};
use crate::core::record::Record;
use crate::core::sort::{self, SortField, SortRegistry, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The screen-owned state triple: criteria, sort and page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
    pub page: PageState,
}

/// Shared filtering, sorting and pagination engine
pub struct Pipeline<T> {
    facets: Vec<Facet<T>>,
    sorters: SortRegistry<T>,
    default_sort: SortSpec,
    page_size: usize,
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            facets: self.facets.clone(),
            sorters: self.sorters.clone(),
            default_sort: self.default_sort,
            page_size: self.page_size,
        }
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("facets", &self.facets)
            .field("sorters", &self.sorters)
            .field("default_sort", &self.default_sort)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl<T: Record + 'static> Pipeline<T> {
    pub fn builder() -> PipelineBuilder<T> {
        PipelineBuilder::new()
    }
}

impl<T: Record> Pipeline<T> {
    pub fn facets(&self) -> &[Facet<T>] {
        &self.facets
    }

    pub fn sorters(&self) -> &SortRegistry<T> {
        &self.sorters
    }

    pub fn default_sort(&self) -> SortSpec {
        self.default_sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Default criteria, default sort, first page
    pub fn initial_state(&self) -> QueryState {
        QueryState {
            criteria: FilterCriteria::default(),
            sort: self.default_sort,
            page: PageState::first(self.page_size),
        }
    }

    /// Check that `spec` names a field this pipeline can sort by
    pub fn validate_sort(&self, spec: &SortSpec) -> Result<(), ConfigError> {
        if self.sorters.contains(spec.field) {
            Ok(())
        } else {
            Err(ConfigError::UnsortableField {
                field: spec.field.to_string(),
            })
        }
    }

    /// Whether a single record passes every facet
    pub fn matches(&self, item: &T, criteria: &FilterCriteria) -> bool {
        facet::matches_all(&self.facets, item, criteria)
    }

    /// Filter stage
    ///
    /// Keeps the relative order of surviving records and accepts any
    /// iterator of references, so an already-filtered list can be filtered
    /// again.
    pub fn filter<'a, I>(&self, items: I, criteria: &FilterCriteria) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let filtered: Vec<&'a T> = items
            .into_iter()
            .filter(|item| self.matches(item, criteria))
            .collect();
        tracing::trace!(matching = filtered.len(), "filter stage complete");
        filtered
    }

    /// Sort stage
    ///
    /// Returns a new, stably sorted sequence; the input is not touched.
    pub fn sort<'a, I>(&self, items: I, spec: &SortSpec) -> Result<Vec<&'a T>, QueryError>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let compare = self.comparator(spec.field)?;
        let mut sorted: Vec<&'a T> = items.into_iter().collect();
        sort::sort_with(&mut sorted, |item| *item, compare, spec.direction);
        tracing::trace!(field = %spec.field, count = sorted.len(), "sort stage complete");
        Ok(sorted)
    }

    /// Run filter → sort → paginate as one pass
    ///
    /// The returned metadata carries the clamped page index; callers holding
    /// a [`QueryState`] should persist it.
    pub fn run<'a>(&self, items: &'a [T], state: &QueryState) -> Result<Page<&'a T>, QueryError> {
        let filtered = self.filter(items, &state.criteria);
        let sorted = self.sort(filtered, &state.sort)?;
        let page = paginate(&sorted, state.page);
        tracing::debug!(
            total = items.len(),
            matching = page.pagination.total_count,
            page_index = page.pagination.page_index,
            page_count = page.pagination.page_count,
            "collection recomputed"
        );
        Ok(page)
    }

    /// Indices into `items` of the filtered, sorted result
    pub(crate) fn ordered_indices(
        &self,
        items: &[T],
        criteria: &FilterCriteria,
        spec: &SortSpec,
    ) -> Result<Vec<usize>, QueryError> {
        let compare = self.comparator(spec.field)?;
        let mut indices: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(item, criteria))
            .map(|(index, _)| index)
            .collect();
        sort::sort_with(&mut indices, |index| &items[*index], compare, spec.direction);
        Ok(indices)
    }

    fn comparator(&self, field: SortField) -> Result<&sort::Comparator<T>, QueryError> {
        self.sorters.get(field).ok_or_else(|| {
            ConfigError::UnsortableField {
                field: field.to_string(),
            }
            .into()
        })
    }
}

/// Builder for [`Pipeline`]
pub struct PipelineBuilder<T> {
    facets: Vec<Facet<T>>,
    sorters: SortRegistry<T>,
    default_sort: SortSpec,
    page_size: usize,
}

impl<T: Record + 'static> PipelineBuilder<T> {
    pub fn new() -> Self {
        Self {
            facets: Vec::new(),
            sorters: SortRegistry::new(),
            default_sort: SortSpec::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Append a facet; facets are ANDed in registration order
    pub fn facet(mut self, facet: Facet<T>) -> Self {
        self.facets.push(facet);
        self
    }

    /// Make `field` sortable with the comparator matching its kind
    pub fn sortable(mut self, field: SortField) -> Self {
        self.sorters = self.sorters.field(field);
        self
    }

    /// Replace the comparator registry
    pub fn sorters(mut self, sorters: SortRegistry<T>) -> Self {
        self.sorters = sorters;
        self
    }

    pub fn default_sort(mut self, spec: SortSpec) -> Self {
        self.default_sort = spec;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Validate and build the pipeline
    pub fn build(self) -> Result<Pipeline<T>, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize { size: 0 });
        }

        let mut seen = HashSet::new();
        for facet in &self.facets {
            if !seen.insert(facet.name()) {
                return Err(ConfigError::DuplicateFacet {
                    name: facet.name().to_string(),
                });
            }
        }

        if !self.sorters.contains(self.default_sort.field) {
            return Err(ConfigError::UnsortableField {
                field: self.default_sort.field.to_string(),
            });
        }

        Ok(Pipeline {
            facets: self.facets,
            sorters: self.sorters,
            default_sort: self.default_sort,
            page_size: self.page_size,
        })
    }
}

impl<T: Record + 'static> Default for PipelineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
