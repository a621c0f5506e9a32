//! Screen-owned collection view implementing the recomputation contract
//!
//! - a criteria or sort change re-runs filter and sort from the raw items and
//!   resets the page index to 1
//! - a page change only re-slices the memoized ordering
//! - a data refresh re-runs everything and clamps the current page index

use crate::core::criteria::FilterCriteria;
use crate::core::error::QueryError;
use crate::core::pagination::{Page, PageState, PaginationMeta, page_count};
use crate::core::pipeline::{Pipeline, QueryState};
use crate::core::record::Record;
use crate::core::service::ItemSource;
use crate::core::sort::{SortField, SortSpec};
use std::sync::Arc;

/// The browsing state of one collection screen
///
/// Owns a snapshot of the items, the [`QueryState`] triple and the filtered,
/// sorted ordering (as indices into the snapshot). Created when the screen
/// is entered and dropped with it.
#[derive(Debug)]
pub struct CollectionView<T> {
    pipeline: Arc<Pipeline<T>>,
    items: Vec<T>,
    state: QueryState,
    ordering: Vec<usize>,
}

impl<T: Record> CollectionView<T> {
    /// Enter the screen with default state and compute the first page
    pub fn new(pipeline: Arc<Pipeline<T>>, items: Vec<T>) -> Result<Self, QueryError> {
        let state = pipeline.initial_state();
        let mut view = Self {
            pipeline,
            items,
            state,
            ordering: Vec::new(),
        };
        view.recompute()?;
        Ok(view)
    }

    /// Enter the screen with a restored state, e.g. from a deep link
    ///
    /// The sort must be registered in `pipeline`; a page index past the end
    /// of the result is clamped.
    pub fn with_state(
        pipeline: Arc<Pipeline<T>>,
        items: Vec<T>,
        state: QueryState,
    ) -> Result<Self, QueryError> {
        pipeline.validate_sort(&state.sort)?;
        let page = PageState::new(state.page.page_index, state.page.page_size);
        let mut view = Self {
            pipeline,
            items,
            state: QueryState { page, ..state },
            ordering: Vec::new(),
        };
        view.recompute()?;
        Ok(view)
    }

    pub fn pipeline(&self) -> &Pipeline<T> {
        &self.pipeline
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.state.criteria
    }

    pub fn sort(&self) -> SortSpec {
        self.state.sort
    }

    /// Number of items passing the current criteria
    pub fn matching_count(&self) -> usize {
        self.ordering.len()
    }

    /// Every matching item in display order, across all pages
    pub fn matching(&self) -> impl Iterator<Item = &T> + '_ {
        self.ordering.iter().map(|index| &self.items[*index])
    }

    /// Replace the filter criteria
    ///
    /// Re-applying identical criteria is not a change and keeps the page.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<(), QueryError> {
        if criteria == self.state.criteria {
            return Ok(());
        }
        self.state.criteria = criteria;
        self.reset_and_recompute()
    }

    /// Edit the criteria in place, e.g. to toggle a checkbox
    pub fn update_criteria<F>(&mut self, edit: F) -> Result<(), QueryError>
    where
        F: FnOnce(&mut FilterCriteria),
    {
        let mut criteria = self.state.criteria.clone();
        edit(&mut criteria);
        self.set_criteria(criteria)
    }

    /// Replace the sort; fails when the field is not sortable here
    pub fn set_sort(&mut self, spec: SortSpec) -> Result<(), QueryError> {
        self.pipeline.validate_sort(&spec)?;
        if spec == self.state.sort {
            return Ok(());
        }
        self.state.sort = spec;
        self.reset_and_recompute()
    }

    /// Column header click: flip the active column, sort others ascending
    pub fn toggle_sort(&mut self, field: SortField) -> Result<(), QueryError> {
        let spec = if self.state.sort.field == field {
            SortSpec::new(field, self.state.sort.direction.reverse())
        } else {
            SortSpec::asc(field)
        };
        self.set_sort(spec)
    }

    /// Move to another page without re-filtering
    ///
    /// The index is clamped to `[1, page_count]` and persisted.
    pub fn set_page(&mut self, page_index: usize) {
        let last = page_count(self.ordering.len(), self.state.page.page_size);
        self.state.page.page_index = page_index.clamp(1, last);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.page.page_index.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.state.page.page_index.saturating_sub(1));
    }

    /// Swap in a freshly fetched collection
    ///
    /// The page index is kept where possible and clamped when the new
    /// collection has fewer pages.
    pub fn replace_items(&mut self, items: Vec<T>) -> Result<(), QueryError> {
        self.items = items;
        self.recompute()
    }

    /// Fetch from `source` and replace the snapshot
    pub async fn reload<S>(&mut self, source: &S) -> anyhow::Result<()>
    where
        S: ItemSource<T> + ?Sized,
        T: 'static,
    {
        let items = source.list().await?;
        self.replace_items(items)?;
        Ok(())
    }

    /// Current page metadata
    pub fn pagination(&self) -> PaginationMeta {
        PaginationMeta::new(
            self.state.page.page_index,
            self.state.page.page_size,
            self.ordering.len(),
        )
    }

    /// The visible page
    pub fn page(&self) -> Page<&T> {
        let pagination = self.pagination();
        let (start, end) = pagination.bounds();
        Page {
            items: self.ordering[start..end]
                .iter()
                .map(|index| &self.items[*index])
                .collect(),
            pagination,
        }
    }

    fn reset_and_recompute(&mut self) -> Result<(), QueryError> {
        self.state.page = PageState::first(self.state.page.page_size);
        self.recompute()
    }

    fn recompute(&mut self) -> Result<(), QueryError> {
        self.ordering =
            self.pipeline
                .ordered_indices(&self.items, &self.state.criteria, &self.state.sort)?;

        let last = page_count(self.ordering.len(), self.state.page.page_size);
        if self.state.page.page_index > last {
            tracing::debug!(
                stale = self.state.page.page_index,
                page_count = last,
                "clamping stale page index"
            );
            self.state.page.page_index = last;
        }

        tracing::debug!(
            total = self.items.len(),
            matching = self.ordering.len(),
            page_index = self.state.page.page_index,
            page_count = last,
            sort = %self.state.sort,
            "collection recomputed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::facet::{Selection, any_of, search};
    use crate::core::item::Item;

    fn view(count: usize) -> CollectionView<Item> {
        let pipeline = Pipeline::builder()
            .facet(any_of("category", "category", Selection::Categories))
            .facet(search(["name"]))
            .sortable(SortField::Name)
            .sortable(SortField::Price)
            .page_size(10)
            .build()
            .unwrap();
        let items = (0..count)
            .map(|i| {
                let category = if i % 5 == 0 { "Laptop bags" } else { "School bags" };
                Item::new(format!("Item {i:02}"), i as f64).with_category(category)
            })
            .collect();
        CollectionView::new(Arc::new(pipeline), items).unwrap()
    }

    #[test]
    fn test_new_view_starts_on_first_page() {
        let view = view(25);
        assert_eq!(view.state().page.page_index, 1);
        assert_eq!(view.pagination().page_count, 3);
        assert_eq!(view.page().items.len(), 10);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = view(25);
        view.set_page(3);
        assert_eq!(view.state().page.page_index, 3);

        view.update_criteria(|c| c.toggle_category("Laptop bags"))
            .unwrap();
        assert_eq!(view.state().page.page_index, 1);
        assert_eq!(view.matching_count(), 5);
        assert_eq!(view.pagination().page_count, 1);
    }

    #[test]
    fn test_identical_criteria_keep_page() {
        let mut view = view(25);
        view.set_page(2);
        let same = view.criteria().clone();
        view.set_criteria(same).unwrap();
        assert_eq!(view.state().page.page_index, 2);
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut view = view(25);
        view.set_page(2);
        view.set_sort(SortSpec::desc(SortField::Price)).unwrap();
        assert_eq!(view.state().page.page_index, 1);
        assert_eq!(view.page().items[0].name, "Item 24");
    }

    #[test]
    fn test_set_sort_rejects_unsortable_field() {
        let mut view = view(3);
        let err = view.set_sort(SortSpec::asc(SortField::Stock)).unwrap_err();
        assert_eq!(err.error_code(), "UNSORTABLE_FIELD");
        assert_eq!(view.sort(), SortSpec::asc(SortField::Name));
    }

    #[test]
    fn test_toggle_sort_flips_direction() {
        let mut view = view(3);
        view.toggle_sort(SortField::Name).unwrap();
        assert_eq!(view.sort(), SortSpec::desc(SortField::Name));
        view.toggle_sort(SortField::Price).unwrap();
        assert_eq!(view.sort(), SortSpec::asc(SortField::Price));
    }

    #[test]
    fn test_set_page_clamps_and_does_not_refilter() {
        let mut view = view(25);
        view.set_page(99);
        assert_eq!(view.state().page.page_index, 3);
        assert_eq!(view.page().items.len(), 5);
        view.set_page(0);
        assert_eq!(view.state().page.page_index, 1);
    }

    #[test]
    fn test_next_and_prev_page_stay_in_range() {
        let mut view = view(15);
        view.prev_page();
        assert_eq!(view.state().page.page_index, 1);
        view.next_page();
        view.next_page();
        assert_eq!(view.state().page.page_index, 2);
    }

    #[test]
    fn test_replace_items_clamps_page() {
        let mut view = view(25);
        view.set_page(3);
        let fewer = view.items()[..12].to_vec();
        view.replace_items(fewer).unwrap();
        assert_eq!(view.state().page.page_index, 2);
        assert_eq!(view.page().items.len(), 2);
    }

    #[test]
    fn test_replace_items_keeps_valid_page() {
        let mut view = view(25);
        view.set_page(2);
        let more = view.items().to_vec();
        view.replace_items(more).unwrap();
        assert_eq!(view.state().page.page_index, 2);
    }

    #[test]
    fn test_with_state_restores_and_clamps() {
        let items = view(25).items().to_vec();
        let pipeline = Arc::new(view(0).pipeline().clone());
        let mut state = pipeline.initial_state();
        state.criteria = FilterCriteria::new().with_categories(["School bags"]);
        state.sort = SortSpec::desc(SortField::Price);
        state.page = PageState::new(9, 10);

        let restored = CollectionView::with_state(pipeline, items, state).unwrap();
        assert_eq!(restored.matching_count(), 20);
        assert_eq!(restored.state().page.page_index, 2);
        assert_eq!(restored.sort(), SortSpec::desc(SortField::Price));
        assert_eq!(restored.page().items[0].name, "Item 12");
    }

    #[test]
    fn test_with_state_rejects_unsortable_field() {
        let pipeline = Arc::new(view(0).pipeline().clone());
        let mut state = pipeline.initial_state();
        state.sort = SortSpec::asc(SortField::Stock);
        let err = CollectionView::with_state(pipeline, Vec::<Item>::new(), state).unwrap_err();
        assert_eq!(err.error_code(), "UNSORTABLE_FIELD");
    }

    #[test]
    fn test_empty_result_is_page_one_of_one() {
        let mut view = view(25);
        view.update_criteria(|c| c.set_search("does not exist")).unwrap();
        let page = view.page();
        assert!(page.is_empty());
        assert_eq!(page.pagination.page_index, 1);
        assert_eq!(page.pagination.page_count, 1);
    }
}
