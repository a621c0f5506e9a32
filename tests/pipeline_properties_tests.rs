//! Properties every pipeline must hold regardless of the screen
//!
//! - filtering is idempotent and empty criteria are the identity
//! - sorting is stable in both directions
//! - pages cover the matching set exactly once
//! - the page count never drops below 1
//! - the price range is inclusive at both bounds

mod common;

use common::*;
use storefront::prelude::*;

// =============================================================================
// Filter Stage
// =============================================================================

mod filter_tests {
    use super::*;

    #[test]
    fn test_filter_is_idempotent() {
        init_tracing();
        let items = catalog();
        let pipeline = storefront();
        let criteria = FilterCriteria::new()
            .with_brands(["Skybags", "Wildcraft"])
            .with_price(PriceRange::clamped(10.0, 100.0, 2000.0));

        let once = pipeline.filter(&items, &criteria);
        let twice = pipeline.filter(once.iter().copied(), &criteria);
        assert_eq!(names(once.iter().copied()), names(twice.iter().copied()));
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let items = catalog();
        for pipeline in [storefront(), admin()] {
            let filtered = pipeline.filter(&items, &FilterCriteria::default());
            assert_eq!(names(filtered), names(&items));
        }
    }

    #[test]
    fn test_filter_keeps_relative_order() {
        let items = catalog();
        let criteria = FilterCriteria::new().with_categories(["Laptop bags", "Wallets"]);
        let filtered = storefront().filter(&items, &criteria);
        assert_eq!(
            names(filtered),
            vec!["Executive Laptop Bag", "Slim Laptop Sleeve", "Wallet"]
        );
    }

    #[test]
    fn test_facets_combine_with_and() {
        let items = catalog();
        let criteria = FilterCriteria::new()
            .with_categories(["Laptop bags"])
            .with_brands(["Skybags"]);
        let filtered = storefront().filter(&items, &criteria);
        assert_eq!(names(filtered), vec!["Slim Laptop Sleeve"]);
    }

    #[test]
    fn test_missing_field_fails_only_active_facets() {
        let items = vec![Item::new("Mystery", 10.0), Item::new("Known", 10.0).with_brand("Skybags")];
        let pipeline = storefront();

        assert_eq!(pipeline.filter(&items, &FilterCriteria::new()).len(), 2);

        let by_brand = pipeline.filter(&items, &FilterCriteria::new().with_brands(["Skybags"]));
        assert_eq!(names(by_brand), vec!["Known"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let items = vec![
            Item::new("Floor", 100.0),
            Item::new("Inside", 150.0),
            Item::new("Ceiling", 200.0),
            Item::new("Above", 200.01),
        ];
        let range = PriceRange::try_new(100.0, 200.0, 2000.0).unwrap();
        let filtered = storefront().filter(&items, &FilterCriteria::new().with_price(range));
        assert_eq!(names(filtered), vec!["Floor", "Inside", "Ceiling"]);
    }

    #[test]
    fn test_restored_state_cannot_carry_invalid_range() {
        let state = |min: f64, max: f64| {
            serde_json::json!({
                "criteria": { "price": { "min": min, "max": max } },
                "sort": { "field": "price", "direction": "asc" },
                "page": { "page_index": 1, "page_size": 10 },
            })
        };
        let valid: QueryState = serde_json::from_value(state(100.0, 500.0)).unwrap();
        assert_eq!(valid.criteria.price, PriceRange::try_new(100.0, 500.0, 2000.0).ok());
        assert!(serde_json::from_value::<QueryState>(state(500.0, 100.0)).is_err());

        let negative = serde_json::json!({ "price": { "min": -50.0, "max": 99999.0 } });
        assert!(serde_json::from_value::<FilterCriteria>(negative).is_err());
    }

    #[test]
    fn test_restored_state_filters_inclusively() {
        let items = vec![Item::new("Low", 100.0), Item::new("Mid", 300.0), Item::new("High", 500.0)];
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"price": {"min": 100.0, "max": 300.0}}"#).unwrap();
        let filtered = storefront().filter(&items, &criteria);
        assert_eq!(names(filtered), vec!["Low", "Mid"]);
    }
}

// =============================================================================
// Sort Stage
// =============================================================================

mod sort_tests {
    use super::*;

    fn ties() -> Vec<Item> {
        vec![
            Item::new("First", 5.0),
            Item::new("Cheap", 1.0),
            Item::new("Second", 5.0),
            Item::new("Third", 5.0),
        ]
    }

    #[test]
    fn test_sort_is_stable_ascending() {
        let items = ties();
        let sorted = storefront()
            .sort(&items, &SortSpec::asc(SortField::Price))
            .unwrap();
        assert_eq!(names(sorted), vec!["Cheap", "First", "Second", "Third"]);
    }

    #[test]
    fn test_sort_is_stable_descending() {
        let items = ties();
        let sorted = storefront()
            .sort(&items, &SortSpec::desc(SortField::Price))
            .unwrap();
        assert_eq!(names(sorted), vec!["First", "Second", "Third", "Cheap"]);
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let items = ties();
        let before = names(&items);
        let _ = storefront().sort(&items, &SortSpec::asc(SortField::Name));
        assert_eq!(names(&items), before);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let items = vec![Item::new("banana", 1.0), Item::new("Apple", 1.0), Item::new("cherry", 1.0)];
        let sorted = storefront()
            .sort(&items, &SortSpec::asc(SortField::Name))
            .unwrap();
        assert_eq!(names(sorted), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_accented_names_sort_alphabetically() {
        let items = vec![Item::new("Zebra", 1.0), Item::new("Éclair", 1.0), Item::new("Apple", 1.0)];
        let sorted = storefront()
            .sort(&items, &SortSpec::asc(SortField::Name))
            .unwrap();
        assert_eq!(names(sorted), vec!["Apple", "Éclair", "Zebra"]);
    }

    #[test]
    fn test_missing_sku_sorts_first_ascending() {
        let items = vec![
            Item::new("B", 1.0).with_sku("B-1"),
            Item::new("None", 1.0),
            Item::new("A", 1.0).with_sku("A-1"),
        ];
        let sorted = admin().sort(&items, &SortSpec::asc(SortField::Sku)).unwrap();
        assert_eq!(names(sorted), vec!["None", "A", "B"]);
    }

    #[test]
    fn test_sort_by_created_at() {
        let items = catalog();
        let sorted = storefront()
            .sort(&items, &SortSpec::desc(SortField::CreatedAt))
            .unwrap();
        assert_eq!(sorted[0].name, "Slim Laptop Sleeve");
        assert_eq!(sorted[4].name, "Executive Laptop Bag");
    }

    #[test]
    fn test_unregistered_field_is_rejected() {
        let items = catalog();
        let err = storefront()
            .sort(&items, &SortSpec::asc(SortField::Stock))
            .unwrap_err();
        assert!(matches!(err, QueryError::Config(ConfigError::UnsortableField { .. })));
    }
}

// =============================================================================
// Paginate Stage
// =============================================================================

mod paginate_tests {
    use super::*;

    #[test]
    fn test_pages_cover_every_item_once() {
        let items: Vec<u32> = (0..47).collect();
        let page_size = 10;
        let page_count = paginate(&items, PageState::first(page_size))
            .pagination
            .page_count;

        let mut seen = Vec::new();
        for index in 1..=page_count {
            let page = paginate(&items, PageState::new(index, page_size));
            assert!(page.items.len() <= page_size);
            seen.extend(page.items);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_page_count_floor() {
        for total in [0usize, 1, 9, 10] {
            let items: Vec<usize> = (0..total).collect();
            let page = paginate(&items, PageState::first(10));
            assert_eq!(page.pagination.page_count, 1);
            assert_eq!(page.pagination.page_index, 1);
        }
    }

    #[test]
    fn test_run_reports_clamped_index() {
        let items = numbered(12);
        let pipeline = storefront();
        let mut state = pipeline.initial_state();
        state.page = PageState::new(7, 10);

        let page = pipeline.run(&items, &state).unwrap();
        assert_eq!(page.pagination.page_index, 2);
        assert_eq!(page.items.len(), 2);
    }
}
