//! # Storefront Query
//!
//! A generic filter, sort and paginate engine for collection screens in an
//! e-commerce storefront and its admin back office.
//!
//! ## Features
//!
//! - **One Pipeline, Many Screens**: facets and sortable fields are plugged in per screen
//! - **Multi-Select Facets**: OR within a facet, AND across facets
//! - **Stable Sorting**: ties keep their input order in both directions
//! - **Safe Pagination**: empty results are page 1 of 1, stale page indices are clamped
//! - **Memoized Views**: page flips never re-filter or re-sort
//! - **Configuration-Based**: page sizes, price ceilings and default sorts via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//! use std::sync::Arc;
//!
//! let pipeline = Arc::new(catalog::storefront::pipeline(&ViewConfig::storefront())?);
//! let mut view = CollectionView::new(pipeline, items)?;
//!
//! view.update_criteria(|c| c.toggle_category("Laptop bags"))?;
//! view.set_sort(SortSpec::desc(SortField::Price))?;
//! view.next_page();
//!
//! for item in view.page().items {
//!     println!("{} {}", item.name, item.price);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{ItemSource, Record, field::FieldValue};

    // === Records ===
    pub use crate::core::{Item, ItemStatus, Variant};

    // === Criteria and Sorting ===
    pub use crate::core::{
        FilterCriteria, PriceRange, SortDirection, SortField, SortRegistry, SortSpec,
        criteria::DEFAULT_PRICE_CEILING,
    };

    // === Pipeline ===
    pub use crate::core::{
        CollectionView, Facet, Page, PageState, PaginationMeta, Pipeline, PipelineBuilder,
        QueryParams, QueryState, Selection, facet, facet_counts, paginate,
    };

    // === Errors ===
    pub use crate::core::{ConfigError, CriteriaError, QueryError, QueryResult};

    // === Screens and Configuration ===
    pub use crate::catalog;
    pub use crate::config::{CatalogConfig, ViewConfig};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryItemSource;

    // === External Re-exports ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
