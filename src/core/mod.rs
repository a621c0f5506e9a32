//! Core module containing the query engine's traits, value objects and stages

pub mod criteria;
pub mod error;
pub mod facet;
pub mod field;
pub mod item;
pub mod pagination;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod service;
pub mod sort;
pub mod view;

pub use criteria::{FilterCriteria, PriceRange};
pub use error::{ConfigError, CriteriaError, QueryError, QueryResult};
pub use facet::{Facet, Selection, facet_counts};
pub use field::FieldValue;
pub use item::{Item, ItemStatus, Variant};
pub use pagination::{Page, PageState, PaginationMeta, paginate};
pub use pipeline::{Pipeline, PipelineBuilder, QueryState};
pub use query::QueryParams;
pub use record::Record;
pub use service::ItemSource;
pub use sort::{SortDirection, SortField, SortRegistry, SortSpec};
pub use view::CollectionView;
