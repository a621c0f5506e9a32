//! Customer-facing catalog filter panel

use crate::config::ViewConfig;
use crate::core::error::ConfigError;
use crate::core::facet::{self, Selection};
use crate::core::item::Item;
use crate::core::pipeline::Pipeline;
use crate::core::sort::SortField;

/// Variant attribute offered as sidebar checkboxes
pub const VARIANT_ATTRIBUTE: &str = "capacity";

/// Checkbox facets for category, brand and capacity, the price slider and
/// a name search; sortable by name, price and arrival date.
pub fn pipeline(config: &ViewConfig) -> Result<Pipeline<Item>, ConfigError> {
    config.validate()?;

    Pipeline::builder()
        .facet(facet::any_of("category", "category", Selection::Categories))
        .facet(facet::any_of("brand", "brand", Selection::Brands))
        .facet(facet::variant_any(VARIANT_ATTRIBUTE))
        .facet(facet::price_range())
        .facet(facet::search(config.search_fields_or(&["name"])))
        .sortable(SortField::Name)
        .sortable(SortField::Price)
        .sortable(SortField::CreatedAt)
        .default_sort(config.sort_spec()?)
        .page_size(config.page_size)
        .build()
}
