//! Admin collection browser

use crate::config::ViewConfig;
use crate::core::error::ConfigError;
use crate::core::facet;
use crate::core::item::Item;
use crate::core::pipeline::Pipeline;
use crate::core::sort::SortField;

/// Search over name and SKU plus dropdowns for category, status and
/// capacity; every table column is sortable.
pub fn pipeline(config: &ViewConfig) -> Result<Pipeline<Item>, ConfigError> {
    config.validate()?;

    Pipeline::builder()
        .facet(facet::search(config.search_fields_or(&["name", "sku"])))
        .facet(facet::exact("category"))
        .facet(facet::exact("status"))
        .facet(facet::variant_exact("capacity"))
        .sortable(SortField::Name)
        .sortable(SortField::Sku)
        .sortable(SortField::Price)
        .sortable(SortField::Stock)
        .sortable(SortField::Status)
        .sortable(SortField::Category)
        .default_sort(config.sort_spec()?)
        .page_size(config.page_size)
        .build()
}
