//! Ready-made pipelines for the two collection screens
//!
//! Both screens run the same [`Pipeline`](crate::core::Pipeline); they only
//! differ in the facets and sortable columns they register.

pub mod admin;
pub mod storefront;
