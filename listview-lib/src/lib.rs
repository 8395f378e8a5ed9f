//! Client-side table engine for admin list screens
//!
//! Filters, sorts and pages a schema-free record collection according to a
//! declarative [`TableConfig`](config::TableConfig), and produces render
//! models for the table and the filter bar.

pub mod config;
pub mod error;
pub mod model;
pub mod presets;
pub mod query;
pub mod render;
pub mod screen;
pub mod store;
