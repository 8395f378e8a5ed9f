//! Filtering, sorting and paging of record lists.
//!
//! # Shared Types
//!
//! - [`FilterDescriptor`] - One filter control and its matching rule
//! - [`SortConfig`] - The active ordering, with the nulls-last comparator
//! - [`Pagination`] / [`Page`] - Page math and a page of rows
//!
//! # Engine
//!
//! - [`TableQuery`] - Owns filter, sort and page state for one list screen

mod engine;
mod filter;
mod order;
mod page;
pub mod predicate;

pub use engine::DEFAULT_ITEMS_PER_PAGE;
pub use engine::FilterState;
pub use engine::TableEvent;
pub use engine::TableQuery;
pub use engine::fallback_sort;
pub use filter::FilterDescriptor;
pub use filter::FilterKind;
pub use filter::FilterOption;
pub use filter::Predicate;
pub use order::Direction;
pub use order::SortConfig;
pub use order::SortOption;
pub use page::Page;
pub use page::Pagination;
pub use predicate::PredicateRegistry;
