//! Render models for list screens.
//!
//! Both renderers are pure functions of their inputs and produce plain data
//! that a front end (terminal, HTML, ...) draws.

mod filter_bar;
mod table;

pub use filter_bar::*;
pub use table::*;
