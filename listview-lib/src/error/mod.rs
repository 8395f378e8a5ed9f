//! Error types

mod column;
mod config;
mod field;

pub use column::*;
pub use config::*;
pub use field::*;
