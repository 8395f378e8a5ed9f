//! Schema-free record model

mod record;
mod record_serde;
mod value;

pub use record::*;
pub use value::*;
