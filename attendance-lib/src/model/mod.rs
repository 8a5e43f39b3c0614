//! Dynamic row model

mod path;
mod row;
mod row_serde;
mod value;

pub use path::*;
pub use row::*;
pub use value::*;
