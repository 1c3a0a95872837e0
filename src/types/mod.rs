//! Data types shared by the layout engine and its hosts.

mod column;
mod row;

pub use column::*;
pub use row::*;
