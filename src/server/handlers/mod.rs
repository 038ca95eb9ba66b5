//! Route handlers, one module per resource.

pub mod blog;
pub mod health;
pub mod taxonomy;
pub mod vehicles;
