//! src/routes/landing/mod.rs

mod get;
mod post;

pub use get::landing;
pub use post::*;
