//! src/routes/mod.rs

mod health_check;
mod landing;
mod webhook;

pub use health_check::*;
pub use landing::*;
pub use webhook::*;
