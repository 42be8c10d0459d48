//! HTTP handlers

mod health;
mod location;
mod store;

pub use health::*;
pub use location::*;
pub use store::*;
