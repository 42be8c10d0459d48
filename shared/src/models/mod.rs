//! Domain models for store locations

mod contact;
mod hours;
mod store;

pub use contact::*;
pub use hours::*;
pub use store::*;
