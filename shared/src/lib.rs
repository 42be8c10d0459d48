//! Shared types and models for the storefront site
//!
//! This crate contains the store, hours and contact models shared between the
//! backend and the browser (via WASM), plus the form state and display logic
//! both sides render from.

pub mod display;
pub mod form;
pub mod models;
pub mod types;
pub mod validation;

pub use display::*;
pub use form::*;
pub use models::*;
pub use types::*;
pub use validation::*;
