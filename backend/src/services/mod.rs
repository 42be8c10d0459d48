//! Business logic services for the storefront site

pub mod contact;
pub mod location;
pub mod store;

pub use contact::ContactService;
pub use location::LocationService;
pub use store::StoreService;
