//! Request middleware

mod auth;

pub use auth::admin_auth_middleware;
