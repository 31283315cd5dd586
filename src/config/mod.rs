//! Configuration module
//!
//! Loads and validates the site configuration: page text, the two remote
//! document endpoints, and HTTP host settings.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLoader, ConfigOverrides, LoadResult, LoadWarning, LoaderOptions};
pub use schema::*;
pub use validation::{ValidationResult, Validator};
