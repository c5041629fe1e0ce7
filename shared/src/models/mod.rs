//! Data models
//!
//! Shared between the quote server and the front-end (via API).
//! JSON field names are camelCase; IDs are opaque strings.

pub mod brand;
pub mod product;
pub mod quote;
pub mod size;
pub mod weight_profile;

// Re-exports
pub use brand::*;
pub use product::*;
pub use quote::*;
pub use size::*;
pub use weight_profile::*;
