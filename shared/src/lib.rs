//! SlimPlan Shared Library
//!
//! Domain model, seed plan, validation and the pure metrics used by the
//! tracker crate.

pub mod errors;
pub mod metrics;
pub mod models;
pub mod reference;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use types::*;
