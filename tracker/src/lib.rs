//! SlimPlan tracker library
//!
//! Storage, repositories and services behind the `slimplan` binary, exposed
//! for integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod repositories;
pub mod services;
pub mod store;
