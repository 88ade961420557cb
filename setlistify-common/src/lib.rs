//! # Setlistify Common Library
//!
//! Shared code for the Setlistify service crates:
//! - Error and result types
//! - Bootstrap configuration loading
//! - Database initialization, migrations and row models

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
