//! Core types and validation for planet-catalog
//!
//! This crate contains domain types shared across all other crates.

mod config;
mod constants;
mod context;
mod env_config;
mod error;
mod planet;
mod tag;

pub use config::*;
pub use constants::*;
pub use context::*;
pub use env_config::*;
pub use error::*;
pub use planet::*;
pub use tag::*;
