//! Client for the remote planets API and the mapping of its items onto
//! catalog planet payloads.

mod client;
mod error;
mod mapping;

pub use client::SwapiClient;
pub use error::RemoteError;
pub use mapping::{item_identifier, map_remote_planet};
