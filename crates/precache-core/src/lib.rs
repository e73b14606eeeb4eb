//! Precache Core
//!
//! Core domain types, traits, and error handling for precache.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used across all other crates.

pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod ports;

pub use error::{Error, Result};
