//! HTTP network adapter for precache.

mod client;
pub mod config;

pub use client::HttpNetwork;
pub use config::NetConfig;
