//! HTTP client for the Webamon threat intelligence API.
//!
//! This crate provides the main [`WebamonClient`] and the [`ThreatIntelApi`]
//! trait the CLI is written against.

mod client;
mod config;
pub mod api;

pub use api::ThreatIntelApi;
pub use client::{base_url_for, WebamonClient, WebamonClientBuilder, FREE_BASE_URL, PRO_BASE_URL};
pub use config::*;
pub use webamon_core::{Result, WebamonError};
