//! Core types and errors for the Webamon API client.
//!
//! This crate provides the foundational types shared by the client and the CLI:
//!
//! - **Types**: search requests, loosely-typed result records, pagination
//!   metadata, and scan/screenshot helpers
//! - **Errors**: the [`WebamonError`] taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use webamon_core::{PaginationState, SearchRequest};
//!
//! let request = SearchRequest::lucene("domain.name:\"bank*\"", "scans").size(20);
//! let pagination = PaginationState::from_value(&response["pagination"]);
//! ```

mod error;
pub mod types;

pub use error::{Plan, Result, WebamonError};
pub use types::*;
