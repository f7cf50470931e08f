//! Rust client for the Webamon threat intelligence API.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use webamon::WebamonClient;
//!
//! #[tokio::main]
//! async fn main() -> webamon::Result<()> {
//!     // No key: free tier on search.webamon.com
//!     let client = WebamonClient::new(std::env::var("WEBAMON_API_KEY").ok())?;
//!
//!     let hits = client
//!         .search()
//!         .basic("example.com", "domain.name,resolved_url")
//!         .size(20)
//!         .send()
//!         .await?;
//!     println!("{hits:#}");
//!
//!     let scan = client.scan().submit("https://example.com").await?;
//!     if let Some(id) = webamon::report_id(&scan) {
//!         println!("report: {id}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

// Re-export core types
pub use webamon_core::*;

// Re-export client
pub use webamon_client::{
    api, base_url_for, RetryConfig, ThreatIntelApi, WebamonClient, WebamonClientBuilder,
    FREE_BASE_URL, PRO_BASE_URL,
};

// Re-export runtime for convenience
pub use serde_json;
pub use tokio;
