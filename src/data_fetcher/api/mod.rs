pub mod client;
pub mod http_client;
pub mod urls;

// Re-export the provider client
pub use client::UpstreamClient;
// Re-export HTTP client utilities
pub use http_client::*;
// Re-export URL utilities
pub use urls::*;
