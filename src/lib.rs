//! Football Data Gateway Library
//!
//! This library fetches league and fixture data from the API-Football v3 provider,
//! maps the provider's envelope into canonical records and keeps successful results
//! in a TTL cache so repeated queries do not spend the provider's request quota.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use football_gateway::{AppError, Config, Gateway, ResultCache};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let cache = Arc::new(ResultCache::new(config.cache_capacity));
//!     let gateway = Gateway::from_config(&config, cache)?;
//!
//!     // Premier League and Serie A, current season
//!     let leagues = gateway.get_leagues(&[39, 71]).await?;
//!     for league in &leagues {
//!         println!("{} ({}) {}", league.name, league.country, league.season);
//!     }
//!
//!     // Finished fixtures of the 2024 Premier League season
//!     let fixtures = gateway.get_fixtures(39, 2024, Some("FT")).await?;
//!     println!("{} finished fixtures", fixtures.len());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::cache::{CacheInfo, ResultCache};
pub use data_fetcher::models::{Fixture, FixtureStatus, League, Score, ScorePair, Team};
pub use data_fetcher::{Gateway, SharedCache};
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
