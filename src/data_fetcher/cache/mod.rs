pub mod keys;
pub mod result_cache;
pub mod single_flight;
pub mod types;

// Re-export cache types
pub use types::*;
// Re-export key builders
pub use keys::*;
pub use result_cache::ResultCache;
pub use single_flight::{InFlight, SharedOutcome};
