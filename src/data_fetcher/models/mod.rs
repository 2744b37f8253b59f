pub mod domain;
pub mod upstream;

// Re-export canonical records
pub use domain::*;
// Re-export wire types
pub use upstream::*;
