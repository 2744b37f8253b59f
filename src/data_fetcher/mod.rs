pub mod api;
pub mod cache;
pub mod gateway;
pub mod mapper;
pub mod models;

pub use gateway::{Gateway, SharedCache};
pub use mapper::{FromUpstream, map_response};
pub use models::{Fixture, FixtureStatus, League, Score, ScorePair, Team};
