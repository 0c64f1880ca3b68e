//! # concierge-core
//!
//! Foundation crate for the hotel-review RAG pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

pub use config::RagConfig;
pub use errors::{ConciergeError, ConciergeResult};
pub use models::{
    Candidate, CategorySummary, PreviousTurn, QueryConstraints, RankedCandidate, Review, RouteHit,
    SubQuery, TimeSensitivity,
};
