mod candidate;
mod category_summary;
mod constraints;
mod previous_turn;
mod ranked_candidate;
mod review;
mod route_hit;
mod subquery;

pub use candidate::{Candidate, CandidateMetadata};
pub use category_summary::CategorySummary;
pub use constraints::{QueryConstraints, TimeSensitivity};
pub use previous_turn::PreviousTurn;
pub use ranked_candidate::{FeatureScores, RankedCandidate};
pub use review::Review;
pub use route_hit::{Route, RouteHit, RouteRankEntry, RouteRanks};
pub use subquery::{validate_sub_queries, SubQuery};
