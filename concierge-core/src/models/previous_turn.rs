use serde::{Deserialize, Serialize};

/// A user/assistant turn carried over from the previous request (§9 — history
/// is caller-supplied per-request, never server-persisted). Consumed by both
/// the intent recognizer (to condition the retrieval/direct decision) and the
/// generator (to ground follow-up questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviousTurn {
    pub user: String,
    pub assistant: String,
}
