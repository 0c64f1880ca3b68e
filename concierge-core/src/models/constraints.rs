use serde::{Deserialize, Serialize};

/// How temporally sensitive the user's question is, as judged by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSensitivity {
    Clear,
    Implied,
    None,
}

/// Structured constraints extracted from the user's utterance by the detector (§4.2).
///
/// Exact dominates fuzzy: when both `room_type` and `fuzzy_room_type` are
/// present, `filter_fragment` drops the fuzzy one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryConstraints {
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub fuzzy_room_type: Option<String>,
    #[serde(default)]
    pub time_sensitivity: Option<TimeSensitivity>,
}

impl QueryConstraints {
    /// The filter string passed to the comment/reverse vector stores (§6 Filter DSL).
    ///
    /// `room_type = '<value>'` if set, else `fuzzy_room_type = '<value>'` if
    /// set, else `None`. Values need no escaping beyond single-quoting since
    /// they are drawn from closed sets.
    pub fn filter_fragment(&self) -> Option<String> {
        if let Some(room_type) = &self.room_type {
            Some(format!("room_type = '{room_type}'"))
        } else {
            self.fuzzy_room_type
                .as_ref()
                .map(|fuzzy| format!("fuzzy_room_type = '{fuzzy}'"))
        }
    }
}
