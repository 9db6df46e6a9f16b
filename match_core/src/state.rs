//! Persisted announcement state.
//!
//! One record per tracked match: which discrete events have already been
//! announced. The serialized field names keep the historical `*_posted` keys
//! so state files written by earlier deployments load unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchState {
    /// The match currently being tracked, if any.
    pub match_id: Option<i64>,
    #[serde(rename = "lineup_posted")]
    pub lineup_announced: bool,
    /// Goal event ids already announced. BTreeSet keeps the persisted form stable.
    #[serde(rename = "goals_posted")]
    pub goals_announced: BTreeSet<i64>,
    #[serde(rename = "subs_posted")]
    pub subs_announced: BTreeSet<i64>,
    #[serde(rename = "final_score_posted")]
    pub final_score_announced: bool,
}

impl MatchState {
    /// Fresh state bound to a newly observed match.
    pub fn for_match(match_id: i64) -> Self {
        Self {
            match_id: Some(match_id),
            ..Self::default()
        }
    }

    pub fn tracks(&self, match_id: i64) -> bool {
        self.match_id == Some(match_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let state = MatchState::default();
        assert_eq!(state.match_id, None);
        assert!(!state.lineup_announced);
        assert!(state.goals_announced.is_empty());
        assert!(state.subs_announced.is_empty());
        assert!(!state.final_score_announced);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut state = MatchState::for_match(497_812);
        state.lineup_announced = true;
        state.goals_announced.insert(1001);
        state.goals_announced.insert(1002);
        state.subs_announced.insert(2001);

        let json = serde_json::to_string(&state).unwrap();
        let back: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_reads_historical_layout() {
        // Layout produced by the original deployment.
        let json = r#"{
            "match_id": 12345,
            "lineup_posted": true,
            "goals_posted": [7, 3],
            "subs_posted": [],
            "final_score_posted": false
        }"#;
        let state: MatchState = serde_json::from_str(json).unwrap();
        assert!(state.tracks(12345));
        assert!(state.lineup_announced);
        assert_eq!(state.goals_announced.len(), 2);
        assert!(state.goals_announced.contains(&3));
        assert!(!state.final_score_announced);
    }

    #[test]
    fn test_missing_fields_default() {
        let state: MatchState = serde_json::from_str(r#"{"match_id": 9}"#).unwrap();
        assert!(state.tracks(9));
        assert!(!state.lineup_announced);
        assert!(state.goals_announced.is_empty());
    }
}
