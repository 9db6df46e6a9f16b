//! Domain model for a single match snapshot.
//!
//! Mirrors the shape of the football-data.org v4 match resource, reduced to
//! the fields the bot announces. All optional upstream fields stay optional
//! here; defaulting happens at announcement time, never during parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Match lifecycle status, collapsed from the upstream vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Not started yet (upstream SCHEDULED or TIMED).
    Scheduled,
    InPlay,
    Paused,
    Finished,
    /// Anything we do not recognize (POSTPONED, SUSPENDED, CANCELLED, ...).
    Unknown(String),
}

impl MatchStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "SCHEDULED" | "TIMED" => Self::Scheduled,
            "IN_PLAY" | "LIVE" => Self::InPlay,
            "PAUSED" => Self::Paused,
            "FINISHED" => Self::Finished,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    /// Lineups may appear before kickoff, so any known status qualifies.
    pub fn lineup_eligible(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Goals and substitutions only exist once the match has started.
    pub fn live_events_eligible(&self) -> bool {
        matches!(self, Self::InPlay | Self::Paused | Self::Finished)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Goal,
    Substitution,
}

/// A timestamped in-match event.
///
/// For substitutions `player` is the player coming on and `counterpart` the
/// player going off. Both may be missing upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: i64,
    pub kind: EventKind,
    pub team: TeamRef,
    pub player: Option<String>,
    pub counterpart: Option<String>,
    pub minute: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub team_id: i64,
    pub formation: Option<String>,
    /// Starting players in announcement order.
    pub starters: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub home: u32,
    pub away: u32,
}

/// Point-in-time view of one match, as returned by the fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub id: i64,
    pub status: MatchStatus,
    pub utc_date: Option<DateTime<Utc>>,
    pub home: TeamRef,
    pub away: TeamRef,
    pub lineups: Vec<Lineup>,
    pub events: Vec<MatchEvent>,
    /// Present only once the match has finished.
    pub final_score: Option<FinalScore>,
}

impl MatchSnapshot {
    pub fn lineup_for(&self, team_id: i64) -> Option<&Lineup> {
        self.lineups.iter().find(|l| l.team_id == team_id)
    }

    pub fn team_name(&self, team_id: i64) -> Option<&str> {
        if self.home.id == team_id {
            Some(&self.home.name)
        } else if self.away.id == team_id {
            Some(&self.away.name)
        } else {
            None
        }
    }

    /// The other side, if `team_id` plays in this match at all.
    pub fn opponent_of(&self, team_id: i64) -> Option<&TeamRef> {
        if self.home.id == team_id {
            Some(&self.away)
        } else if self.away.id == team_id {
            Some(&self.home)
        } else {
            None
        }
    }
}

/// Match outcome relative to the tracked team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    pub fn for_team(score: &FinalScore, team_is_home: bool) -> Self {
        let (ours, theirs) = if team_is_home {
            (score.home, score.away)
        } else {
            (score.away, score.home)
        };
        match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => Self::Win,
            std::cmp::Ordering::Less => Self::Loss,
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}
