//! Matchday core - snapshot model and announcement diffing.
//!
//! This crate holds everything that does not touch the network:
//! - The match snapshot model (status, lineups, events, final score)
//! - Persisted announcement state (what has already been posted)
//! - The event differ: snapshot + state -> new announcements
//! - Rendering announcements into posting-API-sized text
//! - Trait seams for the fetch/publish collaborators

pub mod differ;
pub mod format;
pub mod models;
pub mod source;
pub mod state;

pub use differ::{diff, Announcement};
pub use format::{MessageFormatter, POST_CHAR_LIMIT};
pub use models::{
    EventKind, FinalScore, Lineup, MatchEvent, MatchResult, MatchSnapshot, MatchStatus, TeamRef,
};
pub use source::{MatchSource, Publisher};
pub use state::MatchState;
