//! Trait seams for the external collaborators.
//!
//! The service provides the HTTP-backed implementations; tests provide mocks.

use crate::models::MatchSnapshot;
use anyhow::Result;
use async_trait::async_trait;

/// Sports-data side: where match snapshots come from.
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// The tracked team's match today, if any is scheduled.
    async fn today_match(&self) -> Result<Option<MatchSnapshot>>;

    /// Full detail for a known match (lineups, events, score).
    async fn match_details(&self, match_id: i64) -> Result<MatchSnapshot>;
}

/// Posting side: where rendered announcements go.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, text: &str) -> Result<()>;
}
