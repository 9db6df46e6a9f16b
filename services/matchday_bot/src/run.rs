//! One invocation of the bot, end to end.
//!
//! load state -> fetch today's match -> fetch details -> diff -> publish each
//! announcement -> persist state. Fetch failures skip the run without
//! touching state; a single publish failure is logged and the loop continues
//! (the event stays marked announced, so a failed post is dropped rather
//! than duplicated on the next run).

use anyhow::Result;
use log::{error, info, warn};
use match_core::{diff, MatchSource, MessageFormatter, Publisher};

use crate::state_store::FileStateStore;

pub async fn run_once(
    source: &dyn MatchSource,
    publisher: &dyn Publisher,
    store: &FileStateStore,
    formatter: &MessageFormatter,
    team_id: i64,
) -> Result<()> {
    let mut state = store.load();

    let summary = match source.today_match().await {
        Ok(Some(summary)) => summary,
        Ok(None) => {
            info!("No match today for team {team_id}");
            return Ok(());
        }
        Err(e) => {
            warn!("Could not fetch today's match, skipping run: {e:#}");
            return Ok(());
        }
    };

    info!(
        "Match {}: {} vs {} ({:?})",
        summary.id, summary.home.name, summary.away.name, summary.status
    );

    let details = match source.match_details(summary.id).await {
        Ok(details) => details,
        Err(e) => {
            warn!("Could not fetch match details, skipping run: {e:#}");
            return Ok(());
        }
    };

    let announcements = diff(&details, &mut state, team_id);
    if announcements.is_empty() {
        info!("Nothing new to announce");
    }

    for announcement in &announcements {
        let text = formatter.render(announcement);
        match publisher.publish(&text).await {
            Ok(()) => info!("Announced: {announcement:?}"),
            Err(e) => error!("Failed to publish announcement, continuing: {e:#}"),
        }
    }

    store.save(&state)?;
    Ok(())
}
