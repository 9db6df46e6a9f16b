//! Announcement rendering for the posting API.
//!
//! Keeps the original post texts, emoji included. Rendering is deterministic:
//! equal announcements always produce equal text, including the over-limit
//! fallbacks.

use crate::differ::Announcement;
use crate::models::MatchResult;

/// Platform character cap for one post.
pub const POST_CHAR_LIMIT: usize = 280;

/// Starters kept when a lineup post has to be abbreviated.
const LINEUP_FALLBACK_CAP: usize = 11;

#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
    hashtag_suffix: Option<String>,
}

impl MessageFormatter {
    pub fn new(hashtag_suffix: Option<String>) -> Self {
        Self { hashtag_suffix }
    }

    pub fn render(&self, announcement: &Announcement) -> String {
        match announcement {
            Announcement::Lineup {
                team_name,
                formation,
                starters,
            } => render_lineup(team_name, formation.as_deref(), starters),
            Announcement::Goal {
                team_name,
                scorer,
                minute,
                for_tracked_team,
            } => {
                let emoji = if *for_tracked_team { "⚽️🔵" } else { "⚽️" };
                format!("{emoji} GOAL!\n{team_name}: {scorer} ({minute}')")
            }
            Announcement::Substitution {
                team_name,
                player_in,
                player_out,
                minute,
            } => format!(
                "🔁 {team_name} Substitution ({minute}'):\n⬅️ {player_out}\n➡️ {player_in}"
            ),
            Announcement::FinalScore {
                home_name,
                home_score,
                away_name,
                away_score,
                result,
            } => {
                let emoji = match result {
                    MatchResult::Win => "🎉✅",
                    MatchResult::Loss => "😞❌",
                    MatchResult::Draw => "🤝",
                };
                let base = format!(
                    "{emoji} FULL TIME\n\n{home_name} {home_score} - {away_score} {away_name}"
                );
                match &self.hashtag_suffix {
                    Some(tags) if fits(&format!("{base}\n\n{tags}")) => {
                        format!("{base}\n\n{tags}")
                    }
                    _ => base,
                }
            }
        }
    }
}

fn fits(text: &str) -> bool {
    text.chars().count() <= POST_CHAR_LIMIT
}

fn render_lineup(team_name: &str, formation: Option<&str>, starters: &[String]) -> String {
    let names = |players: &[String]| -> String {
        players
            .iter()
            .map(|p| format!("• {p}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let formation = formation.unwrap_or("Unknown");
    let full = format!("🔵 {team_name} Starting XI ({formation}):\n\n{}", names(starters));
    if fits(&full) {
        return full;
    }

    // Over the cap: drop the formation and cap the list.
    let cap = starters.len().min(LINEUP_FALLBACK_CAP);
    format!(
        "🔵 {team_name} Starting XI:\n\n{}",
        names(&starters[..cap])
    )
}
