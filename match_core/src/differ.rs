//! The event differ: snapshot + state -> not-yet-announced announcements.
//!
//! Pure logic, no I/O. Evaluation order is fixed (lineup, goals, subs, final
//! score) so repeated runs are deterministic even when several categories
//! become eligible in the same poll. Calling `diff` again with the mutated
//! state and the same snapshot yields nothing.

use crate::models::{EventKind, MatchResult, MatchSnapshot};
use crate::state::MatchState;

const UNKNOWN_PLAYER: &str = "Unknown";
const UNKNOWN_MINUTE: &str = "?";

/// One not-yet-announced match update, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    Lineup {
        team_name: String,
        formation: Option<String>,
        starters: Vec<String>,
    },
    Goal {
        team_name: String,
        scorer: String,
        minute: String,
        for_tracked_team: bool,
    },
    Substitution {
        team_name: String,
        player_in: String,
        player_out: String,
        minute: String,
    },
    FinalScore {
        home_name: String,
        home_score: u32,
        away_name: String,
        away_score: u32,
        result: MatchResult,
    },
}

fn minute_str(minute: Option<u32>) -> String {
    minute.map_or_else(|| UNKNOWN_MINUTE.to_string(), |m| m.to_string())
}

/// Compute the announcements due for `team_id`, marking them announced in
/// `state` as they are produced.
///
/// If `state` tracks a different match than the snapshot, it is reset to a
/// fresh record for the snapshot's match before any category is evaluated.
pub fn diff(snapshot: &MatchSnapshot, state: &mut MatchState, team_id: i64) -> Vec<Announcement> {
    if !state.tracks(snapshot.id) {
        *state = MatchState::for_match(snapshot.id);
    }

    let mut out = Vec::new();

    // 1. Lineup. Absence just means it is not published yet.
    if snapshot.status.lineup_eligible() && !state.lineup_announced {
        if let Some(lineup) = snapshot.lineup_for(team_id) {
            if !lineup.starters.is_empty() {
                out.push(Announcement::Lineup {
                    team_name: snapshot
                        .team_name(team_id)
                        .unwrap_or(UNKNOWN_PLAYER)
                        .to_string(),
                    formation: lineup.formation.clone(),
                    starters: lineup.starters.clone(),
                });
                state.lineup_announced = true;
            }
        }
    }

    if snapshot.status.live_events_eligible() {
        // 2. Goals, in snapshot order (assumed chronological).
        for event in snapshot.events.iter().filter(|e| e.kind == EventKind::Goal) {
            if state.goals_announced.contains(&event.id) {
                continue;
            }
            out.push(Announcement::Goal {
                team_name: event.team.name.clone(),
                scorer: event
                    .player
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
                minute: minute_str(event.minute),
                for_tracked_team: event.team.id == team_id,
            });
            state.goals_announced.insert(event.id);
        }

        // 3. Substitutions. Non-tracked-team subs are absorbed into the dedup
        // set without output so they are not reprocessed every run.
        for event in snapshot
            .events
            .iter()
            .filter(|e| e.kind == EventKind::Substitution)
        {
            if state.subs_announced.contains(&event.id) {
                continue;
            }
            if event.team.id == team_id {
                out.push(Announcement::Substitution {
                    team_name: event.team.name.clone(),
                    player_in: event
                        .player
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
                    player_out: event
                        .counterpart
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
                    minute: minute_str(event.minute),
                });
            }
            state.subs_announced.insert(event.id);
        }
    }

    // 4. Final score.
    if snapshot.status.is_finished() && !state.final_score_announced {
        if let Some(score) = snapshot.final_score {
            out.push(Announcement::FinalScore {
                home_name: snapshot.home.name.clone(),
                home_score: score.home,
                away_name: snapshot.away.name.clone(),
                away_score: score.away,
                result: MatchResult::for_team(&score, snapshot.home.id == team_id),
            });
            state.final_score_announced = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FinalScore, Lineup, MatchEvent, MatchStatus, TeamRef};

    const TEAM_ID: i64 = 61;

    fn tracked() -> TeamRef {
        TeamRef {
            id: TEAM_ID,
            name: "Chelsea FC".to_string(),
        }
    }

    fn opponent() -> TeamRef {
        TeamRef {
            id: 66,
            name: "Manchester United FC".to_string(),
        }
    }

    fn snapshot(status: MatchStatus) -> MatchSnapshot {
        MatchSnapshot {
            id: 5000,
            status,
            utc_date: None,
            home: tracked(),
            away: opponent(),
            lineups: Vec::new(),
            events: Vec::new(),
            final_score: None,
        }
    }

    fn goal(id: i64, team: TeamRef, scorer: &str, minute: Option<u32>) -> MatchEvent {
        MatchEvent {
            id,
            kind: EventKind::Goal,
            team,
            player: Some(scorer.to_string()),
            counterpart: None,
            minute,
        }
    }

    fn sub(id: i64, team: TeamRef, on: &str, off: Option<&str>, minute: Option<u32>) -> MatchEvent {
        MatchEvent {
            id,
            kind: EventKind::Substitution,
            team,
            player: Some(on.to_string()),
            counterpart: off.map(|s| s.to_string()),
            minute,
        }
    }

    #[test]
    fn test_lineup_announced_once() {
        let mut snap = snapshot(MatchStatus::Scheduled);
        snap.lineups.push(Lineup {
            team_id: TEAM_ID,
            formation: Some("4-3-3".to_string()),
            starters: vec!["Sanchez".to_string(), "James".to_string()],
        });

        let mut state = MatchState::default();
        let out = diff(&snap, &mut state, TEAM_ID);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Announcement::Lineup {
                formation,
                starters,
                ..
            } => {
                assert_eq!(formation.as_deref(), Some("4-3-3"));
                assert_eq!(starters, &["Sanchez".to_string(), "James".to_string()]);
            }
            other => panic!("expected lineup, got {other:?}"),
        }
        assert!(state.lineup_announced);

        // Second run with identical snapshot: nothing new.
        assert!(diff(&snap, &mut state, TEAM_ID).is_empty());
    }

    #[test]
    fn test_missing_lineup_is_not_an_error() {
        let snap = snapshot(MatchStatus::Scheduled);
        let mut state = MatchState::default();
        assert!(diff(&snap, &mut state, TEAM_ID).is_empty());
        assert!(!state.lineup_announced);
    }

    #[test]
    fn test_opponent_lineup_alone_is_ignored() {
        let mut snap = snapshot(MatchStatus::Scheduled);
        snap.lineups.push(Lineup {
            team_id: opponent().id,
            formation: Some("4-4-2".to_string()),
            starters: vec!["Onana".to_string()],
        });
        let mut state = MatchState::default();
        assert!(diff(&snap, &mut state, TEAM_ID).is_empty());
        assert!(!state.lineup_announced);
    }

    #[test]
    fn test_only_new_goals_emitted() {
        let mut snap = snapshot(MatchStatus::InPlay);
        snap.events.push(goal(1, tracked(), "Palmer", Some(12)));
        snap.events.push(goal(2, opponent(), "Fernandes", Some(44)));

        let mut state = MatchState::for_match(snap.id);
        state.goals_announced.insert(1);

        let out = diff(&snap, &mut state, TEAM_ID);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Announcement::Goal {
                scorer,
                for_tracked_team,
                minute,
                ..
            } => {
                assert_eq!(scorer, "Fernandes");
                assert!(!for_tracked_team);
                assert_eq!(minute, "44");
            }
            other => panic!("expected goal, got {other:?}"),
        }
        assert!(state.goals_announced.contains(&1));
        assert!(state.goals_announced.contains(&2));
    }

    #[test]
    fn test_goals_gated_before_kickoff() {
        let mut snap = snapshot(MatchStatus::Scheduled);
        snap.events.push(goal(1, tracked(), "Palmer", Some(12)));
        let mut state = MatchState::default();
        assert!(diff(&snap, &mut state, TEAM_ID).is_empty());
        assert!(state.goals_announced.is_empty());
    }

    #[test]
    fn test_missing_minute_and_scorer_default() {
        let mut snap = snapshot(MatchStatus::InPlay);
        snap.events.push(MatchEvent {
            id: 9,
            kind: EventKind::Goal,
            team: tracked(),
            player: None,
            counterpart: None,
            minute: None,
        });
        let mut state = MatchState::default();
        let out = diff(&snap, &mut state, TEAM_ID);
        match &out[0] {
            Announcement::Goal { scorer, minute, .. } => {
                assert_eq!(scorer, "Unknown");
                assert_eq!(minute, "?");
            }
            other => panic!("expected goal, got {other:?}"),
        }
    }

    #[test]
    fn test_tracked_sub_announced_with_unknown_off_player() {
        let mut snap = snapshot(MatchStatus::InPlay);
        snap.events.push(sub(31, tracked(), "Nkunku", None, Some(60)));

        let mut state = MatchState::default();
        let out = diff(&snap, &mut state, TEAM_ID);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Announcement::Substitution {
                player_in,
                player_out,
                minute,
                ..
            } => {
                assert_eq!(player_in, "Nkunku");
                assert_eq!(player_out, "Unknown");
                assert_eq!(minute, "60");
            }
            other => panic!("expected substitution, got {other:?}"),
        }
        assert!(state.subs_announced.contains(&31));
    }

    #[test]
    fn test_opponent_sub_absorbed_silently() {
        let mut snap = snapshot(MatchStatus::InPlay);
        snap.events
            .push(sub(32, opponent(), "Mount", Some("Casemiro"), Some(70)));

        let mut state = MatchState::default();
        let out = diff(&snap, &mut state, TEAM_ID);
        assert!(out.is_empty());
        assert!(state.subs_announced.contains(&32));
    }

    #[test]
    fn test_final_score_win_once() {
        let mut snap = snapshot(MatchStatus::Finished);
        snap.final_score = Some(FinalScore { home: 2, away: 1 });

        let mut state = MatchState::for_match(snap.id);
        let out = diff(&snap, &mut state, TEAM_ID);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Announcement::FinalScore {
                home_score,
                away_score,
                result,
                ..
            } => {
                assert_eq!((*home_score, *away_score), (2, 1));
                assert_eq!(*result, MatchResult::Win);
            }
            other => panic!("expected final score, got {other:?}"),
        }
        assert!(state.final_score_announced);

        assert!(diff(&snap, &mut state, TEAM_ID).is_empty());
    }

    #[test]
    fn test_final_score_needs_finished_status() {
        let mut snap = snapshot(MatchStatus::InPlay);
        snap.final_score = Some(FinalScore { home: 1, away: 0 });
        let mut state = MatchState::for_match(snap.id);
        assert!(diff(&snap, &mut state, TEAM_ID).is_empty());
        assert!(!state.final_score_announced);
    }

    #[test]
    fn test_new_match_resets_state() {
        let mut stale = MatchState::for_match(4000);
        stale.lineup_announced = true;
        stale.goals_announced.insert(1);
        stale.subs_announced.insert(2);
        stale.final_score_announced = true;

        let mut snap = snapshot(MatchStatus::InPlay);
        snap.events.push(goal(1, tracked(), "Palmer", Some(5)));

        // Goal id 1 was announced for the old match; the fresh match must
        // announce it again from a clean slate.
        let out = diff(&snap, &mut stale, TEAM_ID);
        assert_eq!(out.len(), 1);
        assert!(stale.tracks(snap.id));
        assert!(!stale.final_score_announced);
        assert_eq!(stale.goals_announced.len(), 1);
    }

    #[test]
    fn test_fixed_category_order() {
        let mut snap = snapshot(MatchStatus::Finished);
        snap.lineups.push(Lineup {
            team_id: TEAM_ID,
            formation: Some("4-2-3-1".to_string()),
            starters: vec!["Sanchez".to_string()],
        });
        // Events deliberately listed sub-before-goal.
        snap.events
            .push(sub(50, tracked(), "Madueke", Some("Sterling"), Some(80)));
        snap.events.push(goal(51, tracked(), "Jackson", Some(88)));
        snap.final_score = Some(FinalScore { home: 1, away: 0 });

        let mut state = MatchState::default();
        let out = diff(&snap, &mut state, TEAM_ID);
        assert_eq!(out.len(), 4);
        assert!(matches!(out[0], Announcement::Lineup { .. }));
        assert!(matches!(out[1], Announcement::Goal { .. }));
        assert!(matches!(out[2], Announcement::Substitution { .. }));
        assert!(matches!(out[3], Announcement::FinalScore { .. }));
    }

    #[test]
    fn test_diff_is_idempotent_for_any_fixed_snapshot() {
        let mut snap = snapshot(MatchStatus::Finished);
        snap.lineups.push(Lineup {
            team_id: TEAM_ID,
            formation: None,
            starters: vec!["Sanchez".to_string()],
        });
        snap.events.push(goal(1, tracked(), "Palmer", Some(10)));
        snap.events
            .push(sub(2, opponent(), "Mount", None, Some(46)));
        snap.final_score = Some(FinalScore { home: 1, away: 0 });

        let mut state = MatchState::default();
        let first = diff(&snap, &mut state, TEAM_ID);
        assert!(!first.is_empty());
        let second = diff(&snap, &mut state, TEAM_ID);
        assert!(second.is_empty());
    }
}
