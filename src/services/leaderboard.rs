//! Leaderboard ranking.
//!
//! Species diversity weighs ten times more than sighting volume, so
//! repeatedly reporting one species moves a user up slowly.

use crate::models::{Sighting, User};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Points per distinct species sighted
pub const DISTINCT_TARGET_WEIGHT: u64 = 10;
/// Points per sighting
pub const SIGHTING_WEIGHT: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// Dense rank starting at 1; equal scores share a position
    pub position: u32,
    pub user_id: Uuid,
    pub username: String,
    pub score: u64,
    pub distinct_targets: u64,
    pub sighting_count: u64,
    pub is_current_user: bool,
}

/// Score a user from their sightings
pub fn score(distinct_targets: u64, sighting_count: u64) -> u64 {
    DISTINCT_TARGET_WEIGHT * distinct_targets + SIGHTING_WEIGHT * sighting_count
}

/// Rank every user by their sightings.
///
/// Sightings of users not in `users` are ignored. Ties on score are ordered
/// by username and share a position; the next lower score gets the
/// following position.
pub fn compute_leaderboard(
    users: &[User],
    sightings: &[Sighting],
    current_user_id: Option<Uuid>,
) -> Vec<LeaderboardEntry> {
    let mut by_user: HashMap<Uuid, Vec<&Sighting>> = HashMap::with_capacity(users.len());
    for sighting in sightings {
        by_user.entry(sighting.user_id).or_default().push(sighting);
    }

    let mut entries: Vec<LeaderboardEntry> = users
        .iter()
        .map(|user| {
            let group = by_user.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
            let distinct_targets = group
                .iter()
                .map(|sighting| sighting.target_id)
                .collect::<HashSet<_>>()
                .len() as u64;
            let sighting_count = group.len() as u64;

            LeaderboardEntry {
                position: 0,
                user_id: user.id,
                username: user.username.clone(),
                score: score(distinct_targets, sighting_count),
                distinct_targets,
                sighting_count,
                is_current_user: current_user_id == Some(user.id),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.username.cmp(&b.username))
    });

    let mut position = 0;
    let mut previous_score = None;
    for entry in &mut entries {
        if previous_score != Some(entry.score) {
            position += 1;
            previous_score = Some(entry.score);
        }
        entry.position = position;
    }

    entries
}
