//! Team identification and per-team data storage.
//!
//! ## Team
//!
//! Truco here is played by exactly two one-player teams, so the seat of a
//! player and the team it scores for are the same thing. `Team::A` is seat 0
//! (always first to act), `Team::B` is seat 1.
//!
//! ## TeamMap
//!
//! Fixed-size per-team storage backed by a `[T; 2]`, indexable by `Team`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two teams (equivalently, one of the two seats).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Seat 0. Opens every betting round and leads every trick.
    A,
    /// Seat 1.
    B,
}

impl Team {
    /// Both teams in seat order.
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "Team A"),
            Team::B => write!(f, "Team B"),
        }
    }
}

/// Per-team data with O(1) access.
///
/// ## Example
///
/// ```
/// use truco_engine::core::{Team, TeamMap};
///
/// let mut scores: TeamMap<u32> = TeamMap::default();
/// scores[Team::B] += 3;
///
/// assert_eq!(scores[Team::A], 0);
/// assert_eq!(scores, TeamMap::from_array([0, 3]));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: [T; 2],
}

impl<T> TeamMap<T> {
    /// Create a map from values in seat order.
    pub const fn from_array(data: [T; 2]) -> Self {
        Self { data }
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        &self.data[team.index()]
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        &mut self.data[team.index()]
    }
}
