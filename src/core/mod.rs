//! Core types shared by the rules and the driver: teams, actions, history,
//! configuration, the per-team view, and the deal RNG.

pub mod action;
pub mod config;
pub mod history;
pub mod rng;
pub mod state;
pub mod team;

pub use action::{BetAction, PlayAction};
pub use config::{MatchConfig, WINNING_SCORE};
pub use history::{DealEnd, MatchEvent};
pub use rng::DealRng;
pub use state::PlayerView;
pub use team::{Team, TeamMap};
