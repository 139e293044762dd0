//! # truco-engine
//!
//! A deterministic rules engine for two-team Truco (the 40-card Brazilian
//! variant with vira and manilhas).
//!
//! ## Design Principles
//!
//! 1. **Referee, not player**: The engine validates and applies actions. It
//!    never decides anything; decisions come from `driver::Agent`s.
//!
//! 2. **Explicit randomness**: Shuffling takes a caller-supplied RNG. Two
//!    engines driven by equally seeded `DealRng`s produce identical matches.
//!
//! 3. **Rejected calls change nothing**: Every mutation returns a `Result`
//!    and leaves the engine untouched on error.
//!
//! ## Modules
//!
//! - `cards`: Ranks, suits, the deck, manilhas and trick comparison
//! - `core`: Teams, actions, history events, config, RNG, player views
//! - `rules`: Betting escalation, tricks, and the `MatchEngine`
//! - `driver`: The `Agent` seam and the loop that plays agents against each other
//! - `error`: Protocol and move errors

pub mod cards;
pub mod core;
pub mod driver;
pub mod error;
pub mod rules;

// Re-export commonly used types
pub use crate::cards::{compare, Card, Comparison, Deck, Manilhas, Rank, Suit};

pub use crate::core::{
    BetAction, DealRng, MatchConfig, MatchEvent, PlayAction, PlayerView, Team, TeamMap,
};

pub use crate::rules::{
    BetLevel, BettingOutcome, BettingStep, DealSetup, MatchEngine, Phase, TrickResult,
};

pub use crate::driver::{Agent, DriverConfig, MatchDriver, MatchReport, RandomAgent, ScriptedAgent};

pub use crate::error::{EngineError, ProtocolError};
