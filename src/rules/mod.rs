//! Truco rules: betting escalation, tricks, and the match engine.
//!
//! `MatchEngine` is the single entry point. `Betting`, `Table` and
//! `TrickLog` are the per-deal pieces it is built from, exposed so callers
//! and tests can reason about them directly.

pub mod betting;
pub mod engine;
pub mod tricks;

pub use betting::{
    BetEntry, BetLevel, BetStack, Betting, BettingOutcome, BettingState, BettingStep,
    DEFAULT_HAND_VALUE,
};
pub use engine::{DealSetup, MatchEngine, Phase, TrickResult};
pub use tricks::{trick_winner, Hand, Table, TrickLog, HAND_SIZE, TRICKS_TO_WIN};
