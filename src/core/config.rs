//! Match configuration.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Score that ends a standard Truco match.
pub const WINNING_SCORE: u32 = 12;

/// Rules parameters for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// A team reaching or passing this score wins immediately.
    pub winning_score: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
        }
    }
}

impl MatchConfig {
    /// Config with a custom winning score (short matches in tests/sims).
    #[must_use]
    pub fn with_winning_score(mut self, score: u32) -> Self {
        self.winning_score = score;
        self
    }

    /// Reject configs the engine cannot run.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.winning_score == 0 {
            return Err(EngineError::config("winning_score must be at least 1"));
        }
        Ok(())
    }
}
