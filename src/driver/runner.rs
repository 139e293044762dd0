//! Match loop: asks agents for decisions and feeds them to the engine.
//!
//! The engine rejects illegal actions; this loop decides what happens next.
//! A rejected or missing decision is asked for again up to `max_retries`
//! times. If it still fails it counts as a violation and is replaced by a
//! safe default (pass when betting, the first card in hand when playing).
//! A team that exceeds `max_violations` forfeits the match.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::agent::Agent;
use crate::cards::Card;
use crate::core::{BetAction, PlayAction, Team, TeamMap};
use crate::error::{EngineError, ProtocolError};
use crate::rules::{MatchEngine, Phase};

/// Driver policy knobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Extra attempts an agent gets after a rejected or failed decision.
    pub max_retries: u32,

    /// Violations a team may commit before it forfeits.
    pub max_violations: u32,

    /// Play a team's last card without asking its agent.
    pub auto_play_last_card: bool,

    /// Stop after this many deals even if nobody has won (0 = no limit).
    pub max_deals: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            max_violations: 3,
            auto_play_last_card: true,
            max_deals: 0,
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_max_violations(mut self, max: u32) -> Self {
        self.max_violations = max;
        self
    }

    pub fn with_auto_play_last_card(mut self, enabled: bool) -> Self {
        self.auto_play_last_card = enabled;
        self
    }

    pub fn with_max_deals(mut self, max: u32) -> Self {
        self.max_deals = max;
        self
    }
}

/// Summary of a driven match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// `None` only if `max_deals` cut the match short.
    pub winner: Option<Team>,
    pub scores: TeamMap<u32>,
    pub deals: u32,
    pub violations: TeamMap<u32>,
    pub forfeited: Option<Team>,
}

/// Plays whole matches between two agents.
#[derive(Clone, Debug, Default)]
pub struct MatchDriver {
    config: DriverConfig,
}

impl MatchDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Drive `engine` until the match ends (or `max_deals` is hit).
    ///
    /// Errors only if the engine rejects one of the driver's own substitute
    /// actions, which would mean the engine and driver disagree on the rules.
    pub fn run<R: Rng + ?Sized>(
        &self,
        engine: &mut MatchEngine,
        mut agents: TeamMap<&mut dyn Agent>,
        rng: &mut R,
    ) -> Result<MatchReport, EngineError> {
        let mut violations: TeamMap<u32> = TeamMap::default();
        let mut forfeited = None;
        info!(a = agents[Team::A].name(), b = agents[Team::B].name(), "match starting");

        while !engine.is_finished() {
            if self.config.max_deals != 0 && engine.deal_number() >= self.config.max_deals {
                warn!(deals = engine.deal_number(), "deal limit reached before the match finished");
                break;
            }
            engine.new_deal(rng)?;

            while matches!(engine.phase(), Phase::Betting | Phase::Playing) {
                let offender = match engine.phase() {
                    Phase::Betting => self.betting_step(engine, &mut agents)?,
                    _ => self.playing_step(engine, &mut agents)?,
                };
                if let Some(team) = offender {
                    violations[team] += 1;
                    if violations[team] > self.config.max_violations {
                        warn!(
                            team = ?team,
                            violations = violations[team],
                            "too many violations, forfeiting"
                        );
                        engine.forfeit(team)?;
                        forfeited = Some(team);
                    }
                }
            }
        }

        let report = MatchReport {
            winner: engine.winner(),
            scores: engine.scores(),
            deals: engine.deal_number(),
            violations,
            forfeited,
        };
        info!(winner = ?report.winner, deals = report.deals, "match over");
        Ok(report)
    }

    /// One betting decision. Returns the offending team if the agent's
    /// decision had to be replaced.
    fn betting_step(
        &self,
        engine: &mut MatchEngine,
        agents: &mut TeamMap<&mut dyn Agent>,
    ) -> Result<Option<Team>, EngineError> {
        let team = engine.betting_turn().ok_or(ProtocolError::BettingClosed)?;
        let view = engine.view(team);
        let legal = engine.legal_bet_actions(team);

        let mut rejected = String::new();
        for attempt in 0..=self.config.max_retries {
            let outcome = match agents[team].decide_bet(&view, &legal) {
                Ok(action) => engine
                    .submit_betting_action(team, action)
                    .map(|_| ())
                    .map_err(|e| e.to_string()),
                Err(err) => Err(err.to_string()),
            };
            match outcome {
                Ok(()) => return Ok(None),
                Err(reason) => {
                    debug!(team = ?team, attempt, reason = %reason, "betting decision rejected");
                    rejected = reason;
                }
            }
        }

        warn!(team = ?team, reason = %rejected, "betting decision rejected, passing instead");
        engine.submit_betting_action(team, BetAction::Pass)?;
        Ok(Some(team))
    }

    /// One card play, or the trick resolution once both cards are down.
    fn playing_step(
        &self,
        engine: &mut MatchEngine,
        agents: &mut TeamMap<&mut dyn Agent>,
    ) -> Result<Option<Team>, EngineError> {
        let Some(team) = Team::ALL.into_iter().find(|&t| !engine.legal_plays(t).is_empty()) else {
            engine.resolve_trick()?;
            return Ok(None);
        };
        let hand: Vec<Card> = engine.hand(team).to_vec();

        if self.config.auto_play_last_card && hand.len() == 1 {
            engine.submit_card_play(team, hand[0])?;
            return Ok(None);
        }

        let view = engine.view(team);
        let mut rejected = String::new();
        for attempt in 0..=self.config.max_retries {
            let outcome = match agents[team].decide_play(&view) {
                Ok(PlayAction::Play(card)) => engine
                    .submit_card_play(team, card)
                    .map(|_| ())
                    .map_err(|e| e.to_string()),
                Err(err) => Err(err.to_string()),
            };
            match outcome {
                Ok(()) => return Ok(None),
                Err(reason) => {
                    debug!(team = ?team, attempt, reason = %reason, "card play rejected");
                    rejected = reason;
                }
            }
        }

        let fallback = hand[0];
        warn!(
            team = ?team,
            reason = %rejected,
            card = %fallback,
            "card play rejected, playing first card"
        );
        engine.submit_card_play(team, fallback)?;
        Ok(Some(team))
    }
}
