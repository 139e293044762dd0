//! Betting escalation: truco -> six -> nine -> twelve.
//!
//! A `Betting` lives for one deal. The bet stack and the agreed hand value
//! persist across the deal's tricks; the turn/pass bookkeeping is reset by
//! [`Betting::open_round`] before each trick.
//!
//! ## Transitions
//!
//! | action     | no bet pending                 | bet pending                 |
//! |------------|--------------------------------|-----------------------------|
//! | `Bet(l)`   | push if `l` is the next level  | push (a raise)              |
//! | `Accept`   | `NothingPending`               | close `Accepted`            |
//! | `Run`      | `NothingPending`               | close `RanAway`             |
//! | `Pass`     | turn passes; 2nd pass `NoBet`  | same as accept (`PassAccepted`) |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core::{BetAction, Team};
use crate::error::{EngineError, ProtocolError};

/// Value of a deal nobody has bet on.
pub const DEFAULT_HAND_VALUE: u32 = 1;

/// Bet escalation level, in the only order it may be raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetLevel {
    Truco,
    Six,
    Nine,
    Twelve,
}

impl BetLevel {
    pub const ALL: [BetLevel; 4] = [
        BetLevel::Truco,
        BetLevel::Six,
        BetLevel::Nine,
        BetLevel::Twelve,
    ];

    /// Points the deal is worth once this level is agreed.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            BetLevel::Truco => 3,
            BetLevel::Six => 6,
            BetLevel::Nine => 9,
            BetLevel::Twelve => 12,
        }
    }

    /// The only level that may follow this one.
    #[must_use]
    pub const fn next(self) -> Option<BetLevel> {
        match self {
            BetLevel::Truco => Some(BetLevel::Six),
            BetLevel::Six => Some(BetLevel::Nine),
            BetLevel::Nine => Some(BetLevel::Twelve),
            BetLevel::Twelve => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            BetLevel::Truco => "truco",
            BetLevel::Six => "six",
            BetLevel::Nine => "nine",
            BetLevel::Twelve => "twelve",
        }
    }
}

impl fmt::Display for BetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BetLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BetLevel::ALL
            .into_iter()
            .find(|l| l.name() == wanted)
            .ok_or_else(|| EngineError::config(format!("unknown bet level '{s}'")))
    }
}

impl TryFrom<u32> for BetLevel {
    type Error = EngineError;

    /// Level from its point value (3, 6, 9, 12).
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        BetLevel::ALL
            .into_iter()
            .find(|l| l.value() == value)
            .ok_or_else(|| EngineError::config(format!("no bet level is worth {value} points")))
    }
}

/// One raise on the bet stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BetEntry {
    pub level: BetLevel,
    pub value: u32,
    /// Team that proposed it.
    pub team: Team,
}

/// Append-only stack of raises for one deal. Holds at most four entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetStack {
    entries: SmallVec<[BetEntry; 4]>,
}

impl BetStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent raise.
    #[must_use]
    pub fn top(&self) -> Option<&BetEntry> {
        self.entries.last()
    }

    /// The level a raise must name next, `None` once twelve is on the stack.
    #[must_use]
    pub fn next_level(&self) -> Option<BetLevel> {
        match self.top() {
            None => Some(BetLevel::Truco),
            Some(entry) => entry.level.next(),
        }
    }

    /// Points ceded when the side facing the top raise runs.
    ///
    /// One entry: the unbet value. Otherwise: the value agreed before the
    /// top raise.
    #[must_use]
    pub fn run_points(&self) -> u32 {
        match self.entries.len() {
            0 | 1 => DEFAULT_HAND_VALUE,
            n => self.entries[n - 2].value,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[BetEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, level: BetLevel, team: Team) -> Result<BetEntry, ProtocolError> {
        let expected = self.next_level();
        if expected != Some(level) {
            return Err(ProtocolError::InvalidEscalation {
                expected,
                requested: level,
            });
        }
        let entry = BetEntry {
            level,
            value: level.value(),
            team,
        };
        self.entries.push(entry);
        Ok(entry)
    }
}

/// How a betting round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BettingOutcome {
    /// A raise was accepted (explicitly or by passing); the trick is played
    /// for `value`.
    Accepted { value: u32 },
    /// The responder ran; the deal ends and `scoring_team` takes `points`.
    RanAway { scoring_team: Team, points: u32 },
    /// Both sides passed without raising.
    NoBet,
}

/// Round state as seen by observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BettingState {
    AwaitingAction { player: Team },
    Complete(BettingOutcome),
}

/// Result of one accepted betting action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BettingStep {
    /// A raise was pushed and `responder` must answer it.
    Raised { entry: BetEntry, responder: Team },
    /// An unprompted pass; `next` acts now.
    Passed { next: Team },
    /// Both sides passed; round closed with `NoBet`.
    BothPassed { value: u32 },
    /// Explicit accept.
    Accepted { value: u32 },
    /// A pass while a raise was pending, which counts as accepting it.
    PassAccepted { value: u32 },
    /// The responder ran.
    RanAway { scoring_team: Team, points: u32 },
}

impl BettingStep {
    /// The outcome this step closed the round with, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<BettingOutcome> {
        match *self {
            BettingStep::Raised { .. } | BettingStep::Passed { .. } => None,
            BettingStep::BothPassed { .. } => Some(BettingOutcome::NoBet),
            BettingStep::Accepted { value } | BettingStep::PassAccepted { value } => {
                Some(BettingOutcome::Accepted { value })
            }
            BettingStep::RanAway {
                scoring_team,
                points,
            } => Some(BettingOutcome::RanAway {
                scoring_team,
                points,
            }),
        }
    }
}

/// Betting state for one deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Betting {
    stack: BetStack,
    hand_value: u32,
    state: BettingState,
    pending: bool,
    passes: u8,
}

impl Default for Betting {
    fn default() -> Self {
        Self::new()
    }
}

impl Betting {
    /// Fresh deal: empty stack, hand worth 1, Team A to act.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: BetStack::new(),
            hand_value: DEFAULT_HAND_VALUE,
            state: BettingState::AwaitingAction { player: Team::A },
            pending: false,
            passes: 0,
        }
    }

    /// Start the betting round before the next trick. Team A acts first;
    /// stack and hand value carry over.
    pub fn open_round(&mut self) {
        self.state = BettingState::AwaitingAction { player: Team::A };
        self.pending = false;
        self.passes = 0;
    }

    #[must_use]
    pub fn stack(&self) -> &BetStack {
        &self.stack
    }

    /// Points the deal is currently worth.
    #[must_use]
    pub fn hand_value(&self) -> u32 {
        self.hand_value
    }

    #[must_use]
    pub fn state(&self) -> BettingState {
        self.state
    }

    /// Whose action the round is waiting for.
    #[must_use]
    pub fn turn(&self) -> Option<Team> {
        match self.state {
            BettingState::AwaitingAction { player } => Some(player),
            BettingState::Complete(_) => None,
        }
    }

    /// The raise awaiting a response, if any.
    #[must_use]
    pub fn pending_bet(&self) -> Option<&BetEntry> {
        if self.pending {
            self.stack.top()
        } else {
            None
        }
    }

    /// Actions `team` may legally submit right now.
    #[must_use]
    pub fn legal_actions(&self, team: Team) -> Vec<BetAction> {
        if self.turn() != Some(team) {
            return Vec::new();
        }
        let mut actions = Vec::with_capacity(4);
        if let Some(level) = self.stack.next_level() {
            actions.push(BetAction::Bet(level));
        }
        if self.pending {
            actions.push(BetAction::Accept);
            actions.push(BetAction::Run);
        }
        actions.push(BetAction::Pass);
        actions
    }

    /// Apply `action` by `player`.
    pub fn apply(&mut self, player: Team, action: BetAction) -> Result<BettingStep, ProtocolError> {
        let current = match self.state {
            BettingState::AwaitingAction { player } => player,
            BettingState::Complete(_) => return Err(ProtocolError::BettingClosed),
        };
        if player != current {
            return Err(ProtocolError::OutOfTurn {
                expected: current,
                actual: player,
            });
        }

        let step = match action {
            BetAction::Bet(level) => {
                let entry = self.stack.push(level, player)?;
                self.hand_value = entry.value;
                self.pending = true;
                self.passes = 0;
                BettingStep::Raised {
                    entry,
                    responder: player.opponent(),
                }
            }
            BetAction::Accept => {
                let value = self.accept_pending()?;
                BettingStep::Accepted { value }
            }
            BetAction::Run => {
                let top = *self.pending_bet().ok_or(ProtocolError::NothingPending)?;
                BettingStep::RanAway {
                    scoring_team: top.team,
                    points: self.stack.run_points(),
                }
            }
            BetAction::Pass if self.pending => {
                let value = self.accept_pending()?;
                BettingStep::PassAccepted { value }
            }
            BetAction::Pass => {
                self.passes += 1;
                if self.passes >= 2 {
                    BettingStep::BothPassed { value: self.hand_value }
                } else {
                    BettingStep::Passed { next: player.opponent() }
                }
            }
        };

        self.state = match step.outcome() {
            Some(outcome) => {
                self.pending = false;
                BettingState::Complete(outcome)
            }
            None => BettingState::AwaitingAction {
                player: player.opponent(),
            },
        };
        debug!(
            team = ?player,
            ?action,
            ?step,
            hand_value = self.hand_value,
            "betting action applied"
        );
        Ok(step)
    }

    fn accept_pending(&mut self) -> Result<u32, ProtocolError> {
        let top = self.pending_bet().ok_or(ProtocolError::NothingPending)?;
        self.hand_value = top.value;
        Ok(self.hand_value)
    }
}
