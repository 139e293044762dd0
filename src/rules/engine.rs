//! The match engine: one instance owns all state of one Truco match.
//!
//! ## Lifecycle
//!
//! ```text
//! AwaitingDeal --new_deal--> Betting --closed--> Playing --resolve_trick--> Betting ...
//!                               |                                  |
//!                               +--run--> deal scored <--2 tricks--+
//!                                            |
//!                          AwaitingDeal <----+----> Finished (score >= winning score)
//! ```
//!
//! Every mutation takes `&mut self` and returns `Result<_, EngineError>`;
//! a rejected call leaves the engine unchanged.

use im::Vector;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::betting::{
    BetEntry, Betting, BettingOutcome, BettingState, BettingStep, DEFAULT_HAND_VALUE,
};
use super::tricks::{trick_winner, Hand, Table, TrickLog, HAND_SIZE};
use crate::cards::{Card, Deck, Manilhas};
use crate::core::{
    BetAction, DealEnd, MatchConfig, MatchEvent, PlayAction, PlayerView, Team, TeamMap,
};
use crate::error::{EngineError, ProtocolError};

/// Where the match is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No deal in progress; `new_deal` is the only legal mutation.
    AwaitingDeal,
    /// A betting round precedes the next trick.
    Betting,
    /// Both teams play a card, then the trick is resolved.
    Playing,
    /// A team reached the winning score.
    Finished { winner: Team },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingDeal => f.write_str("awaiting deal"),
            Phase::Betting => f.write_str("betting"),
            Phase::Playing => f.write_str("playing"),
            Phase::Finished { winner } => write!(f, "finished ({winner} won)"),
        }
    }
}

/// What a fresh deal looks like.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealSetup {
    /// 1-based deal number within the match.
    pub deal: u32,
    pub vira: Card,
    pub manilhas: Manilhas,
    pub hands: TeamMap<Hand>,
}

/// Outcome of resolving one trick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickResult {
    /// 1-based trick number within the deal.
    pub trick: u8,
    pub cards: TeamMap<Card>,
    pub winner: Team,
    /// Set when this trick decided the deal.
    pub deal_winner: Option<Team>,
    /// Points awarded to `deal_winner` (0 if the deal continues).
    pub points: u32,
    /// Set when the award ended the match.
    pub match_winner: Option<Team>,
}

#[derive(Clone, Debug)]
struct Deal {
    number: u32,
    vira: Card,
    manilhas: Manilhas,
    hands: TeamMap<Hand>,
    /// Undealt remainder, discarded with the deal.
    stock: Deck,
    betting: Betting,
    table: Table,
    tricks: TrickLog,
}

/// Referee for one match between Team A and Team B.
///
/// ## Example
///
/// ```
/// use truco_engine::core::{BetAction, DealRng, Team};
/// use truco_engine::rules::{MatchEngine, Phase};
///
/// let mut engine = MatchEngine::standard();
/// let setup = engine.new_deal(&mut DealRng::new(1)).unwrap();
/// assert_eq!(setup.hands[Team::A].len(), 3);
///
/// engine.submit_betting_action(Team::A, BetAction::Pass).unwrap();
/// engine.submit_betting_action(Team::B, BetAction::Pass).unwrap();
/// assert_eq!(engine.phase(), Phase::Playing);
/// assert_eq!(engine.hand_value(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    scores: TeamMap<u32>,
    phase: Phase,
    deals_dealt: u32,
    deal: Option<Deal>,
    history: Vector<MatchEvent>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl MatchEngine {
    /// Engine for a standard match to 12.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_valid_config(MatchConfig::default())
    }

    /// Engine with a custom config.
    pub fn new(config: MatchConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: MatchConfig) -> Self {
        Self {
            config,
            scores: TeamMap::default(),
            phase: Phase::AwaitingDeal,
            deals_dealt: 0,
            deal: None,
            history: Vector::new(),
        }
    }

    // === Mutations ===

    /// Shuffle a fresh deck with `rng` and deal.
    pub fn new_deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<DealSetup, EngineError> {
        self.ensure_can_deal()?;
        self.deal_from(Deck::shuffled(rng))
    }

    /// Deal from a caller-arranged deck (front of the deck is dealt first).
    pub fn new_deal_from_deck(&mut self, deck: Deck) -> Result<DealSetup, EngineError> {
        self.ensure_can_deal()?;
        self.deal_from(deck)
    }

    /// Apply a betting action for `player`.
    pub fn submit_betting_action(
        &mut self,
        player: Team,
        action: BetAction,
    ) -> Result<BettingStep, EngineError> {
        self.expect_phase(Phase::Betting, "betting action")?;
        let deal = self.active_deal_mut()?;
        let step = deal.betting.apply(player, action)?;
        let number = deal.number;

        self.history.push_back(MatchEvent::BettingAction {
            deal: number,
            team: player,
            action,
            step,
        });

        match step.outcome() {
            Some(BettingOutcome::RanAway { scoring_team, points }) => {
                self.finish_deal(scoring_team, points, DealEnd::RanAway);
            }
            Some(BettingOutcome::Accepted { .. } | BettingOutcome::NoBet) => {
                self.phase = Phase::Playing;
            }
            None => {}
        }
        Ok(step)
    }

    /// Move `card` from `player`'s hand to the table. Returns the remaining
    /// hand.
    pub fn submit_card_play(&mut self, player: Team, card: Card) -> Result<Hand, EngineError> {
        self.expect_phase(Phase::Playing, "card play")?;
        let deal = self.active_deal_mut()?;

        if deal.table.card(player).is_some() {
            return Err(ProtocolError::CardAlreadyPlayed(player).into());
        }
        let Some(pos) = deal.hands[player].iter().position(|&c| c == card) else {
            return Err(EngineError::InvalidMove { team: player, card });
        };
        deal.table.place(player, card)?;
        deal.hands[player].remove(pos);

        let trick = deal.tricks.len() as u8 + 1;
        let number = deal.number;
        let remaining = deal.hands[player].clone();

        debug!(deal = number, trick, team = ?player, %card, "card played");
        self.history.push_back(MatchEvent::CardPlayed {
            deal: number,
            trick,
            team: player,
            card,
        });
        Ok(remaining)
    }

    /// Typed-action form of [`MatchEngine::submit_card_play`].
    pub fn play(&mut self, player: Team, action: PlayAction) -> Result<Hand, EngineError> {
        self.submit_card_play(player, action.card())
    }

    /// Compare the two cards on the table and record the winner.
    ///
    /// Ends the deal (and possibly the match) when a team has two tricks;
    /// otherwise opens the betting round for the next trick.
    pub fn resolve_trick(&mut self) -> Result<TrickResult, EngineError> {
        self.expect_phase(Phase::Playing, "trick resolution")?;
        let deal = self.active_deal_mut()?;
        let cards = deal.table.take_complete().ok_or(ProtocolError::TrickIncomplete)?;

        let winner = trick_winner(cards, &deal.manilhas);
        deal.tricks.record(winner);
        let trick = deal.tricks.len() as u8;
        let number = deal.number;
        let deal_winner = deal.tricks.deal_winner();
        let hand_value = deal.betting.hand_value();
        if deal_winner.is_none() {
            deal.betting.open_round();
        }

        let (card_a, card_b) = (cards[Team::A], cards[Team::B]);
        debug!(deal = number, trick, a = %card_a, b = %card_b, winner = ?winner, "trick resolved");
        self.history.push_back(MatchEvent::TrickResolved {
            deal: number,
            trick,
            cards,
            winner,
        });

        let mut result = TrickResult {
            trick,
            cards,
            winner,
            deal_winner,
            points: 0,
            match_winner: None,
        };

        match deal_winner {
            Some(team) => {
                result.points = hand_value;
                result.match_winner = self.finish_deal(team, hand_value, DealEnd::Tricks);
            }
            None => self.phase = Phase::Betting,
        }
        Ok(result)
    }

    /// `team` concedes: the opponent is raised to the winning score.
    pub fn forfeit(&mut self, team: Team) -> Result<Team, EngineError> {
        if let Phase::Finished { .. } = self.phase {
            return Err(ProtocolError::MatchFinished.into());
        }
        let winner = team.opponent();
        self.scores[winner] = self.scores[winner].max(self.config.winning_score);
        info!(team = ?team, "team forfeited the match");
        self.history.push_back(MatchEvent::Forfeited { team });
        self.end_match(winner);
        Ok(winner)
    }

    // === Observers ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn scores(&self) -> TeamMap<u32> {
        self.scores
    }

    #[must_use]
    pub fn score(&self, team: Team) -> u32 {
        self.scores[team]
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    #[must_use]
    pub fn winner(&self) -> Option<Team> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Number of deals dealt so far (the current deal's number).
    #[must_use]
    pub fn deal_number(&self) -> u32 {
        self.deals_dealt
    }

    /// Points the current deal is worth (1 before any deal).
    #[must_use]
    pub fn hand_value(&self) -> u32 {
        self.deal.as_ref().map_or(DEFAULT_HAND_VALUE, |d| d.betting.hand_value())
    }

    /// Raises made in the current deal, oldest first.
    #[must_use]
    pub fn bet_stack(&self) -> &[BetEntry] {
        self.deal.as_ref().map(|d| d.betting.stack().entries()).unwrap_or_default()
    }

    /// The raise awaiting a response, if any.
    #[must_use]
    pub fn pending_bet(&self) -> Option<&BetEntry> {
        self.betting_deal().and_then(|d| d.betting.pending_bet())
    }

    /// Betting round state, while the deal is in its betting phase.
    #[must_use]
    pub fn betting_state(&self) -> Option<BettingState> {
        self.betting_deal().map(|d| d.betting.state())
    }

    /// Whose betting action the engine is waiting for.
    #[must_use]
    pub fn betting_turn(&self) -> Option<Team> {
        self.betting_deal().and_then(|d| d.betting.turn())
    }

    /// Trick winners of the current (or most recent) deal.
    #[must_use]
    pub fn trick_log(&self) -> &[Team] {
        self.deal.as_ref().map(|d| d.tricks.winners()).unwrap_or_default()
    }

    #[must_use]
    pub fn vira(&self) -> Option<Card> {
        self.deal.as_ref().map(|d| d.vira)
    }

    #[must_use]
    pub fn manilhas(&self) -> Option<Manilhas> {
        self.deal.as_ref().map(|d| d.manilhas)
    }

    /// Cards still in `team`'s hand.
    #[must_use]
    pub fn hand(&self, team: Team) -> &[Card] {
        self.deal.as_ref().map(|d| d.hands[team].as_slice()).unwrap_or_default()
    }

    /// Cards on the table for the current trick.
    #[must_use]
    pub fn table(&self) -> TeamMap<Option<Card>> {
        self.deal.as_ref().map(|d| d.table.cards()).unwrap_or_default()
    }

    /// Undealt cards left in this deal's deck.
    #[must_use]
    pub fn stock_len(&self) -> usize {
        self.deal.as_ref().map_or(0, |d| d.stock.len())
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MatchEvent> {
        &self.history
    }

    /// Betting actions `team` may submit now.
    #[must_use]
    pub fn legal_bet_actions(&self, team: Team) -> Vec<BetAction> {
        self.betting_deal().map(|d| d.betting.legal_actions(team)).unwrap_or_default()
    }

    /// Cards `team` may play now.
    #[must_use]
    pub fn legal_plays(&self, team: Team) -> Vec<Card> {
        match (&self.deal, self.phase) {
            (Some(d), Phase::Playing) if d.table.card(team).is_none() => d.hands[team].to_vec(),
            _ => Vec::new(),
        }
    }

    /// What `team` is allowed to see.
    #[must_use]
    pub fn view(&self, team: Team) -> PlayerView {
        PlayerView {
            team,
            phase: self.phase,
            deal: self.deals_dealt,
            hand: self.hand(team).iter().copied().collect(),
            opponent_cards: self.hand(team.opponent()).len(),
            vira: self.vira(),
            manilhas: self.manilhas().map(|m| m.cards()),
            scores: self.scores,
            hand_value: self.hand_value(),
            bet_stack: self.bet_stack().to_vec(),
            pending_bet: self.pending_bet().copied(),
            betting_turn: self.betting_turn(),
            table: self.table(),
            tricks: self.trick_log().to_vec(),
        }
    }

    // === Internals ===

    fn ensure_can_deal(&self) -> Result<(), EngineError> {
        match self.phase {
            Phase::AwaitingDeal => Ok(()),
            Phase::Finished { .. } => Err(ProtocolError::MatchFinished.into()),
            Phase::Betting | Phase::Playing => Err(ProtocolError::DealInProgress.into()),
        }
    }

    fn deal_from(&mut self, mut stock: Deck) -> Result<DealSetup, EngineError> {
        let mut hands: TeamMap<Hand> = TeamMap::default();
        for _ in 0..HAND_SIZE {
            for team in Team::ALL {
                hands[team].push(draw(&mut stock)?);
            }
        }
        let vira = draw(&mut stock)?;
        let manilhas = Manilhas::from_vira(vira);
        let number = self.deals_dealt + 1;

        self.deals_dealt = number;
        self.deal = Some(Deal {
            number,
            vira,
            manilhas,
            hands: hands.clone(),
            stock,
            betting: Betting::new(),
            table: Table::default(),
            tricks: TrickLog::default(),
        });
        self.phase = Phase::Betting;

        info!(deal = number, %vira, manilha_rank = %manilhas.rank(), "new deal");
        self.history.push_back(MatchEvent::DealStarted {
            deal: number,
            vira,
            manilhas: manilhas.cards(),
            hands: hands.clone(),
        });

        Ok(DealSetup {
            deal: number,
            vira,
            manilhas,
            hands,
        })
    }

    /// Award the deal and move to the next phase. Returns the match winner
    /// if the award ended the match.
    fn finish_deal(&mut self, winner: Team, points: u32, reason: DealEnd) -> Option<Team> {
        self.scores[winner] += points;
        info!(
            deal = self.deals_dealt,
            winner = ?winner,
            points,
            reason = ?reason,
            score_a = self.scores[Team::A],
            score_b = self.scores[Team::B],
            "deal ended"
        );
        self.history.push_back(MatchEvent::DealEnded {
            deal: self.deals_dealt,
            winner,
            points,
            reason,
            scores: self.scores,
        });

        if self.scores[winner] >= self.config.winning_score {
            self.end_match(winner);
            Some(winner)
        } else {
            self.phase = Phase::AwaitingDeal;
            None
        }
    }

    fn end_match(&mut self, winner: Team) {
        self.phase = Phase::Finished { winner };
        info!(
            winner = ?winner,
            score_a = self.scores[Team::A],
            score_b = self.scores[Team::B],
            "match finished"
        );
        self.history.push_back(MatchEvent::MatchEnded {
            winner,
            scores: self.scores,
        });
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else if self.is_finished() {
            Err(ProtocolError::MatchFinished.into())
        } else {
            Err(ProtocolError::WrongPhase {
                action,
                phase: self.phase,
            }
            .into())
        }
    }

    fn active_deal_mut(&mut self) -> Result<&mut Deal, EngineError> {
        self.deal.as_mut().ok_or(EngineError::Protocol(ProtocolError::NoActiveDeal))
    }

    fn betting_deal(&self) -> Option<&Deal> {
        match self.phase {
            Phase::Betting => self.deal.as_ref(),
            _ => None,
        }
    }
}

fn draw(stock: &mut Deck) -> Result<Card, EngineError> {
    stock
        .draw()
        .ok_or_else(|| EngineError::config("deck ran out while dealing"))
}
