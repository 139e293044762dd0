//! Integration tests for driving matches between agents.

mod common;

use truco_engine::cards::Card;
use truco_engine::core::{BetAction, DealRng, MatchEvent, Team, TeamMap};
use truco_engine::driver::{
    Agent, DriverConfig, MatchDriver, MatchReport, RandomAgent, ScriptedAgent,
};
use truco_engine::rules::{BetLevel, MatchEngine};

fn random_match(seed: u64) -> (MatchEngine, MatchReport) {
    let mut engine = MatchEngine::standard();
    let mut a = RandomAgent::seeded(seed ^ 0xA);
    let mut b = RandomAgent::seeded(seed ^ 0xB);
    let report = MatchDriver::default()
        .run(
            &mut engine,
            TeamMap::from_array([&mut a as &mut dyn Agent, &mut b]),
            &mut DealRng::new(seed),
        )
        .unwrap();
    (engine, report)
}

// =============================================================================
// Full Matches
// =============================================================================

#[test]
fn test_random_matches_terminate() {
    common::init_logging();
    for seed in 0..25 {
        let (engine, report) = random_match(seed);
        let winner = report.winner.expect("match should finish");
        assert!(report.scores[winner] >= 12, "seed {seed}: {:?}", report.scores);
        assert_eq!(engine.winner(), Some(winner));
        assert_eq!(report.forfeited, None);
        assert!(report.deals >= 1);
    }
}

#[test]
fn test_same_seed_same_match() {
    common::init_logging();
    let (first, first_report) = random_match(77);
    let (second, second_report) = random_match(77);
    assert_eq!(first_report, second_report);
    assert_eq!(first.history(), second.history());
}

#[test]
fn test_different_seeds_diverge() {
    let (first, _) = random_match(1);
    let (second, _) = random_match(2);
    assert_ne!(first.history(), second.history());
}

// =============================================================================
// Violations
// =============================================================================

/// A team whose agent never produces a valid decision forfeits once it
/// exceeds the violation limit.
#[test]
fn test_repeated_violations_forfeit() {
    common::init_logging();
    let mut engine = MatchEngine::standard();
    // Six is not a legal opening raise; afterwards the script is empty.
    let mut broken = ScriptedAgent::new([BetAction::Bet(BetLevel::Six)], Vec::<Card>::new());
    let mut random = RandomAgent::seeded(3);

    let report = MatchDriver::new(DriverConfig::new().with_max_violations(3))
        .run(
            &mut engine,
            TeamMap::from_array([&mut broken as &mut dyn Agent, &mut random]),
            &mut DealRng::new(21),
        )
        .unwrap();

    assert_eq!(report.forfeited, Some(Team::A));
    assert_eq!(report.violations[Team::A], 4);
    assert_eq!(report.violations[Team::B], 0);
    assert_eq!(report.winner, Some(Team::B));
    assert!(report.scores[Team::B] >= 12);
    assert!(matches!(
        engine.history().iter().rev().nth(1),
        Some(MatchEvent::Forfeited { team: Team::A })
    ));
}

/// A rejected bet becomes a pass; a missing card becomes the first card in hand.
#[test]
fn test_violations_are_substituted() {
    common::init_logging();
    let mut engine = MatchEngine::standard();
    let mut broken = ScriptedAgent::new([BetAction::Bet(BetLevel::Nine)], Vec::<Card>::new());
    let mut random = RandomAgent::seeded(4);

    let report = MatchDriver::new(DriverConfig::new().with_max_violations(100).with_max_deals(1))
        .run(
            &mut engine,
            TeamMap::from_array([&mut broken as &mut dyn Agent, &mut random]),
            &mut DealRng::new(5),
        )
        .unwrap();

    assert_eq!(report.deals, 1);
    assert_eq!(report.forfeited, None);
    assert!(report.violations[Team::A] >= 1);

    let first_hand = engine.history().iter().find_map(|e| match e {
        MatchEvent::DealStarted { hands, .. } => Some(hands[Team::A].clone()),
        _ => None,
    });
    let first_bet = engine.history().iter().find_map(|e| match e {
        MatchEvent::BettingAction { team: Team::A, action, .. } => Some(*action),
        _ => None,
    });
    let first_card = engine.history().iter().find_map(|e| match e {
        MatchEvent::CardPlayed { team: Team::A, card, .. } => Some(*card),
        _ => None,
    });

    assert_eq!(first_bet, Some(BetAction::Pass));
    assert_eq!(first_card, first_hand.map(|h| h[0]));
}

#[test]
fn test_scripted_match_plays_as_written() {
    // Same seed, same first deal: peek at it to script both hands.
    let setup = MatchEngine::standard().new_deal(&mut DealRng::new(12)).unwrap();
    let hand_a: Vec<Card> = setup.hands[Team::A].to_vec();
    let hand_b: Vec<Card> = setup.hands[Team::B].to_vec();

    // A opens truco, B runs: A takes one point without a card being played.
    let mut a = ScriptedAgent::new([BetAction::Bet(BetLevel::Truco)], hand_a);
    let mut b = ScriptedAgent::new([BetAction::Run], hand_b);

    let mut engine = MatchEngine::standard();
    let report = MatchDriver::new(DriverConfig::new().with_max_deals(1))
        .run(
            &mut engine,
            TeamMap::from_array([&mut a as &mut dyn Agent, &mut b]),
            &mut DealRng::new(12),
        )
        .unwrap();

    assert_eq!(report.scores, TeamMap::from_array([1, 0]));
    assert_eq!(report.violations, TeamMap::default());
    assert_eq!(a.remaining(), (0, 3));
    assert_eq!(b.remaining(), (0, 3));
}
