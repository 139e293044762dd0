//! Property tests for card comparison, dealing, and whole-match invariants.

mod common;

use std::collections::HashSet;

use proptest::prelude::*;
use truco_engine::cards::{compare, strength, Card, Comparison, Deck, Manilhas, Rank, Suit};
use truco_engine::core::{DealRng, MatchEvent, Team};
use truco_engine::driver::{Agent, MatchDriver, RandomAgent};
use truco_engine::rules::MatchEngine;
use truco_engine::TeamMap;

fn any_card() -> impl Strategy<Value = Card> {
    (0..Rank::ALL.len(), 0..Suit::ALL.len())
        .prop_map(|(r, s)| Card::new(Rank::ALL[r], Suit::ALL[s]))
}

/// `n` distinct cards.
fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(Deck::standard().cards().to_vec(), n).prop_shuffle()
}

// =============================================================================
// Comparison
// =============================================================================

proptest! {
    #![proptest_config(common::proptest_config())]

    /// Swapping operands swaps the winner.
    #[test]
    fn prop_compare_antisymmetric(cards in distinct_cards(2), vira in any_card()) {
        let manilhas = Manilhas::from_vira(vira);
        let forward = compare(cards[0], cards[1], &manilhas);
        let backward = compare(cards[1], cards[0], &manilhas);
        prop_assert_ne!(forward, backward);
    }

    /// `compare` and `strength` describe the same order.
    #[test]
    fn prop_compare_agrees_with_strength(cards in distinct_cards(2), vira in any_card()) {
        let manilhas = Manilhas::from_vira(vira);
        let expected = if strength(cards[0], &manilhas) > strength(cards[1], &manilhas) {
            Comparison::FirstWins
        } else {
            Comparison::SecondWins
        };
        prop_assert_eq!(compare(cards[0], cards[1], &manilhas), expected);
    }

    #[test]
    fn prop_compare_transitive(cards in distinct_cards(3), vira in any_card()) {
        let manilhas = Manilhas::from_vira(vira);
        let beats = |x: Card, y: Card| compare(x, y, &manilhas) == Comparison::FirstWins;
        let (a, b, c) = (cards[0], cards[1], cards[2]);
        if beats(a, b) && beats(b, c) {
            prop_assert!(beats(a, c), "{} > {} > {} but not {} > {}", a, b, c, a, c);
        }
    }

    /// Distinct cards never tie.
    #[test]
    fn prop_strength_is_injective(vira in any_card()) {
        let manilhas = Manilhas::from_vira(vira);
        let strengths: HashSet<u8> = Deck::standard()
            .cards()
            .iter()
            .map(|&c| strength(c, &manilhas))
            .collect();
        prop_assert_eq!(strengths.len(), 40);
    }

    #[test]
    fn prop_manilha_beats_plain(vira in any_card(), other in any_card(), suit in 0..4usize) {
        let manilhas = Manilhas::from_vira(vira);
        let trump = Card::new(manilhas.rank(), Suit::ALL[suit]);
        if !manilhas.contains(other) {
            prop_assert_eq!(compare(trump, other, &manilhas), Comparison::FirstWins);
            prop_assert_eq!(compare(other, trump, &manilhas), Comparison::SecondWins);
        }
    }
}

// =============================================================================
// Dealing
// =============================================================================

proptest! {
    #![proptest_config(common::proptest_config())]

    /// Any seed deals 3 + 3 distinct cards plus a vira, leaving 33 undealt.
    #[test]
    fn prop_deal_is_disjoint(seed in any::<u64>()) {
        let mut engine = MatchEngine::standard();
        let setup = engine.new_deal(&mut DealRng::new(seed)).unwrap();

        let mut dealt: Vec<Card> = Team::ALL
            .iter()
            .flat_map(|&t| setup.hands[t].iter().copied())
            .collect();
        dealt.push(setup.vira);
        let unique: HashSet<Card> = dealt.iter().copied().collect();

        prop_assert_eq!(unique.len(), 7);
        prop_assert_eq!(engine.stock_len(), 33);
        prop_assert_eq!(setup.manilhas.rank(), setup.vira.rank.next());
        prop_assert!(!setup.manilhas.cards().contains(&setup.vira));
    }

    #[test]
    fn prop_shuffle_is_permutation(seed in any::<u64>()) {
        let deck = Deck::shuffled(&mut DealRng::new(seed));
        let mut cards = deck.cards().to_vec();
        cards.sort();
        let mut standard = Deck::standard().cards().to_vec();
        standard.sort();
        prop_assert_eq!(cards, standard);
    }
}

// =============================================================================
// Whole matches
// =============================================================================

proptest! {
    #![proptest_config(common::proptest_config())]

    /// Random play always finishes, and every deal is worth a legal amount.
    #[test]
    fn prop_random_match_invariants(seed in any::<u64>()) {
        common::init_logging();
        let mut engine = MatchEngine::standard();
        let mut a = RandomAgent::seeded(seed.wrapping_add(1));
        let mut b = RandomAgent::seeded(seed.wrapping_add(2));
        let report = MatchDriver::default()
            .run(
                &mut engine,
                TeamMap::from_array([&mut a as &mut dyn Agent, &mut b]),
                &mut DealRng::new(seed),
            )
            .unwrap();

        let winner = report.winner.unwrap();
        prop_assert!(report.scores[winner] >= 12);
        prop_assert!(report.scores[winner.opponent()] < 12);

        let mut totals: TeamMap<u32> = TeamMap::default();
        let mut deals_started = 0;
        for event in engine.history().iter() {
            match event {
                MatchEvent::DealStarted { .. } => deals_started += 1,
                MatchEvent::DealEnded { winner, points, .. } => {
                    prop_assert!([1, 3, 6, 9, 12].contains(points), "odd deal value {}", points);
                    totals[*winner] += points;
                }
                _ => {}
            }
        }
        prop_assert_eq!(totals, report.scores);
        prop_assert_eq!(deals_started, report.deals);
        let ends_with_match_end =
            matches!(engine.history().last(), Some(MatchEvent::MatchEnded { .. }));
        prop_assert!(ends_with_match_end, "history must end with MatchEnded");
    }
}
