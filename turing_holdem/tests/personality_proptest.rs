//! Property-based tests for personalities and label parsing
//!
//! These tests check that the strength-to-action mapping is total and
//! monotone, that bucketing agrees with the full range, and that any label
//! outside the five canonical ones is read as a fold.

use proptest::prelude::*;
use turing_holdem::{
    game::entities::{Action, Card, Hand, Suit, Value},
    personality::{Bucket, Personality, Range},
};

fn card_strategy() -> impl Strategy<Value = Card> {
    (0usize..13, 0usize..4).prop_map(|(value, suit)| Card(Value::ALL[value], Suit::ALL[suit]))
}

fn hand_strategy() -> impl Strategy<Value = Hand> {
    (card_strategy(), card_strategy())
        .prop_filter("two distinct cards", |(first, second)| first != second)
        .prop_map(|(first, second)| Hand::new(first, second).unwrap())
}

fn preset_strategy() -> impl Strategy<Value = usize> {
    0usize..Personality::presets().len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// More strength never means a less aggressive action
    #[test]
    fn prop_act_is_monotone(
        idx in preset_strategy(),
        a in -1.0f32..2.0,
        b in -1.0f32..2.0,
    ) {
        let personality = &Personality::presets()[idx];
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(personality.act(low) <= personality.act(high));
    }

    /// Every float maps to some action, NaN and infinities included
    #[test]
    fn prop_act_is_total(idx in preset_strategy(), bits in any::<u32>()) {
        let personality = &Personality::presets()[idx];
        let action = personality.act(f32::from_bits(bits));
        prop_assert!(Action::ALL.contains(&action));
    }

    #[test]
    fn prop_adjust_is_never_negative(idx in preset_strategy(), bits in any::<u32>()) {
        let personality = &Personality::presets()[idx];
        prop_assert!(personality.adjust(f32::from_bits(bits)) >= 0.0);
    }

    /// A hand has a bucket exactly when it's in the full range
    #[test]
    fn prop_classify_matches_range(idx in preset_strategy(), hand in hand_strategy()) {
        let personality = &Personality::presets()[idx];
        let bucket = personality.classify(&hand);
        prop_assert_eq!(bucket != Bucket::None, personality.range().contains(&hand));
        if bucket == Bucket::Strong {
            prop_assert!(personality.strong.contains(&hand));
        }
    }

    /// Card order never changes which hand it is
    #[test]
    fn prop_hand_is_canonical(first in card_strategy(), second in card_strategy()) {
        prop_assume!(first != second);
        let forward = Hand::new(first, second).unwrap();
        let backward = Hand::new(second, first).unwrap();
        prop_assert_eq!(forward, backward);
        prop_assert!(forward.high() >= forward.low());
    }

    /// Only the five labels parse, in any letter case
    #[test]
    fn prop_unknown_labels_fold(label in "[a-z_ ]{0,12}") {
        let action = Action::from_label(&label);
        let known = Action::ALL.iter().any(|action| action.label() == label);
        if known {
            prop_assert_eq!(action.label(), label.as_str());
        } else {
            prop_assert_eq!(action, Action::Fold);
        }
        prop_assert_eq!(Action::from_label(&label.to_uppercase()), action);
    }
}

// === Preset Tests ===

#[test]
fn test_every_preset_plays_aces_strong() {
    let aces: Range = "AA".parse().unwrap();
    for personality in Personality::presets() {
        for hand in &aces {
            assert_eq!(personality.classify(hand), Bucket::Strong, "{personality}");
        }
    }
}

#[test]
fn test_looser_presets_contain_tighter_ranges() {
    let presets = Personality::presets();
    for pair in presets.windows(2) {
        let (tight, loose) = (pair[0].range(), pair[1].range());
        assert!(tight.len() < loose.len(), "{} vs {}", pair[0], pair[1]);
    }
}

#[test]
fn test_bias_grows_with_looseness() {
    let presets = Personality::presets();
    for pair in presets.windows(2) {
        assert!(pair[0].bias <= pair[1].bias, "{} vs {}", pair[0], pair[1]);
    }
}
