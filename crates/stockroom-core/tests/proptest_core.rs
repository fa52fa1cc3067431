//! Property-based tests for the aging engine.
//!
//! Uses proptest to generate random shelves and day counts, then verify the
//! update invariants hold and that the engine agrees with an independent
//! reference model of the daily rules.

use proptest::prelude::*;
use stockroom_core::engine::Engine;
use stockroom_core::item::{Category, Item};
use stockroom_core::rules::{LEGENDARY_QUALITY, QUALITY_MAX, QUALITY_MIN};
use stockroom_core::test_utils::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(DEXTERITY_VEST.to_string()),
        Just(MONGOOSE_ELIXIR.to_string()),
        Just("Aged Brie".to_string()),
        Just(SULFURAS_HAND.to_string()),
        Just(TAFKAL_PASS.to_string()),
        Just(MANA_CAKE.to_string()),
        // Unrecognized names age under the Normal rule.
        "[a-z ]{1,16}",
    ]
}

fn arb_item() -> impl Strategy<Value = Item> {
    (arb_name(), -20..30i32, 0..=50i32).prop_map(|(name, sell_in, quality)| {
        // Legendary items always carry their fixed quality.
        let quality = if Category::of(&name) == Category::Sulfuras {
            LEGENDARY_QUALITY
        } else {
            quality
        };
        Item::new(name, sell_in, quality)
    })
}

fn arb_shelf(max_items: usize) -> impl Strategy<Value = Vec<Item>> {
    proptest::collection::vec(arb_item(), 0..=max_items)
}

// ===========================================================================
// Reference model
// ===========================================================================

/// Straight-line restatement of the daily rule, deliberately structured
/// differently from the engine's implementation: one closed-form branch per
/// category computing the post-update pair directly.
fn reference_age(item: &Item) -> (i32, i32) {
    let category = Category::of(&item.name);
    if category == Category::Sulfuras {
        return (item.sell_in, item.quality);
    }

    let sell_in = item.sell_in - 1;
    let expired = sell_in < 0;
    let quality = match category {
        Category::Normal => item.quality - if expired { 2 } else { 1 },
        Category::Conjured => item.quality - if expired { 4 } else { 2 },
        Category::AgedBrie => item.quality + if expired { 2 } else { 1 },
        Category::BackstagePass => {
            if expired {
                return (sell_in, QUALITY_MIN);
            } else if item.sell_in <= 5 {
                item.quality + 3
            } else if item.sell_in <= 10 {
                item.quality + 2
            } else {
                item.quality + 1
            }
        }
        Category::Sulfuras => unreachable!(),
    };

    (sell_in, quality.clamp(QUALITY_MIN, QUALITY_MAX))
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// After any number of days, quality stays within category bounds.
    #[test]
    fn quality_bounds_hold_after_any_number_of_days(
        mut shelf in arb_shelf(20),
        days in 1u64..40,
    ) {
        let mut engine = Engine::new();
        advance_days(&mut engine, &mut shelf, days);

        for item in &shelf {
            if item.category() == Category::Sulfuras {
                prop_assert_eq!(item.quality, LEGENDARY_QUALITY);
            } else {
                prop_assert!(item.quality >= QUALITY_MIN);
                prop_assert!(item.quality <= QUALITY_MAX);
            }
        }
    }

    /// Shelf days drop by exactly one per day for every category except
    /// Sulfuras, whose fields never change.
    #[test]
    fn sell_in_drops_by_one_per_day_except_legendary(
        mut shelf in arb_shelf(20),
        days in 1u64..40,
    ) {
        let before = shelf.clone();
        let mut engine = Engine::new();
        advance_days(&mut engine, &mut shelf, days);

        for (item, original) in shelf.iter().zip(&before) {
            if item.category() == Category::Sulfuras {
                prop_assert_eq!(item.sell_in, original.sell_in);
                prop_assert_eq!(item.quality, original.quality);
            } else {
                prop_assert_eq!(item.sell_in, original.sell_in - days as i32);
            }
        }
    }

    /// N sequential steps equal the reference model applied N times.
    #[test]
    fn engine_agrees_with_reference_model(
        mut shelf in arb_shelf(20),
        days in 1u64..40,
    ) {
        let mut expected: Vec<(i32, i32)> = shelf
            .iter()
            .map(|item| (item.sell_in, item.quality))
            .collect();
        for _ in 0..days {
            for (item, state) in shelf.iter().zip(expected.iter_mut()) {
                let probe = Item::new(item.name.clone(), state.0, state.1);
                *state = reference_age(&probe);
            }
        }

        let mut engine = Engine::new();
        advance_days(&mut engine, &mut shelf, days);

        for (item, (sell_in, quality)) in shelf.iter().zip(expected) {
            prop_assert_eq!(item.sell_in, sell_in);
            prop_assert_eq!(item.quality, quality);
        }
    }

    /// Two engines over equal shelves agree on the state hash every day.
    #[test]
    fn replicas_agree_on_state_hash(
        shelf in arb_shelf(20),
        days in 1u64..20,
    ) {
        let mut shelf_a = shelf.clone();
        let mut shelf_b = shelf;
        let mut a = Engine::new();
        let mut b = Engine::new();

        for _ in 0..days {
            a.step(&mut shelf_a);
            b.step(&mut shelf_b);
            prop_assert_eq!(a.state_hash(), b.state_hash());
        }
    }

    /// Step results account for every item and never over-count.
    #[test]
    fn step_results_are_consistent(mut shelf in arb_shelf(20)) {
        let len = shelf.len();
        let mut engine = Engine::new();
        let result = engine.step(&mut shelf);

        prop_assert_eq!(result.items_updated, len);
        prop_assert!(result.sell_by_crossings as usize <= len);
        prop_assert!(result.quality_floors as usize <= len);
        prop_assert!(result.quality_caps as usize <= len);
        prop_assert!(result.pass_collapses as usize <= len);
    }
}
