//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::engine::Engine;
use crate::item::{AGED_BRIE, Item};
use crate::rules::LEGENDARY_QUALITY;
use crate::sim::StepResult;

// ===========================================================================
// Shop display names
// ===========================================================================

pub const DEXTERITY_VEST: &str = "+5 Dexterity Vest";
pub const MONGOOSE_ELIXIR: &str = "Elixir of the Mongoose";
pub const SULFURAS_HAND: &str = "Sulfuras, Hand of Ragnaros";
pub const TAFKAL_PASS: &str = "Backstage passes to a TAF KAL80 ETC concert";
pub const MANA_CAKE: &str = "Conjured Mana Cake";

// ===========================================================================
// Item constructors
// ===========================================================================

pub fn normal(sell_in: i32, quality: i32) -> Item {
    Item::new(DEXTERITY_VEST, sell_in, quality)
}

pub fn brie(sell_in: i32, quality: i32) -> Item {
    Item::new(AGED_BRIE, sell_in, quality)
}

pub fn sulfuras(sell_in: i32) -> Item {
    Item::new(SULFURAS_HAND, sell_in, LEGENDARY_QUALITY)
}

pub fn backstage_pass(sell_in: i32, quality: i32) -> Item {
    Item::new(TAFKAL_PASS, sell_in, quality)
}

pub fn conjured(sell_in: i32, quality: i32) -> Item {
    Item::new(MANA_CAKE, sell_in, quality)
}

// ===========================================================================
// Shelf fixtures
// ===========================================================================

/// The shop's classic opening inventory: one of everything, including two
/// legendary items and passes at each tier of the appreciation ladder.
pub fn mixed_shelf() -> Vec<Item> {
    vec![
        Item::new(DEXTERITY_VEST, 10, 20),
        Item::new(AGED_BRIE, 2, 0),
        Item::new(MONGOOSE_ELIXIR, 5, 7),
        Item::new(SULFURAS_HAND, 0, LEGENDARY_QUALITY),
        Item::new(SULFURAS_HAND, -1, LEGENDARY_QUALITY),
        Item::new(TAFKAL_PASS, 15, 20),
        Item::new(TAFKAL_PASS, 10, 49),
        Item::new(TAFKAL_PASS, 5, 49),
        Item::new(MANA_CAKE, 3, 6),
    ]
}

// ===========================================================================
// Stepping helpers
// ===========================================================================

/// Step the engine `days` times over the same shelf, folding the per-day
/// results into one aggregate.
pub fn advance_days(engine: &mut Engine, items: &mut [Item], days: u64) -> StepResult {
    let mut total = StepResult::default();
    for _ in 0..days {
        total.absorb(engine.step(items));
    }
    total
}
