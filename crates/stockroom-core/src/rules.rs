//! The daily aging rule: per-category transition logic for shelf days and
//! quality. This is the core of the crate; everything else is plumbing
//! around it.
//!
//! Each category is a pure function `(sell_in, quality) -> (sell_in',
//! quality')` with no hidden state. Dispatch is an exhaustive enum match.

use crate::item::{Category, Item};

// ---------------------------------------------------------------------------
// Quality bounds
// ---------------------------------------------------------------------------

/// Lower quality bound for every non-legendary category.
pub const QUALITY_MIN: i32 = 0;

/// Upper quality bound for every non-legendary category.
pub const QUALITY_MAX: i32 = 50;

/// Fixed quality of legendary items. Never mutated by the engine.
pub const LEGENDARY_QUALITY: i32 = 80;

// Backstage pass appreciation ladder, evaluated on the pre-decrement
// sell_in: below TIER_THREE the pass earns +3, below TIER_TWO it earns +2,
// otherwise +1.
const PASS_TIER_TWO: i32 = 11;
const PASS_TIER_THREE: i32 = 6;

// ---------------------------------------------------------------------------
// Age outcome
// ---------------------------------------------------------------------------

/// The outcome of one day's aging for a single item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeOutcome {
    /// The sell-by date passed today (`sell_in` went from 0 to -1).
    pub crossed_sell_by: bool,
    /// The computed quality fell below [`QUALITY_MIN`] and was clamped up.
    pub floored: bool,
    /// The computed quality rose above [`QUALITY_MAX`] and was clamped down.
    pub capped: bool,
    /// A backstage pass with remaining value was forced to zero.
    pub collapsed: bool,
}

// ---------------------------------------------------------------------------
// Per-category deltas
// ---------------------------------------------------------------------------

impl Category {
    /// Base quality delta for one day, evaluated before the shelf-day
    /// decrement. The backstage ladder keys off the pre-decrement `sell_in`.
    fn base_delta(self, sell_in: i32) -> i32 {
        match self {
            Category::Normal => -1,
            Category::Conjured => -2,
            Category::AgedBrie => 1,
            Category::BackstagePass => {
                if sell_in < PASS_TIER_THREE {
                    3
                } else if sell_in < PASS_TIER_TWO {
                    2
                } else {
                    1
                }
            }
            Category::Sulfuras => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// The daily transition
// ---------------------------------------------------------------------------

/// Advance a single item by one day.
///
/// Order of operations, which the scenario tests in this module pin down:
///
/// 1. Legendary items are a terminal no-op.
/// 2. Apply the category's base quality delta (pre-decrement `sell_in`).
/// 3. Decrement `sell_in`.
/// 4. If the date has now passed: ordinary and conjured goods apply the base
///    delta a second time, Aged Brie gains one more, and backstage passes
///    are forced to zero.
/// 5. Clamp quality to `[QUALITY_MIN, QUALITY_MAX]`.
pub fn age_item(item: &mut Item) -> AgeOutcome {
    let category = item.category();
    let mut outcome = AgeOutcome::default();

    if category == Category::Sulfuras {
        return outcome;
    }

    let base = category.base_delta(item.sell_in);
    let had_value = item.quality > 0;
    let mut quality = item.quality + base;

    item.sell_in -= 1;
    if item.sell_in == -1 {
        outcome.crossed_sell_by = true;
    }

    if item.sell_in < 0 {
        match category {
            Category::Normal | Category::Conjured => quality += base,
            Category::AgedBrie => quality += 1,
            Category::BackstagePass => {
                outcome.collapsed = had_value;
                quality = QUALITY_MIN;
            }
            // Handled by the early return above.
            Category::Sulfuras => {}
        }
    }

    if quality < QUALITY_MIN {
        quality = QUALITY_MIN;
        outcome.floored = true;
    } else if quality > QUALITY_MAX {
        quality = QUALITY_MAX;
        outcome.capped = true;
    }

    item.quality = quality;
    outcome
}
