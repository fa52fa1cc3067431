use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category classification
// ---------------------------------------------------------------------------

/// Exact display name of the cheese that improves with age.
pub const AGED_BRIE: &str = "Aged Brie";

/// Name prefix identifying legendary items ("Sulfuras, Hand of Ragnaros").
pub const SULFURAS_PREFIX: &str = "Sulfuras";

/// Name prefix identifying backstage passes
/// ("Backstage passes to a TAF KAL80 ETC concert").
pub const BACKSTAGE_PASS_PREFIX: &str = "Backstage passes";

/// Name prefix identifying conjured goods ("Conjured Mana Cake").
pub const CONJURED_PREFIX: &str = "Conjured";

/// Aging category of a stock item. Determines which daily update rule
/// applies. The set is closed; dispatch is by enum match (no trait objects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Ordinary goods: quality drops by 1 per day, 2 past the sell-by date.
    Normal,
    /// Improves with age: quality rises by 1 per day, 2 past the date.
    AgedBrie,
    /// Legendary: neither shelf days nor quality ever change.
    Sulfuras,
    /// Appreciates toward the event, then is worthless once it has passed.
    BackstagePass,
    /// Degrades twice as fast as ordinary goods.
    Conjured,
}

/// All categories, in declaration order. Handy for per-category aggregation.
pub const ALL_CATEGORIES: [Category; 5] = [
    Category::Normal,
    Category::AgedBrie,
    Category::Sulfuras,
    Category::BackstagePass,
    Category::Conjured,
];

impl Category {
    /// Classify a display name. Any name not matching a recognized label
    /// falls back to `Normal` -- a deliberate default, not an error.
    pub fn of(name: &str) -> Self {
        if name == AGED_BRIE {
            Category::AgedBrie
        } else if name.starts_with(SULFURAS_PREFIX) {
            Category::Sulfuras
        } else if name.starts_with(BACKSTAGE_PASS_PREFIX) {
            Category::BackstagePass
        } else if name.starts_with(CONJURED_PREFIX) {
            Category::Conjured
        } else {
            Category::Normal
        }
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A stock item on the shelf. Plain mutable record; the engine, not the
/// constructor, enforces quality bounds after each update, so an item may
/// legally start outside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name. Also determines the aging category via [`Category::of`].
    pub name: String,
    /// Days remaining before the sell-by date. Goes negative once passed.
    pub sell_in: i32,
    /// Value score. Clamped to category bounds after every update.
    pub quality: i32,
}

impl Item {
    /// Construct an item. Performs no validation.
    pub fn new(name: impl Into<String>, sell_in: i32, quality: i32) -> Self {
        Self {
            name: name.into(),
            sell_in,
            quality,
        }
    }

    /// The aging category, re-derived from the current name.
    pub fn category(&self) -> Category {
        Category::of(&self.name)
    }
}
