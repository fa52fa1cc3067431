//! Shelf statistics module for the Stockroom engine.
//!
//! Tracks expiry, clamp, and collapse rates over configurable day windows,
//! plus per-category quality history. Listens to core events
//! (`SellByPassed`, `QualityFloored`, `QualityCapped`, `PassCollapsed`) and
//! aggregates them into rolling metrics using [`Fixed64`] arithmetic.
//!
//! # Usage
//!
//! ```ignore
//! let mut stats = ShelfStats::new(StatsConfig::default());
//! // Feed events each day:
//! stats.process_event(&event);
//! // Close out the day with the post-update shelf:
//! stats.end_day(&shelf);
//! // Query metrics:
//! let rate = stats.expiry_rate();
//! let brie = stats.mean_quality(Category::AgedBrie);
//! ```

use std::collections::HashMap;

use fixed::types::I32F32;
use stockroom_core::event::Event;
use stockroom_core::item::{ALL_CATEGORIES, Category, Item};
use stockroom_core::sim::Day;

/// Q32.32 fixed-point: deterministic rates and averages, no floats.
pub type Fixed64 = I32F32;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the statistics module.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Window size in days for rolling rates (e.g., 30 days).
    pub window_size: usize,
    /// Maximum number of historical quality snapshots retained per category.
    pub history_capacity: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_size: 30,
            history_capacity: 256,
        }
    }
}

// ---------------------------------------------------------------------------
// RingBuffer -- history of Fixed64 values
// ---------------------------------------------------------------------------

/// A fixed-capacity ring buffer storing [`Fixed64`] values for trend
/// analysis.
///
/// When full, the oldest entry is overwritten. Iterates oldest-to-newest.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: Vec<Fixed64>,
    head: usize,
    len: usize,
}

impl RingBuffer {
    /// Create a new ring buffer with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be > 0");
        Self {
            data: vec![Fixed64::ZERO; capacity],
            head: 0,
            len: 0,
        }
    }

    /// Push a value, overwriting the oldest entry if at capacity.
    pub fn push(&mut self, value: Fixed64) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.capacity();
        if self.len < self.capacity() {
            self.len += 1;
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Get the most recently pushed value, if any.
    pub fn latest(&self) -> Option<Fixed64> {
        if self.len == 0 {
            return None;
        }
        let idx = if self.head == 0 {
            self.capacity() - 1
        } else {
            self.head - 1
        };
        Some(self.data[idx])
    }

    /// Collect all stored values into a Vec (oldest to newest).
    pub fn to_vec(&self) -> Vec<Fixed64> {
        let start = if self.len < self.capacity() {
            0
        } else {
            self.head
        };
        (0..self.len)
            .map(|i| self.data[(start + i) % self.capacity()])
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Rolling window counter
// ---------------------------------------------------------------------------

/// A rolling window counter tracking a count over the most recent N days.
///
/// Stores per-day counts in a ring buffer. The committed total is the sum of
/// all closed days in the window; `current` accumulates the in-progress day.
///
/// # Day lifecycle
///
/// 1. Call [`add`](Self::add) zero or more times during the day.
/// 2. Call [`commit`](Self::commit) exactly once at end-of-day.
///
/// [`rate`](Self::rate) and [`total`](Self::total) include the committed
/// days **plus** the in-progress day, so queries are accurate at any point.
#[derive(Debug, Clone)]
struct RollingWindow {
    /// Committed per-day counts in a ring buffer.
    day_counts: Vec<u64>,
    /// Write position for the next commit.
    write_pos: usize,
    /// Running total of committed day counts in the window.
    committed_total: u64,
    /// Accumulator for the current (uncommitted) day.
    current: u64,
    /// Window size (capacity of day_counts).
    window_size: usize,
    /// Number of committed days stored (capped at window_size).
    committed_count: usize,
}

impl RollingWindow {
    fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "RollingWindow size must be > 0");
        Self {
            day_counts: vec![0; window_size],
            write_pos: 0,
            committed_total: 0,
            current: 0,
            window_size,
            committed_count: 0,
        }
    }

    /// Accumulate a count for the current (in-progress) day.
    fn add(&mut self, count: u64) {
        self.current += count;
    }

    /// Commit the current day into the ring buffer and prepare for the next.
    ///
    /// If the ring buffer is full, the oldest day is evicted.
    fn commit(&mut self) {
        if self.committed_count == self.window_size {
            self.committed_total -= self.day_counts[self.write_pos];
        }

        self.day_counts[self.write_pos] = self.current;
        self.committed_total += self.current;
        self.current = 0;

        self.write_pos = (self.write_pos + 1) % self.window_size;

        if self.committed_count < self.window_size {
            self.committed_count += 1;
        }
    }

    /// Running total over the window (committed days + current day).
    fn total(&self) -> u64 {
        self.committed_total + self.current
    }

    /// Rolling average as events per day.
    fn rate(&self) -> Fixed64 {
        let effective_count = if self.current > 0 {
            self.committed_count + 1
        } else {
            self.committed_count
        };
        if effective_count == 0 {
            return Fixed64::ZERO;
        }
        let total = self.committed_total + self.current;
        Fixed64::from_num(total) / Fixed64::from_num(effective_count)
    }
}

// ---------------------------------------------------------------------------
// Per-category statistics
// ---------------------------------------------------------------------------

/// Per-category aggregates recomputed at end-of-day from the shelf.
#[derive(Debug, Clone)]
struct CategoryStats {
    /// Item count at the most recent end-of-day.
    count: usize,
    /// Sum of quality at the most recent end-of-day.
    quality_total: i64,
    /// Historical mean-quality snapshots, one per day.
    quality_history: RingBuffer,
}

impl CategoryStats {
    fn new(history_capacity: usize) -> Self {
        Self {
            count: 0,
            quality_total: 0,
            quality_history: RingBuffer::new(history_capacity),
        }
    }

    fn mean_quality(&self) -> Option<Fixed64> {
        if self.count == 0 {
            return None;
        }
        Some(Fixed64::from_num(self.quality_total) / Fixed64::from_num(self.count))
    }
}

// ---------------------------------------------------------------------------
// ShelfStats
// ---------------------------------------------------------------------------

/// Aggregated shelf metrics: rolling event rates and per-category quality.
#[derive(Debug, Clone)]
pub struct ShelfStats {
    crossings: RollingWindow,
    floors: RollingWindow,
    caps: RollingWindow,
    collapses: RollingWindow,
    categories: HashMap<Category, CategoryStats>,
    days_observed: Day,
    history_capacity: usize,
}

impl ShelfStats {
    /// Create a statistics tracker with the given configuration.
    pub fn new(config: StatsConfig) -> Self {
        Self {
            crossings: RollingWindow::new(config.window_size),
            floors: RollingWindow::new(config.window_size),
            caps: RollingWindow::new(config.window_size),
            collapses: RollingWindow::new(config.window_size),
            categories: HashMap::new(),
            days_observed: 0,
            history_capacity: config.history_capacity,
        }
    }

    /// Feed one engine event into the rolling windows.
    pub fn process_event(&mut self, event: &Event) {
        match event {
            Event::SellByPassed { .. } => self.crossings.add(1),
            Event::QualityFloored { .. } => self.floors.add(1),
            Event::QualityCapped { .. } => self.caps.add(1),
            Event::PassCollapsed { .. } => self.collapses.add(1),
        }
    }

    /// Close out a day: commit the rolling windows and snapshot per-category
    /// quality from the post-update shelf.
    pub fn end_day(&mut self, shelf: &[Item]) {
        self.crossings.commit();
        self.floors.commit();
        self.caps.commit();
        self.collapses.commit();

        let history_capacity = self.history_capacity;
        for category in ALL_CATEGORIES {
            let stats = self
                .categories
                .entry(category)
                .or_insert_with(|| CategoryStats::new(history_capacity));
            stats.count = 0;
            stats.quality_total = 0;
        }
        for item in shelf {
            if let Some(stats) = self.categories.get_mut(&item.category()) {
                stats.count += 1;
                stats.quality_total += i64::from(item.quality);
            }
        }
        for stats in self.categories.values_mut() {
            if let Some(mean) = stats.mean_quality() {
                stats.quality_history.push(mean);
            }
        }

        self.days_observed += 1;
    }

    /// Number of days closed out so far.
    pub fn days_observed(&self) -> Day {
        self.days_observed
    }

    /// Rolling sell-by crossings per day over the window.
    pub fn expiry_rate(&self) -> Fixed64 {
        self.crossings.rate()
    }

    /// Total sell-by crossings within the window.
    pub fn expiries_in_window(&self) -> u64 {
        self.crossings.total()
    }

    /// Rolling lower-bound clamps per day over the window.
    pub fn floor_rate(&self) -> Fixed64 {
        self.floors.rate()
    }

    /// Rolling upper-bound clamps per day over the window.
    pub fn cap_rate(&self) -> Fixed64 {
        self.caps.rate()
    }

    /// Rolling pass collapses per day over the window.
    pub fn collapse_rate(&self) -> Fixed64 {
        self.collapses.rate()
    }

    /// Total pass collapses within the window.
    pub fn collapses_in_window(&self) -> u64 {
        self.collapses.total()
    }

    /// Item count for a category at the most recent end-of-day.
    pub fn category_count(&self, category: Category) -> usize {
        self.categories.get(&category).map_or(0, |s| s.count)
    }

    /// Mean quality for a category at the most recent end-of-day, if the
    /// category had any items on the shelf.
    pub fn mean_quality(&self, category: Category) -> Option<Fixed64> {
        self.categories.get(&category)?.mean_quality()
    }

    /// Historical mean-quality snapshots for a category, oldest to newest.
    pub fn quality_history(&self, category: Category) -> Vec<Fixed64> {
        self.categories
            .get(&category)
            .map_or_else(Vec::new, |s| s.quality_history.to_vec())
    }
}

impl Default for ShelfStats {
    fn default() -> Self {
        Self::new(StatsConfig::default())
    }
}
