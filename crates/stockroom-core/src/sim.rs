//! Simulation state types: the day counter, per-step aggregates, and the
//! deterministic state hash.

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Days are the atomic unit of simulation time.
pub type Day = u64;

/// Mutable simulation state tracked by the engine.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SimState {
    /// Current day counter. Incremented by 1 for each step.
    pub day: Day,
}

impl SimState {
    /// Create a new simulation state starting at day 0.
    pub fn new() -> Self {
        Self { day: 0 }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Step result
// ---------------------------------------------------------------------------

/// Aggregate outcome of a single `Engine::step` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Number of items the step visited (legendary items included).
    pub items_updated: usize,
    /// Items whose sell-by date passed during this step.
    pub sell_by_crossings: u32,
    /// Items whose quality was clamped up to the lower bound.
    pub quality_floors: u32,
    /// Items whose quality was clamped down to the upper bound.
    pub quality_caps: u32,
    /// Backstage passes that lost their remaining value this step.
    pub pass_collapses: u32,
}

impl StepResult {
    /// Fold another step's counts into this one. Used by multi-step helpers.
    pub fn absorb(&mut self, other: StepResult) {
        self.items_updated += other.items_updated;
        self.sell_by_crossings += other.sell_by_crossings;
        self.quality_floors += other.quality_floors;
        self.quality_caps += other.quality_caps;
        self.pass_collapses += other.pass_collapses;
    }
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// A simple deterministic hash of shelf state for desync detection between
/// replicas of the same simulation.
///
/// Uses FNV-1a (64-bit) for speed and simplicity. Not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHash(pub u64);

impl StateHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    /// Start a new hash.
    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    /// Feed bytes into the hash.
    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    /// Feed a u64 into the hash.
    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    /// Feed an i32 into the hash.
    pub fn write_i32(&mut self, v: i32) {
        self.write(&v.to_le_bytes());
    }

    /// Finalize and return the hash value.
    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for StateHash {
    fn default() -> Self {
        Self::new()
    }
}
