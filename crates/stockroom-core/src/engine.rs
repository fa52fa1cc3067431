//! The simulation engine: orchestrates the three-phase daily step pipeline
//! over a caller-owned shelf of items.
//!
//! # Architecture
//!
//! The `Engine` owns:
//! - A [`SimState`] (day counter)
//! - An [`EventBus`] for typed simulation events
//! - A pause flag and the most recent state hash
//!
//! It deliberately owns no items. The caller holds the collection and passes
//! it to [`Engine::step`] once per simulated day; the engine mutates the
//! items in place and retains nothing about them between calls.
//!
//! # Three-Phase Pipeline
//!
//! Each `step()` runs:
//! 1. **Age** -- apply the category rule to every item; emit events;
//!    aggregate the [`StepResult`]
//! 2. **Post-step** -- deliver buffered events to listeners
//! 3. **Bookkeeping** -- increment the day counter, compute the state hash

use crate::event::{Event, EventBus, EventKind, PassiveListener};
use crate::item::Item;
use crate::rules;
use crate::sim::{Day, SimState, StateHash, StepResult};

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The core simulation engine. Advances a shelf of items by exactly one
/// simulated day per [`step`](Engine::step) call.
#[derive(Debug)]
pub struct Engine {
    /// Simulation state (day counter).
    pub sim_state: SimState,

    /// Typed event bus for simulation events.
    pub event_bus: EventBus,

    /// Whether the simulation is paused.
    pub(crate) paused: bool,

    /// The most recently computed state hash.
    pub(crate) last_state_hash: u64,
}

impl Engine {
    /// Create a new engine at day 0.
    pub fn new() -> Self {
        Self {
            sim_state: SimState::new(),
            event_bus: EventBus::default(),
            paused: false,
            last_state_hash: 0,
        }
    }

    /// The current day. Starts at 0 and increments once per step.
    pub fn day(&self) -> Day {
        self.sim_state.day
    }

    /// Pause the simulation. Steps become no-ops until resumed.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume a paused simulation.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the simulation is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The state hash computed at the end of the most recent step. Two
    /// replicas of the same simulation must agree on this value every day.
    pub fn state_hash(&self) -> u64 {
        self.last_state_hash
    }

    /// Suppress an event kind on the bus.
    pub fn suppress_event(&mut self, kind: EventKind) {
        self.event_bus.suppress(kind);
    }

    /// Register a passive event listener.
    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener) {
        self.event_bus.on_passive(kind, listener);
    }

    // -----------------------------------------------------------------------
    // Step
    // -----------------------------------------------------------------------

    /// Advance every item by exactly one simulated day.
    ///
    /// Items update independently, in slice order; order cannot affect the
    /// outcome. An empty slice is a valid no-op shelf -- the day counter
    /// still advances. A paused engine returns a default result and touches
    /// nothing.
    pub fn step(&mut self, items: &mut [Item]) -> StepResult {
        if self.paused {
            return StepResult::default();
        }

        let mut result = StepResult::default();

        // Phase 1: Age -- apply the category rule to every item.
        self.phase_age(items, &mut result);

        // Phase 2: Post-step -- deliver buffered events to listeners.
        self.phase_post_step();

        // Phase 3: Bookkeeping -- update day counter, compute state hash.
        self.phase_bookkeeping(items);

        result
    }

    // -----------------------------------------------------------------------
    // Phase 1: Age
    // -----------------------------------------------------------------------

    fn phase_age(&mut self, items: &mut [Item], result: &mut StepResult) {
        let day = self.sim_state.day;
        result.items_updated = items.len();

        for (index, item) in items.iter_mut().enumerate() {
            let outcome = rules::age_item(item);

            if outcome.crossed_sell_by {
                result.sell_by_crossings += 1;
                self.event_bus.emit(Event::SellByPassed { item: index, day });
            }
            if outcome.floored {
                result.quality_floors += 1;
                self.event_bus.emit(Event::QualityFloored { item: index, day });
            }
            if outcome.capped {
                result.quality_caps += 1;
                self.event_bus.emit(Event::QualityCapped { item: index, day });
            }
            if outcome.collapsed {
                result.pass_collapses += 1;
                self.event_bus.emit(Event::PassCollapsed { item: index, day });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Phase 2: Post-step
    // -----------------------------------------------------------------------

    fn phase_post_step(&mut self) {
        self.event_bus.deliver();
    }

    // -----------------------------------------------------------------------
    // Phase 3: Bookkeeping
    // -----------------------------------------------------------------------

    fn phase_bookkeeping(&mut self, items: &[Item]) {
        self.sim_state.day += 1;

        let mut hash = StateHash::new();
        hash.write_u64(self.sim_state.day);
        for item in items {
            hash.write(item.name.as_bytes());
            hash.write_i32(item.sell_in);
            hash.write_i32(item.quality);
        }
        self.last_state_hash = hash.finish();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
