//! Stockroom Core -- the daily aging engine for shop inventory simulation.
//!
//! This crate models a shop's shelf of stock items whose remaining shelf days
//! (`sell_in`) and `quality` evolve once per simulated day under
//! category-specific rules: ordinary goods decay, Aged Brie improves with age,
//! Sulfuras never changes, backstage passes appreciate toward the event and
//! collapse after it, and conjured goods decay at double rate.
//!
//! # Three-Phase Step Pipeline
//!
//! Each call to [`engine::Engine::step`] advances the shelf by exactly one
//! simulated day through the following phases:
//!
//! 1. **Age** -- Apply the category rule to every item independently:
//!    quality delta, shelf-day decrement, date-passed adjustment, clamp.
//! 2. **Post-step** -- Deliver buffered events to registered listeners.
//! 3. **Bookkeeping** -- Increment the day counter and compute the state hash.
//!
//! # Ownership
//!
//! The caller owns the item collection and its lifetime. The engine never
//! creates, stores, or releases items; `step` mutates the fields of the items
//! it is handed and nothing else survives the call except events and counters.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- Pipeline orchestrator: day counter, event bus,
//!   pause flag, state hash.
//! - [`item::Item`] -- Plain mutable record `(name, sell_in, quality)`.
//! - [`item::Category`] -- Closed set of aging categories, classified from
//!   the item name with `Normal` as the fallback.
//! - [`rules`] -- The per-category daily transition, the core of the crate.
//! - [`event::EventBus`] -- Typed events with per-kind ring buffers and
//!   batched delivery.
//! - [`sim::StateHash`] -- FNV-1a state hash for desync detection.

#[cfg(feature = "data-loader")]
pub mod data_loader;
pub mod engine;
pub mod event;
pub mod item;
pub mod rules;
pub mod sim;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
