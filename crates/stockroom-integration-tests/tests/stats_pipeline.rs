//! Cross-crate pipeline: engine events flowing into the statistics module.
//!
//! Wires `stockroom-stats` to the engine's event bus the way a host
//! dashboard would, runs multi-day simulations, and checks the rolling
//! metrics and quality histories that come out the other end.

use std::cell::RefCell;
use std::rc::Rc;

use stockroom_core::engine::Engine;
use stockroom_core::event::EventKind;
use stockroom_core::item::Category;
use stockroom_core::test_utils::*;
use stockroom_stats::{Fixed64, ShelfStats, StatsConfig};

/// Subscribe a shared stats tracker to every event kind on the bus.
fn attach_stats(engine: &mut Engine, stats: &Rc<RefCell<ShelfStats>>) {
    for kind in [
        EventKind::SellByPassed,
        EventKind::QualityFloored,
        EventKind::QualityCapped,
        EventKind::PassCollapsed,
    ] {
        let sink = Rc::clone(stats);
        engine.on_passive(
            kind,
            Box::new(move |event| sink.borrow_mut().process_event(event)),
        );
    }
}

#[test]
fn thirty_day_run_accumulates_expected_rates() {
    let stats = Rc::new(RefCell::new(ShelfStats::new(StatsConfig {
        window_size: 30,
        history_capacity: 64,
    })));

    let mut engine = Engine::new();
    attach_stats(&mut engine, &stats);

    let mut shelf = mixed_shelf();
    for _ in 0..30 {
        engine.step(&mut shelf);
        stats.borrow_mut().end_day(&shelf);
    }

    let stats = stats.borrow();
    assert_eq!(stats.days_observed(), 30);

    // Every non-legendary item crossed its date once within the window.
    assert_eq!(stats.expiries_in_window(), 7);
    // All three passes collapsed.
    assert_eq!(stats.collapses_in_window(), 3);

    // 7 crossings over 30 days.
    assert_eq!(stats.expiry_rate(), Fixed64::from_num(7) / Fixed64::from_num(30));
}

#[test]
fn quality_history_tracks_the_brie_climb() {
    let stats = Rc::new(RefCell::new(ShelfStats::default()));

    let mut engine = Engine::new();
    attach_stats(&mut engine, &stats);

    let mut shelf = vec![brie(2, 0)];
    for _ in 0..5 {
        engine.step(&mut shelf);
        stats.borrow_mut().end_day(&shelf);
    }

    // +1 for two days, then +2 past the date.
    let history = stats.borrow().quality_history(Category::AgedBrie);
    let expected: Vec<Fixed64> = [1, 2, 4, 6, 8].map(Fixed64::from_num).to_vec();
    assert_eq!(history, expected);
}

#[test]
fn mean_quality_averages_across_the_category() {
    let stats = Rc::new(RefCell::new(ShelfStats::default()));

    let mut engine = Engine::new();
    attach_stats(&mut engine, &stats);

    // Two ordinary items aging in lockstep, one day apart in value.
    let mut shelf = vec![normal(10, 20), normal(10, 22)];
    engine.step(&mut shelf);
    stats.borrow_mut().end_day(&shelf);

    let mean = stats.borrow().mean_quality(Category::Normal).unwrap();
    assert_eq!(mean, Fixed64::from_num(20)); // (19 + 21) / 2
}

#[test]
fn suppressed_kinds_never_reach_the_stats() {
    let stats = Rc::new(RefCell::new(ShelfStats::default()));

    let mut engine = Engine::new();
    engine.suppress_event(EventKind::QualityCapped);
    attach_stats(&mut engine, &stats);

    // Brie at the cap generates a capped clamp every day; suppressed, none
    // of them are counted.
    let mut shelf = vec![brie(10, 50)];
    for _ in 0..5 {
        engine.step(&mut shelf);
        stats.borrow_mut().end_day(&shelf);
    }

    assert_eq!(stats.borrow().cap_rate(), Fixed64::ZERO);
    assert_eq!(stats.borrow().days_observed(), 5);
}

#[test]
fn window_eviction_forgets_old_expiries() {
    let stats = Rc::new(RefCell::new(ShelfStats::new(StatsConfig {
        window_size: 5,
        history_capacity: 16,
    })));

    let mut engine = Engine::new();
    attach_stats(&mut engine, &stats);

    // The only crossing happens on day 2 (sell_in 1 -> 0 -> -1).
    let mut shelf = vec![normal(1, 10)];
    for _ in 0..3 {
        engine.step(&mut shelf);
        stats.borrow_mut().end_day(&shelf);
    }
    assert_eq!(stats.borrow().expiries_in_window(), 1);

    // Five more days push the crossing out of the window.
    for _ in 0..5 {
        engine.step(&mut shelf);
        stats.borrow_mut().end_day(&shelf);
    }
    assert_eq!(stats.borrow().expiries_in_window(), 0);
}
