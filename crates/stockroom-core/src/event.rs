//! Typed event system with pre-allocated ring buffers.
//!
//! Events are emitted during the age phase and delivered in batch during
//! post-step. Each event kind has its own [`EventBuffer`] ring buffer with a
//! configurable capacity.
//!
//! Event kinds can be suppressed via [`EventBus::suppress`], which prevents
//! any allocation or recording for that kind. Suppressed events have zero
//! cost.

use crate::sim::Day;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A simulation event. All events carry the index of the item within the
/// slice passed to `step`, plus the day (starting at 0) being simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An item's sell-by date passed today.
    SellByPassed { item: usize, day: Day },
    /// An item's computed quality fell below the lower bound and was clamped.
    QualityFloored { item: usize, day: Day },
    /// An item's computed quality rose above the upper bound and was clamped.
    QualityCapped { item: usize, day: Day },
    /// A backstage pass with remaining value became worthless.
    PassCollapsed { item: usize, day: Day },
}

/// Discriminant tag for event types, used for suppression and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SellByPassed,
    QualityFloored,
    QualityCapped,
    PassCollapsed,
}

/// Total number of event kinds.
const EVENT_KIND_COUNT: usize = 4;

impl Event {
    /// Get the discriminant kind for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::SellByPassed { .. } => EventKind::SellByPassed,
            Event::QualityFloored { .. } => EventKind::QualityFloored,
            Event::QualityCapped { .. } => EventKind::QualityCapped,
            Event::PassCollapsed { .. } => EventKind::PassCollapsed,
        }
    }

    /// Index of the item this event refers to.
    pub fn item(&self) -> usize {
        match *self {
            Event::SellByPassed { item, .. }
            | Event::QualityFloored { item, .. }
            | Event::QualityCapped { item, .. }
            | Event::PassCollapsed { item, .. } => item,
        }
    }

    /// Day on which the event occurred.
    pub fn day(&self) -> Day {
        match *self {
            Event::SellByPassed { day, .. }
            | Event::QualityFloored { day, .. }
            | Event::QualityCapped { day, .. }
            | Event::PassCollapsed { day, .. } => day,
        }
    }
}

impl EventKind {
    /// Convert to usize index for array lookups.
    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// EventBuffer -- pre-allocated ring buffer
// ---------------------------------------------------------------------------

/// A pre-allocated ring buffer for events. Fixed capacity; when full, the
/// oldest events are dropped.
#[derive(Debug)]
pub struct EventBuffer {
    /// Pre-allocated storage.
    events: Vec<Option<Event>>,
    /// Write position (wraps around).
    head: usize,
    /// Number of events currently stored (may be less than capacity).
    len: usize,
    /// Total events ever written (including dropped).
    total_written: u64,
}

impl EventBuffer {
    /// Create a new ring buffer with the given capacity.
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            total_written: 0,
        }
    }

    /// Push an event into the ring buffer. If full, the oldest event is
    /// dropped.
    pub fn push(&mut self, event: Event) {
        self.events[self.head] = Some(event);
        self.head = (self.head + 1) % self.capacity();
        if self.len < self.capacity() {
            self.len += 1;
        }
        self.total_written += 1;
    }

    /// The total capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.events.len()
    }

    /// Number of events currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total events written since creation (including dropped).
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Number of events that were dropped because the buffer was full.
    pub fn dropped_count(&self) -> u64 {
        self.total_written.saturating_sub(self.capacity() as u64)
    }

    /// Iterate over events in order from oldest to newest.
    pub fn iter(&self) -> EventBufferIter<'_> {
        let start = if self.len < self.capacity() {
            0
        } else {
            // head points to the next write position, which is the oldest
            // entry once the buffer has wrapped
            self.head
        };
        EventBufferIter {
            buffer: self,
            index: start,
            remaining: self.len,
        }
    }

    /// Clear all events from the buffer.
    pub fn clear(&mut self) {
        for slot in &mut self.events {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }
}

/// Iterator over events in an [`EventBuffer`], from oldest to newest.
pub struct EventBufferIter<'a> {
    buffer: &'a EventBuffer,
    index: usize,
    remaining: usize,
}

impl<'a> Iterator for EventBufferIter<'a> {
    type Item = &'a Event;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let event = self.buffer.events[self.index].as_ref();
        self.index = (self.index + 1) % self.buffer.capacity();
        self.remaining -= 1;
        event
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for EventBufferIter<'_> {}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

/// A passive listener receives events read-only, in registration order.
pub type PassiveListener = Box<dyn FnMut(&Event)>;

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default per-kind ring buffer capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// The central event bus. Holds one ring buffer per event kind, listener
/// lists, and suppression flags.
pub struct EventBus {
    /// One ring buffer per event kind, lazily allocated on first emit.
    buffers: [Option<EventBuffer>; EVENT_KIND_COUNT],

    /// Suppressed event kinds. Suppressed events are never buffered.
    suppressed: [bool; EVENT_KIND_COUNT],

    /// Listeners indexed by event kind.
    listeners: [Vec<PassiveListener>; EVENT_KIND_COUNT],

    /// Default buffer capacity for new event buffers.
    default_capacity: usize,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("buffers", &self.buffers)
            .field("suppressed", &self.suppressed)
            .field("default_capacity", &self.default_capacity)
            .finish_non_exhaustive()
    }
}

const fn empty_listener_array() -> [Vec<PassiveListener>; EVENT_KIND_COUNT] {
    // Cannot use Default in const context, so we build it manually.
    [Vec::new(), Vec::new(), Vec::new(), Vec::new()]
}

impl EventBus {
    /// Create a new event bus with the given default buffer capacity per
    /// kind.
    pub fn new(default_capacity: usize) -> Self {
        Self {
            buffers: Default::default(),
            suppressed: [false; EVENT_KIND_COUNT],
            listeners: empty_listener_array(),
            default_capacity,
        }
    }

    /// Suppress an event kind. Suppressed events are never allocated or
    /// buffered.
    pub fn suppress(&mut self, kind: EventKind) {
        self.suppressed[kind.index()] = true;
        // Drop the buffer if it exists -- zero allocation for suppressed
        // events.
        self.buffers[kind.index()] = None;
    }

    /// Check if an event kind is suppressed.
    pub fn is_suppressed(&self, kind: EventKind) -> bool {
        self.suppressed[kind.index()]
    }

    /// Emit an event. Stores it in the appropriate ring buffer. No-ops if
    /// the event kind is suppressed.
    pub fn emit(&mut self, event: Event) {
        let idx = event.kind().index();

        if self.suppressed[idx] {
            return;
        }

        let capacity = self.default_capacity;
        let buffer = self.buffers[idx].get_or_insert_with(|| EventBuffer::new(capacity));
        buffer.push(event);
    }

    /// Register a passive listener for an event kind. Listeners are called
    /// in registration order during delivery.
    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener) {
        self.listeners[kind.index()].push(listener);
    }

    /// Access the ring buffer for a kind, if any events have been emitted.
    pub fn buffer(&self, kind: EventKind) -> Option<&EventBuffer> {
        self.buffers[kind.index()].as_ref()
    }

    /// Deliver all buffered events to listeners, oldest to newest, then
    /// clear the buffers. Called during post-step.
    pub fn deliver(&mut self) {
        for idx in 0..EVENT_KIND_COUNT {
            if self.suppressed[idx] {
                continue;
            }

            let Some(buffer) = self.buffers[idx].as_mut() else {
                continue;
            };

            if buffer.is_empty() {
                continue;
            }

            // Collect events into a temporary Vec to avoid borrow conflicts
            // between the buffer and listeners.
            let events: Vec<Event> = buffer.iter().cloned().collect();
            buffer.clear();

            for event in &events {
                for listener in &mut self.listeners[idx] {
                    listener(event);
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
