//! Detection of pathologically frequent state events.
//!
//! [`ChatteringWindow`] is a fixed-capacity ring buffer with one slot per
//! event iteration. A slot holds the event time if a state event fired in
//! that iteration and is empty otherwise. Once every slot holds an event and
//! the oldest and newest events are closer together than the nominal step
//! size, the run is chattering.

/// Sliding window over the most recent event iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatteringWindow {
    slots: Vec<Option<f64>>,
    head: usize,
    fired: usize,
    warned: bool,
}

impl ChatteringWindow {
    /// Creates an empty window with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "chattering window needs at least one slot");
        Self {
            slots: vec![None; capacity],
            head: 0,
            fired: 0,
            warned: false,
        }
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns how many slots currently hold a state event.
    #[must_use]
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Returns true if every slot holds a state event.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.fired == self.capacity()
    }

    /// Returns true once chattering has been reported.
    #[must_use]
    pub fn has_warned(&self) -> bool {
        self.warned
    }

    /// Drops the oldest slot, the one the next push overwrites.
    pub fn evict(&mut self) {
        if self.slots[self.head].take().is_some() {
            self.fired -= 1;
        }
    }

    /// Records one event iteration: `Some(time)` if a state event fired at
    /// `time`, `None` otherwise.
    ///
    /// Evicts the oldest slot first if [`evict`](Self::evict) has not.
    pub fn push(&mut self, event: Option<f64>) {
        self.evict();
        if event.is_some() {
            self.fired += 1;
        }
        self.slots[self.head] = event;
        self.head = (self.head + 1) % self.capacity();
    }

    /// Returns the oldest and newest event times if the window is saturated.
    #[must_use]
    pub fn span(&self) -> Option<(f64, f64)> {
        if !self.is_saturated() {
            return None;
        }
        let newest = (self.head + self.capacity() - 1) % self.capacity();
        Some((self.slots[self.head]?, self.slots[newest]?))
    }

    /// Reports chattering at most once per window.
    ///
    /// Returns the time span of the window the first time it is saturated
    /// with events spanning less than `step_size`.
    pub fn check(&mut self, step_size: f64) -> Option<(f64, f64)> {
        if self.warned {
            return None;
        }
        let (from, to) = self.span()?;
        if to - from < step_size {
            self.warned = true;
            Some((from, to))
        } else {
            None
        }
    }
}
