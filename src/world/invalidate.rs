//! Trailing debounce for presentation caches
//!
//! Editors can change many tiles in quick succession (dragging a brush).
//! A renderer that rebuilds cached tiles on every edit wastes work, so it
//! arms a [`Debounce`] per edit and rebuilds once the edits stop arriving.
//! Time is passed in explicitly; the debounce owns no timer.

/// Cancellable deferred trigger that fires `delay` seconds after the
/// most recent `trigger`
#[derive(Debug, Clone, PartialEq)]
pub struct Debounce {
    delay: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(delay: f64) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm, or push back an already armed deadline
    pub fn trigger(&mut self, now: f64) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when the deadline has passed
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
