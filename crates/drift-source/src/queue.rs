//! `SpawnQueue` — time-ordered delayed-birth queue.
//!
//! Flight waypoints (and any other scheduled births) wait here until the
//! simulation reaches their birth time.  Each step the source promotes every
//! entry whose birth time is at or before the current simulated time; later
//! entries stay queued.  Entries from several concurrently flown routes may
//! interleave, but within one flight birth times are monotonically
//! increasing, so promotion is FIFO per flight.
//!
//! Keys are milliseconds so the map stays ordered without an `Ord` wrapper
//! around `f64`; sub-millisecond birth spacing has no physical meaning here.

use std::collections::BTreeMap;

use crate::Parcel;

/// A priority queue mapping birth time → parcels to be born at that time.
#[derive(Default)]
pub struct SpawnQueue {
    inner: BTreeMap<u64, Vec<Parcel>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(birth_secs: f64) -> u64 {
        (birth_secs.max(0.0) * 1_000.0).round() as u64
    }

    /// Schedule `parcel` to be born at `birth_secs` (simulated seconds since
    /// engine start).
    pub fn push(&mut self, birth_secs: f64, parcel: Parcel) {
        self.inner.entry(Self::key(birth_secs)).or_default().push(parcel);
        self.total += 1;
    }

    /// Remove and return every parcel due at or before `now_secs`.
    pub fn drain_due(&mut self, now_secs: f64) -> Vec<Parcel> {
        if self.inner.is_empty() {
            return Vec::new();
        }
        let later = self.inner.split_off(&(Self::key(now_secs) + 1));
        let due_map = std::mem::replace(&mut self.inner, later);
        let due: Vec<Parcel> = due_map.into_values().flatten().collect();
        self.total -= due.len();
        due
    }

    /// Earliest scheduled birth time, seconds, or `None` if empty.
    pub fn next_birth_secs(&self) -> Option<f64> {
        self.inner.keys().next().map(|&k| k as f64 / 1_000.0)
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
