//! Snapshot pair and interpolation.
//!
//! After every catch-up loop that stepped at least once, the engine captures
//! the live parcels of all sources into `new` and demotes the previous `new`
//! to `old`.  Both tables are immutable once captured; renderers only ever
//! see a blend of the two, never a raw physics step.

use drift_core::{GeoPoint, ParcelId, SOURCE_ID_SPAN};
use drift_source::{DisplayHints, Parcel, PointSource};
use rustc_hash::FxHashMap;

/// One parcel as surfaced to the renderer: namespaced id, location, and
/// forwarded display payload.
#[derive(Clone, Debug)]
pub struct ParcelSnapshot {
    /// Namespaced id — unique across all sources.
    pub id: ParcelId,
    pub loc: GeoPoint,
    pub age: f64,
    pub max_lifetime: f64,
    pub lifetime_multiplier: f64,
    pub hints: DisplayHints,
    /// Namespaced id of the preceding flight parcel, if any.  May refer to
    /// a parcel that is no longer present.
    pub prev: Option<ParcelId>,
}

impl ParcelSnapshot {
    fn capture(parcel: &Parcel, source_index: usize) -> Self {
        Self {
            id: parcel.id.namespaced(source_index),
            loc: parcel.loc,
            age: parcel.age,
            max_lifetime: parcel.max_lifetime,
            lifetime_multiplier: parcel.lifetime_multiplier,
            hints: parcel.hints,
            prev: parcel.prev.map(|p| p.namespaced(source_index)),
        }
    }
}

/// The two most recent fixed-step entity tables.
#[derive(Default)]
pub struct SnapshotTable {
    old: FxHashMap<ParcelId, ParcelSnapshot>,
    new: FxHashMap<ParcelId, ParcelSnapshot>,
}

impl SnapshotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate: `old ← new`, then capture every source's live parcels into
    /// `new` with the source's namespace offset applied.
    ///
    /// Call only after the simulated state actually advanced — refreshing
    /// without a step would make `old` and `new` identical and freeze the
    /// interpolation.
    pub fn refresh(&mut self, sources: &[Box<dyn PointSource>]) {
        self.old = std::mem::take(&mut self.new);
        for (i, source) in sources.iter().enumerate() {
            debug_assert!(
                (source.live_count() as u64) < SOURCE_ID_SPAN,
                "source {i} exceeds its id namespace ({} live parcels)",
                source.live_count()
            );
            for parcel in source.parcels() {
                let snap = ParcelSnapshot::capture(parcel, i);
                self.new.insert(snap.id, snap);
            }
        }
    }

    /// Blend `old` and `new` at `fraction` ∈ [0, 1].
    ///
    /// Parcels present in both tables get linearly interpolated coordinates;
    /// parcels only in `new` (just born) are returned at their `new`
    /// position; parcels only in `old` (culled this step) are omitted.
    /// Output is sorted by id so successive calls are diff-friendly.
    pub fn interpolate(&self, fraction: f64) -> Vec<ParcelSnapshot> {
        let mut out: Vec<ParcelSnapshot> = self
            .new
            .values()
            .map(|cur| match self.old.get(&cur.id) {
                Some(prev) => {
                    let mut blended = cur.clone();
                    blended.loc = GeoPoint {
                        lon: prev.loc.lon + fraction * (cur.loc.lon - prev.loc.lon),
                        lat: prev.loc.lat + fraction * (cur.loc.lat - prev.loc.lat),
                    };
                    blended
                }
                None => cur.clone(),
            })
            .collect();
        out.sort_unstable_by_key(|p| p.id);
        out
    }

    /// Number of parcels in the most recent table.
    pub fn live_count(&self) -> usize {
        self.new.len()
    }

    /// Drop both tables (used on hand-off and on `clear`).
    pub fn reset(&mut self) {
        self.old.clear();
        self.new.clear();
    }
}
