//! The `PointSource` capability.

use drift_core::GeoPoint;

use crate::Parcel;

/// Parameters of a requested flight.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlightRequest {
    pub origin: GeoPoint,
    pub dest: GeoPoint,
    /// Cruise ground speed, m/s.
    pub cruise_speed_ms: f64,
}

/// Anything that can create, advance, and cull its own parcel population.
///
/// The engine calls `seed`, `advance`, `cull` once per fixed step, in that
/// order, from a single thread.  Implementations therefore need no interior
/// locking.  `Send` is required so a freshly built source can be handed
/// over from the initializer's worker thread.
pub trait PointSource: Send {
    /// Create any parcels due this step (stochastic and scheduled births).
    fn seed(&mut self, dt: f64);

    /// Advance every live parcel by `dt` seconds (motion and aging).
    fn advance(&mut self, dt: f64);

    /// Remove parcels whose age exceeds their effective lifetime.
    fn cull(&mut self);

    /// Iterate the currently live parcels.  Ids are source-local; the
    /// engine applies the namespace offset when it captures a snapshot.
    fn parcels(&self) -> Box<dyn Iterator<Item = &Parcel> + '_>;

    /// Drop every live parcel and any pending scheduled births.
    fn clear(&mut self);

    /// Number of live parcels.
    fn live_count(&self) -> usize {
        self.parcels().count()
    }

    /// Immediately place a parcel at `loc`.  Returns `false` if this source
    /// does not support interactive placement (the default).
    fn place(&mut self, loc: GeoPoint, lifetime_secs: f64) -> bool {
        let _ = (loc, lifetime_secs);
        false
    }

    /// Schedule a flight's waypoint chain for delayed birth.  Returns
    /// `false` if this source does not fly routes (the default).
    fn fly_route(&mut self, req: &FlightRequest) -> bool {
        let _ = req;
        false
    }
}
