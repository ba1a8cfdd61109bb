//! Great-circle flight planning.
//!
//! A flight becomes a chain of parcels spaced one segment apart along the
//! great circle, each scheduled to be born when the aircraft would reach it.
//! Once all have spawned the chain approximates continuous flight.

use drift_core::geo::great_circle_waypoints;
use drift_core::{IdSequence, ParcelId};

use crate::parcel::{DisplayHints, Rgba};
use crate::{FlightRequest, Parcel};

/// Lifetime granted to every flight waypoint parcel, seconds.
pub const FLIGHT_LIFETIME_SECS: f64 = 24.0 * 3_600.0;

/// Marker size for flight parcels.
const FLIGHT_MARKER_SIZE: f32 = 0.1;

/// Plan a flight: one `(birth_secs, parcel)` pair per waypoint.
///
/// Waypoint `i` is born at `now_secs + i * segment_m / cruise_speed`, so
/// birth times are strictly increasing along the route.  Each parcel links
/// to its predecessor by id for trail rendering; the link is informational
/// only and may dangle once the predecessor is culled.
pub fn plan_flight(
    req: &FlightRequest,
    now_secs: f64,
    segment_m: f64,
    ids: &mut IdSequence,
) -> Vec<(f64, Parcel)> {
    let waypoints = great_circle_waypoints(req.origin, req.dest, segment_m);
    let segment_secs = segment_m / req.cruise_speed_ms;

    let mut prev: Option<ParcelId> = None;
    waypoints
        .into_iter()
        .enumerate()
        .map(|(i, loc)| {
            let id = ids.next_id();
            let mut parcel = Parcel::new(id, loc, FLIGHT_LIFETIME_SECS);
            parcel.hints = DisplayHints { size: FLIGHT_MARKER_SIZE, color: Rgba::CYAN };
            parcel.prev = prev;
            prev = Some(id);
            (now_secs + i as f64 * segment_secs, parcel)
        })
        .collect()
}
