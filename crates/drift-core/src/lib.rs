//! `drift-core` — foundational types for the driftsim parcel engine.
//!
//! This crate is a dependency of every other `drift-*` crate.  It
//! intentionally has no `drift-*` dependencies and minimal external ones
//! (`rand`, `thiserror`, `chrono`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `ParcelId`, `IdSequence`, source namespacing          |
//! | [`geo`]     | `GeoPoint`, longitude wrap, great-circle waypoints    |
//! | [`time`]    | `StepClock` (fixed-step catch-up), `EngineConfig`     |
//! | [`rng`]     | `SimRng` (seeded, reproducible)                       |
//! | [`error`]   | `DriftError`, `DriftResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DriftError, DriftResult};
pub use geo::{EARTH_RADIUS_M, GeoPoint};
pub use ids::{IdSequence, ParcelId, SOURCE_ID_SPAN};
pub use rng::SimRng;
pub use time::{EngineConfig, StepClock};
