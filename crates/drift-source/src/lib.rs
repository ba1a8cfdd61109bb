//! `drift-source` — parcel data model and point-source capability.
//!
//! A *point source* is anything that can seed, advance, and cull its own
//! population of parcels and report the live ones.  The engine in
//! `drift-sim` drives every source identically, whether it is the built-in
//! [`AmbientSource`] (lightweight mode) or a delegated heavyweight provider
//! (full mode).
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`parcel`]  | `Parcel`, `DisplayHints`, `Rgba`                      |
//! | [`source`]  | `PointSource` trait, `FlightRequest`                  |
//! | [`queue`]   | `SpawnQueue` — time-ordered delayed births            |
//! | [`ambient`] | `AmbientSource` — stochastic spawning, zonal drift    |
//! | [`flight`]  | great-circle flight planning                          |

pub mod ambient;
pub mod flight;
pub mod parcel;
pub mod queue;
pub mod source;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ambient::AmbientSource;
pub use parcel::{DisplayHints, Parcel, Rgba};
pub use queue::SpawnQueue;
pub use source::{FlightRequest, PointSource};
