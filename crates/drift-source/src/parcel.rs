//! The parcel — the atomic simulated entity.

use drift_core::{GeoPoint, ParcelId};

/// An RGBA color carried as an opaque display hint.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const CYAN: Rgba = Rgba([0, 255, 255, 255]);
}

/// Opaque display payload.  The engine stores and forwards these but never
/// reads them for its own logic.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayHints {
    /// Relative marker size.
    pub size: f32,
    pub color: Rgba,
}

impl Default for DisplayHints {
    fn default() -> Self {
        Self { size: 1.0, color: Rgba::WHITE }
    }
}

/// One short-lived, geographically located point entity.
///
/// Created by a spawn process, mutated in place by advection each step, and
/// removed by the cull rule once `age` exceeds the effective lifetime.  The
/// id is source-local and never reused within the source's lifetime.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parcel {
    pub id: ParcelId,
    pub loc: GeoPoint,
    /// Simulated seconds since birth.
    pub age: f64,
    /// Base lifetime, seconds.
    pub max_lifetime: f64,
    /// Scales the effective lifetime without touching birth-rate statistics.
    pub lifetime_multiplier: f64,
    pub hints: DisplayHints,
    /// Preceding parcel of the same flight, by id.  Purely informational —
    /// the predecessor may already be culled.
    pub prev: Option<ParcelId>,
}

impl Parcel {
    pub fn new(id: ParcelId, loc: GeoPoint, max_lifetime: f64) -> Self {
        Self {
            id,
            loc,
            age: 0.0,
            max_lifetime,
            lifetime_multiplier: 1.0,
            hints: DisplayHints::default(),
            prev: None,
        }
    }

    /// Eligible for removal by the cull rule.
    #[inline]
    pub fn expired(&self) -> bool {
        self.age > self.max_lifetime * self.lifetime_multiplier
    }
}
