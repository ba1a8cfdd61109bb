//! Parcel identifiers and source namespacing.
//!
//! Every point source numbers its own parcels from a private monotonic
//! counter ([`IdSequence`]).  When several sources are live at once their
//! identifiers are kept disjoint by adding `source_index * SOURCE_ID_SPAN`
//! to each local id before it leaves the engine.  An identifier is never
//! reassigned after its parcel is culled.

use std::fmt;

/// Width of one source's identifier namespace.
///
/// A single source must never have this many parcels alive at once —
/// exceeding it would let its namespaced ids bleed into the next source's
/// range.  The engine asserts the live count in debug builds.
pub const SOURCE_ID_SPAN: u64 = 1_000_000;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Unique identifier of one parcel.
    ///
    /// Inside a point source the value is source-local; once it crosses the
    /// engine boundary it carries the source's namespace offset.
    pub struct ParcelId(u64);
}

impl ParcelId {
    /// The id as seen outside the engine: local value plus the namespace
    /// offset of the source at `source_index`.
    #[inline]
    pub fn namespaced(self, source_index: usize) -> ParcelId {
        ParcelId(source_index as u64 * SOURCE_ID_SPAN + self.0)
    }
}

// ── IdSequence ────────────────────────────────────────────────────────────────

/// Monotonic source-local id allocator.
///
/// Ids start at 1 and are never reused within a source's lifetime, so a
/// renderer can key long-lived resources on them safely.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next id.
    #[inline]
    pub fn next_id(&mut self) -> ParcelId {
        let id = ParcelId(self.next);
        self.next += 1;
        id
    }

    /// Total ids handed out so far.
    #[inline]
    pub fn allocated(&self) -> u64 {
        self.next.saturating_sub(1)
    }
}
