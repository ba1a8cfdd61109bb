//! `drift-sim` — the parcel engine orchestrator.
//!
//! # Per-report flow
//!
//! ```text
//! advance_external(dt):
//!   ① Hand-off poll — adopt a finished full-mode provider, if any.
//!   ② Accumulate   — clock.advance_external(dt) (target time only).
//!   ③ Catch up     — while clock.behind():
//!                      for each source: seed(dt) → advance(dt) → cull()
//!                      clock.step()
//!   ④ Snapshot     — if any step ran, rotate the old/new entity tables.
//! ```
//!
//! Queries between reports never see raw physics steps:
//! [`Engine::snapshot`] blends the two most recent fixed-step tables at the
//! clock's step fraction, so a renderer ticking at any cadence gets smooth
//! positions.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use drift_core::EngineConfig;
//! use drift_sim::EngineBuilder;
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default())
//!     .initial_parcels(700)
//!     .build()?;
//! engine.advance_external(1.0 / 60.0 * 3_600.0)?;
//! for parcel in engine.snapshot() {
//!     // hand to the renderer
//! }
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod handoff;
pub mod observer;
pub mod snapshot;


pub use builder::EngineBuilder;
pub use engine::{Engine, EngineMode};
pub use error::{EngineError, EngineResult};
pub use handoff::{ProviderBuilder, ProviderError};
pub use observer::{EngineObserver, NoopObserver};
pub use snapshot::ParcelSnapshot;
