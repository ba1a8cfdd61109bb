//! Engine observer trait for progress reporting.

use drift_core::StepClock;

/// Callbacks invoked by [`Engine::advance_external_with`][crate::Engine]
/// at key points in the catch-up loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl EngineObserver for ProgressPrinter {
///     fn on_snapshot(&mut self, clock: &StepClock, live: usize) {
///         println!("{}: {live} parcels live", clock.sim_time());
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called after each fixed step completes (may fire many times per
    /// external report, or not at all).
    fn on_step(&mut self, _clock: &StepClock) {}

    /// Called after the snapshot tables rotate, with the live parcel count.
    fn on_snapshot(&mut self, _clock: &StepClock, _live: usize) {}

    /// Called once when a full-mode provider has been adopted.
    fn on_handoff(&mut self, _source_count: usize) {}
}

/// An [`EngineObserver`] that does nothing.  Use when you need to drive the
/// engine but don't want progress callbacks.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
