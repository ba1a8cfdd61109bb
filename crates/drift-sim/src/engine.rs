//! The `Engine` struct and its catch-up loop.

use chrono::{DateTime, Utc};
use drift_core::{EngineConfig, GeoPoint, StepClock};
use drift_source::{FlightRequest, PointSource};

use crate::handoff::HandoffSlot;
use crate::snapshot::SnapshotTable;
use crate::{EngineError, EngineObserver, EngineResult, NoopObserver, ParcelSnapshot, ProviderBuilder};

/// Which point sources the engine is currently running.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EngineMode {
    /// Built-in ambient rules only.
    Lightweight,
    /// A full-mode provider is being built on a worker thread; the
    /// lightweight sources keep running meanwhile.
    HandoffPending,
    /// The delegated provider is active.  Terminal — there is no way back
    /// within one engine instance.
    Full,
}

/// The parcel engine.
///
/// Single-writer: exactly one thread calls [`advance_external`] and the
/// query methods; the entity tables need no internal locking.  The only
/// concurrency seam is the full-mode hand-off (see [`crate::handoff`]).
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
///
/// [`advance_external`]: Engine::advance_external
pub struct Engine {
    /// Global configuration (step length, rates, speeds, seed).
    pub config: EngineConfig,

    /// Simulated vs. external time; drives the catch-up loop.
    pub clock: StepClock,

    /// Active point sources.  Index order defines the id namespace offsets.
    sources: Vec<Box<dyn PointSource>>,

    /// The two most recent fixed-step entity tables.
    snapshots: SnapshotTable,

    mode: EngineMode,

    /// In-flight provider build, if any.
    pending: Option<HandoffSlot>,
}

impl Engine {
    pub(crate) fn new(config: EngineConfig, sources: Vec<Box<dyn PointSource>>) -> Self {
        let clock = config.make_clock();
        Self {
            config,
            clock,
            sources,
            snapshots: SnapshotTable::new(),
            mode: EngineMode::Lightweight,
            pending: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Report externally elapsed time and let the simulation catch up.
    ///
    /// Runs zero, one, or many fixed steps depending on how far external
    /// time has advanced.  Returns `true` if at least one step ran (and the
    /// snapshot pair was rotated).
    ///
    /// # Errors
    ///
    /// Surfaces a failed full-mode hand-off as [`EngineError::Provider`];
    /// the lightweight engine remains active and usable afterwards.
    pub fn advance_external(&mut self, dt_external: f64) -> EngineResult<bool> {
        self.advance_external_with(dt_external, &mut NoopObserver)
    }

    /// [`advance_external`][Self::advance_external] with observer callbacks
    /// at every step, snapshot rotation, and hand-off completion.
    pub fn advance_external_with<O: EngineObserver>(
        &mut self,
        dt_external: f64,
        observer: &mut O,
    ) -> EngineResult<bool> {
        self.poll_handoff(observer)?;

        self.clock.advance_external(dt_external);

        let mut stepped = false;
        while self.clock.behind() {
            let dt = self.clock.step_secs;
            for source in &mut self.sources {
                source.seed(dt);
                source.advance(dt);
                source.cull();
            }
            self.clock.step();
            observer.on_step(&self.clock);
            stepped = true;
        }

        // Rotate snapshots only when state actually advanced; otherwise the
        // interpolation base must stay put.
        if stepped {
            self.snapshots.refresh(&self.sources);
            observer.on_snapshot(&self.clock, self.snapshots.live_count());
        }

        Ok(stepped)
    }

    /// Interpolated view of the entity table at the current external time.
    ///
    /// Empty until the first fixed step has run.
    pub fn snapshot(&self) -> Vec<ParcelSnapshot> {
        self.snapshots.interpolate(self.clock.step_fraction())
    }

    /// Calendar time at the external clock.
    pub fn current_time(&self) -> DateTime<Utc> {
        self.clock.external_time()
    }

    /// Immediately place a parcel at `(lon, lat)` with the configured
    /// interactive lifetime.  Longitude is wrapped; latitude passes
    /// through.  Returns `false` if no active source accepts placements.
    pub fn create_interactive_point(&mut self, lon: f64, lat: f64) -> bool {
        let loc = GeoPoint::new(lon, lat);
        let lifetime = self.config.interactive_lifetime_secs;
        self.sources.iter_mut().any(|s| s.place(loc, lifetime))
    }

    /// Schedule a great-circle flight from origin to destination at the
    /// configured cruise speed.  Returns `false` if no active source flies
    /// routes.
    pub fn fly_route(&mut self, origin_lon: f64, origin_lat: f64, dest_lon: f64, dest_lat: f64) -> bool {
        let req = FlightRequest {
            origin: GeoPoint::new(origin_lon, origin_lat),
            dest: GeoPoint::new(dest_lon, dest_lat),
            cruise_speed_ms: self.config.flight_speed_ms,
        };
        self.sources.iter_mut().any(|s| s.fly_route(&req))
    }

    /// Drop every live parcel and pending scheduled birth in all sources.
    pub fn clear(&mut self) {
        for source in &mut self.sources {
            source.clear();
        }
        self.snapshots.reset();
    }

    /// Kick off construction of the full-mode provider on a worker thread.
    ///
    /// The engine keeps running its current sources until the build
    /// finishes; completion is detected (and the swap performed) at the
    /// next [`advance_external`][Self::advance_external].  One-way and
    /// one-time.
    pub fn request_full_mode<B: ProviderBuilder>(&mut self, builder: B) -> EngineResult<()> {
        match self.mode {
            EngineMode::Lightweight => {
                self.pending = Some(HandoffSlot::spawn(builder));
                self.mode = EngineMode::HandoffPending;
                Ok(())
            }
            EngineMode::HandoffPending => Err(EngineError::HandoffInProgress),
            EngineMode::Full => Err(EngineError::HandoffComplete),
        }
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    /// Live parcels across all active sources.
    pub fn live_count(&self) -> usize {
        self.sources.iter().map(|s| s.live_count()).sum()
    }

    // ── Hand-off ──────────────────────────────────────────────────────────

    fn poll_handoff<O: EngineObserver>(&mut self, observer: &mut O) -> EngineResult<()> {
        let Some(slot) = &self.pending else {
            return Ok(());
        };
        match slot.poll() {
            None => Ok(()),
            Some(Ok(sources)) => {
                // Atomic from the update thread's view: the old sources,
                // their queues, and both snapshot tables go at once, and
                // the id namespace restarts with the new source list.
                self.pending = None;
                self.sources = sources;
                self.snapshots.reset();
                self.mode = EngineMode::Full;
                observer.on_handoff(self.sources.len());
                Ok(())
            }
            Some(Err(e)) => {
                // Failed hand-off: stay lightweight, tell the caller.
                self.pending = None;
                self.mode = EngineMode::Lightweight;
                Err(e.into())
            }
        }
    }
}
