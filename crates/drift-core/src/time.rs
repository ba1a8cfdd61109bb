//! Fixed-step simulation time model.
//!
//! # Design
//!
//! The clock tracks two times, both in seconds since the configured start:
//!
//! - `external_secs` — time the outside world (typically a renderer) has
//!   reported via [`StepClock::advance_external`].
//! - `sim_secs` — time the simulation has actually covered, advanced only
//!   in whole `step_secs` increments by [`StepClock::step`].
//!
//! The engine catches up with `while clock.behind() { …; clock.step(); }`,
//! so a single external report may trigger zero, one, or many fixed steps.
//! [`StepClock::step_fraction`] locates the external time inside the current
//! step interval for snapshot interpolation.
//!
//! Calendar time is derived by adding elapsed seconds to the reference
//! epoch `start_unix_secs`.

use chrono::{DateTime, Utc};

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Simulated-vs-external time for the fixed-step catch-up loop.
///
/// `StepClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepClock {
    /// Unix timestamp (seconds since epoch) of simulation start.
    pub start_unix_secs: i64,
    /// Length of one fixed simulation step, seconds.
    pub step_secs: f64,
    /// Simulated seconds covered so far (multiple of `step_secs`).
    pub sim_secs: f64,
    /// External seconds reported so far.
    pub external_secs: f64,
    /// Number of fixed steps taken.
    pub step_count: u64,
}

impl StepClock {
    pub fn new(start_unix_secs: i64, step_secs: f64) -> Self {
        Self {
            start_unix_secs,
            step_secs,
            sim_secs: 0.0,
            external_secs: 0.0,
            step_count: 0,
        }
    }

    /// Record externally elapsed time.  Only accumulates the target; no
    /// simulation work happens here.
    #[inline]
    pub fn advance_external(&mut self, dt_external: f64) {
        self.external_secs += dt_external;
    }

    /// `true` while the simulation still has to catch up to external time.
    #[inline]
    pub fn behind(&self) -> bool {
        self.sim_secs <= self.external_secs
    }

    /// Advance simulated time by one fixed step.
    #[inline]
    pub fn step(&mut self) {
        self.sim_secs += self.step_secs;
        self.step_count += 1;
    }

    /// Position of the external time inside the current step interval,
    /// clamped to [0, 1].  0 means "at the old snapshot", 1 "at the new".
    pub fn step_fraction(&self) -> f64 {
        let time_to_next = self.sim_secs - self.external_secs;
        (1.0 - time_to_next / self.step_secs).clamp(0.0, 1.0)
    }

    /// Calendar time at the external clock (what a user should be shown).
    pub fn external_time(&self) -> DateTime<Utc> {
        self.datetime_at(self.external_secs)
    }

    /// Calendar time at the last simulated step boundary.
    pub fn sim_time(&self) -> DateTime<Utc> {
        self.datetime_at(self.sim_secs)
    }

    fn datetime_at(&self, elapsed_secs: f64) -> DateTime<Utc> {
        let whole = elapsed_secs.floor();
        let nanos = ((elapsed_secs - whole) * 1e9) as u32;
        DateTime::from_timestamp(self.start_unix_secs + whole as i64, nanos)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for StepClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step {} ({})", self.step_count, self.sim_time())
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
///
/// Values arrive already parsed from an external collaborator — config-file
/// handling lives outside this engine; [`EngineConfig::validate`] only
/// guards against programming mistakes like a zero step length.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Unix timestamp of simulation start (tick 0 of the calendar mapping).
    pub start_unix_secs: i64,

    /// Fixed simulation step, seconds.
    pub step_secs: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Ambient birth rate, parcels per simulated second.
    pub ambient_rate_per_sec: f64,

    /// Eastward ground speed applied to ambient parcels, km/h.
    pub zonal_speed_kph: f64,

    /// Lifetime granted to interactively placed parcels, seconds.
    pub interactive_lifetime_secs: f64,

    /// Great-circle spacing between flight waypoints, metres.
    pub flight_segment_m: f64,

    /// Cruise ground speed used for flight scheduling, m/s.
    pub flight_speed_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:           0,
            step_secs:                 60.0,
            seed:                      0,
            ambient_rate_per_sec:      1.0 / 3_600.0,
            zonal_speed_kph:           200.0,
            interactive_lifetime_secs: 6.0 * 3_600.0,
            flight_segment_m:          100_000.0,
            flight_speed_ms:           230.0,
        }
    }
}

impl EngineConfig {
    /// Zonal speed converted to m/s.
    #[inline]
    pub fn zonal_speed_ms(&self) -> f64 {
        self.zonal_speed_kph * 1_000.0 / 3_600.0
    }

    /// Reject configurations that would wedge the catch-up loop or the
    /// flight scheduler.
    pub fn validate(&self) -> crate::DriftResult<()> {
        if !self.step_secs.is_finite() || self.step_secs <= 0.0 {
            return Err(crate::DriftError::Config(format!(
                "step_secs must be finite and positive, got {}",
                self.step_secs
            )));
        }
        if self.ambient_rate_per_sec < 0.0 {
            return Err(crate::DriftError::Config(format!(
                "ambient_rate_per_sec must be non-negative, got {}",
                self.ambient_rate_per_sec
            )));
        }
        if self.flight_segment_m <= 0.0 || self.flight_speed_ms <= 0.0 {
            return Err(crate::DriftError::Config(
                "flight segment length and cruise speed must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Construct a [`StepClock`] pre-configured for this run.
    pub fn make_clock(&self) -> StepClock {
        StepClock::new(self.start_unix_secs, self.step_secs)
    }
}
