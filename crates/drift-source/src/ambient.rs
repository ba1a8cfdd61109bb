//! `AmbientSource` — the built-in lightweight point source.
//!
//! Combines three birth mechanisms (stochastic ambient spawning, scheduled
//! flight waypoints, interactive placement) with eastward zonal advection
//! and age-based culling.  This is what the engine runs until a heavyweight
//! provider is handed over.

use drift_core::{EngineConfig, GeoPoint, IdSequence, SimRng};

use crate::flight::plan_flight;
use crate::parcel::DisplayHints;
use crate::{FlightRequest, Parcel, PointSource, Rgba, SpawnQueue};

/// Number of new ambient parcels to create for expectation `lambda`, given
/// one uniform draw `p` in [0, 1).  Capped at 5 per step.
///
/// Compares the Poisson mass at each successive count against the single
/// draw rather than accumulating a CDF, so the output distribution is only
/// Poisson-like.  Deliberate: downstream visual tuning depends on exactly
/// this sampler.
pub fn ambient_spawn_count(lambda: f64, p: f64) -> usize {
    let mut n: i32 = 0;
    let mut factorial = 1.0;
    while n < 5 && lambda.powi(n) * (-lambda).exp() / factorial < p {
        n += 1;
        factorial *= f64::from(n);
    }
    n as usize
}

/// The built-in ambient point source.
pub struct AmbientSource {
    parcels: Vec<Parcel>,
    queue: SpawnQueue,
    rng: SimRng,
    ids: IdSequence,
    /// Simulated seconds since engine start, advanced by `advance(dt)`.
    now_secs: f64,
    rate_per_sec: f64,
    zonal_speed_ms: f64,
    flight_segment_m: f64,
}

impl AmbientSource {
    pub fn new(config: &EngineConfig, rng: SimRng) -> Self {
        Self {
            parcels: Vec::new(),
            queue: SpawnQueue::new(),
            rng,
            ids: IdSequence::new(),
            now_secs: 0.0,
            rate_per_sec: config.ambient_rate_per_sec,
            zonal_speed_ms: config.zonal_speed_ms(),
            flight_segment_m: config.flight_segment_m,
        }
    }

    /// Immediately scatter `n` random parcels (initial population).
    pub fn scatter(&mut self, n: usize) {
        for _ in 0..n {
            self.spawn_random();
        }
    }

    /// Scheduled births not yet promoted.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn spawn_random(&mut self) {
        let lon = self.rng.gen_range(-180.0..180.0);
        let lat = self.rng.gen_range(-90.0..90.0);
        // Lifetime uniform between 1 and 24 hours.
        let lifetime = 3_600.0 * (1.0 + 23.0 * self.rng.random::<f64>());

        let mut parcel = Parcel::new(self.ids.next_id(), GeoPoint::new(lon, lat), lifetime);
        parcel.hints.size = 0.1;
        self.parcels.push(parcel);
    }
}

impl PointSource for AmbientSource {
    fn seed(&mut self, dt: f64) {
        // Promote scheduled births that are due.
        let due = self.queue.drain_due(self.now_secs);
        self.parcels.extend(due);

        // Stochastic ambient births.
        let lambda = dt * self.rate_per_sec;
        let p: f64 = self.rng.random();
        for _ in 0..ambient_spawn_count(lambda, p) {
            self.spawn_random();
        }
    }

    fn advance(&mut self, dt: f64) {
        for parcel in &mut self.parcels {
            parcel.loc = parcel.loc.zonal_shift(dt, self.zonal_speed_ms);
            parcel.age += dt;
        }
        self.now_secs += dt;
    }

    fn cull(&mut self) {
        self.parcels.retain(|p| !p.expired());
    }

    fn parcels(&self) -> Box<dyn Iterator<Item = &Parcel> + '_> {
        Box::new(self.parcels.iter())
    }

    fn clear(&mut self) {
        self.parcels.clear();
        self.queue.clear();
    }

    fn live_count(&self) -> usize {
        self.parcels.len()
    }

    fn place(&mut self, loc: GeoPoint, lifetime_secs: f64) -> bool {
        let mut parcel = Parcel::new(self.ids.next_id(), loc, lifetime_secs);
        parcel.hints = DisplayHints { size: 0.1, color: Rgba::WHITE };
        self.parcels.push(parcel);
        true
    }

    fn fly_route(&mut self, req: &FlightRequest) -> bool {
        for (birth_secs, parcel) in
            plan_flight(req, self.now_secs, self.flight_segment_m, &mut self.ids)
        {
            self.queue.push(birth_secs, parcel);
        }
        true
    }
}
