//! Geographic coordinate type and spherical-geometry utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude in degrees.  Longitude is kept
//! wrapped to [-180, 180); latitude is stored as given — callers own its
//! range.  Double precision matters here: flight waypoint chains span
//! thousands of kilometres and single-precision slerp drifts visibly.

/// Earth radius used for all circumference and arc-length math, metres.
pub const EARTH_RADIUS_M: f64 = 6_378_000.0;

/// Wrap a longitude into [-180, 180) by repeatedly adding/subtracting 360.
pub fn wrap_lon(mut lon: f64) -> f64 {
    while lon >= 180.0 {
        lon -= 360.0;
    }
    while lon < -180.0 {
        lon += 360.0;
    }
    lon
}

/// A geographic coordinate in degrees, longitude wrapped to [-180, 180).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Construct a point, wrapping the longitude.  Latitude is not touched.
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon: wrap_lon(lon), lat }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Move the point eastward along its parallel at `speed_ms` for
    /// `dt_secs`.  Latitude is unchanged; the longitude delta scales with
    /// the local circumference at this latitude and the result is wrapped.
    pub fn zonal_shift(self, dt_secs: f64, speed_ms: f64) -> GeoPoint {
        let local_circumference =
            EARTH_RADIUS_M * std::f64::consts::PI * 2.0 * self.lat.to_radians().cos();
        GeoPoint::new(
            self.lon + dt_secs * speed_ms * 360.0 / local_circumference,
            self.lat,
        )
    }

    /// Unit vector on the sphere (x toward lon 0/lat 0, z toward the pole).
    fn unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    fn from_unit_vector(v: [f64; 3]) -> GeoPoint {
        let lat = v[2].atan2((v[0] * v[0] + v[1] * v[1]).sqrt());
        let lon = v[1].atan2(v[0]);
        GeoPoint::new(lon.to_degrees(), lat.to_degrees())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

// ── Great-circle waypoints ────────────────────────────────────────────────────

/// Waypoints along the great circle from `origin` to `dest`, spaced so that
/// consecutive points are at most `segment_m` metres apart.  Both endpoints
/// are included.
///
/// Coincident endpoints yield a single waypoint.  Antipodal endpoints have
/// no unique great circle; the path then degrades to a straight lerp of the
/// raw coordinates.
pub fn great_circle_waypoints(origin: GeoPoint, dest: GeoPoint, segment_m: f64) -> Vec<GeoPoint> {
    let a = origin.unit_vector();
    let b = dest.unit_vector();

    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2]).clamp(-1.0, 1.0);
    let delta = dot.acos(); // central angle, radians
    let sin_delta = delta.sin();

    if delta * EARTH_RADIUS_M < 1.0 {
        return vec![origin];
    }

    let segments = ((delta * EARTH_RADIUS_M / segment_m).ceil() as usize).max(1);

    if sin_delta < 1e-9 {
        // Antipodal: slerp is singular.
        return (0..=segments)
            .map(|i| {
                let f = i as f64 / segments as f64;
                GeoPoint::new(
                    origin.lon + f * (dest.lon - origin.lon),
                    origin.lat + f * (dest.lat - origin.lat),
                )
            })
            .collect();
    }

    (0..=segments)
        .map(|i| {
            let f = i as f64 / segments as f64;
            let wa = ((1.0 - f) * delta).sin() / sin_delta;
            let wb = (f * delta).sin() / sin_delta;
            GeoPoint::from_unit_vector([
                wa * a[0] + wb * b[0],
                wa * a[1] + wb * b[1],
                wa * a[2] + wb * b[2],
            ])
        })
        .collect()
}
