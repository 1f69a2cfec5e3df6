//! Distance and interpolation primitives.
//!
//! Both are flat approximations suited to short domestic legs: positions move
//! linearly in (latitude, longitude) space and distances are the planar
//! degree-space separation scaled by the Earth radius.

use chrono::NaiveDateTime;
use qtty::Kilometers;

use crate::core::domain::Coordinate;

/// Mean Earth radius used to scale angular separation.
pub const EARTH_RADIUS_KM: f64 = 6378.1;

/// Approximate distance between two coordinates.
///
/// The Euclidean distance between the raw (lat, lon) pairs is taken in degree
/// space, converted to radians and multiplied by [`EARTH_RADIUS_KM`]. This is
/// not haversine; longitude is not scaled by latitude.
///
/// ```
/// use flight_density::core::domain::Coordinate;
/// use flight_density::services::geometry::distance;
///
/// let p = Coordinate::new(35.0, 139.0);
/// assert_eq!(distance(&p, &p).value(), 0.0);
/// ```
pub fn distance(a: &Coordinate, b: &Coordinate) -> Kilometers {
    let dlat = a.lat() - b.lat();
    let dlon = a.lon() - b.lon();
    let planar_deg = (dlat * dlat + dlon * dlon).sqrt();
    Kilometers::new(planar_deg.to_radians() * EARTH_RADIUS_KM)
}

/// Time-ordered interval during which a leg is considered airborne.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirborneWindow {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

impl AirborneWindow {
    /// True when the window has positive length.
    pub fn is_valid(&self) -> bool {
        self.arrival > self.departure
    }

    /// Strict containment: the endpoints themselves are on the ground.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.departure < instant && instant < self.arrival
    }

    /// Linear position at `instant` between `from` and `to`.
    ///
    /// Each component is the time-weighted internal division
    /// `((arr - t) * from + (t - dep) * to) / (arr - dep)`. Returns `None` if
    /// the window is empty or the result is not finite.
    pub fn interpolate(
        &self,
        from: &Coordinate,
        to: &Coordinate,
        instant: NaiveDateTime,
    ) -> Option<Coordinate> {
        let total = seconds(self.arrival - self.departure)?;
        if total <= 0.0 {
            return None;
        }
        let remaining = seconds(self.arrival - instant)?;
        let elapsed = seconds(instant - self.departure)?;

        let divide = |dep: f64, arr: f64| (remaining * dep + elapsed * arr) / total;
        let position = Coordinate::new(divide(from.lat(), to.lat()), divide(from.lon(), to.lon()));
        position.is_finite().then_some(position)
    }
}

fn seconds(delta: chrono::TimeDelta) -> Option<f64> {
    delta.num_microseconds().map(|us| us as f64 / 1_000_000.0)
}
