//! Proximity classification for station markers.
//!
//! Stations are drawn differently depending on how far they are from the
//! user: close stations get the most prominent marker. This module provides
//! the great-circle distance between two coordinates and the mapping from
//! distance to a discrete tier. How a tier is rendered is up to the caller.

use crate::domain::Coordinate;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distances under this are [`Tier::Near`].
const NEAR_KM: f64 = 1.0;

/// Distances under this (and at least [`NEAR_KM`]) are [`Tier::Medium`].
const MEDIUM_KM: f64 = 5.0;

/// Great-circle distance between two points, in kilometres.
///
/// Uses the haversine formula with a spherical Earth of radius 6371 km.
/// Input coordinates are in degrees. The result is symmetric in its
/// arguments and zero exactly when the two points coincide.
///
/// # Examples
///
/// ```
/// use metro_chat::domain::Coordinate;
/// use metro_chat::proximity::distance_km;
///
/// let tokyo = Coordinate::new(35.6895, 139.6917);
/// let otemachi = Coordinate::new(35.6847, 139.7630);
///
/// let d = distance_km(tokyo, otemachi);
/// assert!(d > 6.0 && d < 7.0);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    // Haversine: h is the squared half-chord length between the points.
    let h = (d_lat / 2.0).sin().powi(2) + (d_lng / 2.0).sin().powi(2) * lat_a.cos() * lat_b.cos();
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * central_angle
}

/// Discrete proximity tier for a station marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Under 1 km away.
    Near,
    /// At least 1 km but under 5 km away.
    Medium,
    /// 5 km or further away.
    Far,
}

impl Tier {
    /// Classify a distance in kilometres into a tier.
    ///
    /// Total over all finite non-negative inputs: every distance maps to
    /// exactly one tier. The boundaries belong to the farther tier
    /// (`1.0` is `Medium`, `5.0` is `Far`).
    pub fn classify(distance_km: f64) -> Tier {
        if distance_km < NEAR_KM {
            Tier::Near
        } else if distance_km < MEDIUM_KM {
            Tier::Medium
        } else {
            Tier::Far
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for coordinates in the greater Tokyo area.
    fn tokyo_coord() -> impl Strategy<Value = Coordinate> {
        (34.0f64..37.0, 138.0f64..141.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
    }

    proptest! {
        /// Distance from a point to itself is zero.
        #[test]
        fn identity(a in tokyo_coord()) {
            prop_assert_eq!(distance_km(a, a), 0.0);
        }

        /// Distance is symmetric.
        #[test]
        fn symmetry(a in tokyo_coord(), b in tokyo_coord()) {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        /// Distance is never negative.
        #[test]
        fn non_negative(a in tokyo_coord(), b in tokyo_coord()) {
            prop_assert!(distance_km(a, b) >= 0.0);
        }

        /// Triangle inequality, up to floating-point tolerance.
        #[test]
        fn triangle_inequality(a in tokyo_coord(), b in tokyo_coord(), c in tokyo_coord()) {
            let direct = distance_km(a, c);
            let via_b = distance_km(a, b) + distance_km(b, c);
            prop_assert!(direct <= via_b + 1e-6);
        }

        /// Every finite non-negative distance maps to exactly one tier.
        #[test]
        fn classify_total(d in 0.0f64..20_000.0) {
            let tier = Tier::classify(d);
            let expected = if d < 1.0 {
                Tier::Near
            } else if d < 5.0 {
                Tier::Medium
            } else {
                Tier::Far
            };
            prop_assert_eq!(tier, expected);
        }
    }
}
