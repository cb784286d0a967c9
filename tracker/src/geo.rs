//! Great-circle geometry over position fixes.

use crate::models::Fix;

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine great-circle distance between two fixes, in miles.
pub fn dist_miles(a: &Fix, b: &Fix) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * EARTH_RADIUS_MILES
}

/// Shortest signed angular difference from heading `h1` to `h2`, in degrees,
/// normalized into `(-180, 180]`. Exactly opposite headings yield `+180`.
pub fn bearing_delta(h1: f64, h2: f64) -> f64 {
    let d = (h2 - h1).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(lat: f64, lng: f64) -> Fix {
        Fix {
            lat,
            lng,
            heading: None,
            speed: None,
            ts: None,
        }
    }

    // One degree of arc along a great circle: 2 * pi * R / 360.
    const ONE_DEGREE_MILES: f64 = 69.093;

    #[test]
    fn distance_to_self_is_zero() {
        let a = fix(47.6062, -122.3321);
        assert!(dist_miles(&a, &a).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = fix(47.6062, -122.3321);
        let b = fix(45.5152, -122.6784);
        assert!((dist_miles(&a, &b) - dist_miles(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = dist_miles(&fix(0.0, 0.0), &fix(0.0, 1.0));
        assert!((d - ONE_DEGREE_MILES).abs() < 0.05, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = dist_miles(&fix(0.0, 0.0), &fix(1.0, 0.0));
        assert!((d - ONE_DEGREE_MILES).abs() < 0.05, "got {d}");
    }

    #[test]
    fn bearing_delta_wraps_north() {
        assert!((bearing_delta(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((bearing_delta(10.0, 350.0) + 20.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_delta_opposite_is_positive_180() {
        assert_eq!(bearing_delta(0.0, 180.0), 180.0);
        assert_eq!(bearing_delta(90.0, 270.0), 180.0);
    }

    #[test]
    fn bearing_delta_stays_in_half_open_range() {
        let mut h1 = 0.0;
        while h1 < 360.0 {
            let mut h2 = 0.0;
            while h2 < 360.0 {
                let d = bearing_delta(h1, h2);
                assert!(d > -180.0 && d <= 180.0, "delta({h1}, {h2}) = {d}");
                h2 += 7.3;
            }
            h1 += 7.3;
        }
    }
}
