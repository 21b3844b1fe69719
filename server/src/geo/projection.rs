//! Inverse transverse Mercator projection for EPSG:5174 (Korea 2000 /
//! Central Belt 2010): origin 38°N 127°E, scale 1, false easting 200000 m,
//! false northing 500000 m, GRS80 ellipsoid, zero datum shift to WGS84.

use shared_types::LatLng;

// GRS80 ellipsoid
const SEMI_MAJOR: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_222_101;

const ORIGIN_LAT_DEG: f64 = 38.0;
const ORIGIN_LNG_DEG: f64 = 127.0;
const SCALE: f64 = 1.0;
const FALSE_EASTING: f64 = 200_000.0;
const FALSE_NORTHING: f64 = 500_000.0;

fn ecc_sq() -> f64 {
    FLATTENING * (2.0 - FLATTENING)
}

/// Meridian arc length from the equator to `phi` (radians), Snyder 3-21.
fn meridian_arc(phi: f64) -> f64 {
    let e2 = ecc_sq();
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    SEMI_MAJOR
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

/// Converts an EPSG:5174 planar coordinate (meters) to a WGS84 lat/lng pair.
///
/// Returns `None` when the inversion does not produce a usable position;
/// callers filter those candidates out rather than seeing a `(0, 0)`
/// sentinel. Valid planar inputs for this dataset always succeed.
pub fn epsg5174_to_wgs84(x: f64, y: f64) -> Option<LatLng> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    let e2 = ecc_sq();
    let ep2 = e2 / (1.0 - e2);

    // Footpoint latitude from the rectified arc (Snyder 8-12..8-19).
    let m = meridian_arc(ORIGIN_LAT_DEG.to_radians()) + (y - FALSE_NORTHING) / SCALE;
    let mu = m / (SEMI_MAJOR * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let c1 = ep2 * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let n1 = SEMI_MAJOR / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
    let r1 = SEMI_MAJOR * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
    let d = (x - FALSE_EASTING) / (n1 * SCALE);

    let phi = phi1
        - (n1 * tan_phi1 / r1)
            * (d * d / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);
    let lam = ORIGIN_LNG_DEG.to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / cos_phi1;

    let lat = phi.to_degrees();
    let lng = lam.to_degrees();
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    Some(LatLng { lat, lng })
}

/// Forward projection (WGS84 → EPSG:5174), used to build test fixtures.
#[cfg(test)]
pub fn wgs84_to_epsg5174(lat: f64, lng: f64) -> (f64, f64) {
    let e2 = ecc_sq();
    let ep2 = e2 / (1.0 - e2);
    let phi = lat.to_radians();
    let lam = lng.to_radians();

    let n = SEMI_MAJOR / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();
    let t = phi.tan() * phi.tan();
    let c = ep2 * phi.cos() * phi.cos();
    let a = (lam - ORIGIN_LNG_DEG.to_radians()) * phi.cos();

    let x = FALSE_EASTING
        + SCALE
            * n
            * (a + (1.0 - t + c) * a.powi(3) / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0);
    let y = FALSE_NORTHING
        + SCALE
            * (meridian_arc(phi) - meridian_arc(ORIGIN_LAT_DEG.to_radians())
                + n * phi.tan()
                    * (a * a / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6)
                            / 720.0));
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn false_origin_inverts_to_projection_origin() {
        let coords = epsg5174_to_wgs84(200_000.0, 500_000.0).unwrap();
        assert!((coords.lat - 38.0).abs() < 0.01, "lat {}", coords.lat);
        assert!((coords.lng - 127.0).abs() < 0.01, "lng {}", coords.lng);
    }

    #[test]
    fn round_trips_korean_cities() {
        // Gwanghwamun, Gangnam station, Busan city hall
        let cities = [(37.5665, 126.978), (37.4979, 127.0276), (35.1796, 129.0756)];
        for (lat, lng) in cities {
            let (x, y) = wgs84_to_epsg5174(lat, lng);
            let back = epsg5174_to_wgs84(x, y).unwrap();
            assert!((back.lat - lat).abs() < 1e-7, "lat {} -> {}", lat, back.lat);
            assert!((back.lng - lng).abs() < 1e-7, "lng {} -> {}", lng, back.lng);
        }
    }

    #[test]
    fn known_seoul_point_matches_proj4() {
        // Forward-projected with the proj4 definition the source dataset uses.
        let coords = epsg5174_to_wgs84(198_056.366_737_027, 451_885.030_582_218).unwrap();
        assert!((coords.lat - 37.5665).abs() < 1e-6);
        assert!((coords.lng - 126.978).abs() < 1e-6);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert!(epsg5174_to_wgs84(f64::NAN, 500_000.0).is_none());
        assert!(epsg5174_to_wgs84(200_000.0, f64::INFINITY).is_none());
    }
}
