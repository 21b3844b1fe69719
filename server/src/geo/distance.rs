const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance in kilometers between two WGS84 points.
///
/// Total over all real inputs; callers are responsible for feeding it sane
/// geographic coordinates.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.to_radians().cos()
            * lat2.to_radians().cos()
            * (d_lng / 2.0).sin()
            * (d_lng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_identical_points() {
        assert_eq!(distance_km(37.5665, 126.978, 37.5665, 126.978), 0.0);
    }

    #[test]
    fn gwanghwamun_to_gangnam() {
        // ~8.6 km as the crow flies
        let d = distance_km(37.5665, 126.978, 37.4979, 127.0276);
        assert!((d - 8.6).abs() < 0.3, "got {d}");
    }

    #[test]
    fn seoul_to_busan() {
        // ~325 km
        let d = distance_km(37.5665, 126.978, 35.1796, 129.0756);
        assert!((d - 325.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let there = distance_km(37.5665, 126.978, 35.1796, 129.0756);
        let back = distance_km(35.1796, 129.0756, 37.5665, 126.978);
        assert!((there - back).abs() < 1e-9);
    }
}
