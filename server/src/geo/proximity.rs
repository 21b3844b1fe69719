//! Radius search over imported business rows: convert each stored planar
//! coordinate, validate it, measure the distance from the search center and
//! keep everything inside the radius, nearest first.

use std::ops::RangeInclusive;

use shared_types::{LatLng, NearbyStore, SearchStats, StoreCandidate};
use thiserror::Error;

use super::{distance, projection};
use crate::utils::parse_leading_int;

/// Geographic box the converted coordinates must fall in. Covers mainland
/// South Korea; adjust these if the dataset ever covers anything else.
pub const VALID_LAT_RANGE: RangeInclusive<f64> = 33.0..=39.0;
pub const VALID_LNG_RANGE: RangeInclusive<f64> = 124.0..=132.0;

const FALLBACK_CATEGORY: &str = "게임제공업";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid search argument: {0}")]
    InvalidArgument(&'static str),
}

/// Scans `candidates` for stores within `radius_km` of `center`.
///
/// Malformed rows (absent or zero coordinates, failed conversion, converted
/// point outside the Korea box) are skipped, never errors; the radius
/// boundary is inclusive. Results are sorted by distance ascending, ties in
/// candidate order, and truncated to `limit` only after sorting so a closer
/// candidate late in the batch is never dropped.
pub fn find_nearby(
    center: LatLng,
    radius_km: f64,
    candidates: &[StoreCandidate],
    limit: usize,
) -> Result<(Vec<NearbyStore>, SearchStats), SearchError> {
    if !center.lat.is_finite() || !center.lng.is_finite() {
        return Err(SearchError::InvalidArgument("center must be finite"));
    }
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(SearchError::InvalidArgument("radius must be positive"));
    }
    if limit == 0 {
        return Err(SearchError::InvalidArgument("limit must be at least 1"));
    }

    let mut stats = SearchStats::default();
    let mut stores = Vec::new();

    for candidate in candidates {
        stats.processed += 1;

        let (Some(x), Some(y)) = (candidate.coord_x, candidate.coord_y) else {
            continue;
        };
        if x == 0.0 || y == 0.0 {
            continue;
        }
        stats.valid_coords += 1;

        let Some(coords) = projection::epsg5174_to_wgs84(x, y) else {
            continue;
        };
        if !VALID_LAT_RANGE.contains(&coords.lat) || !VALID_LNG_RANGE.contains(&coords.lng) {
            continue;
        }

        let dist = distance::distance_km(center.lat, center.lng, coords.lat, coords.lng);
        if dist <= radius_km {
            stats.within_radius += 1;
            stores.push(NearbyStore {
                id: candidate.id,
                name: candidate.name.clone().unwrap_or_default(),
                address: candidate.address.clone().unwrap_or_default(),
                phone: candidate.phone.clone(),
                lat: coords.lat,
                lng: coords.lng,
                distance_km: (dist * 100.0).round() / 100.0,
                status: candidate.status.clone().unwrap_or_default(),
                category: candidate
                    .category
                    .clone()
                    .unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
                game_count: candidate
                    .total_game_machines
                    .as_deref()
                    .and_then(parse_leading_int)
                    .filter(|&n| n != 0),
                area: candidate.facility_area.clone(),
            });
        }
    }

    // Vec::sort_by is stable, so equal distances keep candidate order.
    stores.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    stores.truncate(limit);

    Ok((stores, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::projection::wgs84_to_epsg5174;

    const GWANGHWAMUN: LatLng = LatLng {
        lat: 37.5665,
        lng: 126.978,
    };

    fn candidate(id: i64, coord_x: Option<f64>, coord_y: Option<f64>) -> StoreCandidate {
        StoreCandidate {
            id,
            name: Some(format!("store-{id}")),
            address: Some("서울특별시 종로구".to_string()),
            phone: None,
            coord_x,
            coord_y,
            status: Some("영업/정상".to_string()),
            category: Some("청소년게임제공업".to_string()),
            total_game_machines: None,
            facility_area: None,
        }
    }

    /// Candidate whose converted position is `km_north` km due north of
    /// Gwanghwamun, built through the forward projection.
    fn candidate_north(id: i64, km_north: f64) -> StoreCandidate {
        let lat = GWANGHWAMUN.lat + (km_north / 6371.0).to_degrees();
        let (x, y) = wgs84_to_epsg5174(lat, GWANGHWAMUN.lng);
        candidate(id, Some(x), Some(y))
    }

    #[test]
    fn zero_coordinates_are_skipped_for_any_radius() {
        let candidates = vec![
            candidate(1, Some(0.0), Some(453_881.0)),
            candidate(2, Some(198_056.0), Some(0.0)),
            candidate(3, None, Some(453_881.0)),
        ];
        let (stores, stats) = find_nearby(GWANGHWAMUN, 1e6, &candidates, 50).unwrap();
        assert!(stores.is_empty());
        assert_eq!(stats.processed, 3);
        assert_eq!(stats.valid_coords, 0);
    }

    #[test]
    fn out_of_range_conversions_are_skipped() {
        // South of Jeju (lat < 33) and in the East Sea (lng > 132); both
        // convert fine but fall outside the Korea box.
        let candidates = vec![
            candidate(1, Some(153_011.365_797), Some(-110_089.824_085)),
            candidate(2, Some(734_340.678_017), Some(405_885.937_341)),
        ];
        let (stores, stats) = find_nearby(GWANGHWAMUN, 1e6, &candidates, 50).unwrap();
        assert!(stores.is_empty());
        assert_eq!(stats.valid_coords, 2);
        assert_eq!(stats.within_radius, 0);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let c = candidate_north(1, 3.0);
        let converted =
            crate::geo::projection::epsg5174_to_wgs84(c.coord_x.unwrap(), c.coord_y.unwrap())
                .unwrap();
        let exact = crate::geo::distance::distance_km(
            GWANGHWAMUN.lat,
            GWANGHWAMUN.lng,
            converted.lat,
            converted.lng,
        );

        let (stores, _) = find_nearby(GWANGHWAMUN, exact, &[c], 50).unwrap();
        assert_eq!(stores.len(), 1);
    }

    #[test]
    fn filters_sorts_and_excludes_beyond_radius() {
        // One store ~2 km out, one at ~4.5 km, one at ~6 km; radius 5 km.
        let candidates = vec![
            candidate_north(1, 6.0),
            candidate_north(2, 4.5),
            candidate_north(3, 2.0),
        ];
        let (stores, stats) = find_nearby(GWANGHWAMUN, 5.0, &candidates, 50).unwrap();

        let ids: Vec<i64> = stores.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert!((stores[0].distance_km - 2.0).abs() < 0.01);
        assert!((stores[1].distance_km - 4.5).abs() < 0.01);
        assert_eq!(stats.processed, 3);
        assert_eq!(stats.valid_coords, 3);
        assert_eq!(stats.within_radius, 2);
    }

    #[test]
    fn ordering_is_non_decreasing() {
        let candidates: Vec<StoreCandidate> = [4.0, 1.0, 3.0, 2.0, 0.5]
            .iter()
            .enumerate()
            .map(|(i, &km)| candidate_north(i as i64, km))
            .collect();
        let (stores, _) = find_nearby(GWANGHWAMUN, 10.0, &candidates, 50).unwrap();
        assert_eq!(stores.len(), 5);
        for pair in stores.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn truncates_after_sorting() {
        // The nearest candidate comes last in the batch; limit 1 must still
        // return it rather than whatever came first.
        let candidates = vec![
            candidate_north(1, 3.0),
            candidate_north(2, 2.0),
            candidate_north(3, 1.0),
        ];
        let (stores, _) = find_nearby(GWANGHWAMUN, 5.0, &candidates, 1).unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].id, 3);
    }

    #[test]
    fn limit_matches_prefix_of_unlimited_result() {
        let candidates: Vec<StoreCandidate> = [2.5, 0.7, 4.2, 1.1, 3.3]
            .iter()
            .enumerate()
            .map(|(i, &km)| candidate_north(i as i64, km))
            .collect();
        let (all, _) = find_nearby(GWANGHWAMUN, 10.0, &candidates, usize::MAX).unwrap();
        let (top3, _) = find_nearby(GWANGHWAMUN, 10.0, &candidates, 3).unwrap();
        assert_eq!(top3.len(), 3);
        for (a, b) in top3.iter().zip(all.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn all_zero_batch_yields_empty_list_without_error() {
        let candidates: Vec<StoreCandidate> =
            (0..10).map(|i| candidate(i, Some(0.0), Some(0.0))).collect();
        let (stores, stats) = find_nearby(GWANGHWAMUN, 5.0, &candidates, 50).unwrap();
        assert!(stores.is_empty());
        assert_eq!(stats.processed, 10);
    }

    #[test]
    fn distances_are_rounded_to_two_decimals() {
        let (stores, _) = find_nearby(GWANGHWAMUN, 5.0, &[candidate_north(1, 1.234_567)], 50)
            .unwrap();
        assert_eq!(stores[0].distance_km, 1.23);
    }

    #[test]
    fn game_count_projection() {
        let mut c = candidate_north(1, 1.0);
        c.total_game_machines = Some("25".to_string());
        let mut zero = candidate_north(2, 1.5);
        zero.total_game_machines = Some("0".to_string());

        let (stores, _) = find_nearby(GWANGHWAMUN, 5.0, &[c, zero], 50).unwrap();
        assert_eq!(stores[0].game_count, Some(25));
        assert_eq!(stores[1].game_count, None);
    }

    #[test]
    fn rejects_structural_argument_errors() {
        let err = find_nearby(
            LatLng {
                lat: f64::NAN,
                lng: 126.978,
            },
            5.0,
            &[],
            50,
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));

        assert!(find_nearby(GWANGHWAMUN, 0.0, &[], 50).is_err());
        assert!(find_nearby(GWANGHWAMUN, f64::NAN, &[], 50).is_err());
        assert!(find_nearby(GWANGHWAMUN, 5.0, &[], 0).is_err());
    }
}
