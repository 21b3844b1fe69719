use serde::{Deserialize, Serialize};

/// Geographic coordinate pair in WGS84 (degrees).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Full relational row for a licensed game-provision business, as imported
/// from the government TSV export. Empty fields in the export become `None`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GameBusiness {
    pub id: i64,
    pub serial_no: Option<i64>,
    pub open_service_name: Option<String>,
    pub open_service_id: Option<String>,
    pub local_gov_code: Option<String>,
    pub management_no: Option<String>,
    pub licensed_on: Option<String>,
    pub license_canceled_on: Option<String>,
    pub status_code: Option<String>,
    pub status_name: Option<String>,
    pub detail_status_code: Option<String>,
    pub detail_status_name: Option<String>,
    pub closed_on: Option<String>,
    pub suspended_from: Option<String>,
    pub suspended_to: Option<String>,
    pub reopened_on: Option<String>,
    pub phone: Option<String>,
    pub site_area: Option<String>,
    pub postal_code: Option<String>,
    pub full_address: Option<String>,
    pub road_address: Option<String>,
    pub road_postal_code: Option<String>,
    pub business_name: Option<String>,
    pub last_modified_at: Option<String>,
    pub update_kind: Option<String>,
    pub updated_on: Option<String>,
    pub category: Option<String>,
    // Parsed once at import time; unparseable source text is stored as NULL,
    // never coerced to 0.
    pub coord_x: Option<f64>,
    pub coord_y: Option<f64>,
    pub culture_sports_type: Option<String>,
    pub facility_area: Option<String>,
    pub total_game_machines: Option<String>,
    pub provided_games: Option<String>,
    pub region: Option<String>,
}

/// The subset of a business row the proximity search works on.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreCandidate {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub coord_x: Option<f64>,
    pub coord_y: Option<f64>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub total_game_machines: Option<String>,
    pub facility_area: Option<String>,
}

/// One store in a nearby-search result, nearest first.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStore {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    pub status: String,
    pub category: String,
    pub game_count: Option<i64>,
    pub area: Option<String>,
}

/// Counters the nearby endpoint echoes back for debugging.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub processed: usize,
    pub valid_coords: usize,
    pub within_radius: usize,
}

/// Admin listing row.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSummary {
    pub id: i64,
    pub name: Option<String>,
    pub status: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub last_modified_at: Option<String>,
    pub game_machines: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}
