use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared_types::{LatLng, NearbyStore, SearchStats};
use std::path::PathBuf;
use tracing::info;

use crate::db::repository::{self, CANDIDATE_CAP};
use crate::error::ApiError;
use crate::geo::{self, SearchError};
use crate::AppState;

// Gwanghwamun, the default search center
const DEFAULT_LAT: f64 = 37.5665;
const DEFAULT_LNG: f64 = 126.978;
const DEFAULT_RADIUS_KM: f64 = 5.0;
const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParamsEcho {
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    #[serde(flatten)]
    pub stats: SearchStats,
    pub search_params: SearchParamsEcho,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub success: bool,
    pub data: Vec<NearbyStore>,
    pub total: usize,
    pub debug: DebugInfo,
}

pub async fn nearby_stores(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let lat = params.lat.unwrap_or(DEFAULT_LAT);
    let lng = params.lng.unwrap_or(DEFAULT_LNG);
    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_KM);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    info!(lat, lng, radius, limit, "nearby search");

    let db_path = PathBuf::from(&state.config.database_path);
    let candidates = tokio::task::spawn_blocking(move || {
        repository::fetch_search_candidates(&db_path, CANDIDATE_CAP)
    })
    .await??;
    info!(count = candidates.len(), "fetched candidate rows");

    let center = LatLng { lat, lng };
    let (stores, stats) =
        geo::find_nearby(center, radius, &candidates, limit).map_err(|err| match err {
            SearchError::InvalidArgument(msg) => ApiError::BadRequest(msg.to_string()),
        })?;

    info!(
        processed = stats.processed,
        valid_coords = stats.valid_coords,
        within_radius = stats.within_radius,
        returned = stores.len(),
        "nearby search complete"
    );

    Ok(Json(NearbyResponse {
        total: stores.len(),
        success: true,
        data: stores,
        debug: DebugInfo {
            stats,
            search_params: SearchParamsEcho {
                lat,
                lng,
                radius,
                limit,
            },
        },
    }))
}
