use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared_types::{BusinessSummary, Pagination};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::auth;
use crate::db::repository::{self, AdminFilters};
use crate::error::ApiError;
use crate::AppState;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_MIN_MACHINES: i64 = 0;
const DEFAULT_MAX_MACHINES: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// Verifies the admin password against the configured bcrypt hash and
/// issues a bearer token for the admin routes.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let matches = bcrypt::verify(&request.password, &state.config.admin_password_hash)
        .map_err(|err| ApiError::Internal(format!("bad password hash in config: {err}")))?;

    if !matches {
        warn!("admin login rejected");
        return Err(ApiError::Unauthorized);
    }

    let token = auth::issue_token(&state.config.jwt_secret)
        .map_err(|err| ApiError::Internal(format!("token issue failed: {err}")))?;

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub is_operating: Option<bool>,
    pub has_phone: Option<bool>,
    pub address_search: Option<String>,
    pub business_name_search: Option<String>,
    pub min_game_machines: Option<i64>,
    pub max_game_machines: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AdminListResponse {
    pub success: bool,
    pub data: Vec<BusinessSummary>,
    pub pagination: Pagination,
}

pub async fn list_businesses(
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> Result<Json<AdminListResponse>, ApiError> {
    let page = params.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let filters = AdminFilters {
        is_operating: params.is_operating,
        has_phone: params.has_phone,
        address_search: params.address_search,
        name_search: params.business_name_search,
        min_game_machines: params.min_game_machines.unwrap_or(DEFAULT_MIN_MACHINES),
        max_game_machines: params.max_game_machines.unwrap_or(DEFAULT_MAX_MACHINES),
    };

    info!(page, limit, ?filters, "admin listing");

    let db_path = PathBuf::from(&state.config.database_path);
    let (businesses, total_count) = tokio::task::spawn_blocking(move || {
        repository::list_businesses(&db_path, &filters, page, limit)
    })
    .await??;

    let total_pages = (total_count as f64 / limit as f64).ceil() as u32;

    Ok(Json(AdminListResponse {
        success: true,
        data: businesses,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_count,
            limit,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        },
    }))
}
