use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult};
use shared_types::{BusinessSummary, StoreCandidate};
use std::path::Path;

use crate::utils::parse_leading_int;

/// Status label the government export uses for an open, operating business.
pub const OPERATING_STATUS: &str = "영업/정상";

/// Upper bound on the candidate batch handed to the proximity search.
pub const CANDIDATE_CAP: usize = 2000;

/// Fetches the rows eligible for a nearby search: operating businesses with
/// both coordinates, a name and an address. The geo core still re-checks
/// coordinate validity; this filter only keeps the batch small.
pub fn fetch_search_candidates(db_path: &Path, cap: usize) -> SqliteResult<Vec<StoreCandidate>> {
    let conn = Connection::open(db_path)?;

    let mut stmt = conn.prepare(
        "
        SELECT
            id,
            business_name,
            full_address,
            phone,
            coord_x,
            coord_y,
            status_name,
            category,
            total_game_machines,
            facility_area
        FROM game_businesses
        WHERE
            coord_x IS NOT NULL
        AND coord_y IS NOT NULL
        AND status_name = ?1
        AND business_name IS NOT NULL
        AND full_address IS NOT NULL
        LIMIT ?2
        ",
    )?;

    let candidates = stmt.query_map(params![OPERATING_STATUS, cap as i64], |row| {
        Ok(StoreCandidate {
            id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
            phone: row.get(3)?,
            coord_x: row.get(4)?,
            coord_y: row.get(5)?,
            status: row.get(6)?,
            category: row.get(7)?,
            total_game_machines: row.get(8)?,
            facility_area: row.get(9)?,
        })
    })?;

    candidates.collect()
}

#[derive(Debug, Clone, Default)]
pub struct AdminFilters {
    pub is_operating: Option<bool>,
    pub has_phone: Option<bool>,
    pub address_search: Option<String>,
    pub name_search: Option<String>,
    pub min_game_machines: i64,
    pub max_game_machines: i64,
}

impl AdminFilters {
    /// The machine-count range is stored as free-form text, so an active
    /// range filter switches the listing to fetch-then-filter.
    pub fn needs_game_machine_filter(&self) -> bool {
        self.min_game_machines > 0 || self.max_game_machines < 100
    }
}

fn build_where(filters: &AdminFilters) -> (String, Vec<Box<dyn ToSql>>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut bound: Vec<Box<dyn ToSql>> = Vec::new();

    match filters.is_operating {
        Some(true) => {
            clauses.push("status_name = ?".to_string());
            bound.push(Box::new(OPERATING_STATUS.to_string()));
        }
        Some(false) => {
            clauses.push("status_name IS NOT ?".to_string());
            bound.push(Box::new(OPERATING_STATUS.to_string()));
        }
        None => {}
    }

    match filters.has_phone {
        Some(true) => clauses.push("(phone IS NOT NULL AND phone != '')".to_string()),
        Some(false) => clauses.push("(phone IS NULL OR phone = '')".to_string()),
        None => {}
    }

    if let Some(search) = filters.address_search.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("full_address LIKE ?".to_string());
        bound.push(Box::new(format!("%{search}%")));
    }

    if let Some(search) = filters.name_search.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("business_name LIKE ?".to_string());
        bound.push(Box::new(format!("%{search}%")));
    }

    if filters.needs_game_machine_filter() {
        clauses.push("(total_game_machines IS NOT NULL AND total_game_machines != '')".to_string());
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    (where_sql, bound)
}

const SUMMARY_COLUMNS: &str = "
    id,
    business_name,
    status_name,
    phone,
    full_address,
    last_modified_at,
    total_game_machines
";

fn map_summary(row: &rusqlite::Row) -> SqliteResult<BusinessSummary> {
    Ok(BusinessSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        status: row.get(2)?,
        phone: row.get(3)?,
        address: row.get(4)?,
        last_modified_at: row.get(5)?,
        game_machines: row.get(6)?,
    })
}

/// Admin listing with filters and pagination, newest rows first.
///
/// Returns the page of rows plus the total count across all pages. With an
/// active machine-count range the matching rows are fetched in full, the
/// numeric range applied in code, then paginated; otherwise pagination
/// happens in SQL.
pub fn list_businesses(
    db_path: &Path,
    filters: &AdminFilters,
    page: u32,
    limit: u32,
) -> SqliteResult<(Vec<BusinessSummary>, u64)> {
    let conn = Connection::open(db_path)?;
    let (where_sql, bound) = build_where(filters);
    let offset = (page.saturating_sub(1) as u64) * limit as u64;

    if filters.needs_game_machine_filter() {
        let mut stmt = conn.prepare(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM game_businesses {where_sql} ORDER BY id DESC"
        ))?;
        let rows = stmt.query_map(params_from_iter(bound.iter()), map_summary)?;
        let all: Vec<BusinessSummary> = rows.collect::<SqliteResult<_>>()?;

        let filtered: Vec<BusinessSummary> = all
            .into_iter()
            .filter(|b| {
                // Rows whose machine count is missing or non-numeric never
                // match a numeric range, even one starting at zero.
                match b.game_machines.as_deref().and_then(parse_leading_int) {
                    Some(count) => {
                        count >= filters.min_game_machines
                            && count <= filters.max_game_machines
                    }
                    None => false,
                }
            })
            .collect();

        let total = filtered.len() as u64;
        let businesses = filtered
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        return Ok((businesses, total));
    }

    let total: u64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM game_businesses {where_sql}"),
        params_from_iter(bound.iter()),
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM game_businesses {where_sql} \
         ORDER BY id DESC LIMIT ? OFFSET ?"
    ))?;
    let mut params: Vec<Box<dyn ToSql>> = bound;
    params.push(Box::new(limit as i64));
    params.push(Box::new(offset as i64));

    let rows = stmt.query_map(params_from_iter(params.iter()), map_summary)?;
    let businesses = rows.collect::<SqliteResult<Vec<_>>>()?;

    Ok((businesses, total))
}
