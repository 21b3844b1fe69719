use chrono::Utc;
use rusqlite::{params, Connection, Error};
use shared_types::GameBusiness;

pub const OPERATING_STATUS: &str = "영업/정상";

pub fn init_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS game_businesses (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            serial_no           INTEGER,
            open_service_name   TEXT,
            open_service_id     TEXT,
            local_gov_code      TEXT,
            management_no       TEXT UNIQUE,
            licensed_on         TEXT,
            license_canceled_on TEXT,
            status_code         TEXT,
            status_name         TEXT,
            detail_status_code  TEXT,
            detail_status_name  TEXT,
            closed_on           TEXT,
            suspended_from      TEXT,
            suspended_to        TEXT,
            reopened_on         TEXT,
            phone               TEXT,
            site_area           TEXT,
            postal_code         TEXT,
            full_address        TEXT,
            road_address        TEXT,
            road_postal_code    TEXT,
            business_name       TEXT,
            last_modified_at    TEXT,
            update_kind         TEXT,
            updated_on          TEXT,
            category            TEXT,
            coord_x             REAL,
            coord_y             REAL,
            culture_sports_type TEXT,
            facility_area       TEXT,
            total_game_machines TEXT,
            provided_games      TEXT,
            region              TEXT,
            imported_at         TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_game_businesses_status
            ON game_businesses (status_name);
        ",
    )
}

pub fn upsert_businesses(conn: &Connection, businesses: &[GameBusiness]) -> Result<(), Error> {
    let mut stmt = conn.prepare_cached(
        "
        INSERT INTO game_businesses (
            serial_no,
            open_service_name,
            open_service_id,
            local_gov_code,
            management_no,
            licensed_on,
            license_canceled_on,
            status_code,
            status_name,
            detail_status_code,
            detail_status_name,
            closed_on,
            suspended_from,
            suspended_to,
            reopened_on,
            phone,
            site_area,
            postal_code,
            full_address,
            road_address,
            road_postal_code,
            business_name,
            last_modified_at,
            update_kind,
            updated_on,
            category,
            coord_x,
            coord_y,
            culture_sports_type,
            facility_area,
            total_game_machines,
            provided_games,
            region,
            imported_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26,
                ?27, ?28, ?29, ?30, ?31, ?32, ?33, ?34)
        ON CONFLICT(management_no) DO UPDATE
        SET
            serial_no = excluded.serial_no,
            licensed_on = excluded.licensed_on,
            license_canceled_on = excluded.license_canceled_on,
            status_code = excluded.status_code,
            status_name = excluded.status_name,
            detail_status_code = excluded.detail_status_code,
            detail_status_name = excluded.detail_status_name,
            closed_on = excluded.closed_on,
            suspended_from = excluded.suspended_from,
            suspended_to = excluded.suspended_to,
            reopened_on = excluded.reopened_on,
            phone = excluded.phone,
            site_area = excluded.site_area,
            postal_code = excluded.postal_code,
            full_address = excluded.full_address,
            road_address = excluded.road_address,
            road_postal_code = excluded.road_postal_code,
            business_name = excluded.business_name,
            last_modified_at = excluded.last_modified_at,
            update_kind = excluded.update_kind,
            updated_on = excluded.updated_on,
            category = excluded.category,
            coord_x = excluded.coord_x,
            coord_y = excluded.coord_y,
            culture_sports_type = excluded.culture_sports_type,
            facility_area = excluded.facility_area,
            total_game_machines = excluded.total_game_machines,
            provided_games = excluded.provided_games,
            region = excluded.region,
            imported_at = excluded.imported_at
        ",
    )?;
    let imported_at = Utc::now().to_rfc3339();
    let t = conn.unchecked_transaction()?;
    for b in businesses {
        stmt.execute(params![
            b.serial_no,
            b.open_service_name,
            b.open_service_id,
            b.local_gov_code,
            b.management_no,
            b.licensed_on,
            b.license_canceled_on,
            b.status_code,
            b.status_name,
            b.detail_status_code,
            b.detail_status_name,
            b.closed_on,
            b.suspended_from,
            b.suspended_to,
            b.reopened_on,
            b.phone,
            b.site_area,
            b.postal_code,
            b.full_address,
            b.road_address,
            b.road_postal_code,
            b.business_name,
            b.last_modified_at,
            b.update_kind,
            b.updated_on,
            b.category,
            b.coord_x,
            b.coord_y,
            b.culture_sports_type,
            b.facility_area,
            b.total_game_machines,
            b.provided_games,
            b.region,
            imported_at,
        ])?;
    }
    t.commit()
}

pub fn count_all(conn: &Connection) -> Result<i64, Error> {
    conn.query_row("SELECT COUNT(*) FROM game_businesses", [], |row| row.get(0))
}

pub fn count_with_coords(conn: &Connection) -> Result<i64, Error> {
    conn.query_row(
        "SELECT COUNT(*) FROM game_businesses
         WHERE coord_x IS NOT NULL AND coord_y IS NOT NULL",
        [],
        |row| row.get(0),
    )
}

/// Rows satisfying the nearby-search eligibility filter.
pub fn count_eligible(conn: &Connection) -> Result<i64, Error> {
    conn.query_row(
        "SELECT COUNT(*) FROM game_businesses
         WHERE coord_x IS NOT NULL
           AND coord_y IS NOT NULL
           AND status_name = ?1
           AND business_name IS NOT NULL
           AND full_address IS NOT NULL",
        params![OPERATING_STATUS],
        |row| row.get(0),
    )
}

pub fn status_counts(conn: &Connection) -> Result<Vec<(Option<String>, i64)>, Error> {
    let mut stmt = conn.prepare(
        "SELECT status_name, COUNT(*) FROM game_businesses
         GROUP BY status_name
         ORDER BY COUNT(*) DESC",
    )?;
    let counts = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    counts.collect()
}

#[derive(Debug)]
pub struct SampleRow {
    pub business_name: Option<String>,
    pub full_address: Option<String>,
    pub coord_x: Option<f64>,
    pub coord_y: Option<f64>,
    pub status_name: Option<String>,
    pub category: Option<String>,
}

pub fn sample_with_coords(conn: &Connection, limit: i64) -> Result<Vec<SampleRow>, Error> {
    let mut stmt = conn.prepare(
        "SELECT business_name, full_address, coord_x, coord_y, status_name, category
         FROM game_businesses
         WHERE coord_x IS NOT NULL AND coord_y IS NOT NULL
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(SampleRow {
            business_name: row.get(0)?,
            full_address: row.get(1)?,
            coord_x: row.get(2)?,
            coord_y: row.get(3)?,
            status_name: row.get(4)?,
            category: row.get(5)?,
        })
    })?;
    rows.collect()
}

#[derive(Debug)]
pub struct PhoneSample {
    pub business_name: Option<String>,
    pub full_address: Option<String>,
    pub phone: Option<String>,
}

pub fn seoul_operating_with_phone(
    conn: &Connection,
    limit: i64,
) -> Result<Vec<PhoneSample>, Error> {
    let mut stmt = conn.prepare(
        "SELECT business_name, full_address, phone
         FROM game_businesses
         WHERE phone IS NOT NULL AND phone != ''
           AND status_name = ?1
           AND full_address LIKE '%서울%'
           AND coord_x IS NOT NULL AND coord_y IS NOT NULL
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![OPERATING_STATUS, limit], |row| {
        Ok(PhoneSample {
            business_name: row.get(0)?,
            full_address: row.get(1)?,
            phone: row.get(2)?,
        })
    })?;
    rows.collect()
}

pub fn count_seoul_operating_without_phone(conn: &Connection) -> Result<i64, Error> {
    conn.query_row(
        "SELECT COUNT(*) FROM game_businesses
         WHERE status_name = ?1
           AND full_address LIKE '%서울%'
           AND coord_x IS NOT NULL AND coord_y IS NOT NULL
           AND (phone IS NULL OR phone = '')",
        params![OPERATING_STATUS],
        |row| row.get(0),
    )
}

pub fn count_seoul_operating_with_phone(conn: &Connection) -> Result<i64, Error> {
    conn.query_row(
        "SELECT COUNT(*) FROM game_businesses
         WHERE status_name = ?1
           AND full_address LIKE '%서울%'
           AND coord_x IS NOT NULL AND coord_y IS NOT NULL
           AND phone IS NOT NULL AND phone != ''",
        params![OPERATING_STATUS],
        |row| row.get(0),
    )
}
