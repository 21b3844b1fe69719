//! Imports the government TSV export of licensed game-provision businesses
//! (tab-separated, header row first) into the `game_businesses` table.

use std::{env, fs};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use shared_types::GameBusiness;

use crate::repository;

const BATCH_SIZE: usize = 1000;
const DEFAULT_CSV_PATH: &str = "data/fulldata_03_05_07_P_청소년게임제공업.csv";

pub async fn import(conn: &Connection) -> anyhow::Result<()> {
    let csv_path = env::var("CSV_PATH").unwrap_or_else(|_| DEFAULT_CSV_PATH.to_string());

    let raw = fs::read_to_string(&csv_path)
        .with_context(|| format!("Failed to read CSV file at {csv_path}"))?;
    let mut lines = raw.lines();
    let header = lines.next().context("CSV file has no header row")?;
    let header_len = header.split('\t').count();
    let data_lines: Vec<&str> = lines.filter(|line| !line.trim().is_empty()).collect();

    println!("📊 Import configuration:");
    println!("   • File: {}", csv_path);
    println!("   • Columns in header: {}", header_len);
    println!("   • Data rows: {}", data_lines.len());

    repository::init_schema(conn)?;

    let progress = ProgressBar::new(data_lines.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("📥 [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for chunk in data_lines.chunks(BATCH_SIZE) {
        let batch: Vec<GameBusiness> = chunk
            .iter()
            .filter_map(|line| parse_row(line, header_len))
            .collect();
        skipped += chunk.len() - batch.len();

        if !batch.is_empty() {
            repository::upsert_businesses(conn, &batch)
                .context("Failed to upsert a batch of rows")?;
            imported += batch.len();
        }
        progress.inc(chunk.len() as u64);
    }
    progress.finish();

    println!("✅ Import complete: {imported} rows upserted, {skipped} malformed rows skipped");
    Ok(())
}

/// Maps one tab-separated line to a record using the fixed column layout of
/// the government export. Rows missing too many trailing fields are dropped.
fn parse_row(line: &str, header_len: usize) -> Option<GameBusiness> {
    let values: Vec<&str> = line.split('\t').collect();
    if values.len() + 10 < header_len {
        return None;
    }

    let text = |i: usize| -> Option<String> {
        values
            .get(i)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    // Unparseable numeric text becomes NULL, never 0.
    let number = |i: usize| -> Option<f64> { text(i).and_then(|v| v.parse().ok()) };

    Some(GameBusiness {
        id: 0,
        serial_no: text(0).and_then(|v| v.parse().ok()),
        open_service_name: text(1),
        open_service_id: text(2),
        local_gov_code: text(3),
        management_no: text(4),
        licensed_on: text(5),
        license_canceled_on: text(6),
        status_code: text(7),
        status_name: text(8),
        detail_status_code: text(9),
        detail_status_name: text(10),
        closed_on: text(11),
        suspended_from: text(12),
        suspended_to: text(13),
        reopened_on: text(14),
        phone: text(15),
        site_area: text(16),
        postal_code: text(17),
        full_address: text(18),
        road_address: text(19),
        road_postal_code: text(20),
        business_name: text(21),
        last_modified_at: text(22),
        update_kind: text(23),
        updated_on: text(24),
        category: text(25),
        coord_x: number(26),
        coord_y: number(27),
        culture_sports_type: text(28),
        facility_area: text(33),
        total_game_machines: text(52),
        provided_games: text(54),
        region: text(58),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER_LEN: usize = 59;

    fn line_with(columns: &[(usize, &str)]) -> String {
        let mut values = vec![""; HEADER_LEN];
        for &(i, v) in columns {
            values[i] = v;
        }
        values.join("\t")
    }

    #[test]
    fn maps_known_columns() {
        let line = line_with(&[
            (0, "17"),
            (4, "3050000-201-2019-00017"),
            (8, "영업/정상"),
            (15, "02-1234-5678"),
            (18, "서울특별시 종로구 관철동 13-1"),
            (21, "드림크레인"),
            (25, "청소년게임제공업"),
            (26, "198056.366"),
            (27, "451885.03"),
            (52, "30"),
        ]);

        let row = parse_row(&line, HEADER_LEN).unwrap();
        assert_eq!(row.serial_no, Some(17));
        assert_eq!(row.management_no.as_deref(), Some("3050000-201-2019-00017"));
        assert_eq!(row.status_name.as_deref(), Some("영업/정상"));
        assert_eq!(row.business_name.as_deref(), Some("드림크레인"));
        assert_eq!(row.coord_x, Some(198_056.366));
        assert_eq!(row.coord_y, Some(451_885.03));
        assert_eq!(row.total_game_machines.as_deref(), Some("30"));
        assert_eq!(row.phone.as_deref(), Some("02-1234-5678"));
    }

    #[test]
    fn empty_fields_become_none() {
        let line = line_with(&[(21, "이름만있는집")]);
        let row = parse_row(&line, HEADER_LEN).unwrap();
        assert_eq!(row.phone, None);
        assert_eq!(row.coord_x, None);
        assert_eq!(row.full_address, None);
    }

    #[test]
    fn unparseable_coordinates_become_none_not_zero() {
        let line = line_with(&[(26, "없음"), (27, "451885.03")]);
        let row = parse_row(&line, HEADER_LEN).unwrap();
        assert_eq!(row.coord_x, None);
        assert_eq!(row.coord_y, Some(451_885.03));
    }

    #[test]
    fn short_rows_are_dropped() {
        let truncated = vec!["a"; HEADER_LEN - 11].join("\t");
        assert!(parse_row(&truncated, HEADER_LEN).is_none());

        // Just inside the tolerance the original importer allowed.
        let barely_ok = vec!["a"; HEADER_LEN - 10].join("\t");
        assert!(parse_row(&barely_ok, HEADER_LEN).is_some());
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let line = line_with(&[(58, "서울\r")]);
        let row = parse_row(&line, HEADER_LEN).unwrap();
        assert_eq!(row.region.as_deref(), Some("서울"));
    }
}
