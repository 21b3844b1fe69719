use std::{env, path::Path};

use dotenv::dotenv;
use rusqlite::Connection;

pub mod actions;
pub mod repository;

enum IngestAction {
    ImportCsv,
    CheckData,
    CheckPhone,
}

impl IngestAction {
    fn new(action: &str) -> Self {
        match action {
            "IMPORT_CSV" => Self::ImportCsv,
            "CHECK_DATA" => Self::CheckData,
            "CHECK_PHONE" => Self::CheckPhone,
            _ => panic!("Invalid action"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let action: String = env::var("ACTION").expect("Action to be set");
    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "clawmap.db".to_string());
    let conn: Connection = Connection::open(Path::new(&db_path)).expect("Database should load");

    match IngestAction::new(&action) {
        IngestAction::ImportCsv => actions::csv_import::import(&conn).await,
        IngestAction::CheckData => actions::data_check::check(&conn).await,
        IngestAction::CheckPhone => actions::phone_check::check(&conn).await,
    }
}
