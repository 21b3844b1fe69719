pub mod csv_import;
pub mod data_check;
pub mod phone_check;
