pub mod admin;
pub mod health;
pub mod nearby;

pub use admin::{admin_login, list_businesses};
pub use health::health;
pub use nearby::nearby_stores;
