use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database_path")]
    pub database_path: String,

    // bcrypt hash of the admin password; the plaintext never lives in config
    pub admin_password_hash: String,

    // HS256 signing secret for admin bearer tokens
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }
}

fn default_port() -> u16 {
    3000
}

fn default_database_path() -> String {
    "clawmap.db".to_string()
}
