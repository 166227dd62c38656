use std::env;
use std::net::SocketAddr;

use tracing::info;

use crate::backend::SupabaseConfig;
use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://twinlearn.db?mode=rwc";

#[derive(Clone, Debug)]
pub enum BackendConfig {
    Supabase(SupabaseConfig),
    Local { database_url: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub backend: BackendConfig,
    pub cookie_secure: bool,
}

impl Config {
    pub fn new_from_env() -> Result<Self, AppError> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let backend = match SupabaseConfig::from_env()? {
            Some(supabase) => {
                info!("using hosted backend at {}", supabase.url);
                BackendConfig::Supabase(supabase)
            }
            None => {
                let database_url = env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
                info!("SUPABASE_URL not set, using local backend at {}", database_url);
                BackendConfig::Local { database_url }
            }
        };

        let cookie_secure = match env::var("COOKIE_SECURE") {
            Ok(value) => parse_flag(&value)
                .ok_or_else(|| AppError::Config(format!("COOKIE_SECURE is invalid: {}", value)))?,
            Err(_) => false,
        };

        Ok(Self {
            bind_addr,
            backend,
            cookie_secure,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
