use std::net::IpAddr;

use ipnet::IpNet;

use crate::store::postgres::is_valid_table_name;
use crate::store::DEFAULT_SHEET;

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub sheet: String,
    pub records_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub operator_email: String,
    pub brand: String,
    pub allowed_origins: Vec<String>,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub rate_limit: u32,
    pub rate_window_secs: u64,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

pub const DEFAULT_BRAND: &str = "仕事のやり方再設計";

/// Per-IP submissions allowed per window. Zero disables throttling; a
/// throttled lead is lost when the client does not read the reply.
pub const DEFAULT_RATE_LIMIT: u32 = 0;

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let store = match env_or("LEADINTAKE_STORE", "postgres").as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: env_required("DATABASE_URL")?,
            },
            other => return Err(format!("Invalid LEADINTAKE_STORE: {other}")),
        };

        let sheet = env_or("LEADINTAKE_SHEET", DEFAULT_SHEET);
        if !is_valid_table_name(&sheet) {
            return Err(format!("Invalid LEADINTAKE_SHEET: {sheet}"));
        }

        let records_url = std::env::var("LEADINTAKE_RECORDS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let host: IpAddr = env_or("LEADINTAKE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid LEADINTAKE_HOST: {e}"))?;

        let port: u16 = env_or("LEADINTAKE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid LEADINTAKE_PORT: {e}"))?;

        let operator_email = env_required("LEADINTAKE_OPERATOR_EMAIL")?;
        let brand = env_or("LEADINTAKE_BRAND", DEFAULT_BRAND);

        let allowed_origins: Vec<String> = env_or("LEADINTAKE_ALLOWED_ORIGINS", "")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_body_size: usize = env_or("LEADINTAKE_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid LEADINTAKE_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("LEADINTAKE_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid LEADINTAKE_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rate_limit: u32 = env_or("LEADINTAKE_RATE_LIMIT", &DEFAULT_RATE_LIMIT.to_string())
            .parse()
            .map_err(|e| format!("Invalid LEADINTAKE_RATE_LIMIT: {e}"))?;

        let rate_window_secs: u64 = env_or("LEADINTAKE_RATE_WINDOW_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid LEADINTAKE_RATE_WINDOW_SECS: {e}"))?;

        let log_level = env_or("LEADINTAKE_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("LEADINTAKE_SMTP_HOST").ok(),
            std::env::var("LEADINTAKE_SMTP_PORT").ok(),
            std::env::var("LEADINTAKE_SMTP_USER").ok(),
            std::env::var("LEADINTAKE_SMTP_PASS").ok(),
            std::env::var("LEADINTAKE_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid LEADINTAKE_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            store,
            sheet,
            records_url,
            host,
            port,
            operator_email,
            brand,
            allowed_origins,
            max_body_size,
            trusted_proxies,
            rate_limit,
            rate_window_secs,
            log_level,
            smtp,
        })
    }

    /// Settings suitable for tests and local runs: in-memory store, loopback
    /// bind, no SMTP, default rate limit.
    pub fn local(operator_email: &str) -> Self {
        Config {
            store: StoreBackend::Memory,
            sheet: DEFAULT_SHEET.to_string(),
            records_url: None,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            operator_email: operator_email.to_string(),
            brand: DEFAULT_BRAND.to_string(),
            allowed_origins: vec![],
            max_body_size: 65_536,
            trusted_proxies: vec![],
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window_secs: 60,
            log_level: "warn".to_string(),
            smtp: None,
        }
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
