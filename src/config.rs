use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, warn};

use crate::error::Error;

pub const API_BASE_URL: &str = "API_BASE_URL";
pub const LLM_API_BASE_URL: &str = "LLM_API_BASE_URL";
pub const DEMO_MODE: &str = "DEMO_MODE";
pub const DEMO_LATENCY_MS: &str = "DEMO_LATENCY_MS";
pub const SESSION_FILE: &str = "SESSION_FILE";
pub const HEALTH_INTERVAL_SECS: &str = "HEALTH_INTERVAL_SECS";
pub const GENERATE_TIMEOUT_SECS: &str = "GENERATE_TIMEOUT_SECS";
pub const SERVE_ADDR: &str = "SERVE_ADDR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub llm_api_base_url: String,
    pub demo_mode: bool,
    pub demo_latency: Duration,
    pub session_file: PathBuf,
    pub health_interval: Duration,
    pub generate_timeout: Duration,
    pub serve_addr: SocketAddr,
}

impl Config {
    /// Reads `.env` (when present) and the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_source(|key| dotenv::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval: u64 = load(&lookup, HEALTH_INTERVAL_SECS, "30")?;
        if interval == 0 {
            return Err(Error::Config(format!("{} must be at least 1", HEALTH_INTERVAL_SECS)));
        }
        Ok(Self {
            api_base_url: load::<String, _>(&lookup, API_BASE_URL, "http://localhost:8080/api/v1")?,
            llm_api_base_url: load::<String, _>(&lookup, LLM_API_BASE_URL, "http://localhost:8080/api/v1/llm")?,
            demo_mode: load(&lookup, DEMO_MODE, "false")?,
            demo_latency: Duration::from_millis(load(&lookup, DEMO_LATENCY_MS, "0")?),
            session_file: load(&lookup, SESSION_FILE, ".surveyor-session.json")?,
            health_interval: Duration::from_secs(interval),
            generate_timeout: Duration::from_secs(load(&lookup, GENERATE_TIMEOUT_SECS, "120")?),
            serve_addr: load(&lookup, SERVE_ADDR, "127.0.0.1:8080")?,
        })
    }
}

fn load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty()).unwrap_or_else(|| {
        debug!("{} not set, using default: {}", key, default);
        default.to_owned()
    });
    raw.parse().map_err(|e| {
        warn!("invalid {} value {:?}: {}", key, raw, e);
        Error::Config(format!("{} has an invalid value {:?}: {}", key, raw, e))
    })
}
