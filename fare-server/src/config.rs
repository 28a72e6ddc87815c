//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{Fare, Location};
use crate::guide::{GuideFormat, GuideSource};
use crate::resolver::{DEFAULT_MAX_DEPTH, ResolverConfig, default_trike_rate};

pub const GUIDE_PATH_VAR: &str = "FARES_GUIDE_PATH";
pub const GUIDE_FORMAT_VAR: &str = "FARES_GUIDE_FORMAT";
pub const BIND_ADDR_VAR: &str = "FARES_BIND_ADDR";
pub const TRIKE_MINIMUM_VAR: &str = "FARES_TRIKE_MINIMUM_FARE";
pub const TRIKE_RATE_VAR: &str = "FARES_TRIKE_RATE";
pub const MAX_DEPTH_VAR: &str = "FARES_MAX_SEARCH_DEPTH";
pub const HUB_VAR: &str = "FARES_HUB_LOCATION";
pub const KEYED_FALLBACK_VAR: &str = "FARES_KEYED_SEARCH_FALLBACK";

const DEFAULT_GUIDE_PATH: &str = "data/fare_guide.txt";
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set to something unusable
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub guide: GuideSource,
    pub resolver: ResolverConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var(BIND_ADDR_VAR, var(BIND_ADDR_VAR))?.unwrap_or(DEFAULT_BIND_ADDR);

        let path = var(GUIDE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GUIDE_PATH));
        let guide = match parse_var::<GuideFormat>(GUIDE_FORMAT_VAR, var(GUIDE_FORMAT_VAR))? {
            Some(format) => GuideSource::new(path, format),
            None => GuideSource::inferred(path),
        };

        let trike_minimum = parse_var::<Fare>(TRIKE_MINIMUM_VAR, var(TRIKE_MINIMUM_VAR))?
            .ok_or(ConfigError::Missing(TRIKE_MINIMUM_VAR))?;

        let trike_rate = parse_var::<Decimal>(TRIKE_RATE_VAR, var(TRIKE_RATE_VAR))?
            .unwrap_or_else(default_trike_rate);
        if trike_rate.is_sign_negative() && !trike_rate.is_zero() {
            return Err(invalid(TRIKE_RATE_VAR, trike_rate, "must not be negative"));
        }

        let max_depth = parse_var::<usize>(MAX_DEPTH_VAR, var(MAX_DEPTH_VAR))?
            .unwrap_or(DEFAULT_MAX_DEPTH);
        if max_depth == 0 {
            return Err(invalid(MAX_DEPTH_VAR, max_depth, "must be at least 1"));
        }

        let keyed_fallback = match var(KEYED_FALLBACK_VAR) {
            Some(value) => parse_bool(KEYED_FALLBACK_VAR, &value)?,
            None => false,
        };

        let mut resolver = ResolverConfig::new(trike_minimum)
            .with_trike_rate(trike_rate)
            .with_max_depth(max_depth)
            .with_keyed_search_fallback(keyed_fallback);
        if let Some(hub) = parse_var::<Location>(HUB_VAR, var(HUB_VAR))? {
            resolver = resolver.with_hub(hub);
        }

        Ok(Self {
            bind_addr,
            guide,
            resolver,
        })
    }
}

fn invalid(key: &'static str, value: impl Display, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_var<T>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(|v| v.trim().parse::<T>().map_err(|e| invalid(key, &v, e)))
        .transpose()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}
