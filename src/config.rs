//! Application-level configuration loaded from the environment.

use std::{env, time::Duration};

use tracing::warn;
use uuid::Uuid;

/// Default HTTP listen port.
const DEFAULT_PORT: u16 = 8080;
/// Default MongoDB connection string.
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
/// Default session lifetime in hours.
const DEFAULT_SESSION_TTL_HOURS: u64 = 24 * 7;
/// Default delay between expiry sweeper passes, in seconds.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 1;
/// Default grace period before a ready buzzer is expired, in minutes.
const DEFAULT_PICKUP_GRACE_MINUTES: u64 = 30;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Optional MongoDB database name override.
    pub mongo_db: Option<String>,
    /// How long newly issued sessions stay valid.
    pub session_ttl: Duration,
    /// Delay between expiry sweeper passes.
    pub sweep_interval: Duration,
    /// How long a ready buzzer waits for pickup before expiring.
    pub pickup_grace: Duration,
    /// Whether the operator debug routes are mounted.
    pub debug_routes: bool,
    /// Business targeted by the demo-reset debug route, when configured.
    pub demo_business_id: Option<Uuid>,
}

impl AppConfig {
    /// Read the configuration from environment variables, falling back to
    /// defaults and logging any value that fails to parse.
    pub fn from_env() -> Self {
        let port = parse_var("PORT").unwrap_or(DEFAULT_PORT);
        let mongo_uri = env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.into());
        let mongo_db = env::var("MONGO_DB").ok().filter(|name| !name.is_empty());
        let session_ttl = Duration::from_secs(
            parse_var::<u64>("SESSION_TTL_HOURS").unwrap_or(DEFAULT_SESSION_TTL_HOURS) * 3600,
        );
        let sweep_interval = Duration::from_secs(
            parse_var::<u64>("SWEEP_INTERVAL_SECS").unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
        );
        let pickup_grace = Duration::from_secs(
            parse_var::<u64>("PICKUP_GRACE_MINUTES").unwrap_or(DEFAULT_PICKUP_GRACE_MINUTES) * 60,
        );
        let debug_routes = parse_var::<bool>("DEBUG_ROUTES").unwrap_or(false);
        let demo_business_id = parse_var::<Uuid>("DEMO_BUSINESS_ID");

        Self {
            port,
            mongo_uri,
            mongo_db,
            session_ttl,
            sweep_interval,
            pickup_grace,
            debug_routes,
            demo_business_id,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            mongo_uri: DEFAULT_MONGO_URI.into(),
            mongo_db: None,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            pickup_grace: Duration::from_secs(DEFAULT_PICKUP_GRACE_MINUTES * 60),
            debug_routes: false,
            demo_business_id: None,
        }
    }
}

/// Parse an environment variable, logging a warning when the value is present
/// but malformed.
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparseable environment variable");
            None
        }
    }
}
