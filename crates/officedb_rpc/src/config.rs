//! Gateway configuration resolved from `OFFICEDB_*` environment variables.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `OFFICEDB_DB_PATH` | store file | `<tmp>/officedb.sqlite3` |
//! | `OFFICEDB_DEADLINE_MS` | default per-call deadline, `0` disables | `5000` |
//! | `OFFICEDB_LOG_LEVEL` | trace/debug/info/warn/error | by build mode |
//! | `OFFICEDB_LOG_DIR` | absolute log directory | logging off |

use officedb_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DB_PATH_VAR: &str = "OFFICEDB_DB_PATH";
pub const DEADLINE_MS_VAR: &str = "OFFICEDB_DEADLINE_MS";
pub const LOG_LEVEL_VAR: &str = "OFFICEDB_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "OFFICEDB_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "officedb.sqlite3";
const DEFAULT_DEADLINE_MS: u64 = 5_000;

/// Environment value that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=`{}`: {}", self.variable, self.value, self.reason)
    }
}

impl Error for ConfigError {}

/// Resolved gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub db_path: PathBuf,
    /// Applied to calls whose context carries no deadline. `None` = unbounded.
    pub default_deadline: Option<Duration>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            default_deadline: Some(Duration::from_millis(DEFAULT_DEADLINE_MS)),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl GatewayConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(raw) = read(DEADLINE_MS_VAR) {
            config.default_deadline = parse_deadline_ms(&raw)?;
        }
        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level = level;
        }
        config.log_dir = read(LOG_DIR_VAR).map(PathBuf::from);

        Ok(config)
    }
}

/// Parses a millisecond deadline; `0` disables it.
pub fn parse_deadline_ms(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let millis: u64 = raw.trim().parse().map_err(|_| ConfigError {
        variable: DEADLINE_MS_VAR,
        value: raw.to_string(),
        reason: "expected a non-negative integer of milliseconds",
    })?;
    Ok((millis > 0).then(|| Duration::from_millis(millis)))
}
