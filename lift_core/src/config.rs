//! # Configuration
//!
//! Settings are read from a TOML secrets file. Both sections are optional:
//! without `[snowflake]` the estimator works and only the warehouse smoke
//! test is unavailable.
//!
//! ```toml
//! [display]
//! decimals = 2
//! currency_symbol = "$"
//!
//! [snowflake]
//! account = "xy12345.us-east-1"
//! user = "ESTIMATOR"
//! password = "hunter2"
//! role = "ANALYST"
//! warehouse = "COMPUTE_WH"
//! database = "DEMO_DB"
//! schema = "PUBLIC"
//! demo_table = "SLAB_JOBS"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lift_core::config::AppConfig;
//!
//! let config = AppConfig::from_toml_str("[display]\ndecimals = 1\n", "inline").unwrap();
//! assert_eq!(config.display.decimals, 1);
//! assert!(config.warehouse.is_none());
//! ```

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Environment variable naming the secrets file
pub const SECRETS_ENV_VAR: &str = "FOAMLIFT_SECRETS";

/// Secrets file used when neither a flag nor the environment names one
pub const DEFAULT_SECRETS_PATH: &str = ".foamlift/secrets.toml";

/// Default table read by the warehouse smoke test
pub const DEFAULT_DEMO_TABLE: &str = "DEMO_TABLE";

/// Pick the secrets file: explicit path, then `FOAMLIFT_SECRETS`, then the default.
pub fn resolve_secrets_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(SECRETS_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH))
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Result formatting
    #[serde(default)]
    pub display: DisplaySettings,

    /// Warehouse credentials (`[snowflake]` section)
    #[serde(default, rename = "snowflake")]
    pub warehouse: Option<WarehouseConfig>,
}

impl AppConfig {
    /// Parse configuration from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> CalcResult<Self> {
        toml::from_str(text).map_err(|e| CalcError::config_error(origin, e.to_string()))
    }

    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CalcResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loaded secrets file");
                Self::from_toml_str(&text, &path.display().to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no secrets file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(CalcError::config_error(path.display().to_string(), e.to_string())),
        }
    }

    /// The validated warehouse section, or an error explaining why it is unusable.
    pub fn warehouse(&self) -> CalcResult<&WarehouseConfig> {
        let warehouse = self
            .warehouse
            .as_ref()
            .ok_or_else(|| CalcError::missing_field("snowflake"))?;
        warehouse.validate()?;
        Ok(warehouse)
    }
}

/// How estimate values are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    /// Digits after the decimal point
    pub decimals: usize,

    /// Prefix for money values
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            decimals: 2,
            currency_symbol: "$".to_string(),
        }
    }
}

fn default_demo_table() -> String {
    DEFAULT_DEMO_TABLE.to_string()
}

fn default_row_limit() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    60
}

/// Snowflake connection settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarehouseConfig {
    /// Account identifier, e.g. `xy12345.us-east-1`
    pub account: String,
    pub user: String,
    pub password: String,
    pub role: String,
    pub warehouse: String,
    pub database: String,
    pub schema: String,

    /// Table read by the smoke test (optionally `DB.SCHEMA.TABLE`)
    #[serde(default = "default_demo_table")]
    pub demo_table: String,

    /// Rows fetched from the demo table
    #[serde(default = "default_row_limit")]
    pub row_limit: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Overrides `{account}.snowflakecomputing.com`, e.g. for private links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl fmt::Debug for WarehouseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarehouseConfig")
            .field("account", &self.account)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("demo_table", &self.demo_table)
            .field("row_limit", &self.row_limit)
            .field("host", &self.host)
            .finish()
    }
}

impl WarehouseConfig {
    /// Check that every credential is present and the demo table is a plain identifier.
    pub fn validate(&self) -> CalcResult<()> {
        let required = [
            ("snowflake.account", &self.account),
            ("snowflake.user", &self.user),
            ("snowflake.password", &self.password),
            ("snowflake.role", &self.role),
            ("snowflake.warehouse", &self.warehouse),
            ("snowflake.database", &self.database),
            ("snowflake.schema", &self.schema),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CalcError::missing_field(field));
            }
        }

        if !is_table_identifier(&self.demo_table) {
            return Err(CalcError::invalid_input(
                "snowflake.demo_table",
                &self.demo_table,
                "Table must be an unquoted identifier, optionally qualified as DB.SCHEMA.TABLE",
            ));
        }
        if self.row_limit == 0 {
            return Err(CalcError::invalid_input("snowflake.row_limit", "0", "Row limit must be at least 1"));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(CalcError::invalid_input(
                "snowflake.timeout",
                "0",
                "Timeouts must be at least one second",
            ));
        }
        Ok(())
    }

    /// Host serving the account's REST endpoints
    pub fn host(&self) -> String {
        match &self.host {
            Some(host) => host.clone(),
            None => format!("{}.snowflakecomputing.com", self.account),
        }
    }

    /// Account name sent at login: the locator without region or cloud suffix
    pub fn account_name(&self) -> String {
        self.account
            .split('.')
            .next()
            .unwrap_or(&self.account)
            .to_uppercase()
    }
}

/// `NAME`, `SCHEMA.NAME` or `DB.SCHEMA.NAME` with unquoted identifier parts.
fn is_table_identifier(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 3 {
        return false;
    }
    parts.iter().all(|part| {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[display]
decimals = 3
currency_symbol = "CAD "

[snowflake]
account = "xy12345.us-east-1"
user = "ESTIMATOR"
password = "hunter2"
role = "ANALYST"
warehouse = "COMPUTE_WH"
database = "DEMO_DB"
schema = "PUBLIC"
demo_table = "DEMO_DB.PUBLIC.SLAB_JOBS"
row_limit = 5
"#;

    fn parsed() -> AppConfig {
        AppConfig::from_toml_str(FULL, "test").unwrap()
    }

    #[test]
    fn test_full_file() {
        let config = parsed();
        assert_eq!(config.display.decimals, 3);
        assert_eq!(config.display.currency_symbol, "CAD ");

        let wh = config.warehouse().unwrap();
        assert_eq!(wh.row_limit, 5);
        assert_eq!(wh.connect_timeout_secs, 10);
        assert_eq!(wh.host(), "xy12345.us-east-1.snowflakecomputing.com");
        assert_eq!(wh.account_name(), "XY12345");
    }

    #[test]
    fn test_empty_file_defaults() {
        let config = AppConfig::from_toml_str("", "test").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.display.decimals, 2);

        let err = config.warehouse().unwrap_err();
        assert_eq!(err, CalcError::missing_field("snowflake"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = AppConfig::from_toml_str("[display]\nprecision = 2\n", "inline").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_missing_credential() {
        let mut config = parsed();
        if let Some(wh) = config.warehouse.as_mut() {
            wh.password = "  ".to_string();
        }
        let err = config.warehouse().unwrap_err();
        assert_eq!(err.field(), Some("snowflake.password"));
    }

    #[test]
    fn test_table_identifier() {
        assert!(is_table_identifier("DEMO_TABLE"));
        assert!(is_table_identifier("db.schema.t_1$"));
        assert!(!is_table_identifier("a.b.c.d"));
        assert!(!is_table_identifier("jobs; DROP TABLE jobs"));
        assert!(!is_table_identifier("1JOBS"));
        assert!(!is_table_identifier("DB..T"));
        assert!(!is_table_identifier(""));
    }

    #[test]
    fn test_bad_table_rejected() {
        let mut config = parsed();
        if let Some(wh) = config.warehouse.as_mut() {
            wh.demo_table = "jobs--".to_string();
        }
        assert_eq!(config.warehouse().unwrap_err().field(), Some("snowflake.demo_table"));
    }

    #[test]
    fn test_password_redacted() {
        let config = parsed();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = AppConfig::load(Path::new("/nonexistent/foamlift/secrets.toml")).unwrap();
        assert!(config.warehouse.is_none());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_secrets_path(Some(PathBuf::from("custom.toml")));
        assert_eq!(path, PathBuf::from("custom.toml"));
    }
}
