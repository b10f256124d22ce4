use std::fmt;

/// What the HTTP layer does when a create/update passed validation but the
/// store rejected the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailurePolicy {
    /// Log and navigate to the invoice list as if the write succeeded.
    Redirect,
    /// Re-render the form with a database error message.
    Report,
}

impl StoreFailurePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redirect" => Some(StoreFailurePolicy::Redirect),
            "report" => Some(StoreFailurePolicy::Report),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub app_name: String,
    pub store_failure_policy: StoreFailurePolicy,
    pub seed_demo_data: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{var} must be set"),
            ConfigError::Invalid { var, value } => write!(f, "Invalid value for {var}: '{value}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_APP_NAME: &str = "Acme Invoices";
const DEFAULT_MAX_CONNECTIONS: u32 = 8;

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup; `from_env` passes
    /// `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("POSTGRES_URL"))
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", value: raw }),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let store_failure_policy = match lookup("STORE_FAILURE_POLICY") {
            Some(raw) => StoreFailurePolicy::parse(&raw)
                .ok_or(ConfigError::Invalid { var: "STORE_FAILURE_POLICY", value: raw })?,
            None => StoreFailurePolicy::Redirect,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::Invalid { var: "SEED_DEMO_DATA", value: raw }),
            },
            None => true,
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            session_key: lookup("SESSION_KEY"),
            app_name: lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            store_failure_policy,
            seed_demo_data,
        })
    }
}
