//! Connection and entity settings.

use crate::error::{OrmError, OrmResult};
use serde::{Deserialize, Serialize};

/// Default number of rows per INSERT/UPDATE statement.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub port: u16,
    /// Maximum pool size.
    pub max_size: usize,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "postgres".to_string(),
            port: 5432,
            max_size: 10,
        }
    }
}

impl DbConfig {
    /// Read `DB_HOST`, `DB_USER`, `DB_PWD`, `DB_NAME`, `DB_PORT` and `DB_MAX`.
    ///
    /// Unset variables keep their defaults; unparsable numbers are an error.
    pub fn from_env() -> OrmResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> OrmResult<Self> {
        let mut cfg = Self::default();
        if let Some(v) = lookup("DB_HOST") {
            cfg.host = v;
        }
        if let Some(v) = lookup("DB_USER") {
            cfg.user = v;
        }
        if let Some(v) = lookup("DB_PWD") {
            cfg.password = v;
        }
        if let Some(v) = lookup("DB_NAME") {
            cfg.dbname = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            cfg.port = v
                .parse()
                .map_err(|e| OrmError::Config(format!("DB_PORT={v:?}: {e}")))?;
        }
        if let Some(v) = lookup("DB_MAX") {
            cfg.max_size = v
                .parse()
                .map_err(|e| OrmError::Config(format!("DB_MAX={v:?}: {e}")))?;
        }
        if cfg.max_size == 0 {
            return Err(OrmError::Config("DB_MAX must be greater than 0".into()));
        }
        Ok(cfg)
    }

    /// Driver configuration for these settings.
    pub fn pg_config(&self) -> tokio_postgres::Config {
        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.host)
            .user(&self.user)
            .dbname(&self.dbname)
            .port(self.port);
        if !self.password.is_empty() {
            pg.password(&self.password);
        }
        pg
    }
}

/// Per-entity settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityOptions {
    /// Rows per INSERT/UPDATE statement.
    pub chunk_size: usize,
    /// Log the entity summary at construction.
    pub log_summary: bool,
    pub trace: TraceOptions,
}

impl Default for EntityOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_summary: true,
            trace: TraceOptions::default(),
        }
    }
}

impl EntityOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn log_summary(mut self, enabled: bool) -> Self {
        self.log_summary = enabled;
        self
    }

    pub fn trace(mut self, trace: TraceOptions) -> Self {
        self.trace = trace;
        self
    }

    pub(crate) fn validate(&self) -> OrmResult<()> {
        if self.chunk_size == 0 {
            return Err(OrmError::validation("chunk_size must be greater than 0"));
        }
        Ok(())
    }
}

/// SQL trace settings for the `pgentity.sql` target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Truncate traced SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            max_sql_length: Some(500),
        }
    }
}

impl TraceOptions {
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = DbConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.port, 5432);
        assert_eq!(cfg.max_size, 10);
    }

    #[test]
    fn reads_variables() {
        let cfg = DbConfig::from_lookup(lookup(&[
            ("DB_HOST", "db"),
            ("DB_USER", "app"),
            ("DB_PWD", "secret"),
            ("DB_NAME", "shop"),
            ("DB_PORT", "6543"),
            ("DB_MAX", "4"),
        ]))
        .unwrap();
        assert_eq!(cfg.host, "db");
        assert_eq!(cfg.password, "secret");
        assert_eq!(cfg.port, 6543);
        assert_eq!(cfg.max_size, 4);
    }

    #[test]
    fn bad_numbers_are_config_errors() {
        let err = DbConfig::from_lookup(lookup(&[("DB_PORT", "abc")])).unwrap_err();
        assert!(matches!(err, OrmError::Config(_)));
        let err = DbConfig::from_lookup(lookup(&[("DB_MAX", "0")])).unwrap_err();
        assert!(matches!(err, OrmError::Config(_)));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        assert!(EntityOptions::new().chunk_size(0).validate().is_err());
        assert!(EntityOptions::new().validate().is_ok());
    }
}
