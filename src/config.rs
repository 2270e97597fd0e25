use crate::error::{BadEnvVarSnafu, ParseNumberSnafu, RosterResult};
use dotenvy::var;
use snafu::ResultExt;
use sqlx::sqlite::SqliteConnectOptions;
use std::{path::PathBuf, str::FromStr, sync::Arc};

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    server_ip: Arc<str>,
    max_body_bytes: usize,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            db_config: Arc::new(DbConfig::new()?),
            server_ip: var("ROSTER_SERVER_IP")
                .unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string())
                .into(),
            max_body_bytes: optional_number("ROSTER_MAX_BODY_BYTES")?
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
        })
    }

    #[cfg(test)]
    pub fn for_database(db_config: DbConfig) -> Self {
        Self {
            db_config: Arc::new(db_config),
            server_ip: DEFAULT_SERVER_IP.into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

#[derive(Debug)]
pub struct DbConfig {
    path: PathBuf,
    max_connections: u32,
}

impl DbConfig {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            path: var("DB_PATH")
                .context(BadEnvVarSnafu { name: "DB_PATH" })?
                .into(),
            max_connections: optional_number("DB_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        })
    }

    #[cfg(test)]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
    }
}

fn optional_number<T>(name: &'static str) -> RosterResult<Option<T>>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    parse_optional(name, var(name))
}

///`Ok(None)` if the variable isn't set at all, an error if it is set but isn't a number
fn parse_optional<T>(
    name: &'static str,
    looked_up: Result<String, dotenvy::Error>,
) -> RosterResult<Option<T>>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    match looked_up {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .context(ParseNumberSnafu { name }),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(source) => Err(source).context(BadEnvVarSnafu { name }),
    }
}
