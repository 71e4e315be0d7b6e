//! Supported database management systems
//!
//! Each [`DbmsType`] knows how to turn a host, port and database name into the
//! connection URL understood by its backend, and carries the defaults the
//! connection layer falls back to (port, driver class, TLS policy).

use crate::{DbmsLinkError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Kind of shared database backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DbmsType {
    MySql,
    Oracle,
    PostgreSql,
}

impl DbmsType {
    /// Every supported backend, in display order
    pub const fn all() -> &'static [DbmsType] {
        &[DbmsType::MySql, DbmsType::Oracle, DbmsType::PostgreSql]
    }

    /// Human-readable name, also used as the persisted form
    pub const fn display_name(&self) -> &'static str {
        match self {
            DbmsType::MySql => "MySQL",
            DbmsType::Oracle => "Oracle",
            DbmsType::PostgreSql => "PostgreSQL",
        }
    }

    /// Fully qualified driver class expected by the connection layer
    pub const fn driver_class(&self) -> &'static str {
        match self {
            DbmsType::MySql => "com.mysql.jdbc.Driver",
            DbmsType::Oracle => "oracle.jdbc.driver.OracleDriver",
            DbmsType::PostgreSql => "org.postgresql.Driver",
        }
    }

    /// Port the backend listens on out of the box
    pub const fn default_port(&self) -> u16 {
        match self {
            DbmsType::MySql => 3306,
            DbmsType::Oracle => 1521,
            DbmsType::PostgreSql => 5432,
        }
    }

    /// Whether TLS is used when a saved connection does not say otherwise
    pub const fn default_use_tls(&self) -> bool {
        false
    }

    /// Build the connection URL for this backend
    pub fn url_for(&self, host: &str, port: u16, database: &str) -> String {
        match self {
            DbmsType::MySql => format!("jdbc:mysql://{}:{}/{}", host, port, database),
            DbmsType::Oracle => format!("jdbc:oracle:thin:@{}:{}/{}", host, port, database),
            DbmsType::PostgreSql => {
                format!("jdbc:postgresql://{}:{}/{}", host, port, database)
            }
        }
    }

    /// Look up a backend by its display name, ignoring ASCII case.
    ///
    /// Returns `None` for names that do not belong to a supported backend.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|dbms| dbms.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DbmsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DbmsType {
    type Err = DbmsLinkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            DbmsLinkError::Configuration(format!("Unknown database type: {}", s))
        })
    }
}

impl Serialize for DbmsType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for DbmsType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
