//! Connection descriptor
//!
//! A [`ConnectionDescriptor`] is the immutable bundle of parameters needed to
//! address one shared database: backend kind, host, port, database name,
//! credentials, TLS flag and server timezone. Descriptors are created either
//! through [`ConnectionDescriptor::build`] or through
//! [`ConnectionDescriptorBuilder`]; nothing is validated at construction time.
//! Use [`ConnectionDescriptor::is_valid`] before handing one to the connection
//! layer.
//!
//! The password never takes part in equality or hashing and is redacted from
//! `Debug` output.

use std::fmt;
use std::hash::{Hash, Hasher};

use dbmslink_core::{DbmsLinkError, DbmsType, Result};

use crate::properties::ConnectionProperties;

/// Immutable description of how to reach a shared database
#[derive(Clone, Default)]
pub struct ConnectionDescriptor {
    scheme: Option<DbmsType>,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    user: Option<String>,
    password: Option<String>,
    use_tls: bool,
    server_timezone: Option<String>,
    /// Not needed to connect, kept for later authentication
    key_store_path: Option<String>,
}

impl ConnectionDescriptor {
    /// Create a descriptor with every connection field set
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        scheme: DbmsType,
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        use_tls: bool,
        server_timezone: impl Into<String>,
    ) -> Self {
        Self::builder()
            .scheme(scheme)
            .host(host)
            .port(port)
            .database(database)
            .user(user)
            .password(password)
            .use_tls(use_tls)
            .server_timezone(server_timezone)
            .build()
    }

    /// Start an empty builder
    pub fn builder() -> ConnectionDescriptorBuilder {
        ConnectionDescriptorBuilder::default()
    }

    pub fn scheme(&self) -> Option<DbmsType> {
        self.scheme
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The plaintext password, if one was resolved
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    pub fn server_timezone(&self) -> Option<&str> {
        self.server_timezone.as_deref()
    }

    pub fn key_store_path(&self) -> Option<&str> {
        self.key_store_path.as_deref()
    }

    /// Returns true if every field needed to connect is present.
    ///
    /// Host, database and user must be non-empty. The password only has to be
    /// present: an empty password is a legitimate credential for some backends.
    /// This is a completeness check only; port ranges, reachability and
    /// credential correctness are not examined.
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the fields that keep this descriptor from being valid
    pub fn missing_fields(&self) -> Vec<&'static str> {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().is_none_or(str::is_empty)
        }

        let mut missing = Vec::new();
        if self.scheme.is_none() {
            missing.push("type");
        }
        if blank(&self.host) {
            missing.push("host");
        }
        if self.port.is_none() {
            missing.push("port");
        }
        if blank(&self.database) {
            missing.push("database");
        }
        if blank(&self.user) {
            missing.push("user");
        }
        if self.password.is_none() {
            missing.push("password");
        }
        missing
    }

    /// Build the connection URL using the backend's own URL rule
    pub fn connection_url(&self) -> Result<String> {
        let scheme = self.scheme.ok_or_else(|| {
            DbmsLinkError::InvalidState("cannot build a URL without a database type".to_string())
        })?;
        let host = self.host.as_deref().ok_or_else(|| {
            DbmsLinkError::InvalidState("cannot build a URL without a host".to_string())
        })?;
        let port = self.port.ok_or_else(|| {
            DbmsLinkError::InvalidState("cannot build a URL without a port".to_string())
        })?;
        let database = self.database.as_deref().ok_or_else(|| {
            DbmsLinkError::InvalidState("cannot build a URL without a database name".to_string())
        })?;

        Ok(scheme.url_for(host, port, database))
    }

    /// User, password, server timezone and the TLS flag as driver properties.
    ///
    /// The `ssl` entry is only present when TLS is enabled. The result carries
    /// the plaintext password and must only be handed to the connection layer.
    pub fn as_connection_properties(&self) -> ConnectionProperties {
        let mut props = ConnectionProperties::new();
        if let Some(user) = &self.user {
            props.insert(ConnectionProperties::USER, user.clone());
        }
        if let Some(password) = &self.password {
            props.insert(ConnectionProperties::PASSWORD, password.clone());
        }
        if let Some(timezone) = &self.server_timezone {
            props.insert(ConnectionProperties::SERVER_TIMEZONE, timezone.clone());
        }
        if self.use_tls {
            props.insert(ConnectionProperties::SSL, self.use_tls.to_string());
        }
        props
    }
}

impl PartialEq for ConnectionDescriptor {
    fn eq(&self, other: &Self) -> bool {
        let host_eq = match (&self.host, &other.host) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => true,
            _ => false,
        };

        self.scheme == other.scheme
            && host_eq
            && self.port == other.port
            && self.database == other.database
            && self.user == other.user
            && self.use_tls == other.use_tls
            && self.server_timezone == other.server_timezone
    }
}

impl Eq for ConnectionDescriptor {}

impl Hash for ConnectionDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.host.as_deref().map(str::to_ascii_lowercase).hash(state);
        self.port.hash(state);
        self.database.hash(state);
        self.user.hash(state);
        self.use_tls.hash(state);
        self.server_timezone.hash(state);
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("use_tls", &self.use_tls)
            .field("server_timezone", &self.server_timezone)
            .field("key_store_path", &self.key_store_path)
            .finish()
    }
}

/// Builder for [`ConnectionDescriptor`]
///
/// Fields that are never set stay absent in the built descriptor.
#[derive(Debug, Clone, Default)]
pub struct ConnectionDescriptorBuilder {
    descriptor: ConnectionDescriptor,
}

impl ConnectionDescriptorBuilder {
    pub fn scheme(mut self, scheme: DbmsType) -> Self {
        self.descriptor.scheme = Some(scheme);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.descriptor.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.descriptor.port = Some(port);
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.descriptor.database = Some(database.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.descriptor.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.descriptor.password = Some(password.into());
        self
    }

    pub fn use_tls(mut self, use_tls: bool) -> Self {
        self.descriptor.use_tls = use_tls;
        self
    }

    pub fn server_timezone(mut self, server_timezone: impl Into<String>) -> Self {
        self.descriptor.server_timezone = Some(server_timezone.into());
        self
    }

    pub fn key_store_path(mut self, key_store_path: impl Into<String>) -> Self {
        self.descriptor.key_store_path = Some(key_store_path.into());
        self
    }

    pub fn build(self) -> ConnectionDescriptor {
        self.descriptor
    }
}

#[cfg(test)]
mod tests;
