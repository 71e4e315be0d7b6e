//! Saved shared-database preferences
//!
//! A [`PreferenceSnapshot`] is a read-only copy of the key/value preferences a
//! shared database connection was saved under. Every value is optional; the
//! [`CredentialSource`] trait exposes them to the resolver without ever
//! failing for missing data.

use std::path::Path;

use dbmslink_core::Result;
use serde::{Deserialize, Serialize};

use crate::cipher::Encryptor;
use crate::descriptor::ConnectionDescriptor;

/// Read-only access to saved connection values
pub trait CredentialSource {
    /// Database type name, e.g. "PostgreSQL"
    fn dbms_type(&self) -> Option<&str>;
    fn host(&self) -> Option<&str>;
    /// Port as stored, not yet parsed
    fn port(&self) -> Option<&str>;
    /// Database name
    fn name(&self) -> Option<&str>;
    fn user(&self) -> Option<&str>;
    /// Encrypted password
    fn password(&self) -> Option<&str>;
    fn key_store_file(&self) -> Option<&str>;
    fn server_timezone(&self) -> Option<&str>;
    fn use_ssl(&self) -> Option<&str>;
}

/// Snapshot of the shared database preferences
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    #[serde(rename = "sharedDatabaseType", default, skip_serializing_if = "Option::is_none")]
    pub dbms_type: Option<String>,

    #[serde(rename = "sharedDatabaseHost", default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "sharedDatabasePort", default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    #[serde(rename = "sharedDatabaseName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "sharedDatabaseUser", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Encrypted with the user as context, never plaintext
    #[serde(rename = "sharedDatabasePassword", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(rename = "sharedDatabaseKeyStoreFile", default, skip_serializing_if = "Option::is_none")]
    pub key_store_file: Option<String>,

    #[serde(rename = "sharedDatabaseServerTimezone", default, skip_serializing_if = "Option::is_none")]
    pub server_timezone: Option<String>,

    #[serde(rename = "sharedDatabaseUseSSL", default, skip_serializing_if = "Option::is_none")]
    pub use_ssl: Option<String>,

    #[serde(rename = "sharedDatabaseRememberPassword", default)]
    pub remember_password: bool,

    /// Folder the shared library was last opened from
    #[serde(rename = "sharedDatabaseFolder", default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    #[serde(rename = "sharedDatabaseAutosave", default)]
    pub autosave: bool,
}

impl PreferenceSnapshot {
    /// Parse a snapshot from its JSON form
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot from a JSON preferences file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded shared database preferences");
        Ok(snapshot)
    }

    /// Pretty JSON form, suitable for the preference store
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Capture a descriptor as preferences.
    ///
    /// The password is only stored when both a user and a password are
    /// present, encrypted with the user as context.
    pub fn from_descriptor(
        descriptor: &ConnectionDescriptor,
        encryptor: &dyn Encryptor,
    ) -> Result<Self> {
        let password = match (descriptor.user(), descriptor.password()) {
            (Some(user), Some(password)) => Some(encryptor.encrypt(password, user)?),
            _ => None,
        };

        Ok(Self {
            dbms_type: descriptor.scheme().map(|scheme| scheme.display_name().to_string()),
            host: descriptor.host().map(str::to_string),
            port: descriptor.port().map(|port| port.to_string()),
            name: descriptor.database().map(str::to_string),
            user: descriptor.user().map(str::to_string),
            remember_password: password.is_some(),
            password,
            key_store_file: descriptor.key_store_path().map(str::to_string),
            server_timezone: descriptor.server_timezone().map(str::to_string),
            use_ssl: Some(descriptor.use_tls().to_string()),
            folder: None,
            autosave: false,
        })
    }

    /// Forget the stored password
    pub fn clear_password(&mut self) {
        self.password = None;
        self.remember_password = false;
    }
}

impl CredentialSource for PreferenceSnapshot {
    fn dbms_type(&self) -> Option<&str> {
        self.dbms_type.as_deref()
    }

    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    fn key_store_file(&self) -> Option<&str> {
        self.key_store_file.as_deref()
    }

    fn server_timezone(&self) -> Option<&str> {
        self.server_timezone.as_deref()
    }

    fn use_ssl(&self) -> Option<&str> {
        self.use_ssl.as_deref()
    }
}
