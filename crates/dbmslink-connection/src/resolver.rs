//! Credential resolution
//!
//! [`CredentialResolver`] turns a saved [`CredentialSource`] into a
//! [`ConnectionDescriptor`]. Resolution never fails: malformed or missing values
//! leave the matching field unset, which the caller observes through
//! [`ConnectionDescriptor::is_valid`] and through the issues listed on the
//! returned [`Resolution`].
//!
//! A password that cannot be decrypted is reported once to the diagnostics sink
//! and left unset, so a corrupt credential can never turn into a connection
//! attempt with a wrong password.

use std::sync::Arc;

use dbmslink_core::{DbmsLinkError, DbmsType, Result};

use crate::cipher::{DecryptionError, Decryptor};
use crate::descriptor::ConnectionDescriptor;
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::snapshot::CredentialSource;

/// Something that was dropped or degraded while resolving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionIssue {
    /// The saved database type does not name a supported backend
    UnknownScheme(String),
    /// The saved port is not a valid port number
    InvalidPort(String),
    /// The saved password could not be decrypted for this user
    PasswordDecryption { user: String, reason: DecryptionError },
}

/// Outcome of resolving a credential source
#[derive(Debug, Clone)]
pub struct Resolution {
    descriptor: ConnectionDescriptor,
    issues: Vec<ResolutionIssue>,
}

impl Resolution {
    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    pub fn issues(&self) -> &[ResolutionIssue] {
        &self.issues
    }

    /// Returns true if a stored password was present but could not be decrypted
    pub fn is_degraded(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, ResolutionIssue::PasswordDecryption { .. }))
    }

    pub fn into_descriptor(self) -> ConnectionDescriptor {
        self.descriptor
    }

    /// The descriptor, or a configuration error naming what is missing
    pub fn into_valid(self) -> Result<ConnectionDescriptor> {
        let missing = self.descriptor.missing_fields();
        if missing.is_empty() {
            Ok(self.descriptor)
        } else {
            Err(DbmsLinkError::Configuration(format!(
                "Shared database connection is incomplete, missing: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Builds connection descriptors from saved preferences
pub struct CredentialResolver {
    decryptor: Arc<dyn Decryptor>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl CredentialResolver {
    pub fn new(decryptor: Arc<dyn Decryptor>, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            decryptor,
            diagnostics,
        }
    }

    /// Resolver that reports diagnostics through `tracing`
    pub fn with_tracing(decryptor: Arc<dyn Decryptor>) -> Self {
        Self::new(decryptor, Arc::new(TracingSink))
    }

    /// Resolve a descriptor from a saved credential source
    #[tracing::instrument(skip_all)]
    pub fn resolve<S>(&self, source: &S) -> Resolution
    where
        S: CredentialSource + ?Sized,
    {
        let mut issues = Vec::new();
        let mut builder = ConnectionDescriptor::builder();

        let scheme = source.dbms_type().and_then(|name| {
            let scheme = DbmsType::from_name(name);
            if scheme.is_none() {
                tracing::warn!(dbms_type = %name, "unknown shared database type");
                issues.push(ResolutionIssue::UnknownScheme(name.to_string()));
            }
            scheme
        });
        if let Some(scheme) = scheme {
            builder = builder.scheme(scheme);
        }

        if let Some(host) = source.host() {
            builder = builder.host(host);
        }
        if let Some(port) = source.port() {
            match port.trim().parse::<u16>() {
                Ok(port) => builder = builder.port(port),
                Err(e) => {
                    tracing::warn!(port = %port, error = %e, "invalid shared database port");
                    issues.push(ResolutionIssue::InvalidPort(port.to_string()));
                }
            }
        }
        if let Some(database) = source.name() {
            builder = builder.database(database);
        }
        if let Some(key_store) = source.key_store_file() {
            builder = builder.key_store_path(key_store);
        }
        if let Some(timezone) = source.server_timezone() {
            builder = builder.server_timezone(timezone);
        }

        let use_tls = match source.use_ssl() {
            Some(value) => value.trim().eq_ignore_ascii_case("true"),
            None => scheme.is_some_and(|scheme| scheme.default_use_tls()),
        };
        builder = builder.use_tls(use_tls);

        match (source.user(), source.password()) {
            (Some(user), Some(encrypted)) => {
                builder = builder.user(user);
                match self.decryptor.decrypt(encrypted, user) {
                    Ok(password) => builder = builder.password(password),
                    Err(e) => {
                        self.diagnostics.error("Could not decrypt password", &e);
                        issues.push(ResolutionIssue::PasswordDecryption {
                            user: user.to_string(),
                            reason: e,
                        });
                    }
                }
            }
            (Some(user), None) => {
                // Some backends reject a missing password but accept an empty one
                builder = builder.user(user).password("");
            }
            (None, None) => {
                builder = builder.password("");
            }
            (None, Some(_)) => {}
        }

        let descriptor = builder.build();
        tracing::debug!(
            scheme = ?descriptor.scheme(),
            host = ?descriptor.host(),
            port = ?descriptor.port(),
            valid = descriptor.is_valid(),
            issues = issues.len(),
            "resolved shared database descriptor"
        );

        Resolution { descriptor, issues }
    }
}
