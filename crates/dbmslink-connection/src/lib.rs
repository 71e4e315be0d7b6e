//! dbmslink Connection - Shared database connection descriptors
//!
//! This crate resolves saved shared-database preferences into validated
//! connection descriptors, including decryption of the stored password.

pub mod cipher;
mod descriptor;
pub mod diagnostics;
mod properties;
mod resolver;
mod snapshot;

pub use cipher::{DecryptionError, Decryptor, Encryptor, PasswordCipher};
pub use descriptor::{ConnectionDescriptor, ConnectionDescriptorBuilder};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticsSink, TracingSink};
pub use properties::ConnectionProperties;
pub use resolver::{CredentialResolver, Resolution, ResolutionIssue};
pub use snapshot::{CredentialSource, PreferenceSnapshot};
