//! Tests for ConnectionDescriptor

use super::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;

fn hash_of(descriptor: &ConnectionDescriptor) -> u64 {
    let mut hasher = DefaultHasher::new();
    descriptor.hash(&mut hasher);
    hasher.finish()
}

fn postgres_descriptor(password: &str) -> ConnectionDescriptor {
    ConnectionDescriptor::build(
        DbmsType::PostgreSql,
        "db.example.org",
        5432,
        "refs",
        "alice",
        password,
        false,
        "UTC",
    )
}

#[test]
fn test_build_sets_all_fields() {
    let descriptor = postgres_descriptor("secret");

    assert_eq!(descriptor.scheme(), Some(DbmsType::PostgreSql));
    assert_eq!(descriptor.host(), Some("db.example.org"));
    assert_eq!(descriptor.port(), Some(5432));
    assert_eq!(descriptor.database(), Some("refs"));
    assert_eq!(descriptor.user(), Some("alice"));
    assert_eq!(descriptor.password(), Some("secret"));
    assert!(!descriptor.use_tls());
    assert_eq!(descriptor.server_timezone(), Some("UTC"));
    assert_eq!(descriptor.key_store_path(), None);
    assert!(descriptor.is_valid());
}

#[test]
fn test_equality_ignores_password() {
    let a = postgres_descriptor("first");
    let b = postgres_descriptor("second");

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_equality_ignores_password_presence() {
    let with_password = postgres_descriptor("secret");
    let without_password = ConnectionDescriptor::builder()
        .scheme(DbmsType::PostgreSql)
        .host("db.example.org")
        .port(5432)
        .database("refs")
        .user("alice")
        .server_timezone("UTC")
        .build();

    assert_eq!(with_password, without_password);
    assert_eq!(hash_of(&with_password), hash_of(&without_password));
}

#[test]
fn test_equality_host_is_case_insensitive() {
    let lower = postgres_descriptor("secret");
    let upper = ConnectionDescriptor::build(
        DbmsType::PostgreSql,
        "DB.Example.ORG",
        5432,
        "refs",
        "alice",
        "secret",
        false,
        "UTC",
    );

    assert_eq!(lower, upper);
    assert_eq!(hash_of(&lower), hash_of(&upper));
}

#[test]
fn test_equality_considers_other_fields() {
    let base = postgres_descriptor("secret");

    let other_port = ConnectionDescriptor::build(
        DbmsType::PostgreSql,
        "db.example.org",
        5433,
        "refs",
        "alice",
        "secret",
        false,
        "UTC",
    );
    let other_tls = ConnectionDescriptor::build(
        DbmsType::PostgreSql,
        "db.example.org",
        5432,
        "refs",
        "alice",
        "secret",
        true,
        "UTC",
    );
    let other_timezone = ConnectionDescriptor::build(
        DbmsType::PostgreSql,
        "db.example.org",
        5432,
        "refs",
        "alice",
        "secret",
        false,
        "Europe/Berlin",
    );
    let other_scheme = ConnectionDescriptor::build(
        DbmsType::MySql,
        "db.example.org",
        5432,
        "refs",
        "alice",
        "secret",
        false,
        "UTC",
    );

    assert_ne!(base, other_port);
    assert_ne!(base, other_tls);
    assert_ne!(base, other_timezone);
    assert_ne!(base, other_scheme);
}

#[test]
fn test_equality_ignores_key_store_path() {
    let a = ConnectionDescriptor::builder()
        .scheme(DbmsType::MySql)
        .host("localhost")
        .key_store_path("/home/alice/.keystore")
        .build();
    let b = ConnectionDescriptor::builder()
        .scheme(DbmsType::MySql)
        .host("localhost")
        .build();

    assert_eq!(a, b);
}

#[test]
fn test_descriptors_dedupe_in_hash_set() {
    let mut set = HashSet::new();
    set.insert(postgres_descriptor("first"));
    set.insert(postgres_descriptor("second"));

    assert_eq!(set.len(), 1);
}

#[test]
fn test_empty_password_is_valid() {
    let descriptor = postgres_descriptor("");

    assert!(descriptor.is_valid());
    assert_eq!(descriptor.password(), Some(""));
}

#[test]
fn test_missing_required_field_is_invalid() {
    let full = || {
        ConnectionDescriptor::builder()
            .scheme(DbmsType::PostgreSql)
            .host("db.example.org")
            .port(5432)
            .database("refs")
            .user("alice")
            .password("secret")
    };
    assert!(full().build().is_valid());

    let cases = [
        (
            "type",
            ConnectionDescriptor::builder()
                .host("db.example.org")
                .port(5432)
                .database("refs")
                .user("alice")
                .password("secret")
                .build(),
        ),
        (
            "host",
            ConnectionDescriptor::builder()
                .scheme(DbmsType::PostgreSql)
                .port(5432)
                .database("refs")
                .user("alice")
                .password("secret")
                .build(),
        ),
        (
            "port",
            ConnectionDescriptor::builder()
                .scheme(DbmsType::PostgreSql)
                .host("db.example.org")
                .database("refs")
                .user("alice")
                .password("secret")
                .build(),
        ),
        (
            "database",
            ConnectionDescriptor::builder()
                .scheme(DbmsType::PostgreSql)
                .host("db.example.org")
                .port(5432)
                .user("alice")
                .password("secret")
                .build(),
        ),
        (
            "user",
            ConnectionDescriptor::builder()
                .scheme(DbmsType::PostgreSql)
                .host("db.example.org")
                .port(5432)
                .database("refs")
                .password("secret")
                .build(),
        ),
        (
            "password",
            ConnectionDescriptor::builder()
                .scheme(DbmsType::PostgreSql)
                .host("db.example.org")
                .port(5432)
                .database("refs")
                .user("alice")
                .build(),
        ),
    ];

    for (field, descriptor) in cases {
        assert!(!descriptor.is_valid(), "descriptor without {} should be invalid", field);
        assert_eq!(descriptor.missing_fields(), vec![field]);
    }
}

#[test]
fn test_empty_host_is_invalid() {
    let descriptor = ConnectionDescriptor::build(
        DbmsType::MySql,
        "",
        3306,
        "library",
        "alice",
        "secret",
        false,
        "UTC",
    );

    assert!(!descriptor.is_valid());
    assert_eq!(descriptor.missing_fields(), vec!["host"]);
}

#[test]
fn test_port_zero_counts_as_present() {
    let descriptor = ConnectionDescriptor::build(
        DbmsType::MySql,
        "localhost",
        0,
        "library",
        "alice",
        "secret",
        false,
        "UTC",
    );

    assert!(descriptor.is_valid());
    assert_eq!(descriptor.port(), Some(0));
}

#[test]
fn test_default_descriptor_is_invalid() {
    let descriptor = ConnectionDescriptor::default();

    assert!(!descriptor.is_valid());
    assert_eq!(
        descriptor.missing_fields(),
        vec!["type", "host", "port", "database", "user", "password"]
    );
}

#[test]
fn test_connection_url_delegates_to_scheme() {
    let descriptor = postgres_descriptor("secret");

    assert_eq!(
        descriptor.connection_url().unwrap(),
        DbmsType::PostgreSql.url_for("db.example.org", 5432, "refs")
    );
}

#[test]
fn test_connection_url_without_scheme_is_invalid_state() {
    let descriptor = ConnectionDescriptor::builder()
        .host("db.example.org")
        .port(5432)
        .database("refs")
        .build();

    let err = descriptor.connection_url().unwrap_err();
    assert!(matches!(err, DbmsLinkError::InvalidState(_)));
    assert!(err.to_string().contains("database type"));
}

#[test]
fn test_connection_url_without_host_is_invalid_state() {
    let descriptor = ConnectionDescriptor::builder()
        .scheme(DbmsType::MySql)
        .port(3306)
        .database("library")
        .build();

    let err = descriptor.connection_url().unwrap_err();
    assert!(matches!(err, DbmsLinkError::InvalidState(_)));
}

#[test]
fn test_connection_properties_without_tls() {
    let props = postgres_descriptor("secret").as_connection_properties();

    assert_eq!(props.get(ConnectionProperties::USER), Some("alice"));
    assert_eq!(props.get(ConnectionProperties::PASSWORD), Some("secret"));
    assert_eq!(props.get(ConnectionProperties::SERVER_TIMEZONE), Some("UTC"));
    assert!(!props.contains_key(ConnectionProperties::SSL));
    assert_eq!(props.len(), 3);
}

#[test]
fn test_connection_properties_with_tls() {
    let descriptor = ConnectionDescriptor::build(
        DbmsType::PostgreSql,
        "db.example.org",
        5432,
        "refs",
        "alice",
        "secret",
        true,
        "UTC",
    );
    let props = descriptor.as_connection_properties();

    assert_eq!(props.get(ConnectionProperties::SSL), Some("true"));
    assert_eq!(
        props.keys().collect::<Vec<_>>(),
        vec!["password", "serverTimezone", "ssl", "user"]
    );
}

#[test]
fn test_debug_redacts_password() {
    let descriptor = postgres_descriptor("hunter2");

    let rendered = format!("{:?}", descriptor);
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));

    let props = format!("{:?}", descriptor.as_connection_properties());
    assert!(!props.contains("hunter2"));
    assert!(props.contains("alice"));
}
