//! Driver properties handed to the connection layer

use std::collections::BTreeMap;
use std::fmt;

/// Key/value bundle of credentials and session options for a driver.
///
/// Holds the plaintext password, so `Debug` redacts it and the type is
/// deliberately not serializable.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionProperties {
    entries: BTreeMap<String, String>,
}

impl ConnectionProperties {
    pub const USER: &'static str = "user";
    pub const PASSWORD: &'static str = "password";
    pub const SERVER_TIMEZONE: &'static str = "serverTimezone";
    pub const SSL: &'static str = "ssl";

    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Debug for ConnectionProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, value)| {
                let shown = if key == Self::PASSWORD {
                    "<redacted>"
                } else {
                    value.as_str()
                };
                (key.as_str(), shown)
            }))
            .finish()
    }
}
