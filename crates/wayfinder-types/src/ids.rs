//! Type-safe location identifier.
//!
//! The host identifies locations by name. Names are stable for a session,
//! and generated levels carry an instance-unique name (`UndergroundMine87`)
//! until the graph folds them into a canonical entry. Wrapping the string
//! keeps identifiers from being mixed up with arbitrary text at compile time.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Unique identifier for a location (node in the world graph).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationName(String);

impl LocationName {
    /// Create an identifier from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner [`String`] value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for LocationName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LocationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LocationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for LocationName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for LocationName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocationName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
