//! Entity types as understood by NLUServer.

use serde::Serialize;

/// An entity type registered on the server.
///
/// Base types name a server-side system entity (`@sys.number`); custom types
/// carry their own closed list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityType {
    Base { name: String },
    Custom { name: String, entries: Vec<CustomEntityTypeEntry> },
}

impl EntityType {
    pub fn base(name: impl Into<String>) -> Self {
        Self::Base { name: name.into() }
    }

    pub fn custom(name: impl Into<String>, entries: Vec<CustomEntityTypeEntry>) -> Self {
        Self::Custom {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Base { name } | Self::Custom { name, .. } => name,
        }
    }

    /// Values of a custom type; always empty for base types.
    pub fn entries(&self) -> &[CustomEntityTypeEntry] {
        match self {
            Self::Base { .. } => &[],
            Self::Custom { entries, .. } => entries,
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Self::Base { .. })
    }
}

/// One canonical value of a custom entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomEntityTypeEntry {
    pub value: String,
    pub synonyms: Vec<String>,
}

impl CustomEntityTypeEntry {
    pub fn new(value: impl Into<String>, synonyms: Vec<String>) -> Self {
        Self {
            value: value.into(),
            synonyms,
        }
    }
}
