//! Entity definitions: system entities, mapping entities and composites.

use serde::{Deserialize, Serialize};

/// A named, typed span of meaning that can be extracted from an utterance.
///
/// The set of kinds is closed: backends match on it exhaustively, so an
/// unsupported kind is a compile-time visible case rather than a fallthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityDefinition {
    /// System-provided entity (`number`, `date`, `any`, ...).
    Base(BaseEntityDefinition),
    /// Closed set of values, each with synonyms.
    Mapping(MappingEntityDefinition),
    /// Entity built from text and other entities.
    Composite(CompositeEntityDefinition),
}

impl EntityDefinition {
    /// Create a system entity from its generic identifier.
    pub fn base(entity_type: impl Into<String>) -> Self {
        Self::Base(BaseEntityDefinition {
            entity_type: entity_type.into(),
        })
    }

    /// Name of the entity. For system entities this is the generic identifier.
    pub fn name(&self) -> &str {
        match self {
            Self::Base(base) => &base.entity_type,
            Self::Mapping(mapping) => &mapping.name,
            Self::Composite(composite) => &composite.name,
        }
    }

    /// Human-readable kind, used in error messages and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Base(_) => "base entity",
            Self::Mapping(_) => "mapping entity",
            Self::Composite(_) => "composite entity",
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Self::Base(_))
    }
}

/// System entity identified by a platform-neutral id (e.g. `"date-time"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseEntityDefinition {
    pub entity_type: String,
}

/// Entity with a closed list of canonical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntityDefinition {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<MappingEntry>,
}

impl MappingEntityDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry and return `self` (builder style).
    pub fn with_entry<I, S>(mut self, reference_value: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push(MappingEntry {
            reference_value: reference_value.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// One canonical value of a mapping entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub reference_value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Entity whose values combine literal text and other entities,
/// e.g. `"@sys.number @city"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeEntityDefinition {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<CompositeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeEntry {
    pub fragments: Vec<CompositeFragment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeFragment {
    Text(String),
    Entity(Box<EntityDefinition>),
}
