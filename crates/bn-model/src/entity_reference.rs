//! Name-substitution table from generic entity ids to backend identifiers.
//!
//! Each backend builds its own mapper: the system-entity table is shared,
//! but the custom-entity prefix and the fallback mapping differ.

use std::collections::HashMap;

use crate::entity::EntityDefinition;

/// Generic system entity ids and their `@sys.*` identifiers.
pub const SYSTEM_ENTITIES: &[(&str, &str)] = &[
    // Date & time
    ("date-time", "@sys.date-time"),
    ("date", "@sys.date"),
    ("date-period", "@sys.date-period"),
    ("time", "@sys.time"),
    ("time-period", "@sys.time-period"),
    // Numbers
    ("number", "@sys.number"),
    ("cardinal", "@sys.cardinal"),
    ("ordinal", "@sys.ordinal"),
    ("integer", "@sys.number-integer"),
    ("number-sequence", "@sys.number-sequence"),
    ("flight-number", "@sys.flight-number"),
    // Amounts with units
    ("unit-area", "@sys.unit-area"),
    ("unit-currency", "@sys.unit-currency"),
    ("unit-length", "@sys.unit-length"),
    ("unit-speed", "@sys.unit-speed"),
    ("unit-volume", "@sys.unit-volume"),
    ("unit-weight", "@sys.unit-weight"),
    ("unit-information", "@sys.unit-information"),
    ("percentage", "@sys.percentage"),
    ("temperature", "@sys.temperature"),
    ("duration", "@sys.duration"),
    ("age", "@sys.age"),
    // Geography
    ("address", "@sys.address"),
    ("street-address", "@sys.street-address"),
    ("zip-code", "@sys.zip-code"),
    ("capital", "@sys.geo-capital"),
    ("country", "@sys.geo-country"),
    ("country-code", "@sys.geo-country-code"),
    ("city", "@sys.geo-city"),
    ("state", "@sys.geo-state"),
    ("city-us", "@sys.geo-city-us"),
    ("state-us", "@sys.geo-state-us"),
    ("county-us", "@sys.geo-county-us"),
    ("city-gb", "@sys.geo-city-gb"),
    ("state-gb", "@sys.geo-state-gb"),
    ("county-gb", "@sys.geo-county-gb"),
    ("place-attraction-us", "@sys.place-attraction-us"),
    ("place-attraction-gb", "@sys.place-attraction-gb"),
    ("place-attraction", "@sys.place-attraction"),
    ("airport", "@sys.airport"),
    ("location", "@sys.location"),
    // Contact
    ("email", "@sys.email"),
    ("phone-number", "@sys.phone-number"),
    // Names
    ("given-name", "@sys.given-name"),
    ("last-name", "@sys.last-name"),
    // Other
    ("color", "@sys.color"),
    ("language", "@sys.language"),
    // Generic
    ("any", "@sys.any"),
    ("url", "@sys.url"),
];

/// Prefix shared by every system entity identifier.
pub const SYSTEM_ENTITY_PREFIX: &str = "@sys.";

#[derive(Debug, Clone, Default)]
pub struct EntityReferenceMapper {
    mappings: HashMap<String, String>,
    fallback: Option<String>,
    custom_prefix: String,
}

impl EntityReferenceMapper {
    /// Empty mapper; custom entities are referenced as `{custom_prefix}{name}`.
    pub fn new(custom_prefix: impl Into<String>) -> Self {
        Self {
            mappings: HashMap::new(),
            fallback: None,
            custom_prefix: custom_prefix.into(),
        }
    }

    /// Mapper preloaded with [`SYSTEM_ENTITIES`].
    pub fn with_system_entities(custom_prefix: impl Into<String>) -> Self {
        let mut mapper = Self::new(custom_prefix);
        for (generic, target) in SYSTEM_ENTITIES {
            mapper.add_mapping(*generic, *target);
        }
        mapper
    }

    pub fn add_mapping(&mut self, generic: impl Into<String>, target: impl Into<String>) {
        self.mappings.insert(generic.into(), target.into());
    }

    /// Mapping used for system entities that have no explicit entry.
    pub fn set_fallback(&mut self, target: impl Into<String>) {
        self.fallback = Some(target.into());
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Backend identifier for `entity`.
    ///
    /// Returns `None` only for a system entity without an explicit mapping
    /// when no fallback is configured.
    pub fn mapping_for(&self, entity: &EntityDefinition) -> Option<String> {
        match entity {
            EntityDefinition::Base(base) => match self.mappings.get(&base.entity_type) {
                Some(target) => Some(target.clone()),
                None => {
                    let fallback = self.fallback.clone();
                    if let Some(ref target) = fallback {
                        tracing::debug!(
                            entity = %base.entity_type,
                            fallback = %target,
                            "no explicit mapping for system entity, using fallback"
                        );
                    }
                    fallback
                }
            },
            EntityDefinition::Mapping(_) | EntityDefinition::Composite(_) => {
                Some(format!("{}{}", self.custom_prefix, entity.name()))
            }
        }
    }
}

/// Whether `identifier` names a backend system entity.
pub fn is_system_identifier(identifier: &str) -> bool {
    identifier.starts_with(SYSTEM_ENTITY_PREFIX)
}
