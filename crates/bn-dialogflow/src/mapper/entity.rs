//! Developer entity types.

use bn_model::{
    CompositeEntityDefinition, CompositeFragment, EntityDefinition, EntityReferenceMapper,
    MappingEntityDefinition, RecognitionError, RecognitionResult,
};

use crate::types::{Entity, EntityKind, EntityType};

pub struct DialogFlowEntityMapper {
    reference_mapper: EntityReferenceMapper,
}

impl DialogFlowEntityMapper {
    pub fn new(reference_mapper: EntityReferenceMapper) -> Self {
        Self { reference_mapper }
    }

    /// Map a mapping or composite entity to a DialogFlow entity type.
    ///
    /// System entities already exist in every agent and are rejected with
    /// [`RecognitionError::UnsupportedEntityKind`].
    pub fn map_entity_definition(&self, entity: &EntityDefinition) -> RecognitionResult<EntityType> {
        match entity {
            EntityDefinition::Base(base) => Err(RecognitionError::UnsupportedEntityKind(format!(
                "system entity '{}' is built into DialogFlow",
                base.entity_type
            ))),
            EntityDefinition::Mapping(mapping) => Ok(EntityType {
                display_name: mapping.name.clone(),
                kind: EntityKind::KindMap,
                entities: map_entries(mapping),
            }),
            EntityDefinition::Composite(composite) => Ok(EntityType {
                display_name: composite.name.clone(),
                kind: EntityKind::KindList,
                entities: self.composite_entries(composite)?,
            }),
        }
    }

    /// One list entity per entry, e.g. `"from @city:city"`.
    fn composite_entries(&self, composite: &CompositeEntityDefinition) -> RecognitionResult<Vec<Entity>> {
        let mut entities = Vec::with_capacity(composite.entries.len());
        for entry in &composite.entries {
            let mut pieces = Vec::with_capacity(entry.fragments.len());
            for fragment in &entry.fragments {
                match fragment {
                    CompositeFragment::Text(text) => {
                        let text = text.trim();
                        if !text.is_empty() {
                            pieces.push(text.to_string());
                        }
                    }
                    CompositeFragment::Entity(referred) => {
                        let reference = self.reference_mapper.mapping_for(referred).ok_or_else(|| {
                            RecognitionError::UnsupportedEntityKind(format!(
                                "no DialogFlow mapping for entity '{}' in composite '{}'",
                                referred.name(),
                                composite.name
                            ))
                        })?;
                        pieces.push(format!("{reference}:{}", referred.name()));
                    }
                }
            }
            let value = pieces.join(" ");
            entities.push(Entity {
                synonyms: vec![value.clone()],
                value,
            });
        }
        Ok(entities)
    }
}

/// DialogFlow expects the canonical value among the synonyms.
fn map_entries(mapping: &MappingEntityDefinition) -> Vec<Entity> {
    mapping
        .entries
        .iter()
        .map(|entry| {
            let mut synonyms = entry.synonyms.clone();
            synonyms.push(entry.reference_value.clone());
            Entity {
                value: entry.reference_value.clone(),
                synonyms,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::dialogflow_reference_mapper;
    use bn_model::CompositeEntry;

    fn mapper() -> DialogFlowEntityMapper {
        DialogFlowEntityMapper::new(dialogflow_reference_mapper())
    }

    #[test]
    fn mapping_entity_adds_value_to_synonyms() {
        let entity = EntityDefinition::Mapping(
            MappingEntityDefinition::new("city").with_entry("Barcelona", ["BCN", "Barna"]),
        );
        let mapped = mapper().map_entity_definition(&entity).unwrap();
        assert_eq!(mapped.display_name, "city");
        assert_eq!(mapped.kind, EntityKind::KindMap);
        assert_eq!(mapped.entities[0].value, "Barcelona");
        assert_eq!(mapped.entities[0].synonyms, ["BCN", "Barna", "Barcelona"]);
    }

    #[test]
    fn composite_entity_references_other_entities() {
        let city = EntityDefinition::Mapping(MappingEntityDefinition::new("city"));
        let entity = EntityDefinition::Composite(CompositeEntityDefinition {
            name: "trip".into(),
            entries: vec![CompositeEntry {
                fragments: vec![
                    CompositeFragment::Entity(Box::new(EntityDefinition::base("number"))),
                    CompositeFragment::Text(" days in ".into()),
                    CompositeFragment::Entity(Box::new(city)),
                ],
            }],
        });
        let mapped = mapper().map_entity_definition(&entity).unwrap();
        assert_eq!(mapped.kind, EntityKind::KindList);
        assert_eq!(mapped.entities[0].value, "@sys.number:number days in @city:city");
        assert_eq!(mapped.entities[0].synonyms, [mapped.entities[0].value.clone()]);
    }

    #[test]
    fn composite_with_unmapped_system_entity_fails() {
        let entity = EntityDefinition::Composite(CompositeEntityDefinition {
            name: "song".into(),
            entries: vec![CompositeEntry {
                fragments: vec![CompositeFragment::Entity(Box::new(EntityDefinition::base(
                    "music-artist",
                )))],
            }],
        });
        assert!(matches!(
            mapper().map_entity_definition(&entity),
            Err(RecognitionError::UnsupportedEntityKind(_))
        ));
    }

    #[test]
    fn base_entity_is_rejected() {
        assert!(matches!(
            mapper().map_entity_definition(&EntityDefinition::base("number")),
            Err(RecognitionError::UnsupportedEntityKind(_))
        ));
    }
}
