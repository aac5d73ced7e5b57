//! Entity definitions to NLUServer entity types.

use bn_model::{EntityDefinition, EntityReferenceMapper, RecognitionError, RecognitionResult};

use super::adapt_entity_type_name;
use crate::dsl::{CustomEntityTypeEntry, EntityType};

pub struct EntityMapper {
    reference_mapper: EntityReferenceMapper,
}

impl EntityMapper {
    pub fn new(reference_mapper: EntityReferenceMapper) -> Self {
        Self { reference_mapper }
    }

    /// Map `entity` to the type registered on the server.
    ///
    /// Composite entities have no NLUServer counterpart and fail with
    /// [`RecognitionError::UnsupportedEntityKind`].
    pub fn map_entity_definition(&self, entity: &EntityDefinition) -> RecognitionResult<EntityType> {
        match entity {
            EntityDefinition::Base(_) => {
                let target = self.reference_mapper.mapping_for(entity).ok_or_else(|| {
                    RecognitionError::UnsupportedEntityKind(format!(
                        "no NLUServer mapping for system entity '{}'",
                        entity.name()
                    ))
                })?;
                Ok(EntityType::base(adapt_entity_type_name(&target)))
            }
            EntityDefinition::Mapping(mapping) => {
                let mut entries = Vec::with_capacity(mapping.entries.len());
                for entry in &mapping.entries {
                    if entry.reference_value.is_empty() {
                        return Err(RecognitionError::InvalidDefinition(format!(
                            "entity '{}' has an entry with an empty value",
                            mapping.name
                        )));
                    }
                    entries.push(CustomEntityTypeEntry::new(
                        entry.reference_value.clone(),
                        entry.synonyms.clone(),
                    ));
                }
                Ok(EntityType::custom(adapt_entity_type_name(&mapping.name), entries))
            }
            EntityDefinition::Composite(_) => Err(RecognitionError::UnsupportedEntityKind(format!(
                "{} '{}' cannot be deployed to NLUServer",
                entity.kind_name(),
                entity.name()
            ))),
        }
    }
}
