//! Intent definitions to NLUServer intents.

use std::collections::HashSet;

use bn_model::{
    EntityDefinition, EntityReferenceMapper, IntentDefinition, RecognitionError, RecognitionResult,
};

use super::adapt_entity_type_name;
use crate::dsl::{EntityParameter, Intent};

pub struct IntentMapper {
    reference_mapper: EntityReferenceMapper,
}

impl IntentMapper {
    pub fn new(reference_mapper: EntityReferenceMapper) -> Self {
        Self { reference_mapper }
    }

    /// Map `definition` to an NLUServer intent.
    ///
    /// Training sentences are copied as is: the server binds fragments itself.
    /// Each parameter keeps its first text fragment and refers to its entity
    /// type by name; the name is bound when the bot is built.
    pub fn map_intent_definition(&self, definition: &IntentDefinition) -> RecognitionResult<Intent> {
        let mut intent = Intent::new(definition.name.clone());
        intent.training_sentences = definition.training_sentences.clone();

        let mut seen = HashSet::new();
        for parameter in &definition.parameters {
            if !seen.insert(parameter.name.as_str()) {
                tracing::warn!(
                    intent = %definition.name,
                    parameter = %parameter.name,
                    "duplicate parameter name, keeping the first one"
                );
                continue;
            }
            if let EntityDefinition::Composite(_) = parameter.entity {
                return Err(RecognitionError::UnsupportedEntityKind(format!(
                    "parameter '{}' of intent '{}' uses {} '{}', which NLUServer cannot deploy",
                    parameter.name,
                    definition.name,
                    parameter.entity.kind_name(),
                    parameter.entity.name()
                )));
            }
            let fragment = parameter.text_fragments.first().ok_or_else(|| {
                RecognitionError::InvalidDefinition(format!(
                    "parameter '{}' of intent '{}' has no text fragment",
                    parameter.name, definition.name
                ))
            })?;
            let entity = self
                .reference_mapper
                .mapping_for(&parameter.entity)
                .ok_or_else(|| {
                    RecognitionError::UnsupportedEntityKind(format!(
                        "no NLUServer mapping for entity '{}' of parameter '{}'",
                        parameter.entity.name(),
                        parameter.name
                    ))
                })?;
            intent.parameters.push(EntityParameter::new(
                parameter.name.clone(),
                fragment.clone(),
                adapt_entity_type_name(&entity),
            ));
        }
        Ok(intent)
    }
}
