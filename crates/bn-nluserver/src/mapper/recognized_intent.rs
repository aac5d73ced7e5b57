//! Predictions back to recognized intents.

use bn_model::{
    ContextParameterValue, EventDefinitionRegistry, IntentDefinition, RecognizedIntent,
    default_fallback_intent,
};

use crate::dsl::{Classification, MatchedParam, Prediction};

pub struct RecognizedIntentMapper {
    confidence_threshold: f32,
    registry: EventDefinitionRegistry,
}

impl RecognizedIntentMapper {
    pub fn new(confidence_threshold: f32, registry: EventDefinitionRegistry) -> Self {
        Self {
            confidence_threshold,
            registry,
        }
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    pub fn registry(&self) -> &EventDefinitionRegistry {
        &self.registry
    }

    /// Every classification scoring strictly above the threshold, in server
    /// order. Does not pick a winner.
    pub fn map_recognition_result(&self, prediction: &Prediction) -> Vec<RecognizedIntent> {
        prediction
            .classifications
            .iter()
            .filter(|c| c.score > self.confidence_threshold)
            .map(|c| self.map_classification(c))
            .collect()
    }

    fn map_classification(&self, classification: &Classification) -> RecognizedIntent {
        let definition = match self.registry.intent_definition(&classification.intent) {
            Some(definition) => definition,
            None => {
                tracing::warn!(
                    intent = %classification.intent,
                    "unknown intent returned by NLUServer, using the default fallback intent"
                );
                default_fallback_intent()
            }
        };
        let mut recognized = RecognizedIntent::new(
            definition,
            classification.score,
            classification.matched_utterance.clone(),
        );
        recognized.values = map_parameter_values(&recognized.definition, &classification.matched_params);
        recognized
    }
}

/// Values of the matched parameters that `definition` declares; others are dropped.
pub fn map_parameter_values(
    definition: &IntentDefinition,
    matched_params: &[MatchedParam],
) -> Vec<ContextParameterValue> {
    matched_params
        .iter()
        .filter(|m| definition.parameter(&m.param_name).is_some())
        .map(|m| ContextParameterValue {
            parameter: m.param_name.clone(),
            value: m.value.clone(),
            info: m.info.clone(),
        })
        .collect()
}
