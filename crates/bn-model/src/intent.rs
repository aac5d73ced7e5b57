//! Intent definitions and recognition results.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::entity::EntityDefinition;

/// Name of the sentinel intent returned when nothing confident matched.
pub const DEFAULT_FALLBACK_INTENT_NAME: &str = "Default_Fallback_Intent";

static DEFAULT_FALLBACK_INTENT: LazyLock<Arc<IntentDefinition>> =
    LazyLock::new(|| Arc::new(IntentDefinition::new(DEFAULT_FALLBACK_INTENT_NAME)));

/// The well-known fallback intent (shared instance).
pub fn default_fallback_intent() -> Arc<IntentDefinition> {
    Arc::clone(&DEFAULT_FALLBACK_INTENT)
}

/// A recognizable category of user utterances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    pub name: String,
    #[serde(default)]
    pub training_sentences: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ContextParameter>,
}

impl IntentDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            training_sentences: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_training_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.training_sentences.push(sentence.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ContextParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ContextParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A parameter extracted from the training sentences of an intent.
///
/// `text_fragments` are the literal substrings of the training sentences
/// bound to this parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextParameter {
    pub name: String,
    #[serde(default)]
    pub text_fragments: Vec<String>,
    pub entity: EntityDefinition,
}

impl ContextParameter {
    pub fn new(name: impl Into<String>, fragment: impl Into<String>, entity: EntityDefinition) -> Self {
        Self {
            name: name.into(),
            text_fragments: vec![fragment.into()],
            entity,
        }
    }
}

/// A value matched for one parameter of a recognized intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextParameterValue {
    pub parameter: String,
    pub value: String,
    /// Backend-specific extra information (e.g. the NER span).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub info: HashMap<String, serde_json::Value>,
}

/// The outcome of recognizing one user utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedIntent {
    pub definition: Arc<IntentDefinition>,
    /// Confidence in `[0, 1]`.
    pub recognition_confidence: f32,
    pub matched_input: String,
    pub values: Vec<ContextParameterValue>,
}

impl RecognizedIntent {
    pub fn new(
        definition: Arc<IntentDefinition>,
        recognition_confidence: f32,
        matched_input: impl Into<String>,
    ) -> Self {
        Self {
            definition,
            recognition_confidence,
            matched_input: matched_input.into(),
            values: Vec::new(),
        }
    }

    /// Build a recognition result for the default fallback intent.
    pub fn fallback(recognition_confidence: f32, matched_input: impl Into<String>) -> Self {
        Self::new(default_fallback_intent(), recognition_confidence, matched_input)
    }

    pub fn is_fallback(&self) -> bool {
        self.definition.name == DEFAULT_FALLBACK_INTENT_NAME
    }

    /// Value matched for `parameter`, if any.
    pub fn value(&self, parameter: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.parameter == parameter)
            .map(|v| v.value.as_str())
    }
}
