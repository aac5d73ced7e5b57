//! Intents with annotated training phrases.

use std::collections::HashSet;

use bn_model::{EntityReferenceMapper, IntentDefinition, RecognitionError, RecognitionResult};

use crate::config::DialogFlowConfig;
use crate::types::{Context, Intent, Parameter, TrainingPhrase, TrainingPhrasePart};

/// Context set on every matched intent so follow-up intents can be enabled.
pub const OUTPUT_CONTEXT: &str = "Botnlu";
const OUTPUT_CONTEXT_LIFESPAN: u32 = 2;

/// A parameter fragment to annotate in training sentences.
struct FragmentBinding<'a> {
    fragment: &'a str,
    entity_type: String,
    alias: &'a str,
}

pub struct DialogFlowIntentMapper {
    config: DialogFlowConfig,
    reference_mapper: EntityReferenceMapper,
}

impl DialogFlowIntentMapper {
    pub fn new(config: DialogFlowConfig, reference_mapper: EntityReferenceMapper) -> Self {
        Self {
            config,
            reference_mapper,
        }
    }

    pub fn map_intent_definition(&self, definition: &IntentDefinition) -> RecognitionResult<Intent> {
        let bindings = self.fragment_bindings(definition)?;
        check_fragments_used(definition)?;

        let training_phrases = definition
            .training_sentences
            .iter()
            .map(|sentence| training_phrase(sentence, &bindings))
            .collect();

        Ok(Intent {
            display_name: adapt_intent_name(&definition.name),
            training_phrases,
            input_context_names: vec![self.config.context_name(&format!("Enable{}", definition.name))],
            output_contexts: vec![Context {
                name: self.config.context_name(OUTPUT_CONTEXT),
                lifespan_count: OUTPUT_CONTEXT_LIFESPAN,
            }],
            parameters: self.parameters(definition)?,
        })
    }

    fn entity_type_for(&self, definition: &IntentDefinition, index: usize) -> RecognitionResult<String> {
        let parameter = &definition.parameters[index];
        self.reference_mapper
            .mapping_for(&parameter.entity)
            .ok_or_else(|| {
                RecognitionError::UnsupportedEntityKind(format!(
                    "no DialogFlow mapping for entity '{}' of parameter '{}' in intent '{}'",
                    parameter.entity.name(),
                    parameter.name,
                    definition.name
                ))
            })
    }

    fn fragment_bindings<'a>(&self, definition: &'a IntentDefinition) -> RecognitionResult<Vec<FragmentBinding<'a>>> {
        let mut bindings = Vec::new();
        for (index, parameter) in definition.parameters.iter().enumerate() {
            let entity_type = self.entity_type_for(definition, index)?;
            for fragment in parameter.text_fragments.iter().filter(|f| !f.is_empty()) {
                bindings.push(FragmentBinding {
                    fragment,
                    entity_type: entity_type.clone(),
                    alias: &parameter.name,
                });
            }
        }
        Ok(bindings)
    }

    /// One parameter per name; repeated names are reported and skipped.
    fn parameters(&self, definition: &IntentDefinition) -> RecognitionResult<Vec<Parameter>> {
        let mut seen = HashSet::new();
        let mut parameters = Vec::with_capacity(definition.parameters.len());
        for (index, parameter) in definition.parameters.iter().enumerate() {
            if !seen.insert(parameter.name.as_str()) {
                tracing::warn!(
                    intent = %definition.name,
                    parameter = %parameter.name,
                    "parameter is defined multiple times"
                );
                continue;
            }
            parameters.push(Parameter {
                display_name: parameter.name.clone(),
                entity_type_display_name: self.entity_type_for(definition, index)?,
                value: format!("${}", parameter.name),
            });
        }
        Ok(parameters)
    }
}

/// Display names use spaces where the model uses underscores.
pub fn adapt_intent_name(name: &str) -> String {
    name.replace('_', " ")
}

/// Every parameter must be bound by at least one training sentence.
fn check_fragments_used(definition: &IntentDefinition) -> RecognitionResult<()> {
    for parameter in &definition.parameters {
        let used = parameter.text_fragments.iter().any(|fragment| {
            !fragment.is_empty()
                && definition
                    .training_sentences
                    .iter()
                    .any(|sentence| sentence.contains(fragment.as_str()))
        });
        if !used {
            return Err(RecognitionError::InvalidDefinition(format!(
                "no training sentence of intent '{}' contains a fragment of parameter '{}'",
                definition.name, parameter.name
            )));
        }
    }
    Ok(())
}

/// Split `sentence` into plain and annotated parts.
///
/// Fragment occurrences are matched left to right; on overlap the earliest,
/// then the longest, wins. Empty parts are dropped.
fn training_phrase(sentence: &str, bindings: &[FragmentBinding<'_>]) -> TrainingPhrase {
    let mut matches: Vec<(usize, usize, &FragmentBinding<'_>)> = bindings
        .iter()
        .flat_map(|binding| {
            sentence
                .match_indices(binding.fragment)
                .map(move |(start, text)| (start, start + text.len(), binding))
        })
        .collect();
    matches.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut parts = Vec::new();
    let mut cursor = 0;
    for (start, end, binding) in matches {
        if start < cursor {
            continue;
        }
        if start > cursor {
            parts.push(TrainingPhrasePart::text(&sentence[cursor..start]));
        }
        parts.push(TrainingPhrasePart::annotated(
            &sentence[start..end],
            binding.entity_type.as_str(),
            binding.alias,
        ));
        cursor = end;
    }
    if cursor < sentence.len() {
        parts.push(TrainingPhrasePart::text(&sentence[cursor..]));
    }
    TrainingPhrase::example(parts)
}
