//! DialogFlow v2 REST resources produced by the mappers.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// Each entity has a canonical value and synonyms.
    KindMap,
    /// Each entity is a list of values, possibly referencing other entity types.
    KindList,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    pub display_name: String,
    pub kind: EntityKind,
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub value: String,
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub display_name: String,
    pub training_phrases: Vec<TrainingPhrase>,
    pub input_context_names: Vec<String>,
    pub output_contexts: Vec<Context>,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingPhrase {
    #[serde(rename = "type")]
    pub phrase_type: &'static str,
    pub parts: Vec<TrainingPhrasePart>,
}

impl TrainingPhrase {
    pub fn example(parts: Vec<TrainingPhrasePart>) -> Self {
        Self {
            phrase_type: "EXAMPLE",
            parts,
        }
    }

    /// The phrase as typed by a user.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// A piece of a training phrase; annotated parts carry the entity type and
/// the parameter name (alias) they fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPhrasePart {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl TrainingPhrasePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity_type: None,
            alias: None,
        }
    }

    pub fn annotated(text: impl Into<String>, entity_type: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity_type: Some(entity_type.into()),
            alias: Some(alias.into()),
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.entity_type.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub name: String,
    pub lifespan_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub display_name: String,
    pub entity_type_display_name: String,
    pub value: String,
}
