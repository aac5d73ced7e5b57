//! Intents and their entity parameters.

use std::sync::Arc;

use super::entity::EntityType;

#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub name: String,
    pub training_sentences: Vec<String>,
    pub parameters: Vec<EntityParameter>,
}

impl Intent {
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

    pub fn with_parameter(mut self, parameter: EntityParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&EntityParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A parameter bound to a literal fragment of the training sentences.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityParameter {
    pub name: String,
    pub fragment: String,
    pub entity: EntityRef,
}

impl EntityParameter {
    /// Parameter whose entity type is resolved when the bot is built.
    pub fn new(name: impl Into<String>, fragment: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fragment: fragment.into(),
            entity: EntityRef::Unresolved(entity_name.into()),
        }
    }

    pub fn entity_name(&self) -> &str {
        self.entity.name()
    }
}

/// Entity type of a parameter: a name until the bot is built, then the type itself.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRef {
    Unresolved(String),
    Resolved(Arc<EntityType>),
}

impl EntityRef {
    pub fn name(&self) -> &str {
        match self {
            Self::Unresolved(name) => name,
            Self::Resolved(entity) => entity.name(),
        }
    }

    pub fn resolved(&self) -> Option<&Arc<EntityType>> {
        match self {
            Self::Unresolved(_) => None,
            Self::Resolved(entity) => Some(entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_starts_unresolved() {
        let param = EntityParameter::new("city", "Paris", "city");
        assert_eq!(param.entity_name(), "city");
        assert!(param.entity.resolved().is_none());
    }

    #[test]
    fn resolved_ref_reports_type_name() {
        let entity = EntityRef::Resolved(Arc::new(EntityType::base("@sys.number")));
        assert_eq!(entity.name(), "@sys.number");
        assert!(entity.resolved().is_some());
    }

    #[test]
    fn intent_builder() {
        let intent = Intent::new("Weather")
            .with_training_sentence("Weather in Paris")
            .with_parameter(EntityParameter::new("city", "Paris", "city"));
        assert_eq!(intent.training_sentences, ["Weather in Paris"]);
        assert!(intent.parameter("city").is_some());
        assert!(intent.parameter("date").is_none());
    }
}
