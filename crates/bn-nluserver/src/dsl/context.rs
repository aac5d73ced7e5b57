//! NLU contexts: the intents and entity types recognizable from one state.

use std::sync::Arc;

use super::entity::EntityType;
use super::intent::Intent;

#[derive(Debug, Clone, PartialEq)]
pub struct NluContext {
    pub name: String,
    pub intent_refs: Vec<IntentReference>,
    /// Entity types used by the context's intents. Filled when the bot is built.
    pub entity_types: Vec<Arc<EntityType>>,
}

impl NluContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intent_refs: Vec::new(),
            entity_types: Vec::new(),
        }
    }

    pub fn with_intent_ref(mut self, intent_name: impl Into<String>) -> Self {
        self.intent_refs.push(IntentReference::new(intent_name));
        self
    }

    /// Resolved intents of this context, in reference order.
    pub fn intents(&self) -> impl Iterator<Item = &Arc<Intent>> {
        self.intent_refs.iter().filter_map(|r| r.intent.as_ref())
    }

    /// Register an entity type once.
    pub(crate) fn add_entity_type(&mut self, entity: Arc<EntityType>) {
        if !self.entity_types.iter().any(|e| e.name() == entity.name()) {
            self.entity_types.push(entity);
        }
    }
}

/// Lazy binding from an intent name to the intent.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentReference {
    pub name: String,
    pub intent: Option<Arc<Intent>>,
}

impl IntentReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_types_registered_once() {
        let mut context = NluContext::new("Init");
        let number = Arc::new(EntityType::base("@sys.number"));
        context.add_entity_type(Arc::clone(&number));
        context.add_entity_type(number);
        assert_eq!(context.entity_types.len(), 1);
    }

    #[test]
    fn unresolved_refs_are_not_listed() {
        let context = NluContext::new("Init").with_intent_ref("Greetings");
        assert_eq!(context.intent_refs[0].name, "Greetings");
        assert_eq!(context.intents().count(), 0);
    }
}
