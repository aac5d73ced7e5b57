//! Serializable description of a whole bot (entities, intents, states).
//!
//! Lets a bot be loaded from a JSON file instead of being built by the
//! conversational DSL.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::EntityDefinition;
use crate::error::{RecognitionError, RecognitionResult};
use crate::intent::IntentDefinition;
use crate::registry::EventDefinitionRegistry;
use crate::state::State;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotDefinition {
    #[serde(default)]
    pub entities: Vec<EntityDefinition>,
    #[serde(default)]
    pub intents: Vec<IntentDefinition>,
    #[serde(default)]
    pub states: Vec<StateDefinition>,
}

/// A state that refers to its reachable intents by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDefinition {
    pub name: String,
    #[serde(default)]
    pub intents: Vec<String>,
}

/// A bot definition with state references resolved.
#[derive(Debug)]
pub struct BotModel {
    pub entities: Vec<EntityDefinition>,
    pub registry: EventDefinitionRegistry,
    pub states: Vec<Arc<State>>,
}

impl BotDefinition {
    /// Register every intent and resolve the intent names of each state.
    pub fn into_model(self) -> RecognitionResult<BotModel> {
        let mut registry = EventDefinitionRegistry::new();
        let mut by_name: HashMap<String, Arc<IntentDefinition>> = HashMap::new();
        for intent in self.intents {
            if by_name.contains_key(&intent.name) {
                return Err(RecognitionError::DuplicateDefinition {
                    kind: "intent",
                    name: intent.name,
                });
            }
            let handle = registry.register_intent_definition(intent);
            by_name.insert(handle.name.clone(), handle);
        }

        let mut states = Vec::with_capacity(self.states.len());
        for definition in self.states {
            let mut state = State::new(definition.name);
            for intent_name in definition.intents {
                let intent = by_name.get(&intent_name).ok_or_else(|| {
                    RecognitionError::UnresolvedReference {
                        kind: "intent",
                        name: intent_name.clone(),
                        owner: state.name.clone(),
                    }
                })?;
                state.accessed_intents.push(Arc::clone(intent));
            }
            states.push(Arc::new(state));
        }

        Ok(BotModel {
            entities: self.entities,
            registry,
            states,
        })
    }
}
