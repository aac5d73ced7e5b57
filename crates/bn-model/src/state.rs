//! Conversational states and per-session state contexts.

use std::sync::Arc;

use crate::intent::IntentDefinition;

/// A conversational state and the intents reachable from it.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub name: String,
    pub accessed_intents: Vec<Arc<IntentDefinition>>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accessed_intents: Vec::new(),
        }
    }

    pub fn with_intent(mut self, intent: Arc<IntentDefinition>) -> Self {
        self.accessed_intents.push(intent);
        self
    }

    /// Whether an intent with this name can be matched from the state.
    pub fn accesses(&self, intent_name: &str) -> bool {
        self.accessed_intents.iter().any(|i| i.name == intent_name)
    }
}

/// The current position of one conversation (session) in the state machine.
#[derive(Debug, Clone)]
pub struct StateContext {
    pub context_id: String,
    pub state: Arc<State>,
}

impl StateContext {
    pub fn new(context_id: impl Into<String>, state: Arc<State>) -> Self {
        Self {
            context_id: context_id.into(),
            state,
        }
    }
}
