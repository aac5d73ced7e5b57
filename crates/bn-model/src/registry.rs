//! Registry of the intents known to the running bot.
//!
//! Recognition backends use it to turn intent names returned by a remote
//! service back into local `IntentDefinition`s.

use std::collections::HashMap;
use std::sync::Arc;

use crate::intent::IntentDefinition;

#[derive(Debug, Default)]
pub struct EventDefinitionRegistry {
    intents: HashMap<String, Arc<IntentDefinition>>,
}

impl EventDefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an intent definition and return the shared handle.
    pub fn register_intent_definition(&mut self, intent: IntentDefinition) -> Arc<IntentDefinition> {
        let intent = Arc::new(intent);
        self.intents.insert(intent.name.clone(), Arc::clone(&intent));
        intent
    }

    pub fn intent_definition(&self, name: &str) -> Option<Arc<IntentDefinition>> {
        self.intents.get(name).cloned()
    }

    pub fn remove_intent_definition(&mut self, name: &str) -> Option<Arc<IntentDefinition>> {
        self.intents.remove(name)
    }

    pub fn intent_definitions(&self) -> impl Iterator<Item = &Arc<IntentDefinition>> {
        self.intents.values()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
