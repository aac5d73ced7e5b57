//! Conversational states to NLU contexts.

use bn_model::{RecognitionError, RecognitionResult, State};

use crate::dsl::NluContext;

/// Context name for a state: underscores become spaces.
///
/// Used both when registering a state and when looking up the context of
/// the current state at prediction time.
pub fn adapt_state_name(name: &str) -> String {
    name.replace('_', " ")
}

#[derive(Debug, Default)]
pub struct StateMapper;

impl StateMapper {
    pub fn new() -> Self {
        Self
    }

    /// Map `state` to a context referencing its reachable intents by name.
    ///
    /// A state without outgoing intents has nothing to recognize and fails
    /// with [`RecognitionError::EmptyState`].
    pub fn map_state_definition(&self, state: &State) -> RecognitionResult<NluContext> {
        if state.accessed_intents.is_empty() {
            return Err(RecognitionError::EmptyState(state.name.clone()));
        }
        Ok(state
            .accessed_intents
            .iter()
            .fold(NluContext::new(adapt_state_name(&state.name)), |context, intent| {
                context.with_intent_ref(intent.name.clone())
            }))
    }
}
