//! The contract every intent recognition backend implements.

use async_trait::async_trait;

use crate::entity::EntityDefinition;
use crate::error::RecognitionResult;
use crate::intent::{IntentDefinition, RecognizedIntent};
use crate::state::{State, StateContext};

/// A backend that learns the bot model at startup and classifies user
/// utterances at every conversational turn.
///
/// Registration and training take `&mut self`: the model is written once,
/// then only read while recognizing.
#[async_trait]
pub trait IntentRecognitionProvider: Send + Sync {
    async fn register_entity_definition(&mut self, entity: &EntityDefinition) -> RecognitionResult<()>;

    async fn register_intent_definition(&mut self, intent: &IntentDefinition) -> RecognitionResult<()>;

    /// Register the recognition context of a conversational state.
    async fn register_state(&mut self, state: &State) -> RecognitionResult<()>;

    /// Deploy the registered model and train the backend. May block for minutes.
    async fn train_ml_engine(&mut self) -> RecognitionResult<()>;

    /// Recognize `input` in the conversation described by `context`.
    async fn get_intent(&self, input: &str, context: &StateContext) -> RecognitionResult<RecognizedIntent>;

    async fn shutdown(&mut self) -> RecognitionResult<()>;

    fn is_shutdown(&self) -> bool;

    /// Name of this backend (for logging).
    fn provider_name(&self) -> &str;
}
