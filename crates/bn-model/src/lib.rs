//! Platform-neutral bot model shared by the botnlu recognition backends.
//!
//! Intents, entities and conversational states are described here once;
//! each backend crate translates them into its own wire format and maps
//! recognition results back into `RecognizedIntent`s.

pub mod bot;
pub mod entity;
pub mod entity_reference;
pub mod error;
pub mod intent;
pub mod provider;
pub mod registry;
pub mod state;

pub use bot::{BotDefinition, BotModel, StateDefinition};
pub use entity::*;
pub use entity_reference::{EntityReferenceMapper, is_system_identifier};
pub use error::{RecognitionError, RecognitionResult};
pub use intent::*;
pub use provider::IntentRecognitionProvider;
pub use registry::EventDefinitionRegistry;
pub use state::{State, StateContext};
