//! DialogFlow mapping for botnlu.
//!
//! Builds DialogFlow v2 entity types and intents (annotated training phrases,
//! input/output contexts, parameters) from the framework bot model. The
//! resulting types serialize to the REST API's JSON; talking to the API is
//! left to the caller.

pub mod config;
pub mod mapper;
pub mod types;

pub use config::DialogFlowConfig;
pub use mapper::{DialogFlowEntityMapper, DialogFlowIntentMapper, dialogflow_reference_mapper};
pub use types::{
    Context, Entity, EntityKind, EntityType, Intent, Parameter, TrainingPhrase, TrainingPhrasePart,
};
