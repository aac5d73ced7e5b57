//! Framework bot model to DialogFlow resources.

pub mod entity;
pub mod intent;

use bn_model::EntityReferenceMapper;

pub use entity::DialogFlowEntityMapper;
pub use intent::DialogFlowIntentMapper;

/// Reference mapper for DialogFlow: system entities through the `@sys.*`
/// table (no fallback), developer entities as `@{name}`.
pub fn dialogflow_reference_mapper() -> EntityReferenceMapper {
    EntityReferenceMapper::with_system_entities("@")
}
