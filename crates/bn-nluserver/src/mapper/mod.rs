//! Translation between the framework bot model and NLUServer's.

pub mod entity;
pub mod intent;
pub mod recognized_intent;
pub mod state;

use bn_model::EntityReferenceMapper;

pub use entity::EntityMapper;
pub use intent::IntentMapper;
pub use recognized_intent::RecognizedIntentMapper;
pub use state::{StateMapper, adapt_state_name};

/// Identifier used for system entities missing from the system table.
pub const ANY_ENTITY: &str = "@sys.any";

/// Reference mapper for NLUServer: system table with `@sys.any` as the
/// fallback, custom entities referenced by their bare name.
pub fn nlu_server_reference_mapper() -> EntityReferenceMapper {
    let mut mapper = EntityReferenceMapper::with_system_entities("");
    mapper.set_fallback(ANY_ENTITY);
    mapper
}

/// Entity type names travel without underscores; the server tokenizer
/// splits on them.
pub fn adapt_entity_type_name(name: &str) -> String {
    name.replace('_', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bn_model::EntityDefinition;

    #[test]
    fn adapt_strips_every_underscore() {
        assert_eq!(adapt_entity_type_name("my_city_name"), "mycityname");
        assert_eq!(adapt_entity_type_name("city"), "city");
        assert_eq!(adapt_entity_type_name("__"), "");
    }

    #[test]
    fn reference_mapper_falls_back_to_any() {
        let mapper = nlu_server_reference_mapper();
        assert_eq!(
            mapper.mapping_for(&EntityDefinition::base("music-artist")).as_deref(),
            Some(ANY_ENTITY)
        );
        assert_eq!(
            mapper.mapping_for(&EntityDefinition::base("date")).as_deref(),
            Some("@sys.date")
        );
    }
}
