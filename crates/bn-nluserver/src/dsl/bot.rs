//! The bot aggregate: every intent, entity type and context of one bot.
//!
//! Registration goes through [`BotDataBuilder`], which accepts definitions in
//! any order. [`BotDataBuilder::build`] then resolves the name references in
//! two passes and freezes the result into an immutable [`BotData`]:
//!
//! 1. index entity types and intents by name, binding each parameter to its
//!    entity type;
//! 2. bind every context's intent references and collect the entity types
//!    those intents use.

use std::collections::HashMap;
use std::sync::Arc;

use bn_model::{RecognitionError, RecognitionResult, is_system_identifier};

use super::context::NluContext;
use super::entity::EntityType;
use super::intent::{EntityRef, Intent};

/// Mutable registration phase of a bot.
#[derive(Debug, Default)]
pub struct BotDataBuilder {
    bot_name: String,
    intents: Vec<Intent>,
    entity_types: Vec<EntityType>,
    contexts: Vec<NluContext>,
}

impl BotDataBuilder {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            ..Default::default()
        }
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn add_intent(&mut self, intent: Intent) -> RecognitionResult<()> {
        if self.contains_intent(&intent.name) {
            return Err(RecognitionError::DuplicateDefinition {
                kind: "intent",
                name: intent.name,
            });
        }
        self.intents.push(intent);
        Ok(())
    }

    pub fn add_entity_type(&mut self, entity: EntityType) -> RecognitionResult<()> {
        if self.contains_entity_type(entity.name()) {
            return Err(RecognitionError::DuplicateDefinition {
                kind: "entity type",
                name: entity.name().to_string(),
            });
        }
        self.entity_types.push(entity);
        Ok(())
    }

    pub fn add_nlu_context(&mut self, context: NluContext) -> RecognitionResult<()> {
        if self.contains_nlu_context(&context.name) {
            return Err(RecognitionError::DuplicateDefinition {
                kind: "context",
                name: context.name,
            });
        }
        self.contexts.push(context);
        Ok(())
    }

    pub fn contains_intent(&self, name: &str) -> bool {
        self.intent(name).is_some()
    }

    pub fn contains_entity_type(&self, name: &str) -> bool {
        self.entity_type(name).is_some()
    }

    pub fn contains_nlu_context(&self, name: &str) -> bool {
        self.nlu_context(name).is_some()
    }

    pub fn intent(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.name == name)
    }

    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name() == name)
    }

    pub fn nlu_context(&self, name: &str) -> Option<&NluContext> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Resolve every name reference and freeze the bot.
    ///
    /// Fails with [`RecognitionError::UnresolvedReference`] on the first
    /// intent or entity type name that was never registered. System entity
    /// types (`@sys.*`) need no registration.
    pub fn build(self) -> RecognitionResult<BotData> {
        // Pass 1: entity types, then intents with their parameters bound.
        let mut entity_types: Vec<Arc<EntityType>> =
            self.entity_types.into_iter().map(Arc::new).collect();
        let mut entity_index: HashMap<String, Arc<EntityType>> = entity_types
            .iter()
            .map(|e| (e.name().to_string(), Arc::clone(e)))
            .collect();

        let mut intents = Vec::with_capacity(self.intents.len());
        let mut intent_index: HashMap<String, Arc<Intent>> = HashMap::new();
        for mut intent in self.intents {
            for param in &mut intent.parameters {
                let name = param.entity_name().to_string();
                let entity = match entity_index.get(&name) {
                    Some(entity) => Arc::clone(entity),
                    None if is_system_identifier(&name) => {
                        tracing::debug!(entity = %name, "registering implicit system entity type");
                        let entity = Arc::new(EntityType::base(name.clone()));
                        entity_index.insert(name, Arc::clone(&entity));
                        entity_types.push(Arc::clone(&entity));
                        entity
                    }
                    None => {
                        return Err(RecognitionError::UnresolvedReference {
                            kind: "entity type",
                            name,
                            owner: intent.name.clone(),
                        });
                    }
                };
                param.entity = EntityRef::Resolved(entity);
            }
            let intent = Arc::new(intent);
            intent_index.insert(intent.name.clone(), Arc::clone(&intent));
            intents.push(intent);
        }

        // Pass 2: contexts.
        let mut contexts = Vec::with_capacity(self.contexts.len());
        for mut context in self.contexts {
            let mut used_types = Vec::new();
            for reference in &mut context.intent_refs {
                let intent = intent_index.get(&reference.name).ok_or_else(|| {
                    RecognitionError::UnresolvedReference {
                        kind: "intent",
                        name: reference.name.clone(),
                        owner: context.name.clone(),
                    }
                })?;
                used_types.extend(
                    intent
                        .parameters
                        .iter()
                        .filter_map(|p| p.entity.resolved().cloned()),
                );
                reference.intent = Some(Arc::clone(intent));
            }
            for entity in used_types {
                context.add_entity_type(entity);
            }
            contexts.push(context);
        }

        tracing::debug!(
            bot = %self.bot_name,
            intents = intents.len(),
            entity_types = entity_types.len(),
            contexts = contexts.len(),
            "bot data built"
        );

        Ok(BotData {
            bot_name: self.bot_name,
            intents,
            entity_types,
            contexts,
        })
    }
}

/// A fully resolved, read-only bot.
#[derive(Debug, Clone)]
pub struct BotData {
    bot_name: String,
    intents: Vec<Arc<Intent>>,
    entity_types: Vec<Arc<EntityType>>,
    contexts: Vec<NluContext>,
}

impl BotData {
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn intents(&self) -> &[Arc<Intent>] {
        &self.intents
    }

    pub fn entity_types(&self) -> &[Arc<EntityType>] {
        &self.entity_types
    }

    pub fn nlu_contexts(&self) -> &[NluContext] {
        &self.contexts
    }

    pub fn intent(&self, name: &str) -> Option<&Arc<Intent>> {
        self.intents.iter().find(|i| i.name == name)
    }

    pub fn entity_type(&self, name: &str) -> Option<&Arc<EntityType>> {
        self.entity_types.iter().find(|e| e.name() == name)
    }

    pub fn nlu_context(&self, name: &str) -> Option<&NluContext> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn contains_intent(&self, name: &str) -> bool {
        self.intent(name).is_some()
    }

    pub fn contains_nlu_context(&self, name: &str) -> bool {
        self.nlu_context(name).is_some()
    }

    /// No intents and no contexts: the server accepts it but cannot train it.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty() && self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::entity::CustomEntityTypeEntry;
    use crate::dsl::intent::EntityParameter;

    fn city() -> EntityType {
        EntityType::custom(
            "city",
            vec![CustomEntityTypeEntry::new("Paris", vec!["City of Light".into()])],
        )
    }

    fn weather() -> Intent {
        Intent::new("Weather")
            .with_training_sentence("Weather in Paris")
            .with_training_sentence("What is the weather in Paris")
            .with_parameter(EntityParameter::new("city", "Paris", "city"))
    }

    #[test]
    fn contains_intent_after_add() {
        let mut builder = BotDataBuilder::new("bot");
        assert!(!builder.contains_intent("Weather"));
        builder.add_intent(weather()).unwrap();
        assert!(builder.contains_intent("Weather"));
        assert!(!builder.contains_intent("weather"));
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut builder = BotDataBuilder::new("bot");
        builder.add_intent(weather()).unwrap();
        builder.add_entity_type(city()).unwrap();
        builder.add_nlu_context(NluContext::new("Init")).unwrap();

        assert!(matches!(
            builder.add_intent(weather()),
            Err(RecognitionError::DuplicateDefinition { kind: "intent", .. })
        ));
        assert!(matches!(
            builder.add_entity_type(city()),
            Err(RecognitionError::DuplicateDefinition { kind: "entity type", .. })
        ));
        assert!(matches!(
            builder.add_nlu_context(NluContext::new("Init")),
            Err(RecognitionError::DuplicateDefinition { kind: "context", .. })
        ));
    }

    #[test]
    fn lookups_return_none_when_missing() {
        let builder = BotDataBuilder::new("bot");
        assert!(builder.intent("Nope").is_none());
        assert!(builder.entity_type("nope").is_none());
        assert!(builder.nlu_context("nope").is_none());
    }

    #[test]
    fn build_resolves_registered_out_of_order() {
        let mut builder = BotDataBuilder::new("bot");
        // Context first, then the intent, then the entity type.
        builder
            .add_nlu_context(NluContext::new("Init").with_intent_ref("Weather"))
            .unwrap();
        builder.add_intent(weather()).unwrap();
        builder.add_entity_type(city()).unwrap();

        let bot = builder.build().unwrap();
        let context = bot.nlu_context("Init").unwrap();
        let intent = context.intents().next().unwrap();
        assert!(Arc::ptr_eq(intent, bot.intent("Weather").unwrap()));
        assert_eq!(context.entity_types.len(), 1);
        assert_eq!(context.entity_types[0].name(), "city");

        let param = intent.parameter("city").unwrap();
        assert!(Arc::ptr_eq(
            param.entity.resolved().unwrap(),
            bot.entity_type("city").unwrap()
        ));
    }

    #[test]
    fn context_collects_each_type_once() {
        let mut builder = BotDataBuilder::new("bot");
        builder.add_entity_type(city()).unwrap();
        builder.add_intent(weather()).unwrap();
        builder
            .add_intent(
                Intent::new("Travel")
                    .with_training_sentence("Fly to Paris")
                    .with_parameter(EntityParameter::new("destination", "Paris", "city")),
            )
            .unwrap();
        builder
            .add_nlu_context(
                NluContext::new("Init")
                    .with_intent_ref("Weather")
                    .with_intent_ref("Travel"),
            )
            .unwrap();

        let bot = builder.build().unwrap();
        assert_eq!(bot.nlu_context("Init").unwrap().entity_types.len(), 1);
    }

    #[test]
    fn system_entities_resolve_implicitly() {
        let mut builder = BotDataBuilder::new("bot");
        builder
            .add_intent(
                Intent::new("Count")
                    .with_training_sentence("I want 3")
                    .with_parameter(EntityParameter::new("amount", "3", "@sys.number")),
            )
            .unwrap();
        builder
            .add_nlu_context(NluContext::new("Init").with_intent_ref("Count"))
            .unwrap();

        let bot = builder.build().unwrap();
        let number = bot.entity_type("@sys.number").unwrap();
        assert!(number.is_base());
        assert_eq!(bot.nlu_context("Init").unwrap().entity_types.len(), 1);
    }

    #[test]
    fn unknown_entity_type_fails() {
        let mut builder = BotDataBuilder::new("bot");
        builder.add_intent(weather()).unwrap();
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            RecognitionError::UnresolvedReference { kind: "entity type", ref name, ref owner }
                if name == "city" && owner == "Weather"
        ));
    }

    #[test]
    fn unknown_intent_reference_fails() {
        let mut builder = BotDataBuilder::new("bot");
        builder
            .add_nlu_context(NluContext::new("Init").with_intent_ref("Missing"))
            .unwrap();
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            RecognitionError::UnresolvedReference { kind: "intent", ref name, .. } if name == "Missing"
        ));
    }

    #[test]
    fn empty_bot_builds() {
        let bot = BotDataBuilder::new("empty").build().unwrap();
        assert!(bot.is_empty());
        assert_eq!(bot.bot_name(), "empty");
    }
}
