//! `IntentRecognitionProvider` backed by an NLUServer instance.

use std::sync::Arc;

use async_trait::async_trait;
use bn_model::{
    EntityDefinition, EventDefinitionRegistry, IntentDefinition, IntentRecognitionProvider,
    RecognitionError, RecognitionResult, RecognizedIntent, State, StateContext,
};

use crate::client::{ClientState, NluServerClient};
use crate::config::NluServerConfig;
use crate::dsl::{BotData, BotDataBuilder};
use crate::mapper::{
    EntityMapper, IntentMapper, RecognizedIntentMapper, StateMapper, adapt_state_name,
    nlu_server_reference_mapper,
};

/// Where the bot model is in its write-once lifecycle.
enum ModelPhase {
    /// Accepting registrations.
    Building(BotDataBuilder),
    /// Frozen and handed to the client.
    Ready(Arc<BotData>),
    /// Finalization failed; nothing left to deploy.
    Broken,
}

pub struct NluServerIntentRecognitionProvider {
    client: NluServerClient,
    phase: ModelPhase,
    entity_mapper: EntityMapper,
    intent_mapper: IntentMapper,
    state_mapper: StateMapper,
    recognized_intent_mapper: RecognizedIntentMapper,
}

impl NluServerIntentRecognitionProvider {
    /// Build a provider for the bot described by `config`. Recognized intent
    /// names are looked up in `registry`.
    pub fn new(registry: EventDefinitionRegistry, config: NluServerConfig) -> RecognitionResult<Self> {
        config.validate()?;
        let phase = ModelPhase::Building(BotDataBuilder::new(config.bot_name.clone()));
        let recognized_intent_mapper = RecognizedIntentMapper::new(config.confidence_threshold, registry);
        let client = NluServerClient::new(config)
            .map_err(|e| RecognitionError::Configuration(e.to_string()))?;
        Ok(Self {
            client,
            phase,
            entity_mapper: EntityMapper::new(nlu_server_reference_mapper()),
            intent_mapper: IntentMapper::new(nlu_server_reference_mapper()),
            state_mapper: StateMapper::new(),
            recognized_intent_mapper,
        })
    }

    pub fn client(&self) -> &NluServerClient {
        &self.client
    }

    pub fn registry(&self) -> &EventDefinitionRegistry {
        self.recognized_intent_mapper.registry()
    }

    /// The frozen bot, once training has been requested.
    pub fn bot_data(&self) -> Option<Arc<BotData>> {
        match &self.phase {
            ModelPhase::Ready(bot) => Some(Arc::clone(bot)),
            _ => None,
        }
    }

    fn builder(&mut self) -> RecognitionResult<&mut BotDataBuilder> {
        if self.client.is_shutdown() {
            return Err(RecognitionError::Shutdown);
        }
        match &mut self.phase {
            ModelPhase::Building(builder) => Ok(builder),
            _ => Err(RecognitionError::ModelFrozen),
        }
    }

    /// Highest-confidence recognized intent reachable from the current state.
    /// Ties keep the first one.
    fn best_candidate(candidates: Vec<RecognizedIntent>, state: &State) -> Option<RecognizedIntent> {
        candidates
            .into_iter()
            .filter(|c| state.accesses(&c.definition.name))
            .reduce(|best, c| {
                if c.recognition_confidence > best.recognition_confidence {
                    c
                } else {
                    best
                }
            })
    }
}

#[async_trait]
impl IntentRecognitionProvider for NluServerIntentRecognitionProvider {
    async fn register_entity_definition(&mut self, entity: &EntityDefinition) -> RecognitionResult<()> {
        let entity_type = self.entity_mapper.map_entity_definition(entity)?;
        let builder = self.builder()?;
        if entity_type.is_base() && builder.contains_entity_type(entity_type.name()) {
            tracing::debug!(entity = %entity_type.name(), "system entity already registered");
            return Ok(());
        }
        tracing::debug!(entity = %entity_type.name(), kind = entity.kind_name(), "registering entity type");
        builder.add_entity_type(entity_type)
    }

    async fn register_intent_definition(&mut self, intent: &IntentDefinition) -> RecognitionResult<()> {
        let mapped = self.intent_mapper.map_intent_definition(intent)?;
        tracing::debug!(intent = %mapped.name, "registering intent");
        self.builder()?.add_intent(mapped)
    }

    async fn register_state(&mut self, state: &State) -> RecognitionResult<()> {
        let context = self.state_mapper.map_state_definition(state)?;
        tracing::debug!(state = %state.name, context = %context.name, "registering context");
        self.builder()?.add_nlu_context(context)
    }

    async fn train_ml_engine(&mut self) -> RecognitionResult<()> {
        if self.client.is_shutdown() {
            return Err(RecognitionError::Shutdown);
        }
        let bot = match std::mem::replace(&mut self.phase, ModelPhase::Broken) {
            ModelPhase::Building(builder) => Arc::new(builder.build()?),
            ModelPhase::Ready(bot) => bot,
            ModelPhase::Broken => return Err(RecognitionError::ModelFrozen),
        };
        self.phase = ModelPhase::Ready(Arc::clone(&bot));

        tracing::info!(
            bot = %bot.bot_name(),
            intents = bot.intents().len(),
            contexts = bot.nlu_contexts().len(),
            "deploying and training bot"
        );
        if !self.client.deploy_and_train(&bot).await {
            return Err(RecognitionError::RemoteOperation(format!(
                "failed to deploy and train bot '{}'",
                bot.bot_name()
            )));
        }
        Ok(())
    }

    async fn get_intent(&self, input: &str, context: &StateContext) -> RecognitionResult<RecognizedIntent> {
        if self.client.is_shutdown() {
            return Err(RecognitionError::Shutdown);
        }
        if input.trim().is_empty() {
            return Err(RecognitionError::InvalidInput("cannot recognize an empty input".into()));
        }
        let bot = match &self.phase {
            ModelPhase::Ready(bot) if self.client.state() == ClientState::Trained => bot,
            _ => return Err(RecognitionError::NotTrained),
        };
        let state = &context.state;
        let nlu_context = bot
            .nlu_context(&adapt_state_name(&state.name))
            .ok_or_else(|| RecognitionError::UnknownContext(state.name.clone()))?;

        let prediction = self
            .client
            .predict(nlu_context, input)
            .await
            .map_err(|e| RecognitionError::Prediction(Box::new(e)))?;

        let Some(top) = prediction.top_classification() else {
            tracing::debug!(context = %nlu_context.name, "empty prediction, using the default fallback intent");
            return Ok(RecognizedIntent::fallback(0.0, input));
        };
        let threshold = self.recognized_intent_mapper.confidence_threshold();
        if top.score < threshold {
            tracing::debug!(
                intent = %top.intent,
                score = top.score,
                threshold,
                "top classification below threshold"
            );
            return Ok(RecognizedIntent::fallback(top.score, top.matched_utterance.clone()));
        }

        let candidates = self.recognized_intent_mapper.map_recognition_result(&prediction);
        match Self::best_candidate(candidates, state) {
            Some(recognized) => {
                tracing::debug!(
                    intent = %recognized.definition.name,
                    confidence = recognized.recognition_confidence,
                    state = %state.name,
                    "intent recognized"
                );
                Ok(recognized)
            }
            None => {
                tracing::debug!(state = %state.name, "no recognized intent reachable from the state");
                Ok(RecognizedIntent::fallback(0.0, input))
            }
        }
    }

    async fn shutdown(&mut self) -> RecognitionResult<()> {
        if self.client.is_shutdown() {
            return Err(RecognitionError::Shutdown);
        }
        self.client.shutdown();
        Ok(())
    }

    fn is_shutdown(&self) -> bool {
        self.client.is_shutdown()
    }

    fn provider_name(&self) -> &str {
        "NLUServer"
    }
}
