//! JSON bodies exchanged with the NLUServer REST API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::NluServerConfig;
use crate::dsl::{
    BotData, Classification, CustomEntityTypeEntry, EntityParameter, EntityType, Intent,
    MatchedParam, NluContext, Prediction,
};

/// `POST /bot/new/`
#[derive(Serialize)]
pub(crate) struct NewBotRequest<'a> {
    pub name: &'a str,
    pub force_overwrite: bool,
}

#[derive(Deserialize)]
pub(crate) struct NewBotResponse {
    pub uuid: Option<String>,
}

/// `POST /bot/{name}/initialize/`. Entity types are inlined per context.
#[derive(Serialize)]
pub(crate) struct InitializeRequest<'a> {
    pub name: &'a str,
    pub contexts: Vec<ContextDto<'a>>,
}

#[derive(Serialize)]
pub(crate) struct ContextDto<'a> {
    pub name: &'a str,
    pub intents: Vec<IntentDto<'a>>,
    pub entities: Vec<EntityDto<'a>>,
}

#[derive(Serialize)]
pub(crate) struct IntentDto<'a> {
    pub name: &'a str,
    pub training_sentences: &'a [String],
    pub entity_parameters: Vec<EntityParameterDto<'a>>,
}

#[derive(Serialize)]
pub(crate) struct EntityParameterDto<'a> {
    pub fragment: &'a str,
    pub name: &'a str,
    pub entity: &'a str,
}

#[derive(Serialize)]
pub(crate) struct EntityDto<'a> {
    pub name: &'a str,
    pub entries: &'a [CustomEntityTypeEntry],
}

impl<'a> InitializeRequest<'a> {
    pub fn from_bot(bot: &'a BotData) -> Self {
        Self {
            name: bot.bot_name(),
            contexts: bot.nlu_contexts().iter().map(ContextDto::from_context).collect(),
        }
    }
}

impl<'a> ContextDto<'a> {
    fn from_context(context: &'a NluContext) -> Self {
        Self {
            name: &context.name,
            intents: context.intents().map(|i| IntentDto::from_intent(i)).collect(),
            entities: context.entity_types.iter().map(|e| EntityDto::from_entity(e)).collect(),
        }
    }
}

impl<'a> IntentDto<'a> {
    fn from_intent(intent: &'a Intent) -> Self {
        Self {
            name: &intent.name,
            training_sentences: &intent.training_sentences,
            entity_parameters: intent.parameters.iter().map(EntityParameterDto::from_parameter).collect(),
        }
    }
}

impl<'a> EntityParameterDto<'a> {
    fn from_parameter(parameter: &'a EntityParameter) -> Self {
        Self {
            fragment: &parameter.fragment,
            name: &parameter.name,
            entity: parameter.entity_name(),
        }
    }
}

impl<'a> EntityDto<'a> {
    fn from_entity(entity: &'a EntityType) -> Self {
        Self {
            name: entity.name(),
            entries: entity.entries(),
        }
    }
}

/// `POST /bot/{name}/train/`
#[derive(Serialize)]
pub(crate) struct TrainRequest<'a> {
    pub country: &'a str,
    pub region: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<&'a str>,
    pub num_words: u32,
    pub lower: bool,
    pub oov_token: &'a str,
    pub num_epochs: u32,
    pub embedding_dim: u32,
    pub input_max_num_tokens: u32,
    pub stemmer: bool,
    pub discard_oov_sentences: bool,
    pub check_exact_prediction_match: bool,
    pub use_ner_in_prediction: bool,
    pub activation_last_layer: &'a str,
    pub activation_hidden_layers: &'a str,
}

impl<'a> TrainRequest<'a> {
    pub fn from_config(config: &'a NluServerConfig) -> Self {
        let training = &config.training;
        Self {
            country: &config.language,
            region: &config.language_region,
            timezone: config.timezone.as_deref(),
            num_words: training.num_words,
            lower: training.lowercase,
            oov_token: &training.oov_token,
            num_epochs: training.num_epochs,
            embedding_dim: training.embedding_dim,
            input_max_num_tokens: training.max_num_tokens,
            stemmer: training.stemmer,
            discard_oov_sentences: training.discard_oov_sentences,
            check_exact_prediction_match: training.check_exact_prediction_match,
            use_ner_in_prediction: training.use_ner_in_prediction,
            activation_last_layer: &training.activation_last_layer,
            activation_hidden_layers: &training.activation_hidden_layers,
        }
    }
}

/// `POST /bot/{name}/predict/`
#[derive(Serialize)]
pub(crate) struct PredictRequest<'a> {
    pub utterance: &'a str,
    pub context: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub classifications: Option<Vec<RawClassification>>,
}

#[derive(Deserialize)]
pub(crate) struct RawClassification {
    pub intent: String,
    pub score: f32,
    #[serde(default)]
    pub matched_utterance: Option<String>,
    #[serde(default)]
    pub matched_parameters: Option<Vec<RawMatchedParam>>,
}

#[derive(Deserialize)]
pub(crate) struct RawMatchedParam {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub info: Option<HashMap<String, serde_json::Value>>,
}

impl From<PredictResponse> for Prediction {
    fn from(response: PredictResponse) -> Self {
        let classifications = response
            .classifications
            .unwrap_or_default()
            .into_iter()
            .map(|raw| Classification {
                intent: raw.intent,
                score: raw.score,
                matched_utterance: raw.matched_utterance.unwrap_or_default(),
                matched_params: raw
                    .matched_parameters
                    .unwrap_or_default()
                    .into_iter()
                    .map(|p| MatchedParam {
                        param_name: p.name,
                        value: p.value.unwrap_or_default(),
                        info: p.info.unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();
        Prediction::new(classifications)
    }
}
