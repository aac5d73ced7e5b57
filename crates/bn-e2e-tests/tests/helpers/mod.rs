//! Shared test harness for E2E integration tests.
//!
//! Loads a sample bot from JSON, registers it with an NLUServer provider
//! pointed at a wiremock server, and exposes the states for recognition.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bn_model::{BotDefinition, BotModel, IntentRecognitionProvider, State, StateContext};
use bn_nluserver::{NluServerConfig, NluServerIntentRecognitionProvider};

pub const BOT_NAME: &str = "coffee_shop";

/// Sample coffee-shop bot: a greeting state and a menu with parameters.
pub const SAMPLE_BOT: &str = r#"{
    "entities": [
        {"kind": "mapping", "name": "drink_type", "entries": [
            {"reference_value": "latte", "synonyms": ["milk coffee"]},
            {"reference_value": "espresso"}
        ]},
        {"kind": "base", "entity_type": "number"}
    ],
    "intents": [
        {"name": "Greetings", "training_sentences": ["Hello", "Hi there", "Good morning"]},
        {"name": "Order_Drink",
         "training_sentences": ["I want 2 latte", "Give me 2 latte please"],
         "parameters": [
            {"name": "drink", "text_fragments": ["latte"], "entity": {"kind": "mapping", "name": "drink_type", "entries": [
                {"reference_value": "latte", "synonyms": ["milk coffee"]},
                {"reference_value": "espresso"}
            ]}},
            {"name": "count", "text_fragments": ["2"], "entity": {"kind": "base", "entity_type": "number"}}
         ]},
        {"name": "Goodbye", "training_sentences": ["Bye", "See you"]}
    ],
    "states": [
        {"name": "Init", "intents": ["Greetings"]},
        {"name": "Main_Menu", "intents": ["Order_Drink", "Goodbye"]}
    ]
}"#;

pub fn sample_model() -> BotModel {
    let definition: BotDefinition = serde_json::from_str(SAMPLE_BOT).unwrap();
    definition.into_model().unwrap()
}

pub fn config_for(server: &MockServer) -> NluServerConfig {
    let mut config = NluServerConfig::new(BOT_NAME, server.uri());
    config.request_timeout_secs = 2;
    config.max_retries = 0;
    config
}

/// Provider plus the resolved states of the sample bot.
pub struct TestHarness {
    pub server: MockServer,
    pub provider: NluServerIntentRecognitionProvider,
    pub states: Vec<Arc<State>>,
}

impl TestHarness {
    /// Register the whole sample bot without training it.
    pub async fn registered() -> Self {
        let server = MockServer::start().await;
        let model = sample_model();
        let intents: Vec<_> = model.registry.intent_definitions().cloned().collect();
        let mut provider =
            NluServerIntentRecognitionProvider::new(model.registry, config_for(&server)).unwrap();

        for entity in &model.entities {
            provider.register_entity_definition(entity).await.unwrap();
        }
        for intent in &intents {
            provider.register_intent_definition(intent).await.unwrap();
        }
        for state in &model.states {
            provider.register_state(state).await.unwrap();
        }

        Self {
            server,
            provider,
            states: model.states,
        }
    }

    /// Register the sample bot and train it against a healthy server.
    pub async fn trained() -> Self {
        let mut h = Self::registered().await;
        mount_lifecycle(&h.server).await;
        h.provider.train_ml_engine().await.unwrap();
        h
    }

    pub fn context(&self, state_name: &str) -> StateContext {
        let state = self
            .states
            .iter()
            .find(|s| s.name == state_name)
            .cloned()
            .unwrap();
        StateContext::new("session-1", state)
    }

    pub async fn mount_prediction(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(format!("/bot/{BOT_NAME}/predict/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received on `endpoint`.
    pub async fn request_bodies(&self, endpoint: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == endpoint)
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}

/// Create, initialize and train all succeed.
pub async fn mount_lifecycle(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/bot/new/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "0b8e5a4c-54a4-4a0c-9d1c-7c1f6f3d9e21"
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot/{BOT_NAME}/initialize/")))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot/{BOT_NAME}/train/")))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

pub fn classification(intent: &str, score: f32, matched_utterance: &str) -> Value {
    json!({"intent": intent, "score": score, "matched_utterance": matched_utterance})
}
