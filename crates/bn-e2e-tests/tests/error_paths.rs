//! E2E tests for deployment, training and prediction failures.

mod helpers;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use bn_model::{IntentDefinition, IntentRecognitionProvider, RecognitionError};
use bn_nluserver::ClientState;

use helpers::{BOT_NAME, TestHarness, mount_lifecycle};

/// A bot that already exists (409) fails training without calling initialize.
#[tokio::test]
async fn e2e_existing_bot_fails_deploy() {
    let mut h = TestHarness::registered().await;
    Mock::given(method("POST"))
        .and(path("/bot/new/"))
        .respond_with(ResponseTemplate::new(409).set_body_string("bot already exists"))
        .mount(&h.server)
        .await;

    let err = h.provider.train_ml_engine().await.unwrap_err();
    assert!(matches!(err, RecognitionError::RemoteOperation(_)));
    assert_eq!(h.provider.client().state(), ClientState::Created);
    assert!(
        h.request_bodies(&format!("/bot/{BOT_NAME}/initialize/"))
            .await
            .is_empty()
    );
}

/// A failed train call leaves the bot deployed but not trained.
#[tokio::test]
async fn e2e_training_failure_blocks_recognition() {
    let mut h = TestHarness::registered().await;
    Mock::given(method("POST"))
        .and(path("/bot/new/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uuid": "0b8e5a4c-54a4-4a0c-9d1c-7c1f6f3d9e21"})))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot/{BOT_NAME}/initialize/")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot/{BOT_NAME}/train/")))
        .respond_with(ResponseTemplate::new(500).set_body_string("out of memory"))
        .mount(&h.server)
        .await;

    assert!(h.provider.train_ml_engine().await.is_err());
    assert_eq!(h.provider.client().state(), ClientState::Deployed);
    assert!(matches!(
        h.provider.get_intent("hello", &h.context("Init")).await,
        Err(RecognitionError::NotTrained)
    ));
}

/// Recognition before training is refused.
#[tokio::test]
async fn e2e_recognition_requires_training() {
    let h = TestHarness::registered().await;
    assert!(matches!(
        h.provider.get_intent("hello", &h.context("Init")).await,
        Err(RecognitionError::NotTrained)
    ));
}

/// The model cannot change once it has been trained.
#[tokio::test]
async fn e2e_registration_after_training_is_frozen() {
    let mut h = TestHarness::trained().await;
    let late = IntentDefinition::new("Late").with_training_sentence("too late");
    assert!(matches!(
        h.provider.register_intent_definition(&late).await,
        Err(RecognitionError::ModelFrozen)
    ));
}

/// Prediction HTTP errors surface as prediction failures with their cause.
#[tokio::test]
async fn e2e_prediction_error_is_wrapped() {
    let h = TestHarness::trained().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot/{BOT_NAME}/predict/")))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&h.server)
        .await;

    let err = h.provider.get_intent("hello", &h.context("Init")).await.unwrap_err();
    assert!(matches!(err, RecognitionError::Prediction(_)));
    assert!(std::error::Error::source(&err).is_some());
}

/// Blank input is rejected before any request is sent.
#[tokio::test]
async fn e2e_blank_input_is_rejected() {
    let h = TestHarness::trained().await;
    assert!(matches!(
        h.provider.get_intent("   ", &h.context("Init")).await,
        Err(RecognitionError::InvalidInput(_))
    ));
    assert!(
        h.request_bodies(&format!("/bot/{BOT_NAME}/predict/"))
            .await
            .is_empty()
    );
}

/// Training twice reuses the frozen model and redeploys it.
#[tokio::test]
async fn e2e_retraining_reuses_model() {
    let mut h = TestHarness::registered().await;
    mount_lifecycle(&h.server).await;
    h.provider.train_ml_engine().await.unwrap();
    h.provider.train_ml_engine().await.unwrap();
    assert_eq!(
        h.request_bodies(&format!("/bot/{BOT_NAME}/train/")).await.len(),
        2
    );
}
