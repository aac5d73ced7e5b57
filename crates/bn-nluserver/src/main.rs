//! bn-nluserver: deploy a bot to NLUServer and classify utterances from stdin.
//!
//! Usage: `bn-nluserver <config.toml> <bot.json> [initial-state]`
//!
//! Registers the bot's entities, intents and states, deploys and trains it,
//! then prints one JSON line per utterance read from stdin.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use bn_model::{BotDefinition, IntentRecognitionProvider, RecognitionError, StateContext};
use bn_nluserver::{NluServerConfig, NluServerIntentRecognitionProvider};

const USAGE: &str = "usage: bn-nluserver <config.toml> <bot.json> [initial-state]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bn-nluserver starting");

    // ── Load config and bot ─────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .unwrap_or_else(|| "/etc/botnlu/nluserver.toml".to_string());
    let bot_path = args.next().ok_or_else(|| anyhow::anyhow!(USAGE))?;
    let initial_state = args.next();

    let config = NluServerConfig::from_file(&config_path)?;
    tracing::info!(bot = %config.bot_name, url = %config.url, "config loaded");

    let definition: BotDefinition = serde_json::from_str(&std::fs::read_to_string(&bot_path)?)?;
    let model = definition.into_model()?;
    tracing::info!(
        entities = model.entities.len(),
        intents = model.registry.len(),
        states = model.states.len(),
        "bot definition loaded"
    );

    let state = match initial_state {
        Some(name) => model
            .states
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown initial state '{name}'"))?,
        None => model
            .states
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("bot definition has no state"))?,
    };

    // ── Register and train ──────────────────────────────────────
    let intents: Vec<_> = model.registry.intent_definitions().cloned().collect();
    let mut provider = NluServerIntentRecognitionProvider::new(model.registry, config)?;

    for entity in &model.entities {
        provider.register_entity_definition(entity).await?;
    }
    for intent in &intents {
        provider.register_intent_definition(intent).await?;
    }
    for bot_state in &model.states {
        match provider.register_state(bot_state).await {
            Ok(()) => {}
            Err(RecognitionError::EmptyState(name)) => {
                tracing::warn!(state = %name, "state has no outgoing intents, skipped");
            }
            Err(e) => return Err(e.into()),
        }
    }

    provider.train_ml_engine().await?;
    tracing::info!(
        provider = provider.provider_name(),
        state = %state.name,
        "bn-nluserver ready"
    );

    // ── Recognize stdin ─────────────────────────────────────────
    let context = StateContext::new("console", Arc::clone(&state));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("end of input");
                    break;
                };
                let utterance = line.trim();
                if utterance.is_empty() {
                    continue;
                }
                match provider.get_intent(utterance, &context).await {
                    Ok(recognized) => {
                        let output = serde_json::json!({
                            "input": utterance,
                            "intent": recognized.definition.name,
                            "confidence": recognized.recognition_confidence,
                            "matched_input": recognized.matched_input,
                            "values": recognized.values,
                        });
                        println!("{output}");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, input = %utterance, "recognition failed");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }

    provider.shutdown().await?;
    tracing::info!("bn-nluserver stopped");
    Ok(())
}
