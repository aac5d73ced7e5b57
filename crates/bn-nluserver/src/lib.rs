//! NLUServer intent recognition backend.
//!
//! Translates the framework bot model into NLUServer's REST format, deploys
//! and trains the bot, and maps predictions back into `RecognizedIntent`s.
//! Exposed as a library so the `bn-e2e-tests` crate can drive the provider
//! against a mock server.

pub mod client;
pub mod config;
pub mod dsl;
pub mod error;
pub mod mapper;
pub mod provider;
mod wire;

pub use client::{ClientState, Deployment, NluServerClient};
pub use config::{NluServerConfig, TrainingConfig};
pub use error::{NluServerError, NluServerResult};
pub use provider::NluServerIntentRecognitionProvider;
