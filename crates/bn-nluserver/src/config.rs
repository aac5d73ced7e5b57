//! NLUServer connector configuration, loadable from TOML.

use std::time::Duration;

use bn_model::{RecognitionError, RecognitionResult};
use serde::Deserialize;

/// Top-level configuration for the NLUServer backend.
#[derive(Debug, Clone, Deserialize)]
pub struct NluServerConfig {
    /// Unique bot identifier on the server.
    pub bot_name: String,
    /// Base URL of the NLUServer (e.g. "http://localhost:8000").
    pub url: String,
    /// Replace an existing bot with the same name on deploy.
    /// Handy in development, dangerous in production.
    #[serde(default)]
    pub force_overwrite: bool,
    /// Language code sent as `country` when training.
    #[serde(default = "default_language")]
    pub language: String,
    /// Language region sent as `region` when training.
    #[serde(default)]
    pub language_region: String,
    /// Timezone sent when training (omitted when unset).
    #[serde(default)]
    pub timezone: Option<String>,
    /// Minimum score (exclusive) for a classification to be accepted.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Timeout for bot creation, initialization and prediction requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Timeout for the training request (training takes minutes).
    #[serde(default = "default_training_timeout_secs")]
    pub training_timeout_secs: u64,
    /// Retries on connection errors and timeouts (HTTP errors are not retried).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First retry delay; doubles on each attempt.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Training hyperparameters.
    #[serde(default)]
    pub training: TrainingConfig,
}

/// Hyperparameters sent to `/bot/{name}/train/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Max number of words kept in the vocabulary.
    #[serde(default = "default_num_words")]
    pub num_words: u32,
    /// Lowercase every sentence before tokenizing.
    #[serde(default = "default_true")]
    pub lowercase: bool,
    /// Token used for out-of-vocabulary words.
    #[serde(default = "default_oov_token")]
    pub oov_token: String,
    #[serde(default = "default_num_epochs")]
    pub num_epochs: u32,
    /// Word embedding dimensions.
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: u32,
    /// Max sentence length, in tokens.
    #[serde(default = "default_max_num_tokens")]
    pub max_num_tokens: u32,
    #[serde(default = "default_true")]
    pub stemmer: bool,
    #[serde(default = "default_true")]
    pub discard_oov_sentences: bool,
    #[serde(default = "default_true")]
    pub check_exact_prediction_match: bool,
    #[serde(default = "default_true")]
    pub use_ner_in_prediction: bool,
    #[serde(default = "default_activation_last_layer")]
    pub activation_last_layer: String,
    #[serde(default = "default_activation_hidden_layers")]
    pub activation_hidden_layers: String,
}

fn default_language() -> String {
    "en".into()
}
fn default_confidence_threshold() -> f32 {
    0.3
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_training_timeout_secs() -> u64 {
    900
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_base_delay_ms() -> u64 {
    500
}
fn default_num_words() -> u32 {
    1000
}
fn default_true() -> bool {
    true
}
fn default_oov_token() -> String {
    "<OOV>".into()
}
fn default_num_epochs() -> u32 {
    300
}
fn default_embedding_dim() -> u32 {
    16
}
fn default_max_num_tokens() -> u32 {
    30
}
fn default_activation_last_layer() -> String {
    "sigmoid".into()
}
fn default_activation_hidden_layers() -> String {
    "tanh".into()
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_words: default_num_words(),
            lowercase: true,
            oov_token: default_oov_token(),
            num_epochs: default_num_epochs(),
            embedding_dim: default_embedding_dim(),
            max_num_tokens: default_max_num_tokens(),
            stemmer: true,
            discard_oov_sentences: true,
            check_exact_prediction_match: true,
            use_ner_in_prediction: true,
            activation_last_layer: default_activation_last_layer(),
            activation_hidden_layers: default_activation_hidden_layers(),
        }
    }
}

impl NluServerConfig {
    /// Config with the two required values and defaults for everything else.
    pub fn new(bot_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            url: url.into(),
            force_overwrite: false,
            language: default_language(),
            language_region: String::new(),
            timezone: None,
            confidence_threshold: default_confidence_threshold(),
            request_timeout_secs: default_request_timeout_secs(),
            training_timeout_secs: default_training_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            training: TrainingConfig::default(),
        }
    }

    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot check on its own.
    pub fn validate(&self) -> RecognitionResult<()> {
        if self.bot_name.trim().is_empty() {
            return Err(RecognitionError::Configuration(
                "bot_name must not be empty".into(),
            ));
        }
        reqwest::Url::parse(&self.url).map_err(|e| {
            RecognitionError::Configuration(format!("invalid server url '{}': {e}", self.url))
        })?;
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(RecognitionError::Configuration(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(RecognitionError::Configuration(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.training_timeout_secs == 0 {
            return Err(RecognitionError::Configuration(
                "training_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn training_timeout(&self) -> Duration {
        Duration::from_secs(self.training_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_config() {
        let toml = r#"
bot_name = "coffee-bot"
url = "http://localhost:8000"
"#;
        let config: NluServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bot_name, "coffee-bot");
        assert_eq!(config.url, "http://localhost:8000");
        assert!(!config.force_overwrite); // default
        assert_eq!(config.language, "en"); // default
        assert_eq!(config.language_region, "");
        assert!(config.timezone.is_none());
        assert!((config.confidence_threshold - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.training.num_words, 1000);
        assert!(config.training.lowercase);
        assert_eq!(config.training.oov_token, "<OOV>");
        assert_eq!(config.training.num_epochs, 300);
        assert_eq!(config.training.embedding_dim, 16);
        assert_eq!(config.training.max_num_tokens, 30);
        assert!(config.training.stemmer);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
bot_name = "coffee-bot"
url = "http://nlu.internal:8000"
force_overwrite = true
language = "es"
language_region = "ES"
timezone = "Europe/Madrid"
confidence_threshold = 0.5
request_timeout_secs = 10
training_timeout_secs = 1200
max_retries = 0

[training]
num_words = 5000
lowercase = false
oov_token = "<UNK>"
num_epochs = 50
embedding_dim = 64
max_num_tokens = 20
stemmer = false
activation_last_layer = "softmax"
"#;
        let config: NluServerConfig = toml::from_str(toml).unwrap();
        assert!(config.force_overwrite);
        assert_eq!(config.language, "es");
        assert_eq!(config.language_region, "ES");
        assert_eq!(config.timezone.as_deref(), Some("Europe/Madrid"));
        assert!((config.confidence_threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.training_timeout(), Duration::from_secs(1200));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.training.num_words, 5000);
        assert!(!config.training.lowercase);
        assert_eq!(config.training.oov_token, "<UNK>");
        assert_eq!(config.training.activation_last_layer, "softmax");
        assert_eq!(config.training.activation_hidden_layers, "tanh"); // default
    }

    #[test]
    fn missing_bot_name_is_rejected() {
        let toml = r#"url = "http://localhost:8000""#;
        assert!(toml::from_str::<NluServerConfig>(toml).is_err());
    }

    #[test]
    fn missing_url_is_rejected() {
        let toml = r#"bot_name = "coffee-bot""#;
        assert!(toml::from_str::<NluServerConfig>(toml).is_err());
    }

    #[test]
    fn validate_rejects_blank_bot_name() {
        let config = NluServerConfig::new("  ", "http://localhost:8000");
        assert!(matches!(
            config.validate(),
            Err(RecognitionError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_url() {
        let config = NluServerConfig::new("bot", "not a url");
        assert!(matches!(
            config.validate(),
            Err(RecognitionError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_threshold_out_of_range() {
        let mut config = NluServerConfig::new("bot", "http://localhost:8000");
        config.confidence_threshold = 10.3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeouts() {
        let mut config = NluServerConfig::new("bot", "http://localhost:8000");
        config.request_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(RecognitionError::Configuration(ref msg)) if msg.contains("request_timeout_secs")
        ));

        let mut config = NluServerConfig::new("bot", "http://localhost:8000");
        config.training_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(RecognitionError::Configuration(ref msg)) if msg.contains("training_timeout_secs")
        ));
    }

    #[test]
    fn new_uses_defaults() {
        let config = NluServerConfig::new("bot", "http://localhost:8000");
        assert_eq!(config.language, "en");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.training_timeout_secs, 900);
        assert_eq!(config.retry_base_delay_ms, 500);
        assert!(config.training.use_ner_in_prediction);
    }
}
