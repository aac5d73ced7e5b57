//! DialogFlow agent configuration.

use bn_model::{RecognitionError, RecognitionResult};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DialogFlowConfig {
    /// Google Cloud project hosting the agent. Context names are scoped by it.
    pub project_id: String,
    /// Language of the training phrases.
    #[serde(default = "default_language_code")]
    pub language_code: String,
}

fn default_language_code() -> String {
    "en-US".into()
}

impl DialogFlowConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            language_code: default_language_code(),
        }
    }

    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RecognitionResult<()> {
        if self.project_id.trim().is_empty() {
            return Err(RecognitionError::Configuration(
                "project_id must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Full name of a context in the setup session.
    pub fn context_name(&self, context: &str) -> String {
        format!(
            "projects/{}/agent/sessions/setup/contexts/{context}",
            self.project_id
        )
    }
}
