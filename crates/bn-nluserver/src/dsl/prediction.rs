//! Predictions returned by `/bot/{name}/predict/`.

use std::collections::HashMap;

/// One intent hypothesis for an utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Intent name as known by the server.
    pub intent: String,
    pub score: f32,
    pub matched_utterance: String,
    pub matched_params: Vec<MatchedParam>,
}

impl Classification {
    pub fn new(intent: impl Into<String>, score: f32, matched_utterance: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            score,
            matched_utterance: matched_utterance.into(),
            matched_params: Vec::new(),
        }
    }

    pub fn with_matched_param(mut self, param: MatchedParam) -> Self {
        self.matched_params.push(param);
        self
    }
}

/// A parameter value extracted from the utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedParam {
    pub param_name: String,
    pub value: String,
    pub info: HashMap<String, serde_json::Value>,
}

impl MatchedParam {
    pub fn new(param_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            param_name: param_name.into(),
            value: value.into(),
            info: HashMap::new(),
        }
    }
}

/// Classifications in server order. Order says nothing about ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    pub classifications: Vec<Classification>,
}

impl Prediction {
    pub fn new(classifications: Vec<Classification>) -> Self {
        Self { classifications }
    }

    /// Highest-scoring classification, whatever its position. On ties the
    /// first one wins.
    pub fn top_classification(&self) -> Option<&Classification> {
        self.classifications.iter().fold(None, |best, c| match best {
            Some(b) if b.score >= c.score => Some(b),
            _ => Some(c),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.classifications.is_empty()
    }
}
