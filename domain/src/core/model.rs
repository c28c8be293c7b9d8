//! Model value object representing an LLM model selector

use serde::{Deserialize, Serialize};

/// Model selector passed verbatim to the completion provider (Value Object)
///
/// The debate engine never interprets the selector; it only routes requests
/// with it. Any non-empty string is accepted (`gpt-5`, `o3`, a local model
/// tag, an Azure deployment name, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no selector was given
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::new(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let model: Model = "gpt-4.1".parse().unwrap();
        assert_eq!(model.as_str(), "gpt-4.1");
        assert_eq!(model.to_string(), "gpt-4.1");
    }

    #[test]
    fn test_model_trims_whitespace() {
        let model = Model::new("  o3 \n");
        assert_eq!(model.as_str(), "o3");
        assert!(Model::new("   ").is_empty());
    }

    #[test]
    fn test_model_serializes_as_plain_string() {
        let json = serde_json::to_string(&Model::new("gpt-5")).unwrap();
        assert_eq!(json, "\"gpt-5\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::new("gpt-5"));
    }
}
