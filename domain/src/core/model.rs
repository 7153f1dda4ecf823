//! Model value object representing a Gemini model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gemini models offered by the assistant (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GeminiModel {
    #[default]
    Gemini15Flash,
    Gemini15Pro,
    Gemini20FlashLite001,
    Custom(String),
}

impl GeminiModel {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            GeminiModel::Gemini15Flash => "gemini-1.5-flash",
            GeminiModel::Gemini15Pro => "gemini-1.5-pro",
            GeminiModel::Gemini20FlashLite001 => "gemini-2.0-flash-lite-001",
            GeminiModel::Custom(s) => s,
        }
    }

    /// Models listed in the model picker, default first
    pub fn selectable() -> Vec<GeminiModel> {
        vec![
            GeminiModel::Gemini15Flash,
            GeminiModel::Gemini15Pro,
            GeminiModel::Gemini20FlashLite001,
        ]
    }

    /// REST API version serving this model.
    ///
    /// 2.0 models are served from `v1`; everything else from `v1beta`.
    pub fn api_version(&self) -> &'static str {
        if self.as_str().contains("2.0") {
            "v1"
        } else {
            "v1beta"
        }
    }

    /// Check if this is a user-supplied model name
    pub fn is_custom(&self) -> bool {
        matches!(self, GeminiModel::Custom(_))
    }
}

impl std::fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GeminiModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-1.5-flash" => GeminiModel::Gemini15Flash,
            "gemini-1.5-pro" => GeminiModel::Gemini15Pro,
            "gemini-2.0-flash-lite-001" => GeminiModel::Gemini20FlashLite001,
            other => GeminiModel::Custom(other.to_string()),
        })
    }
}

impl From<&str> for GeminiModel {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for GeminiModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GeminiModel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(GeminiModel::from(s.as_str()))
    }
}
