use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serialized as the snake_case code; deserialized through [`EngineType::parse`],
/// so profiles may use either the code or the form label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum EngineType {
    Diesel,
    Petrol,
    Hybrid,
    PlugInHybrid,
    #[default]
    Electric,
    Lpg,
}

impl EngineType {
    pub fn all() -> &'static [EngineType] {
        &[
            EngineType::Diesel,
            EngineType::Petrol,
            EngineType::Hybrid,
            EngineType::PlugInHybrid,
            EngineType::Electric,
            EngineType::Lpg,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diesel => "diesel",
            Self::Petrol => "petrol",
            Self::Hybrid => "hybrid",
            Self::PlugInHybrid => "plug_in_hybrid",
            Self::Electric => "electric",
            Self::Lpg => "lpg",
        }
    }

    /// Label used on the original French input form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Diesel => "Diesel",
            Self::Petrol => "Essence",
            Self::Hybrid => "Hybride",
            Self::PlugInHybrid => "Hybride Rechargeable",
            Self::Electric => "Electrique",
            Self::Lpg => "GPL",
        }
    }

    /// Accepts either the short code or the form label, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|engine| {
                engine.as_str().eq_ignore_ascii_case(s) || engine.label().eq_ignore_ascii_case(s)
            })
    }

    /// Electric vehicles get a 20% bonus on the commute deduction.
    pub fn is_electric(&self) -> bool {
        matches!(self, Self::Electric)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown engine type '{0}'")]
pub struct UnknownEngineType(pub String);

impl FromStr for EngineType {
    type Err = UnknownEngineType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownEngineType(s.to_string()))
    }
}

impl TryFrom<String> for EngineType {
    type Error = UnknownEngineType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
