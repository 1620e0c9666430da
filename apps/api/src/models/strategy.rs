use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;

/// Advertising surface the copy is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Platform {
    Shortform,
    Feed,
    #[default]
    Banner,
    SearchAd,
}

impl Platform {
    /// All platforms in the order the form lists them.
    pub const ALL: [Platform; 4] = [
        Platform::Shortform,
        Platform::Feed,
        Platform::Banner,
        Platform::SearchAd,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Platform::Shortform => "shortform",
            Platform::Feed => "feed",
            Platform::Banner => "banner",
            Platform::SearchAd => "search_ad",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Shortform => "SNS 숏폼 (릴스/틱톡)",
            Platform::Feed => "SNS 피드 (인스타/페북)",
            Platform::Banner => "GFA/배너 (네이버/카카오)",
            Platform::SearchAd => "검색광고 (TDA)",
        }
    }

    /// Short fragment identifying the platform inside a free-form label.
    fn marker(&self) -> &'static str {
        match self {
            Platform::Shortform => "숏폼",
            Platform::Feed => "피드",
            Platform::Banner => "GFA/배너",
            Platform::SearchAd => "검색광고",
        }
    }

    /// Resolves an id, a full label, or a label fragment.
    /// Anything unrecognized resolves to `SearchAd`, and that fallback is logged.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if let Some(p) = Self::ALL
            .iter()
            .find(|p| p.id() == label || p.label() == label)
        {
            return *p;
        }
        // Banner first: its label is the most specific marker.
        for p in [
            Platform::Banner,
            Platform::Shortform,
            Platform::Feed,
            Platform::SearchAd,
        ] {
            if label.contains(p.marker()) {
                return p;
            }
        }
        warn!("Unrecognized platform label {label:?}, falling back to search_ad");
        Platform::SearchAd
    }
}

impl From<String> for Platform {
    fn from(label: String) -> Self {
        Platform::from_label(&label)
    }
}

/// Copy intensity, ordered as on the form's slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Tone {
    Soft,
    Logical,
    #[default]
    Hard,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Soft, Tone::Logical, Tone::Hard];

    pub fn id(&self) -> &'static str {
        match self {
            Tone::Soft => "soft",
            Tone::Logical => "logical",
            Tone::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Soft => "순한맛 (공감/위로)",
            Tone::Logical => "논리적 (기능/정보)",
            Tone::Hard => "매운맛 (공포/팩폭)",
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            Tone::Soft => "순한맛",
            Tone::Logical => "논리적",
            Tone::Hard => "매운맛",
        }
    }

    /// Resolves an id, a full label, or a label fragment; unknown input is `Logical`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if let Some(t) = Self::ALL
            .iter()
            .find(|t| t.id() == label || t.label() == label || label.contains(t.marker()))
        {
            return *t;
        }
        warn!("Unrecognized tone label {label:?}, falling back to logical");
        Tone::Logical
    }
}

impl From<String> for Tone {
    fn from(label: String) -> Self {
        Tone::from_label(&label)
    }
}

fn default_web_search() -> bool {
    true
}

/// Inputs of one strategy generation. Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRequest {
    // Absent fields deserialize as empty so `validate` reports them.
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub product_details: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
    /// Run the web search step before prompting.
    #[serde(default = "default_web_search")]
    pub web_search: bool,
}

impl StrategyRequest {
    /// All three free-text fields must be non-empty before the pipeline runs.
    pub fn validate(&self) -> Result<(), AppError> {
        let missing = [
            &self.product_name,
            &self.target_audience,
            &self.product_details,
        ]
        .iter()
        .any(|field| field.trim().is_empty());

        if missing {
            return Err(AppError::Validation(
                "⚠️ 모든 정보를 입력해주세요.".to_string(),
            ));
        }
        Ok(())
    }
}
