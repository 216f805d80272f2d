use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Three-way permissibility classification for a scanned product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Halal,
    Haram,
    Unknown,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictStatus::Halal => write!(f, "halal"),
            VerdictStatus::Haram => write!(f, "haram"),
            VerdictStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Image quality flags reported by the model alongside the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageQuality {
    pub is_blurry: bool,
    pub has_text: bool,
    pub is_ingredient_label: bool,
}

/// Structured classification result for a single product image
///
/// Produced once per submission: decoded from the model reply, passed through
/// the conservative override stage, then handed to the caller. Field names
/// match the wire format the model is instructed to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationVerdict {
    pub status: VerdictStatus,
    pub confidence: f64,
    pub reasoning: String,
    pub detected_ingredients: Vec<String>,
    pub haram_ingredients: Vec<String>,
    pub warnings: Vec<String>,
    pub has_halal_mark: bool,
    pub red_packaging: bool,
    pub image_quality: ImageQuality,
    pub feedback_message: String,
}

impl ClassificationVerdict {
    /// Restore the invariants a well-formed verdict must satisfy:
    /// confidence lies in [0, 1] and `haram_ingredients` is a
    /// case-insensitive subset of `detected_ingredients`.
    pub fn normalize(mut self) -> Self {
        self.confidence = self.confidence.clamp(0.0, 1.0);

        let detected: Vec<String> = self
            .detected_ingredients
            .iter()
            .map(|i| i.to_lowercase())
            .collect();
        self.haram_ingredients
            .retain(|h| detected.contains(&h.to_lowercase()));

        self
    }
}
