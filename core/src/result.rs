//! Inference result shared by the client and the views.
//!
//! The model is asked for a `gender` field; `category` is accepted as an
//! alias on input. Deserialization goes through [`RawInferenceResult`] so a
//! payload with a missing field, an unrecognised category or an
//! out-of-range confidence never produces an `InferenceResult`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Perceived gender category returned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum GenderCategory {
    Male,
    Female,
    NonBinary,
    Unknown,
}

impl GenderCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [Self::Male, Self::Female, Self::NonBinary, Self::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::NonBinary => "non-binary",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GenderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenderCategory {
    type Err = InvalidResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "non-binary" | "nonbinary" | "non_binary" => Ok(Self::NonBinary),
            "unknown" => Ok(Self::Unknown),
            _ => Err(InvalidResult::UnknownCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for GenderCategory {
    type Error = InvalidResult;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Reasons a decoded payload is not a usable result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidResult {
    #[error("unrecognised gender category: {0:?}")]
    UnknownCategory(String),

    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

/// A single gender inference outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInferenceResult")]
pub struct InferenceResult {
    #[serde(rename = "gender")]
    pub category: GenderCategory,
    pub confidence: f64,
    pub reasoning: String,
}

/// Wire shape before range checks.
#[derive(Deserialize)]
struct RawInferenceResult {
    #[serde(rename = "gender", alias = "category")]
    category: GenderCategory,
    confidence: f64,
    reasoning: String,
}

impl TryFrom<RawInferenceResult> for InferenceResult {
    type Error = InvalidResult;

    fn try_from(raw: RawInferenceResult) -> Result<Self, Self::Error> {
        Self::new(raw.category, raw.confidence, raw.reasoning)
    }
}

impl InferenceResult {
    /// Build a result, rejecting a confidence that is not a finite value in `[0, 1]`.
    pub fn new(
        category: GenderCategory,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Result<Self, InvalidResult> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(InvalidResult::ConfidenceOutOfRange(confidence));
        }
        Ok(Self {
            category,
            confidence,
            reasoning: reasoning.into(),
        })
    }

    /// Confidence as a whole percentage, rounded half away from zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("male".parse::<GenderCategory>().unwrap(), GenderCategory::Male);
        assert_eq!(" Female ".parse::<GenderCategory>().unwrap(), GenderCategory::Female);
        assert_eq!("NON-BINARY".parse::<GenderCategory>().unwrap(), GenderCategory::NonBinary);
        assert_eq!("nonbinary".parse::<GenderCategory>().unwrap(), GenderCategory::NonBinary);
        assert_eq!("unknown".parse::<GenderCategory>().unwrap(), GenderCategory::Unknown);
        assert!("robot".parse::<GenderCategory>().is_err());
        assert!("".parse::<GenderCategory>().is_err());
    }

    #[test]
    fn test_unknown_category_reports_trimmed_value() {
        let err = "  robot \n".parse::<GenderCategory>().unwrap_err();
        assert_eq!(err, InvalidResult::UnknownCategory("robot".to_string()));
        assert_eq!(err.to_string(), "unrecognised gender category: \"robot\"");
    }

    #[test]
    fn test_category_display_matches_wire_token() {
        for category in GenderCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }

    #[test]
    fn test_result_deserialization() {
        let json = r#"{"gender":"unknown","confidence":0.4,"reasoning":"Ambiguous given name."}"#;
        let result: InferenceResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.category, GenderCategory::Unknown);
        assert!((result.confidence - 0.4).abs() < f64::EPSILON);
        assert_eq!(result.reasoning, "Ambiguous given name.");
    }

    #[test]
    fn test_category_alias_accepted() {
        let json = r#"{"category":"female","confidence":0.9,"reasoning":"Common name."}"#;
        let result: InferenceResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.category, GenderCategory::Female);
    }

    #[test]
    fn test_missing_field_rejected() {
        let missing_reasoning = r#"{"gender":"male","confidence":0.7}"#;
        assert!(serde_json::from_str::<InferenceResult>(missing_reasoning).is_err());

        let missing_confidence = r#"{"gender":"male","reasoning":"x"}"#;
        assert!(serde_json::from_str::<InferenceResult>(missing_confidence).is_err());

        assert!(serde_json::from_str::<InferenceResult>("{}").is_err());
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let json = r#"{"gender":"male","confidence":1.5,"reasoning":"x"}"#;
        assert!(serde_json::from_str::<InferenceResult>(json).is_err());

        let json = r#"{"gender":"male","confidence":-0.1,"reasoning":"x"}"#;
        assert!(serde_json::from_str::<InferenceResult>(json).is_err());

        assert_eq!(
            InferenceResult::new(GenderCategory::Male, f64::NAN, "x").unwrap_err().to_string(),
            "confidence NaN is outside [0, 1]"
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(InferenceResult::new(GenderCategory::Male, 0.0, "x").is_ok());
        assert!(InferenceResult::new(GenderCategory::Male, 1.0, "x").is_ok());
    }

    #[test]
    fn test_confidence_percent() {
        let result = InferenceResult::new(GenderCategory::Unknown, 0.4, "x").unwrap();
        assert_eq!(result.confidence_percent(), 40);

        let result = InferenceResult::new(GenderCategory::Male, 0.875, "x").unwrap();
        assert_eq!(result.confidence_percent(), 88);

        let result = InferenceResult::new(GenderCategory::Male, 1.0, "x").unwrap();
        assert_eq!(result.confidence_percent(), 100);
    }

    #[test]
    fn test_serializes_with_gender_field() {
        let result = InferenceResult::new(GenderCategory::NonBinary, 0.5, "x").unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["gender"], "non-binary");
        assert!(value.get("category").is_none());
    }
}
