use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub overall_verdict: Verdict,
    pub summary: String,
    pub ingredients: Vec<IngredientAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientAnalysis {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_name: Option<String>,
    pub purpose: String,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulatory_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Safe,
    Caution,
    Avoid,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Safe, Verdict::Caution, Verdict::Avoid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Safe => "SAFE",
            Verdict::Caution => "CAUTION",
            Verdict::Avoid => "AVOID",
        }
    }
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScanResult {
    /// Parses the model's JSON output. Anything that does not match the schema
    /// is an upstream failure; no field is ever defaulted in its place.
    pub fn from_model_output(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw.trim()).map_err(|e| {
            tracing::error!("LLM response does not match the scan schema: {}", e);
            CoreError::ExternalServiceError(format!("Invalid scan result: {}", e))
        })
    }

    /// Entries carrying a warning or rated above `LOW`, in label order.
    pub fn flagged_ingredients(&self) -> impl Iterator<Item = &IngredientAnalysis> {
        self.ingredients.iter().filter(|i| i.is_flagged())
    }

    pub fn count_by_risk(&self, level: RiskLevel) -> usize {
        self.ingredients
            .iter()
            .filter(|i| i.risk_level == level)
            .count()
    }
}

impl IngredientAnalysis {
    pub fn is_flagged(&self) -> bool {
        self.risk_level > RiskLevel::Low || self.warning.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PILOT_RESPONSE: &str = r#"
    {
        "productName": "Energy Bar",
        "overallVerdict": "AVOID",
        "summary": "Contains an allergen and a stimulant.",
        "ingredients": [
            { "name": "Sugar", "purpose": "Sweetener", "riskLevel": "LOW" },
            {
                "name": "Caffeine",
                "technicalName": "1,3,7-trimethylxanthine",
                "purpose": "Stimulant",
                "riskLevel": "HIGH",
                "warning": "Stimulants may conflict with flight duty requirements."
            },
            {
                "name": "Peanut oil",
                "purpose": "Fat",
                "riskLevel": "HIGH",
                "warning": "Derived from peanuts.",
                "regulatoryNote": "Major allergen under FALCPA."
            }
        ]
    }"#;

    #[test]
    fn test_parse_model_output() {
        let result = ScanResult::from_model_output(PILOT_RESPONSE).unwrap();
        assert_eq!(result.product_name.as_deref(), Some("Energy Bar"));
        assert_eq!(result.overall_verdict, Verdict::Avoid);
        assert_eq!(result.ingredients.len(), 3);
        assert_eq!(result.ingredients[1].risk_level, RiskLevel::High);
        assert_eq!(
            result.ingredients[2].regulatory_note.as_deref(),
            Some("Major allergen under FALCPA.")
        );
    }

    #[test]
    fn test_flagged_ingredients_keep_order() {
        let result = ScanResult::from_model_output(PILOT_RESPONSE).unwrap();
        let flagged: Vec<&str> = result
            .flagged_ingredients()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(flagged, vec!["Caffeine", "Peanut oil"]);
        assert_eq!(result.count_by_risk(RiskLevel::High), 2);
        assert_eq!(result.count_by_risk(RiskLevel::Medium), 0);
    }

    #[test]
    fn test_empty_ingredient_list_is_valid() {
        let raw = r#"{"overallVerdict":"SAFE","summary":"Nothing found.","ingredients":[]}"#;
        let result = ScanResult::from_model_output(raw).unwrap();
        assert!(result.ingredients.is_empty());
        assert!(result.product_name.is_none());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let raw = r#"{"overallVerdict":"SAFE","ingredients":[]}"#;
        let err = ScanResult::from_model_output(raw).unwrap_err();
        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[test]
    fn test_unknown_risk_level_is_rejected() {
        let raw = r#"{
            "overallVerdict":"CAUTION",
            "summary":"x",
            "ingredients":[{"name":"Salt","purpose":"Flavor","riskLevel":"EXTREME"}]
        }"#;
        assert!(ScanResult::from_model_output(raw).is_err());
    }

    #[test]
    fn test_unknown_verdict_is_rejected() {
        let raw = r#"{"overallVerdict":"UNSAFE","summary":"x","ingredients":[]}"#;
        assert!(ScanResult::from_model_output(raw).is_err());
    }

    #[test]
    fn test_not_json_is_rejected() {
        assert!(ScanResult::from_model_output("I cannot read this label.").is_err());
    }

    #[test]
    fn test_optional_fields_are_omitted_when_serialized() {
        let result = ScanResult {
            product_name: None,
            overall_verdict: Verdict::Safe,
            summary: "ok".to_string(),
            ingredients: vec![IngredientAnalysis {
                name: "Water".to_string(),
                technical_name: None,
                purpose: "Base".to_string(),
                risk_level: RiskLevel::Low,
                warning: None,
                regulatory_note: None,
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("productName").is_none());
        assert!(json["ingredients"][0].get("warning").is_none());
        assert_eq!(json["ingredients"][0]["riskLevel"], "LOW");
    }
}
