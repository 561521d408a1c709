use serde_json::json;

use crate::domain::analysis::entities::{RiskLevel, Verdict};

/// Returns the response schema the model output is constrained to.
///
/// Mirrors `ScanResult`: `overallVerdict`, `summary` and `ingredients` are
/// required at the top level; `name`, `purpose` and `riskLevel` on each entry.
pub fn get_scan_result_schema() -> serde_json::Value {
    let verdicts: Vec<&str> = Verdict::ALL.iter().map(Verdict::as_str).collect();
    let risk_levels: Vec<&str> = RiskLevel::ALL.iter().map(RiskLevel::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "productName": { "type": "STRING" },
            "overallVerdict": {
                "type": "STRING",
                "format": "enum",
                "enum": verdicts,
                "description": format!("One of: {}", verdicts.join(", "))
            },
            "summary": { "type": "STRING" },
            "ingredients": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "technicalName": { "type": "STRING" },
                        "purpose": { "type": "STRING" },
                        "riskLevel": {
                            "type": "STRING",
                            "format": "enum",
                            "enum": risk_levels,
                            "description": format!("One of: {}", risk_levels.join(", "))
                        },
                        "warning": { "type": "STRING" },
                        "regulatoryNote": { "type": "STRING" }
                    },
                    "required": ["name", "purpose", "riskLevel"]
                }
            }
        },
        "required": ["overallVerdict", "summary", "ingredients"]
    })
}
