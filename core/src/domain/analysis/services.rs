use tracing::instrument;

use crate::domain::{
    analysis::{
        entities::ScanResult,
        ports::{AnalysisService, LLMClient},
        prompt::{build_image_prompt, build_text_prompt},
        schema::get_scan_result_schema,
        value_objects::{AnalyzeIngredientsInput, AnalyzeTextInput},
    },
    capture::entities::JPEG_MIME_TYPE,
    common::{entities::app_errors::CoreError, services::Service},
};

impl<LLM> AnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip_all, fields(payload_len = input.image_buffer.len()))]
    async fn analyze_ingredients(
        &self,
        input: AnalyzeIngredientsInput,
    ) -> Result<ScanResult, CoreError> {
        let prompt = build_image_prompt(&input.profile);

        let raw_response = self
            .llm_client
            .generate_with_image(
                prompt,
                input.image_buffer,
                JPEG_MIME_TYPE.to_string(),
                get_scan_result_schema(),
            )
            .await?;

        let result = ScanResult::from_model_output(&raw_response)?;
        tracing::debug!(
            ingredients = result.ingredients.len(),
            verdict = %result.overall_verdict,
            "image analysis complete"
        );

        Ok(result)
    }

    #[instrument(skip_all, fields(text_len = input.text.len()))]
    async fn analyze_text(&self, input: AnalyzeTextInput) -> Result<ScanResult, CoreError> {
        let prompt = build_text_prompt(&input.text, &input.profile);

        let raw_response = self
            .llm_client
            .generate_with_text(prompt, get_scan_result_schema())
            .await?;

        let result = ScanResult::from_model_output(&raw_response)?;
        tracing::debug!(
            ingredients = result.ingredients.len(),
            verdict = %result.overall_verdict,
            "text analysis complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        analysis::{
            entities::{RiskLevel, Verdict},
            ports::MockLLMClient,
        },
        profile::entities::{Profession, UserProfile},
    };

    const PILOT_RESPONSE: &str = r#"{
        "overallVerdict": "AVOID",
        "summary": "Peanut oil conflicts with your allergy and caffeine with flight duty.",
        "ingredients": [
            { "name": "Sugar", "purpose": "Sweetener", "riskLevel": "LOW" },
            { "name": "Caffeine", "purpose": "Stimulant", "riskLevel": "HIGH",
              "warning": "Stimulant; review against pilot duty rules." },
            { "name": "Peanut oil", "purpose": "Fat", "riskLevel": "HIGH",
              "warning": "Peanut allergen." }
        ]
    }"#;

    fn pilot_profile() -> UserProfile {
        UserProfile::new(
            ["Peanuts"],
            Vec::<String>::new(),
            Profession::Pilot,
            Vec::<String>::new(),
        )
    }

    #[tokio::test]
    async fn test_analyze_text_flags_allergy_and_profession() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .withf(|prompt, schema| {
                prompt.contains("sugar, caffeine, peanut oil")
                    && prompt.contains("- Allergies: Peanuts")
                    && prompt.contains("- Profession: Pilot")
                    && schema["required"][0] == "overallVerdict"
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(PILOT_RESPONSE.to_string()) }));
        llm.expect_generate_with_image().never();

        let service = Service::new(llm);
        let result = service
            .analyze_text(AnalyzeTextInput {
                text: "sugar, caffeine, peanut oil".to_string(),
                profile: pilot_profile(),
            })
            .await
            .unwrap();

        assert!(matches!(
            result.overall_verdict,
            Verdict::Caution | Verdict::Avoid
        ));
        assert_eq!(result.ingredients.len(), 3);

        let caffeine = result
            .ingredients
            .iter()
            .find(|i| i.name.to_lowercase().contains("caffeine"))
            .unwrap();
        assert!(caffeine.risk_level > RiskLevel::Low);

        let peanut = result
            .ingredients
            .iter()
            .find(|i| i.name.to_lowercase().contains("peanut"))
            .unwrap();
        assert!(peanut.is_flagged());
    }

    #[tokio::test]
    async fn test_analyze_ingredients_forwards_jpeg_payload() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .withf(|prompt, image, mime, _| {
                prompt.starts_with("Extract ingredients") && image == "aGVsbG8=" && mime == "image/jpeg"
            })
            .times(1)
            .returning(|_, _, _, _| {
                Box::pin(async {
                    Ok(r#"{"overallVerdict":"SAFE","summary":"ok","ingredients":[]}"#.to_string())
                })
            });

        let service = Service::new(llm);
        let result = service
            .analyze_ingredients(AnalyzeIngredientsInput {
                image_buffer: "aGVsbG8=".to_string(),
                profile: UserProfile::default(),
            })
            .await
            .unwrap();

        assert_eq!(result.overall_verdict, Verdict::Safe);
        assert!(result.ingredients.is_empty());
    }

    #[tokio::test]
    async fn test_schema_violation_is_external_error() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(r#"{"summary":"no verdict"}"#.to_string()) }));

        let service = Service::new(llm);
        let err = service
            .analyze_text(AnalyzeTextInput {
                text: "water".to_string(),
                profile: UserProfile::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_retried() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().times(1).returning(|_, _| {
            Box::pin(async { Err(CoreError::ExternalServiceError("boom".to_string())) })
        });

        let service = Service::new(llm);
        let err = service
            .analyze_text(AnalyzeTextInput {
                text: "water".to_string(),
                profile: UserProfile::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::ExternalServiceError("boom".to_string()));
    }
}
