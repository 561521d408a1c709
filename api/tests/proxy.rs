use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{HeaderName, HeaderValue, StatusCode, header::CONTENT_TYPE},
};
use axum_test::TestServer;
use clap::Parser;
use labeliq_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use serde_json::{Value, json};
use test_context::{AsyncTestContext, test_context};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

const PILOT_RESULT: &str = r#"{
    "overallVerdict": "AVOID",
    "summary": "Peanut oil conflicts with your allergy; caffeine is a concern for flight duty.",
    "ingredients": [
        { "name": "Sugar", "purpose": "Sweetener", "riskLevel": "LOW" },
        { "name": "Caffeine", "purpose": "Stimulant", "riskLevel": "HIGH",
          "warning": "Stimulant; check against aviation medical guidance." },
        { "name": "Peanut oil", "purpose": "Fat", "riskLevel": "HIGH",
          "warning": "Peanut allergen." }
    ]
}"#;

struct ProxyContext {
    server: TestServer,
    provider: MockServer,
}

/// Same server started with `--trust-proxy`, as deployed behind a reverse proxy.
struct ForwardedProxyContext(ProxyContext);

impl AsyncTestContext for ProxyContext {
    async fn setup() -> Self {
        ProxyContext::start(false).await
    }
}

impl AsyncTestContext for ForwardedProxyContext {
    async fn setup() -> Self {
        ForwardedProxyContext(ProxyContext::start(true).await)
    }
}

impl ProxyContext {
    async fn start(trust_proxy: bool) -> Self {
        let provider = MockServer::start().await;
        let provider_uri = provider.uri();
        let mut argv = vec![
            "labeliq-api",
            "--gemini-api-key",
            "test-key",
            "--gemini-model",
            "gemini-test",
            "--gemini-base-url",
            provider_uri.as_str(),
            "--rate-limit-window-secs",
            "900",
            "--rate-limit-max",
            "100",
            "--allowed-origins",
            "http://localhost:3000",
        ];
        if trust_proxy {
            argv.push("--trust-proxy");
        }
        let args = Args::parse_from(argv);

        let app = router(state(Arc::new(args))).unwrap();
        let server = TestServer::new(app).unwrap();

        ProxyContext { server, provider }
    }

    async fn mount_provider(&self, model_text: &str) {
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": model_text }] } }]
            })))
            .mount(&self.provider)
            .await;
    }

    async fn provider_calls(&self) -> usize {
        self.provider
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

fn client(ip: &'static str) -> HeaderValue {
    HeaderValue::from_static(ip)
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_health(ctx: &mut ProxyContext) {
    let response = ctx.server.get("/api/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_analyze_text_scenario(ctx: &mut ProxyContext) {
    ctx.mount_provider(PILOT_RESULT).await;

    let response = ctx
        .server
        .post("/api/analyze-text")
        .add_header(FORWARDED_FOR, client("203.0.113.1"))
        .json(&json!({
            "text": "sugar, caffeine, peanut oil",
            "profile": { "allergies": ["Peanuts"], "profession": "Pilot" }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(matches!(
        body["overallVerdict"].as_str(),
        Some("CAUTION") | Some("AVOID")
    ));

    let ingredients = body["ingredients"].as_array().unwrap();
    assert_eq!(ingredients.len(), 3);
    for ingredient in ingredients {
        assert!(matches!(
            ingredient["riskLevel"].as_str(),
            Some("LOW") | Some("MEDIUM") | Some("HIGH")
        ));
    }
    assert_eq!(response.header("ratelimit-limit"), "100");
    assert_eq!(response.header("ratelimit-remaining"), "99");
    assert_eq!(response.header("ratelimit-policy"), "100;w=900");

    let requests = ctx.provider.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("sugar, caffeine, peanut oil"));
    assert!(prompt.contains("- Allergies: Peanuts"));
    assert!(prompt.contains("- Profession: Pilot"));
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_analyze_ingredients_forwards_image(ctx: &mut ProxyContext) {
    ctx.mount_provider(r#"{"overallVerdict":"SAFE","summary":"Plain water.","ingredients":[]}"#)
        .await;

    let response = ctx
        .server
        .post("/api/analyze-ingredients")
        .add_header(FORWARDED_FOR, client("203.0.113.2"))
        .json(&json!({ "imageBuffer": "/9j/4AAQ", "profile": {} }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "overallVerdict": "SAFE",
        "summary": "Plain water.",
        "ingredients": []
    }));

    let requests = ctx.provider.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent["contents"][0]["parts"][0]["inlineData"],
        json!({ "mimeType": "image/jpeg", "data": "/9j/4AAQ" })
    );
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_missing_fields_never_reach_provider(ctx: &mut ProxyContext) {
    ctx.mount_provider(PILOT_RESULT).await;

    let response = ctx
        .server
        .post("/api/analyze-ingredients")
        .json(&json!({ "profile": {} }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "imageBuffer and profile are required",
        "details": ["Missing imageBuffer or profile in request body"]
    }));

    let response = ctx
        .server
        .post("/api/analyze-text")
        .json(&json!({ "text": "salt" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "text and profile are required",
        "details": ["Missing text or profile in request body"]
    }));

    let response = ctx
        .server
        .post("/api/analyze-text")
        .json(&json!({ "text": "", "profile": {} }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(ctx.provider_calls().await, 0);
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_malformed_json_is_bad_request(ctx: &mut ProxyContext) {
    let response = ctx
        .server
        .post("/api/analyze-text")
        .add_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .bytes(Bytes::from_static(b"{not json"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["details"].as_array().map(|d| d.len()), Some(1));
    assert_eq!(ctx.provider_calls().await, 0);
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_wrong_method(ctx: &mut ProxyContext) {
    let response = ctx.server.get("/api/analyze-text").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.header("allow"), "POST");
    response.assert_json(&json!({ "error": "Method not allowed" }));
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_provider_schema_violation_is_generic_500(ctx: &mut ProxyContext) {
    ctx.mount_provider(r#"{"summary":"missing verdict"}"#).await;

    let response = ctx
        .server
        .post("/api/analyze-text")
        .json(&json!({ "text": "salt", "profile": {} }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Internal server error" }));
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_101st_request_is_rate_limited(ctx: &mut ProxyContext) {
    ctx.mount_provider(PILOT_RESULT).await;

    for _ in 0..100 {
        ctx.server
            .get("/api/health")
            .add_header(FORWARDED_FOR, client("198.51.100.9"))
            .await
            .assert_status_ok();
    }

    let response = ctx
        .server
        .post("/api/analyze-text")
        .add_header(FORWARDED_FOR, client("198.51.100.9"))
        .json(&json!({ "text": "salt", "profile": {} }))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    response.assert_json(&json!({
        "error": "Too many requests from this IP, please try again later.",
        "code": 429
    }));
    assert_eq!(response.header("ratelimit-remaining"), "0");
    let retry_after: u64 = response
        .header("retry-after")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 900);
    assert_eq!(ctx.provider_calls().await, 0);
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_rotating_forwarded_for_does_not_reset_window(ctx: &mut ProxyContext) {
    ctx.mount_provider(PILOT_RESULT).await;

    for _ in 0..100 {
        ctx.server
            .get("/api/health")
            .add_header(FORWARDED_FOR, client("1.1.1.1"))
            .await
            .assert_status_ok();
    }

    let response = ctx
        .server
        .post("/api/analyze-text")
        .add_header(FORWARDED_FOR, client("2.2.2.2"))
        .json(&json!({ "text": "salt", "profile": {} }))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(ctx.provider_calls().await, 0);
}

#[test_context(ForwardedProxyContext)]
#[tokio::test]
async fn test_trusted_forwarded_clients_keep_own_window(ctx: &mut ForwardedProxyContext) {
    let ctx = &ctx.0;

    for _ in 0..100 {
        ctx.server
            .get("/api/health")
            .add_header(FORWARDED_FOR, client("198.51.100.9"))
            .await
            .assert_status_ok();
    }

    ctx.server
        .get("/api/health")
        .add_header(FORWARDED_FOR, client("198.51.100.9"))
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    let response = ctx
        .server
        .get("/api/health")
        .add_header(FORWARDED_FOR, client("198.51.100.10"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("ratelimit-remaining"), "99");
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_unknown_api_path_counts_against_limit(ctx: &mut ProxyContext) {
    let response = ctx.server.get("/api/unknown").await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Not found" }));
    assert_eq!(response.header("ratelimit-remaining"), "99");

    let response = ctx.server.get("/api/health").await;
    assert_eq!(response.header("ratelimit-remaining"), "98");
}

#[test_context(ProxyContext)]
#[tokio::test]
async fn test_openapi_document(ctx: &mut ProxyContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["paths"]["/api/analyze-ingredients"]["post"].is_object());
    assert!(doc["paths"]["/api/analyze-text"]["post"].is_object());
    assert!(doc["paths"]["/api/health"]["get"].is_object());
}
