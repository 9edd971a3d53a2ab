use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use ingredai_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use ingredai_core::domain::ingredient_analysis::entities::{
    AnalysisResult, GREETING_MESSAGE, Severity,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const API_KEY: &str = "sk-or-integration";

const ANALYSIS_CONTENT: &str = r#"```json
{
  "ingredients": [
    {"name": "Sugar", "what_it_is": "A sweetener.", "why_it_is_used": "Taste.",
     "tradeoffs": "Adds empty calories.", "uncertainty": "Amount not listed.", "severity": "HIGH"},
    {"name": "Soy lecithin", "what_it_is": "", "severity": "low"}
  ],
  "overall_nutrition_per_100g": {"calories_kcal": 530, "carbohydrates_g": "57"},
  "overall_conclusion": "An occasional treat."
}
```"#;

/// Stand-in for the chat-completion endpoint that counts every call.
#[derive(Clone)]
struct FakeUpstream {
    calls: Arc<AtomicUsize>,
    status: StatusCode,
    content: &'static str,
}

async fn chat_completions(
    State(upstream): State<FakeUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    upstream.calls.fetch_add(1, Ordering::SeqCst);

    let expected = format!("Bearer {API_KEY}");
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str());
    if !authorized || headers.get("x-title").is_none() || body.get("messages").is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "bad request from client"}})),
        );
    }

    if !upstream.status.is_success() {
        return (
            upstream.status,
            Json(json!({"error": {"message": "upstream exploded"}})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "choices": [{"message": {"role": "assistant", "content": upstream.content}}]
        })),
    )
}

async fn spawn_upstream(status: StatusCode, content: &'static str) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = FakeUpstream {
        calls: calls.clone(),
        status,
        content,
    };

    let app = Router::new()
        .route("/api/v1/chat/completions", post(chat_completions))
        .with_state(upstream);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api/v1"), calls)
}

async fn test_server(
    status: StatusCode,
    content: &'static str,
    extra: &[&str],
) -> (TestServer, Arc<AtomicUsize>) {
    let (base_url, calls) = spawn_upstream(status, content).await;

    let mut argv = vec![
        "ingredai",
        "--openrouter-api-key",
        API_KEY,
        "--openrouter-base-url",
        &base_url,
    ];
    argv.extend_from_slice(extra);
    let args = Arc::new(Args::try_parse_from(argv).unwrap());

    let app = router(state(args).unwrap()).unwrap();
    (TestServer::new(app).unwrap(), calls)
}

#[tokio::test]
async fn test_greeting_answers_without_upstream_call() {
    let (server, calls) = test_server(StatusCode::OK, ANALYSIS_CONTENT, &[]).await;

    let response = server
        .post("/api/reasoning")
        .json(&json!({"ingredients": "Hello!"}))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"greeting": GREETING_MESSAGE}));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_ingredients_are_rejected_without_upstream_call() {
    let (server, calls) = test_server(StatusCode::OK, ANALYSIS_CONTENT, &[]).await;

    for body in [
        json!({"ingredients": ""}),
        json!({"ingredients": "   "}),
        json!({"ingredients": 42}),
        json!({"product_context": "cereal"}),
    ] {
        let response = server.post("/api/reasoning").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_analysis_is_normalized() {
    let (server, calls) = test_server(StatusCode::OK, ANALYSIS_CONTENT, &[]).await;

    let response = server
        .post("/api/reasoning")
        .json(&json!({"ingredients": "sugar, soy lecithin", "product_context": "chocolate"}))
        .await;

    response.assert_status_ok();
    let result: AnalysisResult = response.json();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.ingredients.len(), 2);
    assert_eq!(result.ingredients[0].severity, Severity::High);
    assert_eq!(result.ingredients[1].severity, Severity::Low);
    assert!(!result.ingredients[1].what_it_is.is_empty());

    let nutrition = result.overall_nutrition_per_100g.unwrap();
    assert_eq!(nutrition.calories_kcal, "530");
    assert_eq!(nutrition.fiber_g, "unknown");
    assert_eq!(result.overall_conclusion.as_deref(), Some("An occasional treat."));
}

#[tokio::test]
async fn test_long_ingredient_list_is_accepted() {
    let (server, calls) = test_server(StatusCode::OK, ANALYSIS_CONTENT, &[]).await;

    let ingredients = "sugar, ".repeat(800);
    let product_context = "family size chocolate spread ".repeat(40);
    let response = server
        .post("/api/reasoning")
        .json(&json!({"ingredients": ingredients, "product_context": product_context}))
        .await;

    response.assert_status_ok();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_keyword_policy_is_applied_end_to_end() {
    let (server, _) = test_server(
        StatusCode::OK,
        r#"{"ingredients": [{"name": "salt"}, {"name": "sugar"}, {"name": "water"}]}"#,
        &["--severity-policy", "keyword"],
    )
    .await;

    let response = server
        .post("/api/reasoning")
        .json(&json!({"ingredients": "salt, sugar, water"}))
        .await;

    let result: AnalysisResult = response.json();
    let severities: Vec<_> = result.ingredients.iter().map(|i| i.severity).collect();
    assert_eq!(severities, vec![Severity::High, Severity::High, Severity::Low]);
}

#[tokio::test]
async fn test_upstream_failure_returns_500_without_data() {
    let (server, calls) = test_server(StatusCode::INTERNAL_SERVER_ERROR, "", &[]).await;

    let response = server
        .post("/api/reasoning")
        .json(&json!({"ingredients": "salt, sugar"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"error": "AI processing failed"}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_output_is_reasked_once_then_fails() {
    let (server, calls) =
        test_server(StatusCode::OK, "Sure! Here is the JSON: {\"ingredients\": [],}", &[]).await;

    let response = server
        .post("/api/reasoning")
        .json(&json!({"ingredients": "salt"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_ocr_with_vision_backend_cleans_text() {
    let (server, calls) = test_server(
        StatusCode::OK,
        "INGREDIENTS: Sugar\n\nSalt (2%)\nCocoa butter*",
        &["--ocr-backend", "vision"],
    )
    .await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0x89, 0x50, 0x4E, 0x47])
            .file_name("label.png")
            .mime_type("image/png"),
    );
    let response = server.post("/api/ocr").multipart(form).await;

    response.assert_status_ok();
    response.assert_json(&json!({"extracted_text": "INGREDIENTS Sugar, Salt 2, Cocoa butter"}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_ocr_without_image_is_rejected() {
    let (server, calls) = test_server(StatusCode::OK, "", &["--ocr-backend", "vision"]).await;

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = server.post("/api/ocr").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "No image uploaded"}));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_ocr_non_multipart_body_gets_json_error() {
    let (server, calls) = test_server(StatusCode::OK, "", &["--ocr-backend", "vision"]).await;

    let response = server
        .post("/api/ocr")
        .json(&json!({"image": "label.png"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|error| error.starts_with("Invalid multipart request"))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_ocr_rejects_oversized_image() {
    let (server, calls) = test_server(
        StatusCode::OK,
        "",
        &["--ocr-backend", "vision", "--ocr-max-image-bytes", "16"],
    )
    .await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0u8; 64]).file_name("big.jpg").mime_type("image/jpeg"),
    );
    let response = server.post("/api/ocr").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_liveness_routes() {
    let (server, _) = test_server(StatusCode::OK, "", &[]).await;

    for path in ["/", "/health/live"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        response.assert_json(&json!({"status": "UP", "service": "IngrediAI backend running"}));
    }
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let (server, _) = test_server(StatusCode::OK, "", &[]).await;

    let document: Value = server.get("/api-docs/openapi.json").await.json();
    let paths = document["paths"].as_object().unwrap();

    assert!(paths.contains_key("/api/reasoning"));
    assert!(paths.contains_key("/api/ocr"));
}
