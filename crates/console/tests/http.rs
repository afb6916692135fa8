//! Router-level tests: the full request path from HTTP down to the classifier,
//! with the advice service replaced by an in-process stub.

use advice::{AdviceError, AdviceGenerator, AdviceSettings};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use health_console::config::AssetConfig;
use health_console::{build_router, AppState};
use risk_model::{HealthReading, RiskAssessment};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Fixtures
// ============================================================================

struct StubAdvice {
    reply: Result<String, AdviceError>,
    calls: AtomicUsize,
}

impl StubAdvice {
    fn new(reply: Result<String, AdviceError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdviceGenerator for StubAdvice {
    async fn generate(
        &self,
        _reading: &HealthReading,
        _assessment: &RiskAssessment,
    ) -> Result<String, AdviceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

fn router_with(stub: Arc<StubAdvice>) -> Router {
    build_router(AppState::new(stub, AssetConfig::default(), None))
}

fn form_body(age: &str, systolic: &str, diastolic: &str, sugar: &str, cholesterol: &str) -> String {
    format!(
        "age={age}&gender=male&systolic={systolic}&diastolic={diastolic}&sugar={sugar}&bmi=24.5&cholesterol={cholesterol}&heart_rate=70"
    )
}

fn form_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn reading_json(age: u16, systolic: u16, diastolic: u16, sugar: u16, cholesterol: u16) -> Value {
    json!({
        "age": age,
        "gender": "female",
        "systolic": systolic,
        "diastolic": diastolic,
        "sugar": sugar,
        "bmi": 23.1,
        "cholesterol": cholesterol,
        "heart_rate": 68
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ============================================================================
// HTML form
// ============================================================================

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let app = router_with(StubAdvice::new(Ok(String::new())));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn index_serves_the_form() {
    let app = router_with(StubAdvice::new(Ok(String::new())));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("AI Health Risk Predictor"));
    assert!(html.contains("action=\"/predict\""));
    assert!(html.contains("name=\"heart_rate\" min=\"40\" max=\"200\""));
}

#[tokio::test]
async fn predict_renders_cards_chart_and_advice() {
    let stub = StubAdvice::new(Ok("Beep boop, drink water!".to_string()));
    let app = router_with(Arc::clone(&stub));
    let response = app
        .oneshot(form_request(form_body("40", "145", "85", "110", "210")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(">Diabetes: Moderate<"));
    assert!(html.contains(">Hypertension: High<"));
    assert!(html.contains(">Heart Disease: Moderate<"));
    assert!(html.contains("Beep boop, drink water!"));
    assert!(html.contains("<svg class=\"risk-chart\""));
    assert!(!html.contains("id=\"celebration\""));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn predict_celebrates_all_low() {
    let app = router_with(StubAdvice::new(Ok("All clear.".to_string())));
    let response = app
        .oneshot(form_request(form_body("30", "110", "70", "90", "180")))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains(">Diabetes: Low<"));
    assert!(html.contains(">Hypertension: Low<"));
    assert!(html.contains(">Heart Disease: Low<"));
    assert!(html.contains("id=\"celebration\""));
}

#[tokio::test]
async fn predict_rejects_out_of_range_without_calling_advice() {
    let stub = StubAdvice::new(Ok("unused".to_string()));
    let app = router_with(Arc::clone(&stub));
    let response = app
        .oneshot(form_request(form_body("0", "145", "85", "999", "210")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Age must be between 1 and 120"));
    assert!(html.contains("Fasting Blood Sugar (mg/dL) must be between 50 and 300"));
    assert!(html.contains("value=\"999\""));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn predict_shows_advice_failure_as_message() {
    let stub = StubAdvice::new(Err(AdviceError::Service {
        status: Some(503),
        message: "model overloaded".to_string(),
    }));
    let app = router_with(stub);
    let response = app
        .oneshot(form_request(form_body("50", "150", "95", "130", "250")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(
        "Error fetching AI advice: advice service error (status 503): model overloaded"
    ));
    assert!(html.contains(">Heart Disease: High<"));
}

#[tokio::test]
async fn missing_credential_shows_warning_and_still_classifies() {
    let settings = AdviceSettings {
        api_key_env: "HEALTH_CONSOLE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        ..AdviceSettings::default()
    };
    let app = build_router(AppState::from_settings(&settings, AssetConfig::default()));
    let response = app
        .oneshot(form_request(form_body("60", "130", "75", "95", "230")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("class=\"config-warning\""));
    assert!(html.contains("HEALTH_CONSOLE_TEST_KEY_THAT_IS_NEVER_SET not set"));
    assert!(html.contains("Error fetching AI advice: advice service is not configured"));
    assert!(html.contains(">Hypertension: Moderate<"));
    assert!(html.contains(">Heart Disease: Moderate<"));
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn api_returns_assessment_and_advice() {
    let app = router_with(StubAdvice::new(Ok("Stay strong.".to_string())));
    let response = app
        .oneshot(json_request("/api/assess", reading_json(50, 150, 95, 130, 250)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        body["assessment"],
        json!({ "Diabetes": "High", "Hypertension": "High", "Heart Disease": "High" })
    );
    assert_eq!(body["advice"], json!({ "text": "Stay strong." }));
    assert_eq!(body["reading"]["gender"], json!("female"));
}

#[tokio::test]
async fn api_can_skip_advice() {
    let stub = StubAdvice::new(Ok("unused".to_string()));
    let app = router_with(Arc::clone(&stub));
    let response = app
        .oneshot(json_request(
            "/api/assess?advice=false",
            reading_json(60, 130, 75, 95, 230),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        body["assessment"],
        json!({ "Diabetes": "Low", "Hypertension": "Moderate", "Heart Disease": "Moderate" })
    );
    assert_eq!(body["advice"], Value::Null);
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn api_reports_advice_error_kind() {
    let stub = StubAdvice::new(Err(AdviceError::Network {
        timed_out: true,
        message: "deadline elapsed".to_string(),
    }));
    let app = router_with(stub);
    let response = app
        .oneshot(json_request("/api/assess", reading_json(30, 110, 70, 90, 180)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["advice"]["error"]["kind"], json!("network"));
    assert_eq!(
        body["advice"]["error"]["message"],
        json!("advice request timed out: deadline elapsed")
    );
}

#[tokio::test]
async fn api_rejects_out_of_range_reading() {
    let stub = StubAdvice::new(Ok("unused".to_string()));
    let app = router_with(Arc::clone(&stub));
    let response = app
        .oneshot(json_request("/api/assess", reading_json(30, 260, 70, 90, 180)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        body,
        json!({ "errors": [ { "field": "systolic", "message": "Systolic BP (mmHg) must be between 50 and 250" } ] })
    );
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn api_rejects_negative_age_with_field_errors() {
    let stub = StubAdvice::new(Ok("unused".to_string()));
    let app = router_with(Arc::clone(&stub));
    let mut reading = reading_json(30, 120, 70, 90, 180);
    reading["age"] = json!(-1);
    let response = app
        .oneshot(json_request("/api/assess", reading))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        body,
        json!({ "errors": [ { "field": "age", "message": "Age must be between 1 and 120" } ] })
    );
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn api_rejects_reading_beyond_integer_width() {
    let stub = StubAdvice::new(Ok("unused".to_string()));
    let app = router_with(Arc::clone(&stub));
    let mut reading = reading_json(30, 120, 70, 90, 180);
    reading["systolic"] = json!(70000);
    let response = app
        .oneshot(json_request("/api/assess?advice=false", reading))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["errors"][0]["field"], "systolic");
    assert_eq!(
        body["errors"][0]["message"],
        "Systolic BP (mmHg) must be between 50 and 250"
    );
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn api_malformed_body_uses_error_envelope() {
    let stub = StubAdvice::new(Ok("unused".to_string()));
    let app = router_with(Arc::clone(&stub));
    let request = Request::builder()
        .method("POST")
        .uri("/api/assess")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"age\": 40,"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "body");
    assert!(!errors[0]["message"].as_str().unwrap_or_default().is_empty());
    assert_eq!(stub.calls(), 0);
}
