use advice::{AdviceError, AdviceGenerator, AdviceSettings, HttpAdviceGenerator, UnconfiguredAdvice};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use risk_model::{classify, HealthReading, RiskAssessment};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::config::AssetConfig;
use crate::form::{FieldError, ReadingForm, ReadingPayload};
use crate::render::{form_page, results_page, AdviceView, PageContext};

#[derive(Clone)]
pub struct AppState {
    advice: Arc<dyn AdviceGenerator>,
    assets: Arc<AssetConfig>,
    config_warning: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        advice: Arc<dyn AdviceGenerator>,
        assets: AssetConfig,
        config_warning: Option<String>,
    ) -> Self {
        Self {
            advice,
            assets: Arc::new(assets),
            config_warning: config_warning.map(Arc::from),
        }
    }

    /// Builds the advice client from config. A missing credential is logged
    /// once here and surfaced as a page banner; the console still serves.
    pub fn from_settings(settings: &AdviceSettings, assets: AssetConfig) -> Self {
        match settings.resolve() {
            Ok(config) => {
                let generator = HttpAdviceGenerator::new(config);
                let config = generator.config();
                info!(
                    provider = config.provider.as_str(),
                    model = %config.model,
                    base_url = %config.base_url,
                    timeout_ms = config.timeout.as_millis() as u64,
                    "advice client configured"
                );
                Self::new(Arc::new(generator), assets, None)
            }
            Err(err) => {
                warn!(error = %err, "advice disabled");
                let warning = match &err {
                    AdviceError::Configuration(reason) => {
                        format!("{reason}. Advice is unavailable until a key is configured.")
                    }
                    other => other.to_string(),
                };
                Self::new(
                    Arc::new(UnconfiguredAdvice::from_error(&err)),
                    assets,
                    Some(warning),
                )
            }
        }
    }

    fn page(&self) -> PageContext<'_> {
        PageContext {
            assets: &self.assets,
            config_warning: self.config_warning.as_deref(),
        }
    }

    async fn advise(&self, reading: &HealthReading, assessment: &RiskAssessment) -> AdviceView {
        let started = Instant::now();
        let result = self.advice.generate(reading, assessment).await;
        match &result {
            Ok(text) => info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                advice_len = text.len(),
                "advice generated"
            ),
            Err(err) => warn!(
                kind = err.kind().as_str(),
                error = %err,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "advice unavailable"
            ),
        }
        AdviceView::from(result)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/api/assess", post(api_assess))
        .route("/health", get(health))
        .with_state(state)
        .layer(middleware::from_fn(log_http_request))
}

async fn health() -> &'static str {
    "ok"
}

async fn log_http_request(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let span = tracing::info_span!("http", request_id = %request_id);
    let started = Instant::now();
    let response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    span.in_scope(|| {
        info!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "http request"
        );
    });
    response
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(form_page(&state.page(), &ReadingForm::initial(), &[]))
}

async fn predict(State(state): State<AppState>, Form(form): Form<ReadingForm>) -> Response {
    let reading = match form.parse() {
        Ok(reading) => reading,
        Err(errors) => {
            info!(invalid_fields = errors.len(), "form rejected");
            let page = form_page(&state.page(), &form, &errors);
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
    };
    let assessment = classify(&reading);
    info!(
        diabetes = %assessment.diabetes,
        hypertension = %assessment.hypertension,
        heart_disease = %assessment.heart_disease,
        "reading classified"
    );
    let advice = state.advise(&reading, &assessment).await;
    let page = results_page(&state.page(), &form, &assessment, &advice);
    Html(page).into_response()
}

#[derive(Debug, Deserialize)]
struct AssessQuery {
    #[serde(default = "default_true")]
    advice: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize)]
struct AssessResponse {
    reading: HealthReading,
    assessment: RiskAssessment,
    advice: Option<AdviceView>,
}

#[derive(Serialize)]
struct ValidationResponse {
    errors: Vec<FieldError>,
}

fn rejected(errors: Vec<FieldError>) -> Response {
    info!(invalid_fields = errors.len(), "reading rejected");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidationResponse { errors }),
    )
        .into_response()
}

async fn api_assess(
    State(state): State<AppState>,
    Query(query): Query<AssessQuery>,
    payload: Result<Json<ReadingPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            return rejected(vec![FieldError {
                field: "body",
                message: rejection.body_text(),
            }])
        }
    };
    let reading = match payload.parse() {
        Ok(reading) => reading,
        Err(errors) => return rejected(errors),
    };
    let assessment = classify(&reading);
    let advice = if query.advice {
        Some(state.advise(&reading, &assessment).await)
    } else {
        None
    };
    Json(AssessResponse {
        reading,
        assessment,
        advice,
    })
    .into_response()
}
