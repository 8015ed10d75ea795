//! HTTP surface for the recipe analyzer.
//!
//! A single JSON endpoint accepts a base64-encoded food photo and
//! answers with the extracted recipe. The model gateway is injected
//! through [`AppState`] so tests can stand in a canned model.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::AnalyzeError;
use crate::gateway::{GatewayError, OpenRouterGateway, VisionModel};
use crate::model::Recipe;
use crate::{analyze_image, clean_image_payload, MAX_IMAGE_BYTES};

// Encoded image (4/3 of the decoded cap) plus headroom for the JSON envelope
const REQUEST_BODY_LIMIT: usize = MAX_IMAGE_BYTES / 3 * 4 + 64 * 1024;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    gateway: Option<Arc<dyn VisionModel>>,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// A missing API key leaves the gateway unset rather than failing
    /// startup; analyze requests then answer with a configuration error.
    pub fn from_config(config: &AppConfig) -> Self {
        let gateway = OpenRouterGateway::from_config(config);
        if gateway.is_none() {
            warn!("no OpenRouter API key configured; analyze requests will be rejected");
        }
        AppState {
            gateway: gateway.map(|gateway| Arc::new(gateway) as Arc<dyn VisionModel>),
        }
    }

    /// Use an already-built model gateway.
    pub fn with_gateway(gateway: Arc<dyn VisionModel>) -> Self {
        AppState {
            gateway: Some(gateway),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    /// Base64 image data, bare or as a full data URL
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeImageResponse {
    pub recipe: Recipe,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Assemble the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze-image", post(analyze_image_handler))
        .route("/health", get(health))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(REQUEST_BODY_LIMIT))
        .with_state(state)
}

async fn analyze_image_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("analyze request rejected: {rejection}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid request body".to_string(),
                }),
            )
                .into_response();
        }
    };

    // Payload problems answer before the missing-credential check
    let image = match clean_image_payload(&request.image.unwrap_or_default()) {
        Ok(image) => image,
        Err(err) => return error_response(err),
    };

    let Some(gateway) = &state.gateway else {
        return error_response(AnalyzeError::MissingCredential);
    };

    match analyze_image(gateway.as_ref(), &image).await {
        Ok(recipe) => (StatusCode::OK, Json(AnalyzeImageResponse { recipe })).into_response(),
        Err(err) => error_response(err),
    }
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
        .into_response()
}

fn error_response(err: AnalyzeError) -> Response {
    let (status, message) = match &err {
        AnalyzeError::EmptyImage => (StatusCode::BAD_REQUEST, "No image provided".to_string()),
        AnalyzeError::ImageTooLarge { .. } => {
            (StatusCode::BAD_REQUEST, "Image is too large".to_string())
        }
        AnalyzeError::InvalidImageEncoding(_) => {
            (StatusCode::BAD_REQUEST, "Invalid image encoding".to_string())
        }
        AnalyzeError::MissingCredential => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error".to_string(),
        ),
        AnalyzeError::Gateway(GatewayError::Api { status, message }) => (
            StatusCode::BAD_GATEWAY,
            format!("AI service error (status {status}): {message}"),
        ),
        AnalyzeError::Gateway(GatewayError::MissingCompletion) => (
            StatusCode::BAD_GATEWAY,
            "AI service returned no completion".to_string(),
        ),
        AnalyzeError::Gateway(GatewayError::Transport(_)) => {
            (StatusCode::BAD_GATEWAY, "AI service unavailable".to_string())
        }
        AnalyzeError::Extract(_) => (
            StatusCode::BAD_GATEWAY,
            "Failed to parse recipe from AI response".to_string(),
        ),
    };

    if status.is_server_error() {
        error!("analyze request failed: {err}");
    } else {
        warn!("analyze request rejected: {err}");
    }

    (status, Json(ErrorResponse { error: message })).into_response()
}
