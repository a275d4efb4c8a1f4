use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartRejection},
        rejection::JsonRejection,
    },
    response::Html,
};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::mock::{AnalysisResult, build_analysis};
use crate::routes::AppState;
use crate::storage::{PendingUpload, generate_filename};

const VIDEO_FIELD: &str = "video";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    success: bool,
    filename: String,
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    success: bool,
    results: AnalysisResult,
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "traffic_mock_server"
    }))
}

pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    tracing::info!("Received upload request");

    // Not a multipart body at all: same answer as a missing field
    let Ok(mut multipart) = multipart else {
        return Err(AppError::NoFile);
    };

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }
        // Plain form values named `video` are not files
        let Some(original_name) = field.file_name() else {
            continue;
        };
        // Browsers send an empty file name when nothing was picked
        if original_name.is_empty() {
            return Err(AppError::NoFile);
        }

        let filename = generate_filename(&mut rand::rng(), Utc::now().timestamp());
        let mut upload = state.store.create(&filename).await?;
        if let Err(e) = stream_field(&mut field, &mut upload).await {
            upload.discard().await;
            return Err(e);
        }
        let written = upload.written();
        let path = upload.finish().await?;
        tracing::info!("Saved {} bytes to {}", written, path.display());

        return Ok(Json(UploadResponse {
            success: true,
            filename,
            message: "上传成功".to_string(),
        }));
    }

    Err(AppError::NoFile)
}

async fn stream_field(field: &mut Field<'_>, upload: &mut PendingUpload) -> Result<(), AppError> {
    while let Some(chunk) = field.chunk().await? {
        upload.write_chunk(&chunk).await?;
    }
    Ok(())
}

/// The filename is only an identifier; the uploaded file is never read.
pub async fn analyze_video(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::InvalidBody(e.body_text()))?;
    let filename = request
        .filename
        .filter(|f| !f.is_empty())
        .ok_or(AppError::MissingFilename)?;

    tracing::info!("Analyzing video {}", filename);

    // Simulated processing latency, no work happens here
    tokio::time::sleep(state.config.analysis_delay).await;

    let results = build_analysis(&mut rand::rng(), Local::now());
    tracing::debug!(
        violations = results.violations.len(),
        accident_probability = results.accident_probability,
        "Generated mock analysis"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        results,
    }))
}
