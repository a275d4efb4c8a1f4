use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("没有选择文件")]
    NoFile,

    #[error("缺少文件名")]
    MissingFilename,

    #[error("分析失败: {0}")]
    InvalidBody(String),

    #[error("上传失败: {0}")]
    Upload(#[from] std::io::Error),

    // MultipartError's Display is generic; body_text() names the cause
    #[error("上传失败: {}", .0.body_text())]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NoFile | AppError::MissingFilename | AppError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Upload(_) => {
                tracing::error!("Upload error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Multipart(e) => {
                let status = e.status();
                if status.is_server_error() {
                    tracing::error!("Multipart error: {}", self);
                }
                status
            }
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
