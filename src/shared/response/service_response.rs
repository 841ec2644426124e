use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use crate::shared::errors::AuthError;

/// 공통 응답 포맷
/// Uniform result envelope handed to the transport layer
///
/// `{ "status_code": 200, "data": {...}, "message": null, "is_success": true }`
#[derive(Debug, Serialize)]
pub struct ServiceResponse<T> {
    pub status_code: u16,
    pub data: Option<T>,
    pub message: Option<String>,
    pub is_success: bool,
}

impl<T> ServiceResponse<T> {
    pub fn success(data: T, status_code: u16) -> Self {
        Self {
            status_code,
            data: Some(data),
            message: None,
            is_success: true,
        }
    }

    pub fn success_no_data(status_code: u16) -> Self {
        Self {
            status_code,
            data: None,
            message: None,
            is_success: true,
        }
    }

    pub fn fail(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            status_code,
            data: None,
            message: Some(message.into()),
            is_success: false,
        }
    }

    /// 서비스 결과를 응답으로 변환 (성공은 200)
    /// Convert a service result; fatal errors are logged here, never echoed
    pub fn from_result(result: Result<T, AuthError>) -> Self {
        match result {
            Ok(data) => Self::success(data, 200),
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn from_error(err: &AuthError) -> Self {
        if !err.is_business_failure() {
            tracing::error!("Request aborted: {}", err);
        }
        Self::fail(err.public_message(), err.status_code())
    }
}

impl ServiceResponse<()> {
    /// 데이터 없는 결과 변환 (폐기 등)
    pub fn from_empty_result(result: Result<(), AuthError>) -> Self {
        match result {
            Ok(()) => Self::success_no_data(200),
            Err(err) => Self::from_error(&err),
        }
    }
}

/// 응답 상태 코드를 envelope의 status_code와 맞춤
impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
