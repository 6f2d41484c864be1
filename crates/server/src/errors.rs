use axum::http::{header, HeaderValue, Response, StatusCode};
use thiserror::Error;
use tracing::error;

/// Failures that end an invocation. Callers only ever see the status line's
/// reason phrase; the detail stays in the server log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for Response<String> {
    fn from(err: ApiError) -> Self {
        let status = err.status();
        if let ApiError::Internal(detail) = &err {
            error!(event = "request_failed", error = %detail, "returning 500");
        }
        status_text(status)
    }
}

/// Response whose body is the standard reason phrase for `status`.
pub fn status_text(status: StatusCode) -> Response<String> {
    let mut resp = Response::new(status.canonical_reason().unwrap_or_default().to_string());
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_allowed_uses_reason_phrase() {
        let resp: Response<String> = ApiError::MethodNotAllowed.into();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.body(), "Method Not Allowed");
    }

    #[test]
    fn internal_detail_is_not_returned() {
        let resp: Response<String> = ApiError::internal("password authentication failed for user wishes").into();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body(), "Internal Server Error");
    }
}
