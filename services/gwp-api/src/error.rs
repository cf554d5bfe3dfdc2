//! HTTP error mapping.
//!
//! Every failure leaves the service as `{"error": "<message>"}` with the status
//! code of the underlying [`GwpError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gwp_common::{BoundingBox, GwpError};
use gwp_protocol::ErrorResponse;

/// Handler error carrying the domain error and, for out-of-district
/// coordinates, the bounds to report back.
#[derive(Debug)]
pub struct ApiError {
    pub error: GwpError,
    pub bounds: Option<BoundingBox>,
}

impl ApiError {
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<GwpError> for ApiError {
    fn from(error: GwpError) -> Self {
        Self { error, bounds: None }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        GwpError::invalid("body", rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.error.is_client_error() {
            tracing::debug!(status = status.as_u16(), error = %self.error, "Rejected request");
        } else {
            tracing::error!(status = status.as_u16(), error = %self.error, "Request failed");
        }
        metrics::counter!("gwp_request_errors_total", "status" => status.as_u16().to_string())
            .increment(1);

        let mut body = ErrorResponse::new(self.error.to_string());
        if let Some(bounds) = &self.bounds {
            body = body.with_bounds(bounds);
        }
        (status, axum::Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body extractor whose rejections use the service error format.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: serde::Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(GwpError::NoValidPoints);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(GwpError::Upstream("timeout".into()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_body_carries_bounds() {
        let err = ApiError::from(GwpError::OutsideDistrict("Dharwad".into()))
            .with_bounds(BoundingBox::DHARWAD);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Coordinates are outside Dharwad district");
        assert_eq!(body["bounds"]["lat_max"], 16.0);
    }
}
