//! Response envelope and error mapping.
//!
//! Every response body has the shape
//! `{ "success": bool, "message": string, "data"?: T, "errors"?: [..] }`.
//!
//! | WorkflowError | Status |
//! |---------------|--------|
//! | Validation, Conflict | 400 |
//! | Unauthorized | 401 |
//! | Forbidden | 403 |
//! | NotFound | 404 |
//! | Unexpected | 500 |

use std::str::FromStr;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::WorkflowError;

/// Field-level error detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Uniform response body.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
        }
    }
}

/// 200 with data.
pub fn ok<T: Serialize>(message: &str, data: T) -> Response {
    (StatusCode::OK, Json(Envelope::ok(message, data))).into_response()
}

/// 201 with data.
pub fn created<T: Serialize>(message: &str, data: T) -> Response {
    (StatusCode::CREATED, Json(Envelope::ok(message, data))).into_response()
}

/// API error type that converts workflow errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub WorkflowError);

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            WorkflowError::Validation { .. } | WorkflowError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            WorkflowError::Unauthorized => StatusCode::UNAUTHORIZED,
            WorkflowError::Forbidden(_) => StatusCode::FORBIDDEN,
            WorkflowError::NotFound { .. } => StatusCode::NOT_FOUND,
            WorkflowError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match &self.0 {
            WorkflowError::Validation { field, message } => Some(vec![FieldError {
                field: field.clone(),
                message: message.clone(),
            }]),
            WorkflowError::Unexpected(detail) => {
                tracing::error!(code = %self.0.code(), "Request failed: {}", detail);
                None
            }
            _ => None,
        };

        (status, Json(Envelope::failure(self.0.message(), errors))).into_response()
    }
}

/// JSON body extractor whose rejections use the envelope.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError(body_error(rejection))),
        }
    }
}

fn body_error(rejection: JsonRejection) -> WorkflowError {
    WorkflowError::validation("body", rejection.body_text())
}

/// Parses a path or body identifier, reporting `field` on failure.
pub fn parse_id<I: FromStr>(field: &str, raw: &str) -> Result<I, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(WorkflowError::validation(field, format!("'{}' is not a valid id", raw))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Resource;
    use crate::domain::foundation::ReservationId;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_field_errors() {
        let response =
            ApiError(WorkflowError::validation("address", "must not be empty")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"][0]["field"], "address");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn unexpected_hides_detail() {
        let response =
            ApiError(WorkflowError::unexpected("connection refused to 10.0.0.3")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "An unexpected error occurred");
    }

    #[test]
    fn status_mapping() {
        let cases = [
            (WorkflowError::conflict("x"), StatusCode::BAD_REQUEST),
            (WorkflowError::Unauthorized, StatusCode::UNAUTHORIZED),
            (WorkflowError::forbidden("x"), StatusCode::FORBIDDEN),
            (WorkflowError::not_found(Resource::Payment, "pi_1"), StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[tokio::test]
    async fn ok_wraps_data() {
        let body = body_json(ok("done", serde_json::json!({"id": 1}))).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 1);
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn parse_id_names_field() {
        let err = parse_id::<ReservationId>("id", "nope").unwrap_err();
        assert!(matches!(err.0, WorkflowError::Validation { ref field, .. } if field == "id"));
    }
}
