use crate::errors::{
    error::ErrorResponse, repository::RepositoryError, service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String, Option<Value>),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(ref errors) => {
                let fields = err.invalid_fields();

                let mut by_field = Map::new();
                for field_error in errors {
                    let entry = by_field
                        .entry(field_error.field.clone())
                        .or_insert_with(|| Value::Array(Vec::new()));
                    if let Value::Array(messages) = entry {
                        messages.push(Value::String(field_error.message.clone()));
                    }
                }

                let summary = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");

                HttpError::BadRequest(
                    format!("Validation failed: {summary}"),
                    Some(json!({ "fields": fields, "errors": by_field })),
                )
            }

            ServiceError::NotFound { entity, id } => {
                HttpError::NotFound(format!("{entity} {id} not found"))
            }

            ServiceError::InsufficientStock {
                current_stock,
                requested,
            } => HttpError::BadRequest(
                "Insufficient stock".into(),
                Some(json!({
                    "current_stock": current_stock,
                    "requested_quantity": requested,
                })),
            ),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::ForeignKey(constraint) => HttpError::BadRequest(
                    "Referenced product or customer is invalid".into(),
                    Some(json!({ "constraint": constraint })),
                ),
                RepositoryError::AlreadyExists(constraint) => {
                    HttpError::Conflict(format!("Already exists: {constraint}"))
                }
                RepositoryError::Conflict(constraint) => {
                    HttpError::Conflict(format!("Conflict: {constraint}"))
                }
                other => {
                    error!("💥 Persistence failure: {other:?}");
                    HttpError::Internal("Internal server error".into())
                }
            },

            ServiceError::Bcrypt(err) => {
                error!("💥 Password hashing failure: {err:?}");
                HttpError::Internal("Internal server error".into())
            }

            ServiceError::Internal(msg) => {
                error!("💥 Internal failure: {msg}");
                HttpError::Internal("Internal server error".into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            HttpError::BadRequest(msg, details) => (StatusCode::BAD_REQUEST, msg, details),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldError;

    #[test]
    fn validation_lists_each_field_once() {
        let err = ServiceError::Validation(vec![
            FieldError::new("quantity", "Quantity is required"),
            FieldError::new("kind", "Kind must be ENTRY or EXIT"),
            FieldError::new("quantity", "Quantity must be at least 1"),
        ]);

        match HttpError::from(err) {
            HttpError::BadRequest(_, Some(details)) => {
                assert_eq!(details["fields"], json!(["quantity", "kind"]));
                assert_eq!(details["errors"]["quantity"].as_array().map(Vec::len), Some(2));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn insufficient_stock_carries_both_quantities() {
        let err = ServiceError::InsufficientStock {
            current_stock: 3,
            requested: 7,
        };

        match HttpError::from(err) {
            HttpError::BadRequest(msg, Some(details)) => {
                assert_eq!(msg, "Insufficient stock");
                assert_eq!(details["current_stock"], 3);
                assert_eq!(details["requested_quantity"], 7);
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn persistence_failures_hide_details() {
        let err = ServiceError::Repo(RepositoryError::Custom("connection reset".into()));

        match HttpError::from(err) {
            HttpError::Internal(msg) => assert_eq!(msg, "Internal server error"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn foreign_key_is_a_client_error() {
        let err = ServiceError::Repo(RepositoryError::ForeignKey("movements_product_id_fkey".into()));
        let response = HttpError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
