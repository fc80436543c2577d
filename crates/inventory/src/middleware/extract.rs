use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::json;
use shared::errors::HttpError;

/// JSON body whose rejection (bad syntax, wrong field types, wrong content
/// type) is reported in the same error envelope as every other failure.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                HttpError::BadRequest(
                    "Invalid JSON".into(),
                    Some(json!({ "reason": rejection.body_text() })),
                )
            })?;

        Ok(Self(value))
    }
}

/// Query string counterpart of [`JsonBody`].
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                HttpError::BadRequest(
                    "Invalid query parameters".into(),
                    Some(json!({ "reason": rejection.body_text() })),
                )
            })?;

        Ok(Self(value))
    }
}
