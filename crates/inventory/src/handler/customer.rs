use crate::{
    abstract_trait::customer::service::DynCustomerCommandService,
    domain::{requests::RegisterCustomerRequest, response::CustomerResponse},
    middleware::JsonBody,
    state::AppState,
};
use axum::{
    Json, extract::Extension, http::StatusCode, response::IntoResponse, routing::post,
};
use shared::{
    domain::responses::ApiResponse,
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/clientes",
    tag = "Customer",
    request_body = RegisterCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = ApiResponse<CustomerResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register_customer(
    Extension(service): Extension<DynCustomerCommandService>,
    JsonBody(body): JsonBody<RegisterCustomerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register_customer(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn customer_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/clientes", post(register_customer))
        .layer(Extension(app_state.di_container.customer_command.clone()))
}
