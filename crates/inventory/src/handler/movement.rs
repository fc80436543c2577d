use crate::{
    abstract_trait::movement::service::{DynMovementCommandService, DynMovementQueryService},
    domain::{
        requests::{
            CreateMovementRequest, FindAllMovements, ProductReportQuery, SaleRequest,
            StockEntryRequest,
        },
        response::{MovementResponse, MovementSummaryResponse, ProductReportResponse},
    },
    middleware::{JsonBody, QueryParams},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/movimentacoes",
    tag = "Movement",
    request_body = CreateMovementRequest,
    responses(
        (status = 201, description = "Movement recorded", body = ApiResponse<MovementSummaryResponse>),
        (status = 400, description = "Validation error or insufficient stock", body = ErrorResponse),
        (status = 404, description = "Product or customer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_movement(
    Extension(service): Extension<DynMovementCommandService>,
    JsonBody(body): JsonBody<CreateMovementRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_movement(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/movimentacoes/entrada",
    tag = "Movement",
    request_body = StockEntryRequest,
    responses(
        (status = 201, description = "Stock entry recorded", body = ApiResponse<MovementSummaryResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn stock_entry(
    Extension(service): Extension<DynMovementCommandService>,
    JsonBody(body): JsonBody<StockEntryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.stock_entry(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/movimentacoes/saida",
    tag = "Movement",
    request_body = SaleRequest,
    responses(
        (status = 201, description = "Sale recorded", body = ApiResponse<MovementSummaryResponse>),
        (status = 400, description = "Validation error or insufficient stock", body = ErrorResponse),
        (status = 404, description = "Product or customer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn sale(
    Extension(service): Extension<DynMovementCommandService>,
    JsonBody(body): JsonBody<SaleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.sale(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/movimentacoes",
    tag = "Movement",
    params(FindAllMovements),
    responses(
        (status = 200, description = "Page of movements", body = ApiResponsePagination<Vec<MovementResponse>>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_movements(
    Extension(service): Extension<DynMovementQueryService>,
    QueryParams(params): QueryParams<FindAllMovements>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/movimentacoes/{id}",
    tag = "Movement",
    params(("id" = i32, Path, description = "Movement ID")),
    responses(
        (status = 200, description = "Movement details", body = ApiResponse<MovementResponse>),
        (status = 404, description = "Movement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_movement(
    Extension(service): Extension<DynMovementQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/movimentacoes/relatorio",
    tag = "Movement",
    params(ProductReportQuery),
    responses(
        (status = 200, description = "Per-kind totals for a product", body = ApiResponse<ProductReportResponse>),
        (status = 400, description = "Invalid report request", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product_report(
    Extension(service): Extension<DynMovementQueryService>,
    QueryParams(params): QueryParams<ProductReportQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.product_report(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn movement_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/movimentacoes", get(get_movements))
        .route("/movimentacoes", post(create_movement))
        .route("/movimentacoes/entrada", post(stock_entry))
        .route("/movimentacoes/saida", post(sale))
        .route("/movimentacoes/relatorio", get(get_product_report))
        .route("/movimentacoes/{id}", get(get_movement))
        .layer(Extension(app_state.di_container.movement_command.clone()))
        .layer(Extension(app_state.di_container.movement_query.clone()))
}
