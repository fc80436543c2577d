mod customer;
mod movement;
mod product;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::customer::customer_routes;
pub use self::movement::movement_routes;
pub use self::product::product_routes;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        movement::create_movement,
        movement::stock_entry,
        movement::sale,
        movement::get_movements,
        movement::get_movement,
        movement::get_product_report,

        product::create_product,
        product::get_product,
        product::delete_product,

        customer::register_customer,
    ),
    tags(
        (name = "Movement", description = "Stock movement endpoints"),
        (name = "Product", description = "Product endpoints"),
        (name = "Customer", description = "Customer endpoints"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        error!("❌ Failed to encode metrics: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    /// Full application router, docs included.
    pub fn build(app_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(app_state.clone())
            .merge(movement_routes(app_state.clone()))
            .merge(product_routes(app_state.clone()))
            .merge(customer_routes(app_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(addr: SocketAddr, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;

        let local_addr = listener.local_addr()?;
        info!("🚀 Server running on http://{local_addr}");
        info!("📖 Swagger UI: http://{local_addr}/swagger-ui");
        info!("📊 Metrics: http://{local_addr}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}
