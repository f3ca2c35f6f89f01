//! Axum router assembly. This storefront has no customer login, so there is
//! no auth middleware layer — every route is reachable directly, matching
//! spec.md §1's explicit exclusion of routing/auth concerns from the core.

pub mod handlers;
pub mod openapi;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/drops", get(handlers::drops::list_active_drops))
        .route(
            "/api/drops/{id}/status",
            get(handlers::drops::get_drop_status),
        )
        .route(
            "/api/drops/{id}/purchase",
            post(handlers::drops::purchase_drop),
        )
        .route(
            "/api/payments/webhook",
            post(handlers::webhook::payment_webhook),
        )
        .route("/api/orders/{id}", get(handlers::orders::get_order))
        .route("/api/orders", get(handlers::orders::get_orders_by_phone))
        .route(
            "/api/symbicode/verify",
            post(handlers::symbicode::verify_symbicode),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .with_state(state)
}

pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state).into_make_service_with_connect_info::<SocketAddr>();

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "gateway listening");

    axum::serve(listener, app).await?;
    Ok(())
}
