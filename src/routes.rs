// src/routes.rs

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::AppState, handlers};

pub fn router(app_state: AppState) -> Router {
    // Requisições de qualquer origem (o front roda em outro host/porta)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let item_routes = Router::new().route(
        "/items",
        get(handlers::stock::get_all_items)
            .post(handlers::stock::create_item)
            .put(handlers::stock::update_item)
            .delete(handlers::stock::delete_item),
    );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(item_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
