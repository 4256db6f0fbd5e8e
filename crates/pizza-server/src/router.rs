use axum::routing::get;
use axum::Router;
use pizza_store::PizzaStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all pizza endpoints.
pub fn build_router<S: PizzaStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .route(
            "/pizzas",
            get(handler::list_pizzas::<S>).post(handler::create_pizza::<S>),
        )
        .route(
            "/pizzas/:id",
            get(handler::get_pizza::<S>)
                .put(handler::update_pizza::<S>)
                .delete(handler::delete_pizza::<S>),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// [`build_router`] plus a permissive CORS layer.
pub fn build_router_with_cors<S: PizzaStore + 'static>(state: AppState<S>) -> Router {
    build_router(state).layer(CorsLayer::permissive())
}
