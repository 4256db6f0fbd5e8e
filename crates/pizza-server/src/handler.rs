use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use pizza_catalog::Catalog;
use pizza_store::PizzaStore;
use pizza_types::{Pizza, PizzaDraft, PizzaId};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

/// Shared handler state: the catalog over its injected store.
pub type AppState<S> = Arc<Catalog<S>>;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "pizza-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /pizzas`
pub async fn create_pizza<S: PizzaStore + 'static>(
    State(catalog): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Pizza>), ApiError> {
    const OP: &str = "create pizza";
    let draft = PizzaDraft::from_json(&body).map_err(|e| ApiError::new(OP, e))?;
    let pizza = catalog
        .create(&draft)
        .await
        .map_err(|e| ApiError::new(OP, e))?;
    Ok((StatusCode::CREATED, Json(pizza)))
}

/// `GET /pizzas?name=`
pub async fn list_pizzas<S: PizzaStore + 'static>(
    State(catalog): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Pizza>>, ApiError> {
    let pizzas = catalog
        .list(query.name.as_deref())
        .await
        .map_err(|e| ApiError::new("list pizzas", e))?;
    Ok(Json(pizzas))
}

/// `GET /pizzas/:id`
pub async fn get_pizza<S: PizzaStore + 'static>(
    State(catalog): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Pizza>, ApiError> {
    const OP: &str = "get pizza";
    let id = PizzaId::parse(&raw_id).ok_or_else(|| ApiError::unknown_id(OP, &raw_id))?;
    let pizza = catalog.get(id).await.map_err(|e| ApiError::new(OP, e))?;
    Ok(Json(pizza))
}

/// `PUT /pizzas/:id`
///
/// The body is validated before the id is resolved, so an invalid body
/// yields 400 even when the id does not exist.
pub async fn update_pizza<S: PizzaStore + 'static>(
    State(catalog): State<AppState<S>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Pizza>, ApiError> {
    const OP: &str = "update pizza";
    let draft = PizzaDraft::from_json(&body).map_err(|e| ApiError::new(OP, e))?;
    let Some(id) = PizzaId::parse(&raw_id) else {
        draft.validate().map_err(|e| ApiError::new(OP, e))?;
        return Err(ApiError::unknown_id(OP, raw_id));
    };
    let pizza = catalog
        .update(id, &draft)
        .await
        .map_err(|e| ApiError::new(OP, e))?;
    Ok(Json(pizza))
}

/// `DELETE /pizzas/:id`
pub async fn delete_pizza<S: PizzaStore + 'static>(
    State(catalog): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    const OP: &str = "delete pizza";
    let id = PizzaId::parse(&raw_id).ok_or_else(|| ApiError::unknown_id(OP, &raw_id))?;
    let deleted = catalog.delete(id).await.map_err(|e| ApiError::new(OP, e))?;
    Ok(Json(json!({ "message": deleted.message() })))
}
