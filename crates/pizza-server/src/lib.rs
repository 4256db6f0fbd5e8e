//! HTTP server for the pizza catalog.
//!
//! Exposes the collection operations as five REST endpoints over a
//! JSON-file store:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `POST` | `/pizzas` | 201 + created pizza |
//! | `GET` | `/pizzas?name=` | 200 + array, optionally filtered by name |
//! | `GET` | `/pizzas/:id` | 200 + pizza |
//! | `PUT` | `/pizzas/:id` | 200 + updated pizza |
//! | `DELETE` | `/pizzas/:id` | 200 + `{"message": ...}` |
//!
//! Error bodies are `{"error": ...}` for 400 and 500, and
//! `{"message": ...}` for 404. The two keys differ for compatibility with
//! existing clients.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::AppState;
pub use router::{build_router, build_router_with_cors};
pub use server::PizzaServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use pizza_catalog::Catalog;
    use pizza_store::{InMemoryPizzaStore, JsonFileStore, PizzaStore};
    use pizza_types::{Pizza, PizzaId};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app(store: InMemoryPizzaStore) -> (Router, Arc<Catalog<InMemoryPizzaStore>>) {
        let catalog = Arc::new(Catalog::new(store));
        (build_router(catalog.clone()), catalog)
    }

    fn seeded() -> (Router, Arc<Catalog<InMemoryPizzaStore>>) {
        let pizza = |id: u64, name: &str| Pizza {
            id: PizzaId::new(id).unwrap(),
            name: name.into(),
            toppings: vec!["tomato".into()],
            price: 8.5.into(),
        };
        app(InMemoryPizzaStore::with_pizzas(vec![
            pizza(1, "Margherita"),
            pizza(2, "Diavola"),
            pizza(3, "Margherita Bianca"),
        ]))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn margherita() -> Value {
        json!({ "name": "Margherita", "toppings": ["tomato", "mozzarella"], "price": 8.5 })
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _) = app(InMemoryPizzaStore::new());
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (app, _) = app(InMemoryPizzaStore::new());
        let (status, body) = send(&app, Method::GET, "/info", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "pizza-server");
    }

    // -----------------------------------------------------------------------
    // POST /pizzas
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_returns_201_with_assigned_id() {
        let (app, catalog) = app(InMemoryPizzaStore::new());
        let (status, body) = send(&app, Method::POST, "/pizzas", Some(margherita())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Margherita");
        assert_eq!(catalog.store().len(), 1);
    }

    #[tokio::test]
    async fn create_ignores_body_id() {
        let (app, _) = seeded();
        let mut body = margherita();
        body["name"] = json!("Funghi");
        body["id"] = json!(42);
        let (status, body) = send(&app, Method::POST, "/pizzas", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 4);
    }

    #[tokio::test]
    async fn create_duplicate_name_is_400() {
        let (app, catalog) = seeded();
        let body = json!({ "name": "DIAVOLA", "toppings": [], "price": 1 });
        let (status, body) = send(&app, Method::POST, "/pizzas", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "A pizza with this name already exists");
        assert_eq!(catalog.store().len(), 3);
    }

    #[tokio::test]
    async fn create_missing_fields_is_400() {
        let (app, _) = app(InMemoryPizzaStore::new());
        for body in [
            json!({ "toppings": [], "price": 1 }),
            json!({ "name": "", "toppings": [], "price": 1 }),
            json!({ "name": "A", "price": 1 }),
            json!({ "name": "A", "toppings": [], "price": null }),
        ] {
            let (status, body) = send(&app, Method::POST, "/pizzas", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Missing required fields");
        }
    }

    #[tokio::test]
    async fn create_accepts_any_price_and_topping_values() {
        let (app, catalog) = app(InMemoryPizzaStore::new());

        let body = json!({ "name": "A", "toppings": [], "price": "9.5" });
        let (status, body) = send(&app, Method::POST, "/pizzas", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["price"], "9.5");

        let body = json!({ "name": "B", "toppings": [1], "price": 9 });
        let (status, body) = send(&app, Method::POST, "/pizzas", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["toppings"], json!([1]));
        assert!(body["price"].is_u64());

        let stored = catalog.store().snapshot();
        assert_eq!(stored[0].price, "9.5");
        assert_eq!(stored[1].price, 9);
    }

    #[tokio::test]
    async fn create_malformed_body_is_400() {
        let (app, _) = app(InMemoryPizzaStore::new());
        let (status, body) = send(&app, Method::POST, "/pizzas", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let wrong = json!({ "name": "A", "toppings": "ham", "price": 1 });
        let (status, _) = send(&app, Method::POST, "/pizzas", Some(wrong)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // -----------------------------------------------------------------------
    // GET /pizzas, GET /pizzas/:id
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_all_in_storage_order() {
        let (app, _) = seeded();
        let (status, body) = send(&app, Method::GET, "/pizzas", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<u64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn list_filtered_by_name() {
        let (app, _) = seeded();
        let (status, body) = send(&app, Method::GET, "/pizzas?name=MARG", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Margherita", "Margherita Bianca"]);

        let (_, body) = send(&app, Method::GET, "/pizzas?name=", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_by_id() {
        let (app, _) = seeded();
        let (status, body) = send(&app, Method::GET, "/pizzas/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Diavola");
    }

    #[tokio::test]
    async fn id_segment_uses_leading_digits() {
        let (app, _) = seeded();
        let (status, body) = send(&app, Method::GET, "/pizzas/1abc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);

        let (status, body) = send(&app, Method::GET, "/pizzas/2.9", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 2);
    }

    #[tokio::test]
    async fn get_unknown_id_is_404_with_message() {
        let (app, _) = seeded();
        for uri in ["/pizzas/99", "/pizzas/abc", "/pizzas/0"] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["message"], "Pizza not found");
            assert!(body.get("error").is_none());
        }
    }

    // -----------------------------------------------------------------------
    // PUT /pizzas/:id
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn update_keeps_path_id() {
        let (app, catalog) = seeded();
        let body = json!({ "id": 7, "name": "Diavola Piccante", "toppings": ["nduja"], "price": 11 });
        let (status, body) = send(&app, Method::PUT, "/pizzas/2", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 2);
        assert_eq!(body["toppings"], json!(["nduja"]));

        let stored = catalog.store().snapshot();
        assert_eq!(stored[1].id.get(), 2);
        assert_eq!(stored[1].name, "Diavola Piccante");
    }

    #[tokio::test]
    async fn update_invalid_body_is_400_even_for_unknown_id() {
        let (app, _) = seeded();
        let (status, body) =
            send(&app, Method::PUT, "/pizzas/99", Some(json!({ "name": "A" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");

        let (status, _) = send(&app, Method::PUT, "/pizzas/xyz", Some(json!({ "name": "A" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_unknown_id_is_404() {
        let (app, _) = seeded();
        let (status, body) = send(&app, Method::PUT, "/pizzas/99", Some(margherita())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Pizza not found");
    }

    // -----------------------------------------------------------------------
    // DELETE /pizzas/:id
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_returns_confirmation() {
        let (app, catalog) = seeded();
        let (status, body) = send(&app, Method::DELETE, "/pizzas/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Pizza deleted successfully");
        assert_eq!(catalog.store().len(), 2);
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_store_unchanged() {
        let (app, catalog) = seeded();
        let before = catalog.store().snapshot();
        let (status, body) = send(&app, Method::DELETE, "/pizzas/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Pizza not found");
        assert_eq!(catalog.store().snapshot(), before);
    }

    #[tokio::test]
    async fn ids_not_reused_after_deleting_lower_id() {
        let (app, _) = app(InMemoryPizzaStore::new());
        for name in ["A", "B", "C"] {
            let body = json!({ "name": name, "toppings": [], "price": 5 });
            send(&app, Method::POST, "/pizzas", Some(body)).await;
        }
        send(&app, Method::DELETE, "/pizzas/1", None).await;
        let body = json!({ "name": "D", "toppings": [], "price": 5 });
        let (_, body) = send(&app, Method::POST, "/pizzas", Some(body)).await;
        assert_eq!(body["id"], 4);
    }

    // -----------------------------------------------------------------------
    // Storage failures and the file-backed store
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn corrupt_file_is_500_with_generic_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pizzas.json");
        std::fs::write(&path, "[{ broken").unwrap();
        let app = build_router(Arc::new(Catalog::new(JsonFileStore::new(&path))));

        for (method, uri, body) in [
            (Method::GET, "/pizzas", None),
            (Method::GET, "/pizzas/1", None),
            (Method::POST, "/pizzas", Some(margherita())),
            (Method::PUT, "/pizzas/1", Some(margherita())),
            (Method::DELETE, "/pizzas/1", None),
        ] {
            let (status, body) = send(&app, method, uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], "Internal server error");
        }
    }

    #[tokio::test]
    async fn create_past_max_id_is_500_and_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pizzas.json");
        let seeded = r#"[{"id":18446744073709551615,"name":"Last","toppings":[],"price":1}]"#;
        std::fs::write(&path, seeded).unwrap();
        let app = build_router(Arc::new(Catalog::new(JsonFileStore::new(&path))));

        let (status, body) = send(&app, Method::POST, "/pizzas", Some(margherita())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), seeded);
    }

    #[tokio::test]
    async fn file_backed_crud_persists_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pizzas.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        let app = build_router_with_cors(Arc::new(Catalog::new(store)));

        let (status, _) = send(&app, Method::POST, "/pizzas", Some(margherita())).await;
        assert_eq!(status, StatusCode::CREATED);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {\n    \"id\": 1,"));

        let body = json!({ "name": "Funghi", "toppings": [], "price": 9 });
        send(&app, Method::POST, "/pizzas", Some(body)).await;
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"price\": 9\n"));

        let stored = JsonFileStore::new(&path).load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Margherita");
    }
}
