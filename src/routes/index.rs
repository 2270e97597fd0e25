use axum::Json;
use serde_json::{Value, json};

pub async fn get_index_route() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}
