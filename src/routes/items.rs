use crate::error::{ParseJsonSnafu, RosterResult};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use snafu::ResultExt;

#[derive(Deserialize)]
pub struct ItemQuery {
    pub q: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ItemResponse {
    pub item_id: i64,
    pub q: Option<String>,
}

pub async fn get_item(
    Path(item_id): Path<i64>,
    Query(ItemQuery { q }): Query<ItemQuery>,
) -> Json<ItemResponse> {
    Json(ItemResponse { item_id, q })
}

///echoes back whatever JSON it was given, regardless of content type
pub async fn post_item(body: Bytes) -> RosterResult<Json<Value>> {
    let body: Value = serde_json::from_slice(&body).context(ParseJsonSnafu)?;
    Ok(Json(json!({ "request body": body })))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn index_says_hello() {
        let (app, _dir) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Hello World"}));
    }

    #[tokio::test]
    async fn get_item_echoes_id_and_query() {
        let (app, _dir) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/items/5?q=somequery", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"item_id": 5, "q": "somequery"}));

        let (status, body) = send(&app, Method::GET, "/items/5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"item_id": 5, "q": null}));
    }

    #[tokio::test]
    async fn get_item_needs_an_integer_id() {
        let (app, _dir) = test_app().await;

        let (status, _) = send(&app, Method::GET, "/items/five", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_item_echoes_the_body() {
        let (app, _dir) = test_app().await;
        let payload = json!({"name": "Foo", "tags": [1, 2, 3], "nested": {"ok": true}});

        let (status, body) = send(&app, Method::POST, "/items", Some(payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"request body": payload}));
    }

    #[tokio::test]
    async fn oversized_bodies_are_refused() {
        let (app, _dir) = test_app().await;
        let huge = json!({"padding": "x".repeat(128 * 1024)});

        let (status, _) = send(&app, Method::POST, "/items", Some(huge.to_string())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn post_item_rejects_broken_json() {
        let (app, _dir) = test_app().await;

        let (status, body) = send(&app, Method::POST, "/items", Some("{oops".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().starts_with("Request body is not valid JSON"));
    }
}
