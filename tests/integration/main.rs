//! End-to-end tests for the users service.
//!
//! Each test binds the router to an ephemeral localhost port and talks to it
//! over real HTTP.

use std::net::SocketAddr;

use pretty_assertions::assert_eq;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use users_api::api::{create_router, AppState};
use users_api::UserStore;

/// Spawn a server on an ephemeral port and return its base URL.
async fn spawn_server(state: AppState) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, create_router(state))
            .await
            .expect("server error");
    });

    format!("http://{}", addr)
}

async fn json_body(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn health_needs_no_state() {
    let base = spawn_server(AppState::new()).await;
    let client = Client::new();

    let (status, body) = json_body(client.get(format!("{base}/health")).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn user_lifecycle_scenario() {
    let base = spawn_server(AppState::new()).await;
    let client = Client::new();
    let users = format!("{base}/users");

    let (status, body) =
        json_body(client.post(&users).json(&json!({ "name": "Ann" })).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1, "name": "Ann" }));

    let (status, body) =
        json_body(client.post(&users).json(&json!({ "name": "Bo" })).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 2, "name": "Bo" }));

    let (status, body) = json_body(client.get(&users).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": 1, "name": "Ann" }, { "id": 2, "name": "Bo" }]));

    let (status, body) = json_body(
        client
            .put(format!("{users}/1"))
            .json(&json!({ "name": "Annie" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "Annie" }));

    let (status, body) = json_body(client.delete(format!("{users}/2")).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User deleted" }));

    let (status, body) = json_body(client.get(&users).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": 1, "name": "Annie" }]));
}

#[tokio::test]
async fn ids_keep_increasing_after_delete() {
    let store = UserStore::new();
    let base = spawn_server(AppState::with_store(store.clone())).await;
    let client = Client::new();
    let users = format!("{base}/users");

    for name in ["a", "b", "c"] {
        client.post(&users).json(&json!({ "name": name })).send().await.unwrap();
    }
    client.delete(format!("{users}/1")).send().await.unwrap();

    let (status, body) =
        json_body(client.post(&users).json(&json!({ "name": "d" })).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 4, "name": "d" }));

    let ids: Vec<u64> = store.list().await.iter().filter_map(|u| u.id()).collect();
    assert_eq!(ids, vec![2, 3, 4]);
}

#[tokio::test]
async fn update_against_missing_user_is_404_and_harmless() {
    let base = spawn_server(AppState::new()).await;
    let client = Client::new();
    let users = format!("{base}/users");

    client.post(&users).json(&json!({ "name": "Ann" })).send().await.unwrap();

    let (status, body) = json_body(
        client
            .put(format!("{users}/5"))
            .json(&json!({ "name": "Ghost" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found" }));

    let (_, body) = json_body(client.get(&users).send().await.unwrap()).await;
    assert_eq!(body, json!([{ "id": 1, "name": "Ann" }]));
}
