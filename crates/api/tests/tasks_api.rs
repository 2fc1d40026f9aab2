//! Integration tests for `/api/tasks`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_raw};
use courier_db::models::status::TaskStatus;
use courier_db::repositories::TaskRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Enqueue
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn enqueue_stores_pending_task_with_serialized_payload(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/tasks",
        json!({ "type": "sendVerificationEmail", "payload": { "id": 1, "email": "a@example.com" } }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["type"], "sendVerificationEmail");
    assert_eq!(data["status_id"], TaskStatus::Pending.id());

    let payload: serde_json::Value =
        serde_json::from_str(data["payload"].as_str().unwrap()).unwrap();
    assert_eq!(payload, json!({ "id": 1, "email": "a@example.com" }));

    let id = data["id"].as_i64().unwrap();
    let stored = TaskRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.status(), Some(TaskStatus::Pending));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enqueue_without_payload_stores_null(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/tasks", json!({ "type": "noop" })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["payload"], "null");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enqueue_with_blank_type_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/tasks", json!({ "type": "  ", "payload": {} })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_returns_enqueued_task(pool: PgPool) {
    let created = post_json(
        common::build_test_app(pool.clone()),
        "/api/tasks",
        json!({ "type": "noop", "payload": [1, 2, 3] }),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let response = get(common::build_test_app(pool), &format!("/api/tasks/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["payload"], "[1,2,3]");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_task_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/tasks/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Task with id 999999 not found");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_status_name(pool: PgPool) {
    for n in 0..3 {
        post_json(
            common::build_test_app(pool.clone()),
            "/api/tasks",
            json!({ "type": "noop", "payload": n }),
        )
        .await;
    }
    let first = TaskRepo::find_oldest_pending(&pool).await.unwrap().unwrap();
    TaskRepo::update_status(&pool, first.id, TaskStatus::InProgress)
        .await
        .unwrap();

    let pending =
        body_json(get(common::build_test_app(pool.clone()), "/api/tasks?status=pending").await)
            .await;
    assert_eq!(pending["data"].as_array().unwrap().len(), 2);

    let running =
        body_json(get(common::build_test_app(pool.clone()), "/api/tasks?status=in_progress").await)
            .await;
    let running = running["data"].as_array().unwrap();
    assert_eq!(running.len(), 1);
    assert_eq!(running[0]["id"], first.id);

    let all = body_json(get(common::build_test_app(pool), "/api/tasks?limit=2").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_with_unknown_status_is_bad_request(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/tasks?status=sleeping").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Unknown task status: sleeping"
    );
}


// ---------------------------------------------------------------------------
// Malformed input uses the standard error body
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_body_returns_json_400(pool: PgPool) {
    let response = post_raw(common::build_test_app(pool.clone()), "/api/tasks", "{nope").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
    assert_eq!(
        TaskRepo::count_by_status(&pool, TaskStatus::Pending)
            .await
            .unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_type_field_returns_json_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/tasks",
        json!({ "payload": {} }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_task_id_returns_json_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/tasks/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_limit_returns_json_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/tasks?limit=lots").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
