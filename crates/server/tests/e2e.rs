use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes::build_router;
use server::Backend;
use service::wish::repository::memory::MemoryWishRepository;

fn memory_app() -> Router {
    build_router(Backend::Memory(Arc::new(MemoryWishRepository::default())))
}

async fn send(app: &Router, method: &str, uri: &str, body: &str) -> anyhow::Result<(StatusCode, String)> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))?;
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

fn wish(id: i64, owner: &str, status: &str) -> Value {
    json!({"Id": id, "CalendarId": 12, "Owner": owner, "Status": status, "Desc": "snow boots", "Title": "boots"})
}

#[tokio::test]
async fn e2e_empty_list() -> anyhow::Result<()> {
    let app = memory_app();
    let (status, body) = send(&app, "GET", "/", "").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
    Ok(())
}

#[tokio::test]
async fn e2e_post_then_get_any_path() -> anyhow::Result<()> {
    let app = memory_app();
    let payload = wish(1, "ana", "open").to_string();

    let (status, body) = send(&app, "POST", "/wishes", &payload).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, payload);

    let (status, body) = send(&app, "GET", "/some/other/path", "").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body)?, json!([wish(1, "ana", "open")]));
    Ok(())
}

#[tokio::test]
async fn e2e_status_update_and_guard() -> anyhow::Result<()> {
    let app = memory_app();
    send(&app, "POST", "/", &wish(1, "ana", "open").to_string()).await?;
    send(&app, "POST", "/", &wish(1, "ana", "granted").to_string()).await?;
    let (status, _) = send(&app, "POST", "/", &wish(1, "bo", "stolen").to_string()).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/", "").await?;
    assert_eq!(serde_json::from_str::<Value>(&body)?, json!([wish(1, "ana", "granted")]));
    Ok(())
}

#[tokio::test]
async fn e2e_method_not_allowed() -> anyhow::Result<()> {
    let app = memory_app();
    for method in ["PUT", "DELETE", "PATCH"] {
        let (status, body) = send(&app, method, "/", "").await?;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "Method Not Allowed");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_post() -> anyhow::Result<()> {
    let app = memory_app();
    let (status, body) = send(&app, "POST", "/", "{\"Id\": 1,").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
    Ok(())
}

#[tokio::test]
async fn e2e_invoke_rejects_method_before_connecting() {
    let resp = server::invoke(&axum::http::Method::PUT, b"{}").await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.body(), "Method Not Allowed");
}

#[tokio::test]
async fn e2e_postgres_backend() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip postgres e2e test.");
        return Ok(());
    }
    let cfg = configs::DatabaseConfig::from_env()?;
    let db = models::db::connect(&cfg).await?;
    models::db::ensure_table(&db).await?;
    db.close().await?;

    let app = build_router(Backend::Postgres);
    let id = i64::from((Uuid::new_v4().as_u128() as u32) >> 1);
    let payload = wish(id, "ana", "open").to_string();

    let (status, body) = send(&app, "POST", "/", &payload).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body, payload);
    send(&app, "POST", "/", &wish(id, "ana", "granted").to_string()).await?;
    send(&app, "POST", "/", &wish(id, "bo", "stolen").to_string()).await?;

    let (status, body) = send(&app, "GET", "/", "").await?;
    assert_eq!(status, StatusCode::OK);
    let rows: Vec<Value> = serde_json::from_str(&body)?;
    let stored = rows.into_iter().find(|r| r["Id"] == json!(id));
    assert_eq!(stored, Some(wish(id, "ana", "granted")));
    Ok(())
}
