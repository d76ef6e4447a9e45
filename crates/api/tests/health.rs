mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use common::{body_json, get};
use http_body_util::BodyExt;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_health_reports_database_ok(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_path_falls_through_to_static_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/no-such-file.html").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_root_serves_bundled_frontend(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<title>Book Library</title>"));

    let app = common::build_test_app(pool);
    let response = get(app, "/app.js").await;
    assert_eq!(response.status(), StatusCode::OK);
}
