// End-to-end tests against the router, one temp store per test.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use whiskers::api::{AppState, router};
use whiskers::config::Config;
use whiskers::store::Store;

fn app(temp: &TempDir) -> Router {
    let data_dir = temp.path().join("data");
    let store = Store::open(&data_dir).unwrap();
    let config = Config {
        data_dir,
        images_dir: temp.path().join("public"),
        ..Config::default()
    };
    router(AppState::new(store, config))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn lead_create_then_fetch() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, created) = send(
        &app,
        "POST",
        "/api/leads",
        Some(json!({
            "name": "A",
            "email": "a@x.com",
            "phone": "1",
            "message": "hi",
            "status": "new"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["status"], json!("new"));
    assert!(created["createdAt"].is_string());

    let (status, fetched) = send(&app, "GET", "/api/leads/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn pets_delete_leaves_the_other() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    send(&app, "POST", "/api/pets", Some(json!({"name": "Rex"}))).await;
    send(&app, "POST", "/api/pets", Some(json!({"name": "Luna"}))).await;

    let (status, body) = send(&app, "DELETE", "/api/pets/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Pet deleted successfully"));

    let (status, pets) = send(&app, "GET", "/api/pets", None).await;
    assert_eq!(status, StatusCode::OK);
    let pets = pets.as_array().unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0]["name"], json!("Luna"));
}

#[tokio::test]
async fn missing_records_are_404() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = send(&app, "GET", "/api/pets/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Pet not found"));

    let (status, _) = send(&app, "PUT", "/api/products/9", Some(json!({"price": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/leads/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_verb_is_405() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, _) = send(&app, "PATCH", "/api/pets/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn update_preserves_id_over_http() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    send(&app, "POST", "/api/products", Some(json!({"name": "Dog Food", "price": 500}))).await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/products/1",
        Some(json!({"id": 42, "price": 450})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(1));
    assert_eq!(updated["price"], json!(450));
    assert_eq!(updated["name"], json!("Dog Food"));
    assert!(updated["updatedAt"].is_string());
}

#[tokio::test]
async fn blog_lifecycle() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    // Missing content is rejected
    let (status, body) = send(&app, "POST", "/api/blog", Some(json!({"title": "No body"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Content is required"));

    // Create derives the slug
    let (status, created) = send(
        &app,
        "POST",
        "/api/blog",
        Some(json!({"title": "Hello World!", "content": "First post"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], json!("hello-world"));
    assert_eq!(created["published"], json!(false));
    assert_eq!(created["publishedAt"], Value::Null);

    // Duplicate slug is rejected
    let (status, body) = send(
        &app,
        "POST",
        "/api/blog",
        Some(json!({"title": "Hello, World", "content": "Second"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("A post with this slug already exists"));

    // Publishing stamps publishedAt; republishing keeps it
    let (status, published) = send(&app, "PUT", "/api/blog/1", Some(json!({"published": true}))).await;
    assert_eq!(status, StatusCode::OK);
    let stamp = published["publishedAt"].as_str().unwrap().to_string();

    let (_, republished) = send(&app, "PUT", "/api/blog/1", Some(json!({"published": true}))).await;
    assert_eq!(republished["publishedAt"], json!(stamp));

    // Detail resolves by slug too
    let (status, by_slug) = send(&app, "GET", "/api/blog/hello-world", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["id"], json!(1));

    let (status, _) = send(&app, "DELETE", "/api/blog/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/api/blog/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_views_ignore_admin_referrals() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    send(
        &app,
        "POST",
        "/api/blog",
        Some(json!({"title": "Counted", "content": "body"})),
    )
    .await;

    let public = Request::builder()
        .method("GET")
        .uri("/api/blog/1")
        .header(header::REFERER, "https://example.com/blog")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(public).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let post: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(post["views"], json!(1));

    let admin = Request::builder()
        .method("GET")
        .uri("/api/blog/1")
        .header(header::REFERER, "https://example.com/admin/blog")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(admin).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let post: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(post["views"], json!(1));

    // No referrer also leaves the counter alone
    let (_, post) = send(&app, "GET", "/api/blog/1", None).await;
    assert_eq!(post["views"], json!(1));
}

#[tokio::test]
async fn blog_list_filters_and_paginates() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    for i in 1..=4 {
        send(
            &app,
            "POST",
            "/api/blog",
            Some(json!({
                "title": format!("Post {}", i),
                "content": "body",
                "category": if i % 2 == 0 { "even" } else { "odd" },
                "published": true
            })),
        )
        .await;
    }

    let (status, page) = send(&app, "GET", "/api/blog?category=even", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagination"]["total"], json!(2));

    let (_, page) = send(&app, "GET", "/api/blog?page=2&limit=3", None).await;
    assert_eq!(page["posts"].as_array().unwrap().len(), 1);
    assert_eq!(page["pagination"]["totalPages"], json!(2));

    let (_, page) = send(&app, "GET", "/api/blog?published=false", None).await;
    assert_eq!(page["pagination"]["total"], json!(0));
}

#[tokio::test]
async fn blog_import_replaces_collection() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    send(
        &app,
        "POST",
        "/api/blog",
        Some(json!({"title": "Old", "content": "body"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/blog/import",
        Some(json!([
            {"title": "Imported A", "content": "a"},
            {"title": "Imported B", "content": "b"}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], json!(2));

    let (_, page) = send(&app, "GET", "/api/blog", None).await;
    assert_eq!(page["pagination"]["total"], json!(2));
}

#[tokio::test]
async fn settings_defaults_then_update() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, defaults) = send(&app, "GET", "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(defaults["general"]["storeName"], json!("WoofnWhiskers"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/settings",
        Some(json!({"general": {"storeName": ""}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Store name is required"));

    let (status, saved) = send(
        &app,
        "POST",
        "/api/settings",
        Some(json!({"general": {"storeName": "Paws & Co"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["general"]["storeName"], json!("Paws & Co"));
    assert_eq!(saved["id"], json!(1));

    // Second save updates the singleton instead of adding a record
    let (_, saved) = send(
        &app,
        "POST",
        "/api/settings",
        Some(json!({"general": {"storeName": "Paws & Co 2"}})),
    )
    .await;
    assert_eq!(saved["id"], json!(1));

    let (_, fetched) = send(&app, "GET", "/api/settings", None).await;
    assert_eq!(fetched["general"]["storeName"], json!("Paws & Co 2"));
}

#[tokio::test]
async fn credentials_never_leak_the_hash() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, defaults) = send(&app, "GET", "/api/admin/credentials", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(defaults["username"], json!("admin"));

    let (status, saved) = send(
        &app,
        "POST",
        "/api/admin/credentials",
        Some(json!({
            "username": "boss",
            "email": "boss@x.com",
            "newPassword": "hunter2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["username"], json!("boss"));
    assert!(saved.get("passwordHash").is_none());

    let (_, fetched) = send(&app, "GET", "/api/admin/credentials", None).await;
    assert_eq!(fetched["username"], json!("boss"));
    assert!(fetched.get("passwordHash").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/credentials",
        Some(json!({"email": "x@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Username is required"));
}

#[tokio::test]
async fn activity_feed_reflects_store_contents() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, empty) = send(&app, "GET", "/api/activity", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["activities"], json!([]));
    assert_eq!(empty["pagination"]["total"], json!(0));

    send(&app, "POST", "/api/leads", Some(json!({"name": "Rahul"}))).await;
    send(
        &app,
        "POST",
        "/api/pets",
        Some(json!({"name": "Max", "breed": "Golden Retriever"})),
    )
    .await;

    let (_, feed) = send(&app, "GET", "/api/activity", None).await;
    assert_eq!(feed["pagination"]["total"], json!(2));

    let (_, leads_only) = send(&app, "GET", "/api/activity?type=lead", None).await;
    assert_eq!(leads_only["pagination"]["total"], json!(1));
    assert_eq!(leads_only["activities"][0]["type"], json!("lead"));
    assert_eq!(leads_only["activities"][0]["link"], json!("/admin/leads/1"));

    let (_, all) = send(&app, "GET", "/api/activity?type=all", None).await;
    assert_eq!(all["pagination"]["total"], json!(2));
}

#[tokio::test]
async fn image_delete_cascades() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let image_dir = temp.path().join("public/images/pets");
    std::fs::create_dir_all(&image_dir).unwrap();
    std::fs::write(image_dir.join("max.jpg"), b"jpg").unwrap();

    send(
        &app,
        "POST",
        "/api/pets",
        Some(json!({"name": "Max", "imageUrl": "/images/pets/max.jpg"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "DELETE",
        "/api/images",
        Some(json!({"imagePath": "/images/pets/max.jpg", "category": "pets"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(!image_dir.join("max.jpg").exists());

    let (_, pet) = send(&app, "GET", "/api/pets/1", None).await;
    assert_eq!(pet["imageUrl"], json!("/images/pets/default.jpg"));

    // Deleting a path that is not on disk is a 404
    let (status, _) = send(
        &app,
        "DELETE",
        "/api/images",
        Some(json!({"imagePath": "/images/pets/max.jpg"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/images", Some(json!({"imagePath": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
