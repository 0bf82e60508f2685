use axum_test::TestServer;
use bytes::Bytes;
use item_catalog_server::{
    ImageLocator, ImageStore, InMemoryItemRepository, ItemServiceImpl, ObjectStoreImageStore,
    adapters::inbound::http::{
        dto::{ErrorResponseDto, HealthDto, ItemDto},
        router::{AppState, create_router},
    },
};
use std::sync::Arc;

const BOUNDARY: &str = "item-form-boundary-4f2a";

struct TestApp {
    server: TestServer,
    images: Arc<ObjectStoreImageStore>,
}

fn setup() -> TestApp {
    let repository = Arc::new(InMemoryItemRepository::new());
    let images = Arc::new(ObjectStoreImageStore::in_memory("test-bucket"));

    let state = AppState {
        item_service: Arc::new(ItemServiceImpl::new(repository, images.clone())),
    };

    TestApp {
        server: TestServer::new(create_router(state)).unwrap(),
        images,
    }
}

/// Build a multipart body in the shape the browser client sends.
fn item_form(fields: &[(&str, &str)], image: Option<(&str, &str, &[u8])>) -> (String, Bytes) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, content_type, data)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        Bytes::from(body),
    )
}

#[tokio::test]
async fn health_returns_ok() {
    let app = setup();
    let response = app.server.get("/api/health").await;

    response.assert_status_ok();
    let body: HealthDto = response.json();
    assert_eq!(body.status, "OK");
}

#[tokio::test]
async fn create_and_fetch_item() {
    let app = setup();

    let (content_type, body) = item_form(&[("title", "Cat"), ("description", "A cat photo")], None);
    let response = app
        .server
        .post("/api/items")
        .content_type(&content_type)
        .bytes(body)
        .await;

    assert_eq!(response.status_code(), 201);
    let created: ItemDto = response.json();
    assert_eq!(created.title, "Cat");
    assert!(created.image_url.is_none());

    let fetched: ItemDto = app
        .server
        .get(&format!("/api/items/{}", created.id))
        .await
        .json();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.description, "A cat photo");

    let listed: Vec<ItemDto> = app.server.get("/api/items").await.json();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn create_rejects_invalid_fields_with_joined_rules() {
    let app = setup();

    let (content_type, body) = item_form(&[("title", "  "), ("description", "")], None);
    let response = app
        .server
        .post("/api/items")
        .content_type(&content_type)
        .bytes(body)
        .await;

    assert_eq!(response.status_code(), 400);
    let error: ErrorResponseDto = response.json();
    assert!(error.error.contains("Title is required"));
    assert!(error.error.contains("Description is required"));
}

#[tokio::test]
async fn create_rejects_bad_file_extension() {
    let app = setup();

    let (content_type, body) = item_form(
        &[("title", "Cat"), ("description", "A cat photo")],
        Some(("cat.tiff", "image/tiff", b"bytes")),
    );
    let response = app
        .server
        .post("/api/items")
        .content_type(&content_type)
        .bytes(body)
        .await;

    assert_eq!(response.status_code(), 400);
    let error: ErrorResponseDto = response.json();
    assert!(error.error.contains("Invalid file extension"));
}

#[tokio::test]
async fn malformed_id_is_rejected_before_the_store() {
    let app = setup();

    let response = app.server.get("/api/items/not-a-uuid").await;
    assert_eq!(response.status_code(), 400);

    let response = app.server.delete("/api/items/123").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn unknown_id_is_404() {
    let app = setup();
    let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    assert_eq!(app.server.get(&format!("/api/items/{id}")).await.status_code(), 404);
    assert_eq!(
        app.server.delete(&format!("/api/items/{id}")).await.status_code(),
        404
    );

    let (content_type, body) = item_form(&[("title", "T"), ("description", "D")], None);
    let response = app
        .server
        .put(&format!("/api/items/{id}"))
        .content_type(&content_type)
        .bytes(body)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn full_item_lifecycle_with_image() {
    let app = setup();

    // Create with an image.
    let (content_type, body) = item_form(
        &[("title", "Cat"), ("description", "A cat photo")],
        Some(("cat.png", "image/png", b"png payload")),
    );
    let response = app
        .server
        .post("/api/items")
        .content_type(&content_type)
        .bytes(body)
        .await;
    assert_eq!(response.status_code(), 201);

    let created: ItemDto = response.json();
    let locator = ImageLocator::new(created.image_url.clone().expect("imageUrl should be set"));
    assert_eq!(
        app.images.get_image(&locator).await.unwrap(),
        Bytes::from_static(b"png payload")
    );

    // Update the title only; the locator must not change.
    let (content_type, body) = item_form(&[("title", "Kitten")], None);
    let response = app
        .server
        .put(&format!("/api/items/{}", created.id))
        .content_type(&content_type)
        .bytes(body)
        .await;
    assert_eq!(response.status_code(), 200);

    let updated: ItemDto = response.json();
    assert_eq!(updated.title, "Kitten");
    assert_eq!(updated.image_url, created.image_url);
    assert!(updated.updated_at >= updated.created_at);

    // Delete; the record and the object both go away.
    let response = app
        .server
        .delete(&format!("/api/items/{}", created.id))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = app.server.get(&format!("/api/items/{}", created.id)).await;
    assert_eq!(response.status_code(), 404);
    assert!(app.images.get_image(&locator).await.is_err());
}
