use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use image::DynamicImage;
use smolimg_server::router;
use std::io::Cursor;
use tower::ServiceExt;

const BOUNDARY: &str = "smolimg-test-boundary";
const MAX_BODY: usize = 16 * 1024 * 1024;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::new_rgb8(width, height);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Minimal multipart/form-data body builder for the tests
struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    fn new() -> Self {
        Self { body: Vec::new() }
    }

    fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    fn file(mut self, filename: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn build(mut self) -> Body {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(self.body)
    }
}

async fn post_compress(body: Body) -> (StatusCode, serde_json::Value) {
    let app = router(MAX_BODY);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/compress")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_returns_ok() {
    let app = router(MAX_BODY);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "smolimg");
}

#[tokio::test]
async fn test_compress_single_file_defaults_to_webp() {
    let body = MultipartBody::new()
        .file("photo.png", &png_bytes(64, 64))
        .build();

    let (status, json) = post_compress(body).await;

    assert_eq!(status, StatusCode::OK);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "photo.png");
    assert_eq!(results[0]["mime_type"], "image/webp");
    assert!(results[0]["data_uri"]
        .as_str()
        .unwrap()
        .starts_with("data:image/webp;base64,"));
    assert!(json["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_compress_respects_format_field() {
    let body = MultipartBody::new()
        .text("quality", "70")
        .text("format", "JPEG")
        .text("resize_factor", "100")
        .file("photo.png", &png_bytes(64, 64))
        .build();

    let (status, json) = post_compress(body).await;

    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["mime_type"], "image/jpeg");
    assert!(results[0]["data_uri"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn test_corrupt_file_is_surfaced_not_dropped() {
    let body = MultipartBody::new()
        .file("good1.png", &png_bytes(32, 32))
        .file("broken.png", b"this is not an image")
        .file("good2.png", &png_bytes(48, 48))
        .build();

    let (status, json) = post_compress(body).await;

    assert_eq!(status, StatusCode::OK);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["name"], "good1.png");
    assert_eq!(results[1]["name"], "good2.png");

    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["name"], "broken.png");
    assert!(!errors[0]["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_compress_without_files_returns_empty_lists() {
    let body = MultipartBody::new().text("quality", "80").build();

    let (status, json) = post_compress(body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["results"].as_array().unwrap().is_empty());
    assert!(json["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_format_is_bad_request() {
    let body = MultipartBody::new()
        .text("format", "HEIC")
        .file("photo.png", &png_bytes(16, 16))
        .build();

    let (status, json) = post_compress(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("HEIC"));
}

#[tokio::test]
async fn test_reported_sizes_are_consistent() {
    let input = png_bytes(128, 128);
    let body = MultipartBody::new()
        .text("format", "PNG")
        .text("quality", "100")
        .file("photo.png", &input)
        .build();

    let (status, json) = post_compress(body).await;

    assert_eq!(status, StatusCode::OK);
    let result = &json["results"][0];
    assert_eq!(result["original_size"].as_u64().unwrap(), input.len() as u64);

    let original = result["original_size"].as_f64().unwrap();
    let compressed = result["compressed_size"].as_f64().unwrap();
    let expected = ((1.0 - compressed / original) * 1000.0).round() / 10.0;
    assert_eq!(result["savings_pct"].as_f64().unwrap(), expected);
}
