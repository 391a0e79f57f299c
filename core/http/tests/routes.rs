//! End-to-end route tests against an in-memory Drive.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use drivegate_common::{AuthMode, FolderId, Result};
use drivegate_connector::{ConnectorConfig, DriveService, TextExtractor};
use drivegate_http::router;
use drivegate_storage::{
    DriveFile, MemoryConnector, MemoryGateway, Owner, GOOGLE_DOC_MIME_TYPE, PDF_MIME_TYPE,
};

const ALLOWED: &str = "allowed-folder";
const API_KEY: &str = "gpt-secret";
const SERVICE_ACCOUNT_JSON: &str =
    r#"{"client_email": "reader@project.iam.gserviceaccount.com", "private_key": "pem"}"#;

struct EchoExtractor;

#[async_trait]
impl TextExtractor for EchoExtractor {
    async fn extract_pdf(&self, bytes: Vec<u8>) -> Result<String> {
        Ok(format!("pdf:{}", String::from_utf8_lossy(&bytes)))
    }
}

fn file(id: &str, name: &str, mime: &str, parent: &str) -> DriveFile {
    DriveFile {
        id: id.to_string(),
        name: name.to_string(),
        mime_type: mime.to_string(),
        modified_time: None,
        parents: vec![parent.to_string()],
        size: Some("42".to_string()),
        owners: vec![Owner {
            display_name: Some("Ada".to_string()),
            email_address: None,
        }],
    }
}

fn seeded_gateway() -> Arc<MemoryGateway> {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.insert(
        file("abc123", "Plan", GOOGLE_DOC_MIME_TYPE, ALLOWED),
        "Quarterly plan",
    );
    gateway.insert(file("pdf1", "Report.pdf", PDF_MIME_TYPE, ALLOWED), "%PDF body");
    gateway.insert(file("img1", "photo.png", "image/png", ALLOWED), "png");
    gateway.insert(
        file("xyz999", "Secret", GOOGLE_DOC_MIME_TYPE, "other-folder"),
        "secret",
    );
    gateway
}

fn app(mode: AuthMode, gateway: Arc<MemoryGateway>) -> Router {
    let config = match mode {
        AuthMode::ServiceAccount => {
            ConnectorConfig::new(mode, FolderId::new(ALLOWED).unwrap())
                .with_api_key(API_KEY)
                .with_service_account_json(SERVICE_ACCOUNT_JSON)
        }
        AuthMode::OAuth => ConnectorConfig::new(mode, FolderId::new(ALLOWED).unwrap()),
    };
    let service = DriveService::new(
        config,
        Arc::new(MemoryConnector::new(gateway)),
        Arc::new(EchoExtractor),
    );
    router(service)
}

fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

fn with_key(uri: &str) -> Request<Body> {
    get(uri).header("x-api-key", API_KEY).body(Body::empty()).unwrap()
}

fn with_bearer(uri: &str) -> Request<Body> {
    get(uri)
        .header(header::AUTHORIZATION, "Bearer ya29.token")
        .body(Body::empty())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_needs_no_credentials() {
    let gateway = seeded_gateway();
    let request = get("/health").body(Body::empty()).unwrap();

    let (status, body) = send(app(AuthMode::ServiceAccount, gateway.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["authMode"], "SERVICE_ACCOUNT");
    assert_eq!(gateway.calls().total(), 0);
}

#[tokio::test]
async fn test_wrong_or_missing_api_key_makes_no_gateway_call() {
    let gateway = seeded_gateway();
    let uris = [
        "/drive/files",
        "/drive/search?q=plan",
        "/file/abc123/meta",
        "/file/abc123/text",
    ];

    for uri in uris {
        for key in [None, Some("wrong")] {
            let mut request = get(uri);
            if let Some(key) = key {
                request = request.header("x-api-key", key);
            }
            let request = request.body(Body::empty()).unwrap();

            let app = app(AuthMode::ServiceAccount, gateway.clone());
            let response = app.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
        }
    }
    assert_eq!(gateway.calls().total(), 0);
}

#[tokio::test]
async fn test_unauthorized_body_is_structured() {
    let request = get("/drive/files").body(Body::empty()).unwrap();
    let (status, body) = send(app(AuthMode::ServiceAccount, seeded_gateway()), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("x-api-key"));
}

#[tokio::test]
async fn test_oauth_without_bearer_is_unauthorized() {
    let gateway = seeded_gateway();
    let uris = [
        "/drive/files",
        "/drive/search?q=plan",
        "/file/abc123/meta",
        "/file/abc123/text",
    ];

    for uri in uris {
        for authorization in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer ")] {
            // An API key means nothing in OAuth mode.
            let mut request = get(uri).header("x-api-key", API_KEY);
            if let Some(value) = authorization {
                request = request.header(header::AUTHORIZATION, value);
            }
            let request = request.body(Body::empty()).unwrap();

            let app = app(AuthMode::OAuth, gateway.clone());
            let response = app.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        }
    }
    assert_eq!(gateway.calls().total(), 0);
}

#[tokio::test]
async fn test_list_files_returns_allowed_folder_children() {
    let gateway = seeded_gateway();
    let (status, body) = send(
        app(AuthMode::ServiceAccount, gateway.clone()),
        with_key("/drive/files?pageSize=10"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert!(files.iter().all(|f| f["parents"][0] == ALLOWED));
    assert_eq!(gateway.last_query().unwrap(), "'allowed-folder' in parents");
}

#[tokio::test]
async fn test_invalid_page_size_is_bad_request() {
    let (status, body) = send(
        app(AuthMode::ServiceAccount, seeded_gateway()),
        with_key("/drive/files?pageSize=lots"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_search_is_scoped_and_escaped() {
    let gateway = seeded_gateway();
    let (status, _) = send(
        app(AuthMode::OAuth, gateway.clone()),
        with_bearer("/drive/search?q=it%27s"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        gateway.last_query().unwrap(),
        "name contains 'it\\'s' and 'allowed-folder' in parents"
    );
}

#[tokio::test]
async fn test_search_without_query_is_bad_request() {
    let gateway = seeded_gateway();
    let (status, _) = send(
        app(AuthMode::OAuth, gateway.clone()),
        with_bearer("/drive/search"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(gateway.calls().total(), 0);
}

#[tokio::test]
async fn test_metadata_in_allowed_folder() {
    let (status, body) = send(
        app(AuthMode::ServiceAccount, seeded_gateway()),
        with_key("/file/abc123/meta"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "abc123");
    assert_eq!(body["mimeType"], GOOGLE_DOC_MIME_TYPE);
    assert_eq!(body["size"], "42");
    assert_eq!(body["owners"][0]["displayName"], "Ada");
}

#[tokio::test]
async fn test_file_outside_folder_is_forbidden() {
    let gateway = seeded_gateway();

    for uri in ["/file/xyz999/meta", "/file/xyz999/text"] {
        let app = app(AuthMode::ServiceAccount, gateway.clone());
        let (status, body) = send(app, with_key(uri)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "forbidden");
    }
    assert_eq!(gateway.calls().content(), 0);
}

#[tokio::test]
async fn test_google_doc_text() {
    let (status, body) = send(
        app(AuthMode::ServiceAccount, seeded_gateway()),
        with_key("/file/abc123/text"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fileId"], "abc123");
    assert_eq!(body["name"], "Plan");
    assert_eq!(body["mimeType"], GOOGLE_DOC_MIME_TYPE);
    assert_eq!(body["text"], "Quarterly plan");
}

#[tokio::test]
async fn test_pdf_text() {
    let (status, body) = send(
        app(AuthMode::OAuth, seeded_gateway()),
        with_bearer("/file/pdf1/text"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "pdf:%PDF body");
}

#[tokio::test]
async fn test_unsupported_mime_type() {
    let gateway = seeded_gateway();
    let (status, body) = send(
        app(AuthMode::ServiceAccount, gateway.clone()),
        with_key("/file/img1/text"),
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("image/png"));
    assert_eq!(gateway.calls().content(), 0);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let (status, body) = send(
        app(AuthMode::ServiceAccount, seeded_gateway()),
        with_key("/file/missing/meta"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}
