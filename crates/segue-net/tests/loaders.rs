use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{http::StatusCode, response::Response, routing::get, Router};
use segue_net::{FileLoader, HttpLoader, LoadOptions, Loader, NetError, NetOptions};
use tokio::net::TcpListener;
use url::Url;

async fn run_test_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", addr.port())
}

fn test_app() -> Router {
    Router::new()
        .route("/text", get(|| async { "Hello, World!" }))
        .route(
            "/segment",
            get(|| async {
                Response::builder()
                    .status(StatusCode::OK)
                    .header("Content-Type", "video/mp2t; charset=binary")
                    .body(axum::body::Body::from(&b"SEGMENT-BYTES"[..]))
                    .unwrap()
            }),
        )
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
}

#[tokio::test]
async fn http_loader_returns_payload() {
    let base = run_test_server(test_app()).await;
    let loader = HttpLoader::new(&NetOptions::default()).unwrap();

    let url: Url = format!("{base}/text").parse().unwrap();
    let loaded = loader.load(&url, LoadOptions::playlist()).await.unwrap();

    assert_eq!(&loaded.data[..], b"Hello, World!");
}

#[tokio::test]
async fn http_loader_captures_mime_type() {
    let base = run_test_server(test_app()).await;
    let loader = HttpLoader::new(&NetOptions::default()).unwrap();

    let url: Url = format!("{base}/segment").parse().unwrap();
    let loaded = loader.load(&url, LoadOptions::buffer()).await.unwrap();

    assert_eq!(&loaded.data[..], b"SEGMENT-BYTES");
    assert_eq!(loaded.mime_type.as_deref(), Some("video/mp2t"));
}

#[tokio::test]
async fn http_loader_maps_404_without_retrying() {
    let base = run_test_server(test_app()).await;
    let loader = HttpLoader::new(&NetOptions::default()).unwrap();

    let url: Url = format!("{base}/missing").parse().unwrap();
    let err = loader.load(&url, LoadOptions::playlist()).await.unwrap_err();

    match err {
        NetError::HttpStatus { status, .. } => assert_eq!(status, 404),
        other => panic!("Expected HttpStatus error, got: {other:?}"),
    }
}

#[tokio::test]
async fn http_loader_retries_server_errors_until_exhausted() {
    let base = run_test_server(test_app()).await;
    let opts = NetOptions {
        max_retries: 2,
        retry_base_delay: Duration::from_millis(1),
        max_retry_delay: Duration::from_millis(5),
        ..NetOptions::default()
    };
    let loader = HttpLoader::new(&opts).unwrap();

    let url: Url = format!("{base}/broken").parse().unwrap();
    let err = loader.load(&url, LoadOptions::playlist()).await.unwrap_err();

    match err {
        NetError::RetryExhausted {
            max_retries,
            source,
        } => {
            assert_eq!(max_retries, 2);
            assert!(matches!(*source, NetError::HttpStatus { status: 500, .. }));
        }
        other => panic!("Expected RetryExhausted error, got: {other:?}"),
    }
}

#[tokio::test]
async fn http_loader_recovers_after_transient_failure() {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_for_route = hits.clone();

    let app = Router::new().route(
        "/flaky",
        get(move || {
            let hits = hits_for_route.clone();
            async move {
                if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                    Response::builder()
                        .status(StatusCode::SERVICE_UNAVAILABLE)
                        .body(axum::body::Body::empty())
                        .unwrap()
                } else {
                    Response::builder()
                        .status(StatusCode::OK)
                        .body(axum::body::Body::from("eventually"))
                        .unwrap()
                }
            }
        }),
    );

    let base = run_test_server(app).await;
    let opts = NetOptions {
        max_retries: 3,
        retry_base_delay: Duration::from_millis(1),
        ..NetOptions::default()
    };
    let loader = HttpLoader::new(&opts).unwrap();

    let url: Url = format!("{base}/flaky").parse().unwrap();
    let loaded = loader.load(&url, LoadOptions::playlist()).await.unwrap();

    assert_eq!(&loaded.data[..], b"eventually");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn file_loader_reads_from_disk_with_guessed_mime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("media.m3u8");
    tokio::fs::write(&path, b"#EXTM3U\n").await.unwrap();

    let loader = FileLoader::new();
    let url = Url::from_file_path(&path).unwrap();
    let loaded = loader.load(&url, LoadOptions::playlist()).await.unwrap();

    assert_eq!(&loaded.data[..], b"#EXTM3U\n");
    assert_eq!(
        loaded.mime_type.as_deref(),
        Some("application/vnd.apple.mpegurl")
    );
}

#[tokio::test]
async fn file_loader_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let url = Url::from_file_path(dir.path().join("absent.ts")).unwrap();

    let loader = FileLoader::new();
    let err = loader.load(&url, LoadOptions::buffer()).await.unwrap_err();

    assert!(matches!(err, NetError::Io { .. }));
}

#[tokio::test]
async fn file_loader_rejects_non_file_urls() {
    let loader = FileLoader::new();
    let url: Url = "http://example.com/a.ts".parse().unwrap();

    let err = loader.load(&url, LoadOptions::buffer()).await.unwrap_err();
    assert!(matches!(err, NetError::UnsupportedUrl(_)));
}
