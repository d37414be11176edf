//! End-to-end resolver and downloader flows
//!
//! HTTP transfers run against a local mock server; the `file://` scheme
//! covers the deterministic cache/offline round trips.

mod common;

use common::{WIDGET_PATH, context, widget_coordinate};
use filetime::FileTime;
use minibuild::{Downloader, Resolver, tree};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTIFACT_BYTES: &[u8] = b"PK\x03\x04 widget archive payload";
const LAST_MODIFIED: &str = "Wed, 21 Oct 2015 07:28:00 GMT";

async fn mount_artifact(server: &MockServer, body: &[u8], last_modified: &str) {
    let artifact_path = format!("/maven2/{WIDGET_PATH}");
    Mock::given(method("HEAD"))
        .and(path(artifact_path.clone()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Length", body.len().to_string().as_str())
                .insert_header("Last-Modified", last_modified),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(artifact_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.to_vec())
                .insert_header("Last-Modified", last_modified),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolve_fetches_an_artifact_over_http() {
    let server = MockServer::start().await;
    mount_artifact(&server, ARTIFACT_BYTES, LAST_MODIFIED).await;

    let (ctx, sink) = context();
    let temp = TempDir::new().unwrap();
    let cache_root = temp.path().join("cache");
    let base = Url::parse(&format!("{}/maven2", server.uri())).unwrap();

    let local = Resolver::default()
        .resolve(&ctx, &widget_coordinate(), &cache_root, &base)
        .await
        .unwrap();

    assert_eq!(local, cache_root.join(WIDGET_PATH));
    assert_eq!(std::fs::read(&local).unwrap(), ARTIFACT_BYTES);
    let lines = sink.lines();
    assert!(lines[0].starts_with("Downloading http://"));
    assert!(lines.iter().any(|l| l.starts_with("Transferring ")));
    assert!(
        lines
            .iter()
            .any(|l| l == "Downloaded widget-1.0.0.zip successfully.")
    );
    assert!(
        lines
            .iter()
            .any(|l| l == &format!(" o Size -> {} bytes", ARTIFACT_BYTES.len()))
    );
}

#[tokio::test]
async fn changed_remote_content_replaces_the_local_file() {
    let server = MockServer::start().await;
    let new_body = b"PK\x03\x04 rebuilt widget archive";
    mount_artifact(&server, new_body, "Thu, 22 Oct 2015 09:00:00 GMT").await;

    let (ctx, sink) = context();
    let temp = TempDir::new().unwrap();
    let target_dir = temp.path().to_path_buf();
    let stale = target_dir.join("widget-1.0.0.zip");
    std::fs::write(&stale, b"stale bytes").unwrap();
    filetime::set_file_mtime(&stale, FileTime::from_unix_time(1_400_000_000, 0)).unwrap();

    let uri = format!("{}/maven2/{WIDGET_PATH}", server.uri());
    let local = Downloader::new()
        .download(&ctx, &target_dir, &uri)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&local).unwrap(), new_body);
    let lines = sink.lines();
    assert!(
        lines
            .iter()
            .any(|l| l == "Local file differs from remote -- replacing it...")
    );
}

#[tokio::test]
async fn http_error_status_is_a_transfer_failure() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (ctx, _sink) = context();
    let temp = TempDir::new().unwrap();
    let uri = format!("{}/maven2/{WIDGET_PATH}", server.uri());
    let err = Downloader::new()
        .download(&ctx, temp.path(), &uri)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), minibuild::ErrorKind::TransferFailure);
}

#[tokio::test]
async fn offline_round_trip_through_the_cache() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    let artifact_dir = repo.join("org/example/tools/widget/1.0.0");
    std::fs::create_dir_all(&artifact_dir).unwrap();
    std::fs::write(artifact_dir.join("widget-1.0.0.zip"), ARTIFACT_BYTES).unwrap();

    let (ctx, sink) = context();
    let cache_root = temp.path().join("cache");
    let base = Url::from_directory_path(&repo).unwrap();
    let resolver = Resolver::default();
    let coordinate = widget_coordinate();

    // populate the cache online
    let local = resolver
        .resolve(&ctx, &coordinate, &cache_root, &base)
        .await
        .unwrap();
    assert_eq!(std::fs::read(&local).unwrap(), ARTIFACT_BYTES);

    // offline resolves are served from the cache without any access
    ctx.set_offline(true);
    sink.clear();
    let cached = resolver
        .resolve(&ctx, &coordinate, &cache_root, &base)
        .await
        .unwrap();
    assert_eq!(cached, local);
    assert_eq!(
        sink.lines().last().unwrap(),
        "Offline mode is active and target already exists."
    );

    // pruning the cache turns the offline resolve into the distinct
    // missing-and-offline failure
    tree::delete(&cache_root).unwrap();
    assert!(!cache_root.exists());
    let err = resolver
        .resolve(&ctx, &coordinate, &cache_root, &base)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Target is missing and being offline: {}", local.display())
    );
}
