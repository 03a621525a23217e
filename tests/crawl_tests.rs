//! End-to-end crawl tests
//!
//! These tests run a real frontier service, a mock web site, and the
//! worker loop together: seed a URL, let the worker fetch and parse it,
//! and check that discovered links flow back to the frontier and finished
//! documents reach the sinks.

use orbweaver::crawler::Worker;
use orbweaver::document::Document;
use orbweaver::frontier::{service, Frontier, FrontierClient};
use orbweaver::index::{Index, MemoryIndex};
use orbweaver::storage::{DocStore, LocalStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_frontier() -> (String, Arc<Frontier>) {
    let frontier = Arc::new(Frontier::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    let router = service::router(frontier.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Serve failed");
    });

    (format!("http://{}", addr), frontier)
}

/// Starts a worker against the given frontier with fast test timings.
/// Returns the index sink, the store sink, and the shutdown sender.
fn spawn_worker(
    frontier_base: &str,
    store: Arc<LocalStore>,
) -> (Arc<MemoryIndex>, watch::Sender<bool>) {
    let index = Arc::new(MemoryIndex::new());
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build client");

    let worker = Worker::from_parts(
        FrontierClient::new(frontier_base, client.clone()),
        client,
        index.clone(),
        store,
        10,
        Duration::from_millis(25),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        worker.run(shutdown_rx).await;
    });

    (index, shutdown_tx)
}

/// Polls `condition` until it holds or the timeout expires.
async fn wait_until<F>(condition: F, timeout: Duration) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}

fn temp_store() -> (tempfile::TempDir, Arc<LocalStore>) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(LocalStore::new(dir.path()).expect("Failed to create store"));
    (dir, store)
}

#[tokio::test]
async fn test_seed_fetch_propagate_and_sink() {
    let site = MockServer::start().await;

    // No robots.txt: absence means no restrictions
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><head><title>Hi</title></head><body><a href="/b">b</a></body></html>"#),
        )
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><head><title>Page B</title></head><body>leaf</body></html>"#),
        )
        .mount(&site)
        .await;

    let (frontier_base, _queue) = spawn_frontier().await;
    let (_dir, store) = temp_store();
    let (index, shutdown) = spawn_worker(&frontier_base, store.clone());

    // Seed the crawl through the same wire interface workers use
    let seeder = FrontierClient::new(frontier_base.clone(), reqwest::Client::new());
    let root = format!("{}/", site.uri());
    seeder.add(&[root.clone()]).await.expect("seed failed");

    // The worker fetches the root, discovers /b through the frontier, and
    // fetches that too
    assert!(
        wait_until(|| index.len() >= 2, Duration::from_secs(10)).await,
        "worker did not process both pages in time"
    );
    shutdown.send(true).expect("shutdown send failed");

    let roots = index.search("hi");
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].url, root);
    assert_eq!(roots[0].title, "Hi");

    let leaves = index.search("leaf");
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].url, format!("{}/b", site.uri()));

    // Both documents were persisted too
    assert!(store.document_path(&root).exists());
    assert!(store.document_path(&format!("{}/b", site.uri())).exists());
}

#[tokio::test]
async fn test_disallowed_urls_are_skipped() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin"))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>Home</title></head><body>
            <a href="/open">open</a>
            <a href="/admin">admin</a>
            </body></html>"#,
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/open"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Open</title></head><body>public</body></html>"),
        )
        .mount(&site)
        .await;

    // The disallowed page must never be fetched
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
        .expect(0)
        .mount(&site)
        .await;

    let (frontier_base, queue) = spawn_frontier().await;
    let (_dir, store) = temp_store();
    let (index, shutdown) = spawn_worker(&frontier_base, store);

    let seeder = FrontierClient::new(frontier_base, reqwest::Client::new());
    seeder.add(&[format!("{}/", site.uri())]).await.unwrap();

    assert!(
        wait_until(
            || index.len() >= 2 && queue.is_empty(),
            Duration::from_secs(10)
        )
        .await,
        "worker did not drain the frontier in time"
    );
    shutdown.send(true).unwrap();

    assert_eq!(index.len(), 2, "only / and /open should be indexed");
    assert!(index.search("secret").is_empty());
    // Dropping the mock server verifies the expect(0) on /admin
}

#[tokio::test]
async fn test_unreachable_robots_fails_open() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Open anyway</title></head></html>"),
        )
        .mount(&site)
        .await;

    let (frontier_base, _queue) = spawn_frontier().await;
    let (_dir, store) = temp_store();
    let (index, shutdown) = spawn_worker(&frontier_base, store);

    let seeder = FrontierClient::new(frontier_base, reqwest::Client::new());
    seeder.add(&[format!("{}/", site.uri())]).await.unwrap();

    assert!(
        wait_until(|| index.len() >= 1, Duration::from_secs(10)).await,
        "page behind a broken robots.txt was not crawled"
    );
    shutdown.send(true).unwrap();

    assert_eq!(index.search("open anyway").len(), 1);
}

#[tokio::test]
async fn test_per_url_failures_do_not_stall_the_batch() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/fine"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Fine</title></head></html>"),
        )
        .mount(&site)
        .await;

    let (frontier_base, queue) = spawn_frontier().await;
    let (_dir, store) = temp_store();
    let (index, shutdown) = spawn_worker(&frontier_base, store);

    let seeder = FrontierClient::new(frontier_base, reqwest::Client::new());
    seeder
        .add(&[
            "not a url at all".to_string(),
            format!("{}/broken", site.uri()),
            format!("{}/fine", site.uri()),
        ])
        .await
        .unwrap();

    assert!(
        wait_until(
            || index.len() >= 1 && queue.is_empty(),
            Duration::from_secs(10)
        )
        .await,
        "healthy URL behind failing ones was not processed"
    );
    shutdown.send(true).unwrap();

    // The malformed URL and the 500 were dropped, the good page survived
    assert_eq!(index.len(), 1);
    assert_eq!(index.search("fine").len(), 1);
}

#[tokio::test]
async fn test_worker_exits_cleanly_on_shutdown() {
    let (frontier_base, _queue) = spawn_frontier().await;
    let (_dir, store) = temp_store();

    let index: Arc<MemoryIndex> = Arc::new(MemoryIndex::new());
    let client = reqwest::Client::new();
    let worker = Worker::from_parts(
        FrontierClient::new(frontier_base, client.clone()),
        client,
        index,
        store,
        10,
        Duration::from_millis(25),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(async move {
        worker.run(shutdown_rx).await;
    });

    // Let the worker reach its idle poll/sleep cycle, then cancel
    tokio::time::sleep(Duration::from_millis(60)).await;
    shutdown_tx.send(true).unwrap();

    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("worker did not stop after shutdown signal")
        .expect("worker task panicked");
}

#[tokio::test]
async fn test_saved_documents_survive_for_search() {
    // Documents written by one process are loadable by the search API
    let (_dir, store) = temp_store();
    let doc = Document {
        url: "http://a.com/page".to_string(),
        title: "Persisted".to_string(),
        body: "still here".to_string(),
    };
    store.save(&doc).unwrap();

    let index = orbweaver::api::load_index(&store).unwrap();
    let results = index.search("still here");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0], doc);
}
