//! Integration tests for suite-level comparison and aggregation.

use apidrift_client::{CompareConfig, Comparator, EndpointSpec, MemorySink};
use apidrift_core::DifferenceKind;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn json_route(body: Value) -> axum::routing::MethodRouter {
    get(move || async move { Json(body.clone()) })
}

fn delayed_route(body: Value, delay: Duration) -> axum::routing::MethodRouter {
    get(move || async move {
        tokio::time::sleep(delay).await;
        Json(body.clone())
    })
}

#[tokio::test]
async fn test_results_keep_input_order_under_concurrency() {
    // The slowest endpoint is first; re-slotting must keep input order.
    let make = || {
        Router::new()
            .route(
                "/slow",
                delayed_route(json!({"ok": 1}), Duration::from_millis(200)),
            )
            .route(
                "/mid",
                delayed_route(json!({"ok": 2}), Duration::from_millis(50)),
            )
            .route("/fast", json_route(json!({"ok": 3})))
    };
    let config = CompareConfig::new(spawn(make()).await, spawn(make()).await)
        .unwrap()
        .with_max_concurrency(3);
    let comparator = Comparator::new(config).unwrap();

    let specs = vec![
        EndpointSpec::new("/slow", "GET").unwrap(),
        EndpointSpec::new("/mid", "GET").unwrap(),
        EndpointSpec::new("/fast", "GET").unwrap(),
    ];
    let summary = comparator.compare_suite(&specs).await;

    assert_eq!(summary.total_endpoints_tested, 3);
    let order: Vec<&str> = summary.results.iter().map(|r| r.endpoint.as_str()).collect();
    assert_eq!(order, vec!["/slow", "/mid", "/fast"]);
    assert_eq!(summary.health_score, 100);
}

#[tokio::test]
async fn test_one_regression_in_five_scores_70() {
    let baseline = Router::new()
        .route("/a", json_route(json!({"v": 1})))
        .route("/b", json_route(json!({"v": 2})))
        .route("/c", json_route(json!({"v": 3})))
        .route("/d", json_route(json!({"v": 4})))
        .route("/users", json_route(json!({"name": "ada", "email": "a@b.c"})));
    let candidate = Router::new()
        .route("/a", json_route(json!({"v": 1})))
        .route("/b", json_route(json!({"v": 2})))
        .route("/c", json_route(json!({"v": 3})))
        .route("/d", json_route(json!({"v": 4})))
        .route("/users", json_route(json!({"name": "ada"})));
    let config = CompareConfig::new(spawn(baseline).await, spawn(candidate).await).unwrap();
    let comparator = Comparator::new(config).unwrap();

    let specs: Vec<EndpointSpec> = ["/a", "/b", "/c", "/d", "/users"]
        .iter()
        .map(|path| EndpointSpec::new(*path, "GET").unwrap())
        .collect();
    let summary = comparator.compare_suite(&specs).await;

    assert_eq!(summary.total_endpoints_tested, 5);
    assert_eq!(summary.regressions_found, 1);
    // A high-severity regression also counts as a warning.
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.health_score, 70);
    assert!(summary.results[4].is_regression);
}

#[tokio::test]
async fn test_suite_deadline_returns_partial_results() {
    let make = || {
        Router::new()
            .route("/fast1", json_route(json!({"ok": 1})))
            .route("/fast2", json_route(json!({"ok": 2})))
            .route(
                "/stuck",
                delayed_route(json!({"ok": 3}), Duration::from_secs(10)),
            )
    };
    let config = CompareConfig::new(spawn(make()).await, spawn(make()).await)
        .unwrap()
        .with_max_concurrency(3)
        .with_request_timeout(Duration::from_secs(30))
        .with_suite_deadline(Duration::from_millis(800));
    let comparator = Comparator::new(config).unwrap();

    let specs = vec![
        EndpointSpec::new("/fast1", "GET").unwrap(),
        EndpointSpec::new("/stuck", "GET").unwrap(),
        EndpointSpec::new("/fast2", "GET").unwrap(),
    ];
    let summary = comparator.compare_suite(&specs).await;

    // Only completed comparisons count as tested.
    assert_eq!(summary.total_endpoints_tested, 2);
    let tested: Vec<&str> = summary.results.iter().map(|r| r.endpoint.as_str()).collect();
    assert_eq!(tested, vec!["/fast1", "/fast2"]);
    assert_eq!(summary.health_score, 100);
}

#[tokio::test]
async fn test_sink_receives_every_result() {
    let make = || {
        Router::new()
            .route("/a", json_route(json!({"v": 1})))
            .route("/b", json_route(json!({"v": 2})))
    };
    let config = CompareConfig::new(spawn(make()).await, spawn(make()).await).unwrap();
    let sink = Arc::new(MemorySink::new());
    let comparator = Comparator::new(config).unwrap().with_sink(sink.clone());

    let specs = vec![
        EndpointSpec::new("/a", "GET").unwrap(),
        EndpointSpec::new("/b", "GET").unwrap(),
    ];
    let summary = comparator.compare_suite(&specs).await;

    assert_eq!(summary.total_endpoints_tested, 2);
    assert_eq!(sink.recorded().len(), 2);
}

#[tokio::test]
async fn test_invalid_base_override_records_a_failed_result() {
    let make = || Router::new().route("/ok", json_route(json!({"v": 1})));
    let config = CompareConfig::new(spawn(make()).await, spawn(make()).await).unwrap();
    let comparator = Comparator::new(config).unwrap();

    let specs = vec![
        EndpointSpec::new("/ok", "GET").unwrap(),
        EndpointSpec::new("/ok", "GET")
            .unwrap()
            .with_candidate_base("not a url"),
    ];
    let summary = comparator.compare_suite(&specs).await;

    assert_eq!(summary.total_endpoints_tested, 2);
    assert_eq!(summary.regressions_found, 1);
    assert!(!summary.results[0].is_regression);

    let failed = &summary.results[1];
    assert!(failed.is_regression);
    assert_eq!(failed.differences[0].kind, DifferenceKind::BothErrors);
    assert!(failed
        .candidate_error
        .as_deref()
        .unwrap()
        .contains("ERR_INVALID_BASE_URL"));
}
