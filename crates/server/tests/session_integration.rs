//! E2E tests for the search session surface, using the in-process
//! fixture with a scripted mock upstream.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};
use farefeed_core::SourceError;

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint_exposes_upstream() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/config").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["upstream"]["base_url"], "http://mock.invalid");
    assert_eq!(response.body["server"]["port"], 8080);
}

#[tokio::test]
async fn test_session_endpoints_require_a_search() {
    let fixture = TestFixture::new();

    for path in [
        "/api/v1/session",
        "/api/v1/session/tickets",
    ] {
        let response = fixture.get(path).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", path);
        assert!(response.body["error"].is_string());
    }

    let response = fixture.post("/api/v1/session/reveal", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_accumulates_batches_and_completes() {
    let fixture = TestFixture::new();
    fixture.source.push_batch(fixtures::raw_batch(500), false).await;
    fixture.source.push_batch(fixtures::raw_batch(300), false).await;
    fixture.source.push_batch(vec![], true).await;

    let response = fixture.run_search_to_completion().await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let session = fixture.get("/api/v1/session").await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.body["phase"], "completed");
    assert_eq!(session.body["total_tickets"], 800);
    assert_eq!(session.body["is_loading"], false);
    assert_eq!(session.body["is_background_loading"], false);
    assert!(session.body.get("last_error").is_none());
}

#[tokio::test]
async fn test_tickets_endpoint_reveals_in_steps_of_five() {
    let fixture = TestFixture::new();
    fixture.source.push_batch(fixtures::raw_batch(20), true).await;
    fixture.run_search_to_completion().await;

    let tickets = fixture.get("/api/v1/session/tickets").await;
    assert_eq!(tickets.body["tickets"].as_array().unwrap().len(), 5);
    assert_eq!(tickets.body["matching_tickets"], 20);
    assert_eq!(tickets.body["reveal_count"], 5);

    let reveal = fixture.post("/api/v1/session/reveal", None).await;
    assert_eq!(reveal.status, StatusCode::OK);
    assert_eq!(reveal.body["reveal_count"], 10);

    let tickets = fixture.get("/api/v1/session/tickets").await;
    assert_eq!(tickets.body["tickets"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_filter_and_sort_actions() {
    let fixture = TestFixture::new();
    fixture
        .source
        .push_batch(
            vec![
                fixtures::raw_ticket("AA", 500, &[(0, 200), (0, 100)]),
                fixtures::raw_ticket("BB", 100, &[(3, 50), (3, 60)]),
                fixtures::raw_ticket("CC", 300, &[(1, 80), (1, 90)]),
            ],
            true,
        )
        .await;
    fixture.run_search_to_completion().await;

    // Defaults exclude the 3-stop ticket, cheapest first.
    let tickets = fixture.get("/api/v1/session/tickets").await;
    let carriers: Vec<&str> = tickets.body["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["carrier"].as_str().unwrap())
        .collect();
    assert_eq!(carriers, vec!["CC", "AA"]);

    // Enable 3-stop itineraries and switch to fastest.
    let response = fixture
        .post(
            "/api/v1/session/filters",
            Some(json!({"id": "3", "is_checked": true})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = fixture
        .post("/api/v1/session/sort", Some(json!({"sort": "fastest"})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sort"], "fastest");

    let tickets = fixture.get("/api/v1/session/tickets").await;
    let carriers: Vec<&str> = tickets.body["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["carrier"].as_str().unwrap())
        .collect();
    assert_eq!(carriers, vec!["BB", "CC", "AA"]);
}

#[tokio::test]
async fn test_checking_all_filter_fans_out_in_snapshot() {
    let fixture = TestFixture::new();
    fixture.source.push_batch(vec![], true).await;
    fixture.run_search_to_completion().await;

    let response = fixture
        .post(
            "/api/v1/session/filters",
            Some(json!({"id": "all", "is_checked": true})),
        )
        .await;

    let filters = response.body["filters"].as_array().unwrap();
    assert_eq!(filters.len(), 5);
    assert!(filters.iter().all(|f| f["is_checked"] == true));
}

#[tokio::test]
async fn test_transient_server_failure_is_invisible() {
    let fixture = TestFixture::new();
    fixture
        .source
        .push_error(SourceError::Server { status: 503 })
        .await;
    fixture.source.push_batch(fixtures::raw_batch(2), true).await;

    fixture.run_search_to_completion().await;

    let session = fixture.get("/api/v1/session").await;
    assert_eq!(session.body["phase"], "completed");
    assert_eq!(session.body["total_tickets"], 2);
    assert!(session.body.get("last_error").is_none());
}

#[tokio::test]
async fn test_fatal_error_keeps_partial_results_browsable() {
    let fixture = TestFixture::new();
    fixture.source.push_batch(fixtures::raw_batch(6), false).await;
    fixture
        .source
        .push_error(SourceError::MalformedBody("missing field `tickets`".to_string()))
        .await;

    fixture.run_search_to_completion().await;

    let session = fixture.get("/api/v1/session").await;
    assert_eq!(session.body["phase"], "failed");
    assert_eq!(session.body["last_error"]["kind"], "data_format");
    assert_eq!(session.body["total_tickets"], 6);

    // Partial results remain browsable.
    let tickets = fixture.get("/api/v1/session/tickets").await;
    assert_eq!(tickets.body["tickets"].as_array().unwrap().len(), 5);

    // Clearing the error keeps the tickets.
    let response = fixture.post("/api/v1/session/error/clear", None).await;
    assert!(response.body.get("last_error").is_none());
    assert_eq!(response.body["total_tickets"], 6);
}

#[tokio::test]
async fn test_new_search_replaces_previous_session() {
    let fixture = TestFixture::new();
    fixture.source.push_batch(fixtures::raw_batch(3), true).await;
    fixture.run_search_to_completion().await;

    let session = fixture.get("/api/v1/session").await;
    assert_eq!(session.body["total_tickets"], 3);

    fixture.source.push_batch(fixtures::raw_batch(9), true).await;
    fixture.run_search_to_completion().await;

    let session = fixture.get("/api/v1/session").await;
    assert_eq!(session.body["total_tickets"], 9);
}

#[tokio::test]
async fn test_delete_session_cancels_ingestion() {
    let fixture = TestFixture::new();
    fixture.source.push_batch(fixtures::raw_batch(4), false).await;
    fixture.source.hold_after_script().await;

    fixture.post("/api/v1/search", None).await;
    fixture.source.wait_for_polls(2).await;

    let response = fixture.delete("/api/v1/session").await;
    assert_eq!(response.status, StatusCode::OK);

    let session = fixture.state.session().await.unwrap();
    session.wait().await;

    let snapshot = fixture.get("/api/v1/session").await;
    assert_eq!(snapshot.body["phase"], "cancelled");
    assert_eq!(snapshot.body["total_tickets"], 4);
    assert!(snapshot.body.get("last_error").is_none());
}

#[tokio::test]
async fn test_metrics_endpoint_reports_http_traffic() {
    let fixture = TestFixture::new();
    fixture.get("/api/v1/health").await;

    let response = fixture.get("/metrics").await;
    assert_eq!(response.status, StatusCode::OK);
}
