use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use oidc_master_cli::commands::shell::{self, DiscoveryPane, PaneState, FATAL_MESSAGE};
use oidc_master_oidc::DiscoveryClient;
use oidc_master_test::StubServer;
use serde_json::json;

/// Discovery stub that answers after `delay`.
async fn slow_issuer(name: &'static str, delay: Duration) -> StubServer {
    let router = Router::new().route(
        "/.well-known/openid-configuration",
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({ "issuer": name }))
        }),
    );
    StubServer::start(router).await
}

async fn wait_until_done(pane: &DiscoveryPane) -> PaneState<oidc_master_cli::commands::shell::DiscoveryOutcome> {
    for _ in 0..200 {
        if let Some(state @ PaneState::Done(_)) = pane.state() {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("discovery never completed");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn newest_fetch_wins_even_when_older_finishes_last() {
    let slow = slow_issuer("slow", Duration::from_millis(400)).await;
    let fast = slow_issuer("fast", Duration::from_millis(10)).await;
    let pane = DiscoveryPane::new(DiscoveryClient::new());

    let first = pane.start(&slow.base_url());
    let second = pane.start(&fast.base_url());
    assert!(second > first);

    match wait_until_done(&pane).await {
        PaneState::Done(Ok(doc)) => assert_eq!(doc.issuer(), Some("fast")),
        other => panic!("unexpected state: {other:?}"),
    }

    // The superseded response arrives later and is discarded.
    tokio::time::sleep(Duration::from_millis(600)).await;
    match pane.state() {
        Some(PaneState::Done(Ok(doc))) => assert_eq!(doc.issuer(), Some("fast")),
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn loading_state_is_shown_while_in_flight() {
    let slow = slow_issuer("slow", Duration::from_millis(200)).await;
    let pane = DiscoveryPane::new(DiscoveryClient::new());
    assert!(pane.state().is_none());

    pane.start(&slow.base_url());
    match pane.state() {
        Some(PaneState::Loading { target }) => assert_eq!(target, slow.base_url()),
        other => panic!("unexpected state: {other:?}"),
    }

    wait_until_done(&pane).await;
    assert!(pane.authorization_endpoint().is_none());
}

#[tokio::test]
async fn failures_show_the_generic_message() {
    let pane = DiscoveryPane::new(DiscoveryClient::new());
    pane.start("not a url");

    match wait_until_done(&pane).await {
        PaneState::Done(Err(message)) => {
            assert_eq!(message, "Failed to fetch discovery document")
        }
        other => panic!("unexpected state: {other:?}"),
    }
}

#[test]
fn panics_are_reported_as_the_fatal_message() {
    let err = shell::guard::<()>(|| panic!("view crashed")).unwrap_err();
    assert_eq!(err.to_string(), FATAL_MESSAGE);
}

#[test]
fn guard_passes_results_through() {
    assert_eq!(shell::guard(|| Ok(7)).unwrap(), 7);
    let err = shell::guard::<()>(|| Err("plain failure".into())).unwrap_err();
    assert_eq!(err.to_string(), "plain failure");
}
