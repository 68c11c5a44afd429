//! End-to-end tests of the enrichment cycle over the mock route
//! collaborator: at-most-once dispatch, merge-back, overlap and teardown
//! behavior.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::timeout;

use wayline::adapters::routing::{MockRouteComputer, MockRouteResponse};
use wayline::{EnrichmentConfig, RequestId, RouteComputer, TripListSynchronizer, TripRequest};

fn synchronizer(mock: &Arc<MockRouteComputer>) -> TripListSynchronizer {
    TripListSynchronizer::new(
        Arc::clone(mock) as Arc<dyn RouteComputer>,
        EnrichmentConfig::default(),
    )
}

fn trip(id: &str) -> TripRequest {
    TripRequest::new(id, "Avignon", "Brest")
}

#[tokio::test]
async fn successful_computation_is_merged_back() {
    // Scenario: one un-enriched record, collaborator succeeds.
    let mock = Arc::new(MockRouteComputer::new());
    mock.set_response("1", MockRouteResponse::success("poly1"));
    let sync = synchronizer(&mock);

    let (held, stats) = sync.enrich_once(vec![trip("1")]).await;

    assert_eq!(stats.dispatched, 1);
    assert_eq!(stats.succeeded, 1);
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].geometry.as_deref(), Some("poly1"));
    assert_eq!(held[0].origin_city.as_deref(), Some("Avignon"));
    assert_eq!(held[0].destination_city.as_deref(), Some("Brest"));
    assert_eq!(mock.calls(), vec![RequestId::new("1")]);
}

#[tokio::test]
async fn missing_destination_is_never_dispatched_or_marked() {
    // Scenario: record without a destination name.
    let mock = Arc::new(MockRouteComputer::new());
    let sync = synchronizer(&mock);

    let mut malformed = trip("2");
    malformed.destination_city = None;

    let (held, stats) = sync.enrich_once(vec![malformed.clone()]).await;

    assert_eq!(stats.dispatched, 0);
    assert_eq!(*held, vec![malformed]);
    assert!(mock.calls().is_empty());
    // Not marked: the record stays eligible for future rescans.
    assert_eq!(sync.attempted_count(), 0);
}

#[tokio::test]
async fn failed_attempt_is_permanent() {
    // Scenario: collaborator fails; re-adopting the identical input must
    // not dispatch again.
    let mock = Arc::new(MockRouteComputer::new());
    mock.set_response("3", MockRouteResponse::failure("routing backend down"));
    let sync = synchronizer(&mock);

    let (held, stats) = sync.enrich_once(vec![trip("3")]).await;
    assert_eq!(stats.dispatched, 1);
    assert_eq!(stats.succeeded, 0);
    assert!(held[0].geometry.is_none());

    let (held, stats) = sync.enrich_once(vec![trip("3")]).await;
    assert_eq!(stats.dispatched, 0);
    assert!(held[0].geometry.is_none());
    assert_eq!(mock.calls().len(), 1);
    assert_eq!(sync.attempted_count(), 1);
}

#[tokio::test]
async fn overlapping_adoptions_dispatch_each_id_once() {
    // Scenario: a second adoption arrives while the first cycle's
    // computation is still outstanding.
    let mock = Arc::new(MockRouteComputer::new());
    let gate = Arc::new(Notify::new());
    mock.set_response(
        "4",
        MockRouteResponse::success("poly4").gated(Arc::clone(&gate)),
    );
    mock.set_response("5", MockRouteResponse::success("poly5"));
    let sync = synchronizer(&mock);
    let mut rx = sync.subscribe();

    sync.adopt(vec![trip("4")]);
    mock.wait_for_calls(1).await;

    // Id 4 is still in flight; the new cycle must only pick up id 5.
    sync.adopt(vec![trip("4"), trip("5")]);
    mock.wait_for_calls(2).await;
    gate.notify_one();

    timeout(Duration::from_secs(5), async {
        loop {
            rx.changed().await.unwrap();
            let held = rx.borrow_and_update().clone();
            if held.len() == 2 && held.iter().all(TripRequest::is_enriched) {
                break;
            }
        }
    })
    .await
    .expect("both records should end up enriched");

    let held = sync.held();
    assert_eq!(held[0].geometry.as_deref(), Some("poly4"));
    assert_eq!(held[1].geometry.as_deref(), Some("poly5"));
    assert_eq!(mock.calls(), vec![RequestId::new("4"), RequestId::new("5")]);
}

#[tokio::test]
async fn repeated_adoption_while_in_flight_is_deduplicated() {
    let mock = Arc::new(MockRouteComputer::new());
    let gate = Arc::new(Notify::new());
    mock.set_response(
        "6",
        MockRouteResponse::success("poly6").gated(Arc::clone(&gate)),
    );
    let sync = synchronizer(&mock);

    sync.adopt(vec![trip("6")]);
    sync.adopt(vec![trip("6")]);
    sync.adopt(vec![trip("6")]);
    mock.wait_for_calls(1).await;
    gate.notify_one();

    // Give the settled cycle a chance to merge, then verify the total.
    let mut rx = sync.subscribe();
    timeout(Duration::from_secs(5), async {
        loop {
            if sync.held().first().is_some_and(TripRequest::is_enriched) {
                break;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("record should be enriched exactly once");

    assert_eq!(mock.calls().len(), 1);
    assert_eq!(sync.attempted_count(), 1);
}

#[tokio::test]
async fn enriched_input_yields_no_dispatches() {
    let mock = Arc::new(MockRouteComputer::new());
    let sync = synchronizer(&mock);

    let enriched = TripRequest {
        geometry: Some("poly".to_string()),
        ..trip("7")
    };
    let (held, stats) = sync.enrich_once(vec![enriched]).await;

    assert_eq!(stats.dispatched, 0);
    assert_eq!(held[0].geometry.as_deref(), Some("poly"));
    assert!(mock.calls().is_empty());
    assert_eq!(sync.attempted_count(), 0);
}

#[tokio::test]
async fn untouched_records_pass_through_merge_unchanged() {
    let mock = Arc::new(MockRouteComputer::new());
    mock.set_response("a", MockRouteResponse::success("polyA"));
    mock.set_response("b", MockRouteResponse::declined());
    let sync = synchronizer(&mock);

    let mut opaque = trip("b");
    opaque
        .extra
        .insert("seatClass".to_string(), serde_json::json!("first"));

    let (held, stats) = sync.enrich_once(vec![trip("a"), opaque.clone()]).await;

    assert_eq!(stats.dispatched, 2);
    assert_eq!(stats.succeeded, 1);
    assert_eq!(held.len(), 2);
    assert!(held[0].is_enriched());
    // The declined record is bit-for-bit the input record.
    assert_eq!(held[1], opaque);
}

#[tokio::test]
async fn stale_completion_after_teardown_is_discarded() {
    let mock = Arc::new(MockRouteComputer::new());
    let gate = Arc::new(Notify::new());
    mock.set_response(
        "9",
        MockRouteResponse::success("poly9").gated(Arc::clone(&gate)),
    );
    let sync = synchronizer(&mock);
    let mut rx = sync.subscribe();

    sync.adopt(vec![trip("9")]);
    mock.wait_for_calls(1).await;
    rx.changed().await.unwrap(); // the adoption publication

    // Tear the synchronizer down while the call is outstanding, then let
    // the computation settle.
    drop(sync);
    gate.notify_one();

    // The channel closes instead of delivering a merge; the last
    // published list is still the un-enriched one.
    assert!(rx.changed().await.is_err());
    assert!(rx.borrow()[0].geometry.is_none());
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn later_input_can_fill_missing_city_names() {
    // A malformed record is rescanned forever, so an input that arrives
    // with the city name filled in becomes eligible.
    let mock = Arc::new(MockRouteComputer::new());
    mock.set_response("10", MockRouteResponse::success("poly10"));
    let sync = synchronizer(&mock);

    let mut incomplete = trip("10");
    incomplete.origin_city = None;
    let (_, stats) = sync.enrich_once(vec![incomplete]).await;
    assert_eq!(stats.dispatched, 0);

    let (held, stats) = sync.enrich_once(vec![trip("10")]).await;
    assert_eq!(stats.dispatched, 1);
    assert_eq!(held[0].geometry.as_deref(), Some("poly10"));
}
