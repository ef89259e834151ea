use beacon_core::{ClientEvent, ServerEvent};
use beacon_server::HubConfig;
use serde_json::json;

use crate::integration::{create_test_hub, create_test_hub_with, init_tracing};
use crate::utils::settle;

fn answer(target: beacon_core::ConnectionId, message_id: &str) -> ClientEvent {
    ClientEvent::Answer {
        answer: json!({ "type": "answer", "sdp": "v=0" }),
        target_socket_id: target.into(),
        message_id: Some(message_id.to_string()),
    }
}

#[tokio::test]
async fn test_retransmitted_answer_is_relayed_once() {
    init_tracing();

    let (hub, signaling, _signal_rx) = create_test_hub();
    let host = signaling.connect().await;
    let viewer = signaling.connect().await;

    hub.dispatch(viewer, answer(host, "m1")).await.unwrap();
    hub.dispatch(viewer, answer(host, "m1")).await.unwrap();
    settle(&hub).await.unwrap();

    assert_eq!(
        signaling.events_for(&host).await,
        vec![ServerEvent::Answer {
            answer: json!({ "type": "answer", "sdp": "v=0" }),
            from: viewer,
        }]
    );
}

#[tokio::test]
async fn test_evicted_answer_id_is_relayed_again() {
    init_tracing();

    let (hub, signaling, _signal_rx) = create_test_hub_with(HubConfig {
        dedup_capacity: 4,
        dedup_evict_batch: 2,
        ..HubConfig::default()
    });
    let host = signaling.connect().await;
    let viewer = signaling.connect().await;

    for id in ["m1", "m2", "m3", "m4", "m5"] {
        hub.dispatch(viewer, answer(host, id)).await.unwrap();
    }
    // m1 was evicted with the oldest batch, m3 is still remembered.
    hub.dispatch(viewer, answer(host, "m1")).await.unwrap();
    hub.dispatch(viewer, answer(host, "m3")).await.unwrap();
    settle(&hub).await.unwrap();

    assert_eq!(signaling.count_for(&host, "answer").await, 6);
}
