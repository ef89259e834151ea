use beacon_core::{ClientEvent, ServerEvent};
use serde_json::json;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::settle;

#[tokio::test]
async fn test_ice_candidates_arrive_in_send_order() {
    init_tracing();

    let (hub, signaling, _signal_rx) = create_test_hub();
    let a = signaling.connect().await;
    let b = signaling.connect().await;

    let candidates: Vec<_> = (0..20)
        .map(|i| json!({ "candidate": format!("candidate:{i} 1 udp 2122260223 10.0.0.{i} 5000 typ host") }))
        .collect();

    for candidate in &candidates {
        hub.dispatch(
            a,
            ClientEvent::IceCandidate {
                candidate: candidate.clone(),
                target_socket_id: b.into(),
            },
        )
        .await
        .unwrap();
    }
    settle(&hub).await.unwrap();

    let received: Vec<_> = signaling
        .events_for(&b)
        .await
        .into_iter()
        .map(|event| match event {
            ServerEvent::IceCandidate { candidate, from } => {
                assert_eq!(from, a);
                candidate
            }
            other => panic!("unexpected event {:?}", other),
        })
        .collect();

    assert_eq!(received, candidates);
}

#[tokio::test]
async fn test_offer_is_forwarded_verbatim() {
    init_tracing();

    let (hub, signaling, _signal_rx) = create_test_hub();
    let host = signaling.connect().await;
    let viewer = signaling.connect().await;
    let offer = json!({ "type": "offer", "sdp": "v=0\r\nnot really sdp", "anything": { "nested": true } });

    hub.dispatch(
        host,
        ClientEvent::Offer {
            offer: offer.clone(),
            target_socket_id: viewer.into(),
        },
    )
    .await
    .unwrap();
    settle(&hub).await.unwrap();

    assert_eq!(
        signaling.events_for(&viewer).await,
        vec![ServerEvent::Offer { offer, from: host }]
    );
}
