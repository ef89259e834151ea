use beacon_core::{ClientEvent, RoomId, ServerEvent};
use serde_json::json;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{join_room, register_host, settle};

/// Host streams to two viewers: negotiation in both directions, one viewer
/// leaves, then the host leaves.
#[tokio::test]
async fn test_broadcast_scenario() {
    init_tracing();

    let (hub, signaling, _signal_rx) = create_test_hub();
    let host = signaling.connect().await;
    let viewers = [signaling.connect().await, signaling.connect().await];

    register_host(&hub, host, "host", "live").await.unwrap();
    for (i, viewer) in viewers.iter().enumerate() {
        join_room(&hub, *viewer, &format!("viewer-{i}"), "live").await.unwrap();
    }
    settle(&hub).await.unwrap();
    assert_eq!(signaling.count_for(&host, "viewer-joined").await, 2);

    for (i, viewer) in viewers.iter().enumerate() {
        hub.dispatch(
            host,
            ClientEvent::Offer {
                offer: json!({ "sdp": format!("offer-{i}") }),
                target_socket_id: (*viewer).into(),
            },
        )
        .await
        .unwrap();
        hub.dispatch(
            *viewer,
            ClientEvent::Answer {
                answer: json!({ "sdp": format!("answer-{i}") }),
                target_socket_id: host.into(),
                message_id: Some("m1".to_string()),
            },
        )
        .await
        .unwrap();
    }
    settle(&hub).await.unwrap();

    for (i, viewer) in viewers.iter().enumerate() {
        assert_eq!(
            signaling.events_for(viewer).await,
            vec![
                ServerEvent::JoinedRoom { room_id: RoomId::from("live") },
                ServerEvent::Offer {
                    offer: json!({ "sdp": format!("offer-{i}") }),
                    from: host,
                },
            ]
        );
    }
    // Same message id from two different viewers is not a duplicate.
    assert_eq!(signaling.count_for(&host, "answer").await, 2);

    signaling.close(&viewers[0]).await;
    hub.disconnect(viewers[0]).await.unwrap();
    signaling.close(&host).await;
    hub.disconnect(host).await.unwrap();
    let stats = settle(&hub).await.unwrap();

    assert_eq!(signaling.count_for(&host, "viewer-disconnected").await, 1);
    assert_eq!(signaling.count_for(&viewers[0], "host-disconnected").await, 0);
    assert_eq!(signaling.count_for(&viewers[1], "host-disconnected").await, 1);
    assert_eq!(stats.rooms, 0);
    assert_eq!(stats.connections, 1);
}
