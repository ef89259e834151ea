use beacon_core::{RoomId, ServerEvent, UserId};

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{SIGNAL_TIMEOUT_MS, join_room, register_host, settle, wait_for_event};

#[tokio::test]
async fn test_viewer_joins_room() {
    init_tracing();

    let (hub, signaling, mut signal_rx) = create_test_hub();
    let host = signaling.connect().await;
    let viewer = signaling.connect().await;

    register_host(&hub, host, "host-user", "abc123").await.unwrap();
    let registered = wait_for_event(&mut signal_rx, &host, "host-registered", SIGNAL_TIMEOUT_MS)
        .await
        .expect("host-registered");
    assert_eq!(
        registered,
        ServerEvent::HostRegistered { room_id: RoomId::from("abc123") }
    );

    join_room(&hub, viewer, "viewer-user", "abc123").await.unwrap();
    let notified = wait_for_event(&mut signal_rx, &host, "viewer-joined", SIGNAL_TIMEOUT_MS)
        .await
        .expect("viewer-joined");
    assert_eq!(
        notified,
        ServerEvent::ViewerJoined {
            viewer_id: UserId::from("viewer-user"),
            viewer_socket_id: viewer,
        }
    );

    let joined = wait_for_event(&mut signal_rx, &viewer, "joined-room", SIGNAL_TIMEOUT_MS)
        .await
        .expect("joined-room");
    assert_eq!(joined, ServerEvent::JoinedRoom { room_id: RoomId::from("abc123") });

    let stats = settle(&hub).await.unwrap();
    assert_eq!(stats.connections, 2);
    assert_eq!(stats.rooms, 1);

    assert_eq!(signaling.count_for(&host, "viewer-joined").await, 1);
    assert_eq!(signaling.count_for(&viewer, "viewer-joined").await, 0);
}
