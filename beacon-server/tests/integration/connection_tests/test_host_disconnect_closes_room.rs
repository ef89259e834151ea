use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{join_room, register_host, settle};

#[tokio::test]
async fn test_host_disconnect_closes_room() {
    init_tracing();

    let (hub, signaling, _signal_rx) = create_test_hub();
    let host = signaling.connect().await;
    let v1 = signaling.connect().await;
    let v2 = signaling.connect().await;

    register_host(&hub, host, "h", "abc123").await.unwrap();
    join_room(&hub, v1, "v1", "abc123").await.unwrap();
    join_room(&hub, v2, "v2", "abc123").await.unwrap();
    settle(&hub).await.unwrap();

    signaling.close(&host).await;
    hub.disconnect(host).await.unwrap();
    let stats = settle(&hub).await.unwrap();

    assert_eq!(signaling.count_for(&v1, "host-disconnected").await, 1);
    assert_eq!(signaling.count_for(&v2, "host-disconnected").await, 1);
    assert_eq!(stats.rooms, 0);
    assert_eq!(stats.connections, 2);

    // With the room gone, a new join is refused.
    let v3 = signaling.connect().await;
    join_room(&hub, v3, "v3", "abc123").await.unwrap();
    settle(&hub).await.unwrap();
    assert_eq!(signaling.count_for(&v3, "room-not-found").await, 1);

    // Orphans leaving afterwards produce no further traffic.
    let before = signaling.total().await;
    hub.disconnect(v1).await.unwrap();
    hub.disconnect(v2).await.unwrap();
    let stats = settle(&hub).await.unwrap();
    assert_eq!(signaling.total().await, before);
    assert_eq!(stats.connections, 1);
}

#[tokio::test]
async fn test_viewer_disconnect_notifies_host_only() {
    init_tracing();

    let (hub, signaling, _signal_rx) = create_test_hub();
    let host = signaling.connect().await;
    let v1 = signaling.connect().await;
    let v2 = signaling.connect().await;

    register_host(&hub, host, "h", "abc123").await.unwrap();
    join_room(&hub, v1, "v1", "abc123").await.unwrap();
    join_room(&hub, v2, "v2", "abc123").await.unwrap();

    hub.disconnect(v1).await.unwrap();
    let stats = settle(&hub).await.unwrap();

    assert_eq!(signaling.count_for(&host, "viewer-disconnected").await, 1);
    assert_eq!(signaling.count_for(&v2, "viewer-disconnected").await, 0);
    assert_eq!(stats.rooms, 1);
    assert_eq!(stats.connections, 2);
}
