use crate::integration::{create_test_router, init_tracing};
use crate::utils::{
    Delivery, assert_same_members, connect_participant, disconnect_participant, join_room,
};

#[tokio::test]
async fn test_disconnect_triggers_participant_left() {
    init_tracing();

    let (cmd_tx, outbound) = create_test_router();

    let a = connect_participant(&cmd_tx, &outbound).await;
    let b = connect_participant(&cmd_tx, &outbound).await;
    join_room(&cmd_tx, &outbound, a, "r1").await;
    join_room(&cmd_tx, &outbound, b, "r1").await;

    let before = outbound.get_deliveries().await.len();
    disconnect_participant(&cmd_tx, b).await;
    assert!(outbound.wait_for_deliveries(before + 1, 2000).await);

    // Exactly one peer-left per remaining member, naming the departed peer.
    assert_eq!(outbound.leaves_seen_by(&a).await, vec![b]);

    // The departed identifier is gone from subsequent membership snapshots.
    let c = connect_participant(&cmd_tx, &outbound).await;
    let roster = join_room(&cmd_tx, &outbound, c, "r1").await;
    assert_same_members(&roster, &[a]);
}

#[tokio::test]
async fn test_roomless_disconnect_notifies_nobody() {
    init_tracing();

    let (cmd_tx, outbound) = create_test_router();

    let a = connect_participant(&cmd_tx, &outbound).await;
    let b = connect_participant(&cmd_tx, &outbound).await;
    join_room(&cmd_tx, &outbound, a, "r1").await;

    // b never joined a room; its disconnect must be silent.
    disconnect_participant(&cmd_tx, b).await;

    // Drive another event through the single-consumer loop to be sure the
    // disconnect has been fully processed before asserting.
    let c = connect_participant(&cmd_tx, &outbound).await;
    let _ = c;

    let leaves = outbound
        .get_deliveries()
        .await
        .into_iter()
        .filter(|d| matches!(d, Delivery::ParticipantLeft { .. }))
        .count();
    assert_eq!(leaves, 0);
}
