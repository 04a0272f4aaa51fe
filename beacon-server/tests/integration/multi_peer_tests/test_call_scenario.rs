use beacon_server::RouterCommand;
use serde_json::json;

use crate::integration::{create_test_router, init_tracing};
use crate::utils::{
    assert_same_members, connect_participant, disconnect_participant, join_room,
};

// Full call lifecycle: joins, directed signaling, disconnect, re-query.
#[tokio::test]
async fn test_call_scenario() {
    init_tracing();

    let (cmd_tx, outbound) = create_test_router();

    let a = connect_participant(&cmd_tx, &outbound).await;
    let b = connect_participant(&cmd_tx, &outbound).await;
    let c = connect_participant(&cmd_tx, &outbound).await;

    let roster_a = join_room(&cmd_tx, &outbound, a, "r1").await;
    let roster_b = join_room(&cmd_tx, &outbound, b, "r1").await;
    let roster_c = join_room(&cmd_tx, &outbound, c, "r1").await;

    assert!(roster_a.is_empty());
    assert_same_members(&roster_b, &[a]);
    assert_same_members(&roster_c, &[a, b]);
    assert_eq!(outbound.joins_seen_by(&a).await, vec![b, c]);

    // C calls A through the relay.
    cmd_tx
        .send(RouterCommand::Signal {
            from: c,
            to: a,
            payload: json!("X"),
        })
        .await
        .expect("router channel closed");

    let before = outbound.get_deliveries().await.len();
    assert!(outbound.wait_for_deliveries(before + 1, 2000).await);
    assert_eq!(outbound.offers_for(&a).await, vec![(c, json!("X"))]);

    // B hangs up; both remaining members hear it once.
    let before = outbound.get_deliveries().await.len();
    disconnect_participant(&cmd_tx, b).await;
    assert!(outbound.wait_for_deliveries(before + 2, 2000).await);

    assert_eq!(outbound.leaves_seen_by(&a).await, vec![b]);
    assert_eq!(outbound.leaves_seen_by(&c).await, vec![b]);

    // Membership reflects the departure.
    let d = connect_participant(&cmd_tx, &outbound).await;
    let roster_d = join_room(&cmd_tx, &outbound, d, "r1").await;
    assert_same_members(&roster_d, &[a, c]);
}
