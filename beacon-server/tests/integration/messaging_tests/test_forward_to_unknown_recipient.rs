use beacon_core::ParticipantId;
use beacon_server::RouterCommand;
use serde_json::json;

use crate::integration::{create_test_router, init_tracing};
use crate::utils::connect_participant;

#[tokio::test]
async fn test_forward_to_unknown_recipient() {
    init_tracing();

    let (cmd_tx, outbound) = create_test_router();

    let a = connect_participant(&cmd_tx, &outbound).await;
    let ghost = ParticipantId::new();

    cmd_tx
        .send(RouterCommand::Signal {
            from: a,
            to: ghost,
            payload: json!({"sdp": "v=0"}),
        })
        .await
        .expect("router channel closed");

    cmd_tx
        .send(RouterCommand::ReturnSignal {
            from: a,
            to: ghost,
            payload: json!({"sdp": "v=0"}),
        })
        .await
        .expect("router channel closed");

    // The router must survive the drops and keep forwarding normally.
    let b = connect_participant(&cmd_tx, &outbound).await;
    cmd_tx
        .send(RouterCommand::Signal {
            from: b,
            to: a,
            payload: json!("later"),
        })
        .await
        .expect("router channel closed");

    assert!(outbound.wait_for_deliveries(3, 2000).await);
    assert_eq!(outbound.offers_for(&a).await, vec![(b, json!("later"))]);

    // Both drops were silent: nothing was ever delivered for the ghost id.
    assert!(outbound.offers_for(&ghost).await.is_empty());
    assert!(outbound.answers_for(&ghost).await.is_empty());
}
