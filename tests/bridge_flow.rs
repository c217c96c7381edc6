//! Integration tests for the full relay flow.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use wearbridge::bridge::BridgeHandler;
use wearbridge::channel::{
    MethodCall, MethodChannelHandler, MethodResponse, METHOD_GET_DATA, METHOD_SEND_MESSAGE,
};
use wearbridge::datalayer::{
    DataClient, DataEvent, DataItem, DataMap, MemoryDataLayer, PutDataRequest, KEY_MESSAGE,
    SYNC_PATH,
};
use wearbridge::role::DeviceRole;
use wearbridge::state::BridgeState;

struct Relay {
    handler: MethodChannelHandler,
    bridge: Arc<BridgeHandler>,
    local: MemoryDataLayer,
    peer: MemoryDataLayer,
}

fn relay_with_role(role: DeviceRole) -> Relay {
    let (local, peer) = MemoryDataLayer::pair(16);
    let layer = Arc::new(local.clone());
    let bridge = Arc::new(BridgeHandler::new(BridgeState::new(), layer.clone(), layer));
    let handler = MethodChannelHandler::new(bridge.clone(), role);
    Relay {
        handler,
        bridge,
        local,
        peer,
    }
}

fn message_item(text: &str) -> DataItem {
    let mut map = DataMap::new();
    map.put_string(KEY_MESSAGE, text);
    DataItem::new(SYNC_PATH, map)
}

async fn wait_for_cached(bridge: &BridgeHandler) -> Option<String> {
    for _ in 0..100 {
        if let Some(message) = bridge.fetch_message() {
            return Some(message);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    None
}

#[tokio::test]
async fn phone_send_reaches_peer_with_exact_text() {
    let relay = relay_with_role(DeviceRole::Phone);
    let mut peer_events = relay.peer.subscribe();

    let response = relay.handler.handle(
        MethodCall::new(METHOD_SEND_MESSAGE).with_args(json!({ "message": "hello watch" })),
    );
    assert_eq!(response, MethodResponse::success(Value::Null));

    let batch = peer_events.recv().await.unwrap();
    assert_eq!(batch[0].item.path, "/count");
    assert_eq!(batch[0].item.map.get(KEY_MESSAGE), Some("hello watch"));
}

#[tokio::test]
async fn empty_string_is_sent_verbatim() {
    let relay = relay_with_role(DeviceRole::Phone);
    let mut peer_events = relay.peer.subscribe();

    let response = relay
        .handler
        .handle(MethodCall::new(METHOD_SEND_MESSAGE).with_args(json!({ "message": "" })));
    assert_eq!(response, MethodResponse::success(Value::Null));

    let batch = peer_events.recv().await.unwrap();
    assert_eq!(batch[0].item.map.get(KEY_MESSAGE), Some(""));
}

#[tokio::test]
async fn get_data_before_any_event_returns_fixed_error_triple() {
    let relay = relay_with_role(DeviceRole::Phone);

    let response = relay.handler.handle(MethodCall::new(METHOD_GET_DATA));
    assert_eq!(
        response,
        MethodResponse::Error {
            code: "null data for now1".to_string(),
            message: "null data for now2".to_string(),
            details: "null data for now3".to_string(),
        }
    );
}

#[tokio::test]
async fn get_data_returns_message_received_from_peer() {
    let relay = relay_with_role(DeviceRole::Phone);
    let listener = relay.bridge.spawn_listener();

    relay
        .peer
        .put_data_item(PutDataRequest::create(SYNC_PATH).put_string(KEY_MESSAGE, "X"))
        .await
        .unwrap();

    assert_eq!(wait_for_cached(&relay.bridge).await.as_deref(), Some("X"));

    let response = relay.handler.handle(MethodCall::new(METHOD_GET_DATA));
    assert_eq!(response, MethodResponse::success(json!("X")));
    listener.abort();
}

#[tokio::test]
async fn first_changed_event_in_a_batch_wins() {
    let relay = relay_with_role(DeviceRole::Phone);
    let listener = relay.bridge.spawn_listener();

    relay
        .local
        .deliver_batch(vec![
            DataEvent::changed(message_item("first")),
            DataEvent::changed(message_item("second")),
        ])
        .await;

    assert_eq!(
        wait_for_cached(&relay.bridge).await.as_deref(),
        Some("first")
    );
    listener.abort();
}

#[tokio::test]
async fn deleted_event_before_changed_is_skipped() {
    let relay = relay_with_role(DeviceRole::Phone);
    let listener = relay.bridge.spawn_listener();

    relay
        .local
        .deliver_batch(vec![
            DataEvent::deleted(message_item("stale")),
            DataEvent::changed(message_item("fresh")),
        ])
        .await;

    assert_eq!(
        wait_for_cached(&relay.bridge).await.as_deref(),
        Some("fresh")
    );
    listener.abort();
}

#[tokio::test]
async fn send_message_from_non_phone_is_not_implemented() {
    for role in [DeviceRole::Watch, DeviceRole::Unknown] {
        let relay = relay_with_role(role);

        let response = relay.handler.handle(
            MethodCall::new(METHOD_SEND_MESSAGE).with_args(json!({ "message": "anything" })),
        );
        assert_eq!(response, MethodResponse::NotImplemented);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(relay.local.submitted_items().is_empty());
    }
}

#[tokio::test]
async fn unknown_method_is_not_implemented() {
    let relay = relay_with_role(DeviceRole::Phone);

    for call in [
        MethodCall::new("getBatteryLevel"),
        MethodCall::new("sendUsername").with_args(json!({ "message": "legacy" })),
        MethodCall::new("").with_args(json!({ "whatever": true })),
    ] {
        assert_eq!(relay.handler.handle(call), MethodResponse::NotImplemented);
    }
}

#[tokio::test]
async fn node_resolution_failure_is_invisible_to_the_caller() {
    let relay = relay_with_role(DeviceRole::Phone);
    relay.local.fail_node_resolution(true);

    let response = relay
        .handler
        .handle(MethodCall::new(METHOD_SEND_MESSAGE).with_args(json!({ "message": "dropped" })));
    // Submission is reported as accepted even though the send never happens
    assert_eq!(response, MethodResponse::success(Value::Null));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(relay.local.submitted_items().is_empty());
}

#[tokio::test]
async fn round_trip_through_an_echoing_peer() {
    let relay = relay_with_role(DeviceRole::Phone);
    let listener = relay.bridge.spawn_listener();

    // Peer echoes everything it receives back to the sender
    let mut peer_events = relay.peer.subscribe();
    let echo = relay.peer.clone();
    tokio::spawn(async move {
        while let Some(batch) = peer_events.recv().await {
            for event in batch {
                if let Some(message) = event.item.map.get(KEY_MESSAGE) {
                    let request =
                        PutDataRequest::create(SYNC_PATH).put_string(KEY_MESSAGE, message);
                    let _ = echo.put_data_item(request).await;
                }
            }
        }
    });

    relay.handler.handle(
        MethodCall::new(METHOD_SEND_MESSAGE).with_args(json!({ "message": "ping" })),
    );

    assert_eq!(
        wait_for_cached(&relay.bridge).await.as_deref(),
        Some("ping")
    );
    let response = relay.handler.handle(MethodCall::new(METHOD_GET_DATA));
    assert_eq!(response, MethodResponse::success(json!("ping")));
    listener.abort();
}
