// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wearbridge companion relay.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wearbridge::bridge::BridgeHandler;
use wearbridge::channel::{self, MethodChannelHandler};
use wearbridge::config::Config;
use wearbridge::datalayer::{
    DataClient, DataEventKind, MemoryDataLayer, PutDataRequest, KEY_MESSAGE,
};
use wearbridge::role::{DeviceRole, StaticCapabilities};
use wearbridge::state::BridgeState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wearbridge=info".parse().unwrap()),
        )
        .init();

    info!("Starting Wearbridge v{}...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded");
    info!("Method channel: {}", config.channel.name);

    // Loopback data layer: stands in for the host transport so the relay can
    // be driven end to end from a terminal.
    let (local, remote) = MemoryDataLayer::pair(config.sync.event_buffer);
    let local = Arc::new(local);
    let remote = Arc::new(remote);
    info!(
        "Loopback data layer paired, local node: {}",
        local.local_node().display_name
    );

    // Create bridge and register the change listener
    let state = BridgeState::new();
    let bridge = Arc::new(
        BridgeHandler::new(state, local.clone(), local.clone())
            .with_sync_path(&config.sync.path),
    );
    let listener = bridge.spawn_listener();

    // Classify the host device
    let capabilities = StaticCapabilities::from_config(&config.device);
    let role = DeviceRole::resolve(&config.device.role, &capabilities);

    let handler = Arc::new(MethodChannelHandler::new(bridge, role));

    // The remote endpoint echoes received messages back, so a local run
    // exercises both directions of the relay.
    let mut remote_events = remote.subscribe();
    let echo = remote.clone();
    let echo_path = config.sync.path.clone();
    tokio::spawn(async move {
        while let Some(batch) = remote_events.recv().await {
            for event in batch {
                if event.kind != DataEventKind::Changed {
                    continue;
                }
                if let Some(message) = event.item.map.get(KEY_MESSAGE) {
                    let request =
                        PutDataRequest::create(&echo_path).put_string(KEY_MESSAGE, message);
                    if let Err(e) = echo.put_data_item(request).await {
                        warn!("Echo submission failed: {}", e);
                    }
                }
            }
        }
    });

    info!("Ready. Reading method calls from stdin.");

    tokio::select! {
        result = channel::run_stdio(handler) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
    }

    listener.abort();
    Ok(())
}
