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

//! The bridge handler.
//!
//! Listens for data-item changes from the paired device, caches the most
//! recent message, and forwards outbound messages through the data layer.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::datalayer::{DataClient, DataEvent, DataEventKind, NodeClient, PutDataRequest, KEY_MESSAGE, SYNC_PATH};
use crate::state::BridgeState;

/// Relay between the application layer and the paired device.
pub struct BridgeHandler {
    state: Arc<BridgeState>,
    data: Arc<dyn DataClient>,
    nodes: Arc<dyn NodeClient>,
    sync_path: String,
}

impl BridgeHandler {
    pub fn new(
        state: Arc<BridgeState>,
        data: Arc<dyn DataClient>,
        nodes: Arc<dyn NodeClient>,
    ) -> Self {
        Self {
            state,
            data,
            nodes,
            sync_path: SYNC_PATH.to_string(),
        }
    }

    /// Override the synchronization path for outbound items.
    pub fn with_sync_path(mut self, path: impl Into<String>) -> Self {
        self.sync_path = path.into();
        self
    }

    /// Subscribe to the data layer and spawn the listener task.
    ///
    /// The task runs for the lifetime of the subscription and mutates the
    /// cached message as batches arrive; there is no completion to await.
    pub fn spawn_listener(&self) -> JoinHandle<()> {
        let mut events = self.data.subscribe();
        let state = self.state.clone();
        info!("Data change listener registered");

        tokio::spawn(async move {
            while let Some(batch) = events.recv().await {
                Self::apply_batch(&state, &batch);
            }
            debug!("Data change stream closed");
        })
    }

    /// Apply one change-event batch to the cached message.
    ///
    /// Only the first `Changed` event in the batch is consulted; scanning
    /// stops there even when later events in the same batch also carry a
    /// message. Deleted events are skipped and never touch the cache.
    fn apply_batch(state: &BridgeState, batch: &[DataEvent]) {
        for event in batch {
            if event.kind != DataEventKind::Changed {
                continue;
            }
            if let Some(message) = event.item.map.get(KEY_MESSAGE) {
                debug!("Cached message updated from {}", event.item.path);
                state.set_message(message.to_string());
            }
            break;
        }
    }

    /// Forward a message to the paired device.
    ///
    /// Returns as soon as the send is handed off: connected nodes are
    /// resolved on a spawned task and the item is submitted on success.
    /// Resolution failure drops the message without surfacing an error to
    /// the caller, and delivery is never confirmed.
    pub fn send_message(&self, text: String) {
        let nodes = self.nodes.clone();
        let data = self.data.clone();
        let path = self.sync_path.clone();

        tokio::spawn(async move {
            let resolved = match nodes.connected_nodes().await {
                Ok(resolved) => resolved,
                Err(e) => {
                    debug!("Node resolution failed, dropping outbound message: {}", e);
                    return;
                }
            };
            debug!("Resolved {} connected node(s)", resolved.len());

            let request = PutDataRequest::create(&path).put_string(KEY_MESSAGE, text);
            if let Err(e) = data.put_data_item(request).await {
                warn!("Failed to submit data item: {}", e);
            }
        });
    }

    /// Fetch the last message received from the paired device.
    ///
    /// `None` means no message has arrived since the process started.
    pub fn fetch_message(&self) -> Option<String> {
        self.state.message()
    }
}
