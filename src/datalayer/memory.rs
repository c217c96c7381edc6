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

//! In-memory data layer.
//!
//! Two linked endpoints standing in for the host synchronization transport:
//! an item put on one side is delivered as a change-event batch to the other
//! side's subscribers. Used by the loopback run mode and by tests; the real
//! transport is host-owned and out of scope.

use anyhow::{bail, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use super::client::{DataClient, Node, NodeClient};
use super::event::DataEvent;
use super::item::{DataItem, PutDataRequest};

struct Endpoint {
    id: String,
    display_name: String,
    event_buffer: usize,
    subscribers: Mutex<Vec<mpsc::Sender<Vec<DataEvent>>>>,
    submitted: Mutex<Vec<DataItem>>,
    nodes_override: Mutex<Option<Vec<Node>>>,
    fail_resolution: AtomicBool,
    peer: OnceLock<Weak<Endpoint>>,
}

impl Endpoint {
    fn new(display_name: &str, event_buffer: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            display_name: display_name.to_string(),
            event_buffer,
            subscribers: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            nodes_override: Mutex::new(None),
            fail_resolution: AtomicBool::new(false),
            peer: OnceLock::new(),
        }
    }

    fn node(&self) -> Node {
        Node::new(self.id.clone(), self.display_name.clone())
    }

    async fn deliver(&self, batch: Vec<DataEvent>) {
        let senders: Vec<_> = {
            let mut subscribers = self.subscribers.lock();
            subscribers.retain(|tx| !tx.is_closed());
            subscribers.clone()
        };
        for tx in senders {
            let _ = tx.send(batch.clone()).await;
        }
    }
}

/// One endpoint of an in-memory synchronization pair.
#[derive(Clone)]
pub struct MemoryDataLayer {
    endpoint: Arc<Endpoint>,
}

impl MemoryDataLayer {
    /// Create two linked endpoints.
    ///
    /// Items put on either side arrive as `Changed` batches at the other
    /// side, and each side resolves the other as its single connected node.
    pub fn pair(event_buffer: usize) -> (MemoryDataLayer, MemoryDataLayer) {
        let handset = Arc::new(Endpoint::new("handset", event_buffer));
        let wearable = Arc::new(Endpoint::new("wearable", event_buffer));

        // OnceLock::set cannot fail on freshly created endpoints
        let _ = handset.peer.set(Arc::downgrade(&wearable));
        let _ = wearable.peer.set(Arc::downgrade(&handset));

        (
            MemoryDataLayer { endpoint: handset },
            MemoryDataLayer { endpoint: wearable },
        )
    }

    /// Node descriptor for this endpoint.
    pub fn local_node(&self) -> Node {
        self.endpoint.node()
    }

    /// Items submitted through this endpoint, in submission order.
    pub fn submitted_items(&self) -> Vec<DataItem> {
        self.endpoint.submitted.lock().clone()
    }

    /// Replace the node list returned by `connected_nodes`.
    pub fn set_nodes(&self, nodes: Vec<Node>) {
        *self.endpoint.nodes_override.lock() = Some(nodes);
    }

    /// Make `connected_nodes` fail, simulating an unavailable resolver.
    pub fn fail_node_resolution(&self, fail: bool) {
        self.endpoint.fail_resolution.store(fail, Ordering::SeqCst);
    }

    /// Deliver an event batch directly to this endpoint's subscribers.
    ///
    /// Lets tests inject multi-event batches the put path never produces.
    pub async fn deliver_batch(&self, batch: Vec<DataEvent>) {
        self.endpoint.deliver(batch).await;
    }
}

#[async_trait]
impl DataClient for MemoryDataLayer {
    async fn put_data_item(&self, request: PutDataRequest) -> Result<()> {
        let item = request.into_item();
        debug!(
            "put data item at {} from {}",
            item.path, self.endpoint.display_name
        );
        self.endpoint.submitted.lock().push(item.clone());

        if let Some(peer) = self.endpoint.peer.get().and_then(Weak::upgrade) {
            peer.deliver(vec![DataEvent::changed(item)]).await;
        }
        Ok(())
    }

    fn subscribe(&self) -> mpsc::Receiver<Vec<DataEvent>> {
        let (tx, rx) = mpsc::channel(self.endpoint.event_buffer);
        self.endpoint.subscribers.lock().push(tx);
        rx
    }
}

#[async_trait]
impl NodeClient for MemoryDataLayer {
    async fn connected_nodes(&self) -> Result<Vec<Node>> {
        if self.endpoint.fail_resolution.load(Ordering::SeqCst) {
            bail!("node resolution unavailable");
        }
        if let Some(nodes) = self.endpoint.nodes_override.lock().clone() {
            return Ok(nodes);
        }
        Ok(self
            .endpoint
            .peer
            .get()
            .and_then(Weak::upgrade)
            .map(|peer| vec![peer.node()])
            .unwrap_or_default())
    }
}
