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

//! Client traits for the host data-synchronization layer.
//!
//! The transport itself (delivery, retry, conflict resolution) is owned by
//! the platform; the relay only sees these two seams.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::event::DataEvent;
use super::item::PutDataRequest;

/// A connected peer device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Platform-level identifier.
    pub id: String,

    /// Human-readable device name.
    pub display_name: String,

    /// Whether the node is directly connected rather than reachable via relay.
    pub nearby: bool,
}

impl Node {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            nearby: true,
        }
    }
}

/// Client for synchronizing data items with paired devices.
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Submit an item for synchronization to all connected peer nodes.
    ///
    /// Success means the submission was accepted, not that any peer received
    /// the item; delivery is entirely owned by the platform.
    async fn put_data_item(&self, request: PutDataRequest) -> Result<()>;

    /// Subscribe to change-event batches.
    ///
    /// The subscription lives as long as the returned receiver.
    fn subscribe(&self) -> mpsc::Receiver<Vec<DataEvent>>;
}

/// Client for resolving connected peer nodes.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Resolve the set of currently connected peer nodes.
    async fn connected_nodes(&self) -> Result<Vec<Node>>;
}
