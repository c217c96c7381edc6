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

//! Data item definitions.
//!
//! A data item is a key-value record synchronized by the host platform
//! between paired devices. The platform owns the wire encoding; these types
//! model the slice of the item abstraction the relay actually touches.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path under which relay messages are synchronized.
pub const SYNC_PATH: &str = "/count";

/// Map key carrying the relayed message text.
pub const KEY_MESSAGE: &str = "message";

/// String-keyed map of string values carried by a data item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataMap {
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

impl DataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a string value under the given key.
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get the value stored under the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A key-value record addressed by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataItem {
    /// Synchronization path, e.g. "/count".
    pub path: String,

    /// Key-value payload.
    pub map: DataMap,
}

impl DataItem {
    pub fn new(path: impl Into<String>, map: DataMap) -> Self {
        Self {
            path: path.into(),
            map,
        }
    }
}

/// Builder for an outbound data item.
///
/// Mirrors the platform's construct-then-submit flow: create a request for a
/// path, fill the map, hand it to the data client. The record is ephemeral
/// and not retained after submission.
#[derive(Debug, Clone)]
pub struct PutDataRequest {
    item: DataItem,
}

impl PutDataRequest {
    /// Start a request for the given synchronization path.
    pub fn create(path: impl Into<String>) -> Self {
        Self {
            item: DataItem::new(path, DataMap::new()),
        }
    }

    /// Add a string field to the request.
    pub fn put_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.item.map.put_string(key, value);
        self
    }

    pub fn path(&self) -> &str {
        &self.item.path
    }

    /// Consume the request, yielding the item to synchronize.
    pub fn into_item(self) -> DataItem {
        self.item
    }
}
