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

//! Data change events.
//!
//! The platform delivers item changes in batches on its own executor; a batch
//! may mix changed and deleted items for different paths.

use serde::{Deserialize, Serialize};

use super::item::DataItem;

/// Kind of change reported for a data item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataEventKind {
    #[serde(rename = "CHANGED")]
    Changed,
    #[serde(rename = "DELETED")]
    Deleted,
}

/// A single change event for one data item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEvent {
    pub kind: DataEventKind,
    pub item: DataItem,
}

impl DataEvent {
    pub fn changed(item: DataItem) -> Self {
        Self {
            kind: DataEventKind::Changed,
            item,
        }
    }

    pub fn deleted(item: DataItem) -> Self {
        Self {
            kind: DataEventKind::Deleted,
            item,
        }
    }
}
