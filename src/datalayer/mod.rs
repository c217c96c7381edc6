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

//! Data synchronization layer.
//!
//! Items, change events, and the client seams the relay talks through.

mod client;
mod event;
mod item;
mod memory;

pub use client::{DataClient, Node, NodeClient};
pub use event::{DataEvent, DataEventKind};
pub use item::{DataItem, DataMap, PutDataRequest, KEY_MESSAGE, SYNC_PATH};
pub use memory::MemoryDataLayer;
