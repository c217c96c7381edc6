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

//! Wearbridge: companion-side message relay between a mobile app frontend
//! and a paired wearable device.
//!
//! The bridge subscribes to data-item change events from the platform's
//! synchronization layer, caches the latest message from the paired device,
//! and forwards outbound messages to all connected peer nodes.

pub mod bridge;
pub mod channel;
pub mod config;
pub mod datalayer;
pub mod role;
pub mod state;

pub use bridge::BridgeHandler;
pub use channel::MethodChannelHandler;
pub use state::BridgeState;
