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

//! Bridge state management.

use parking_lot::RwLock;
use std::sync::Arc;

/// Shared bridge state.
///
/// Holds the most recent value observed from the paired device. The value is
/// process-lifetime scoped and never persisted. `None` means no message has
/// been received yet; a received empty string is stored as `Some("")`.
#[derive(Debug, Default)]
pub struct BridgeState {
    /// Last message received from the paired device.
    cached_message: RwLock<Option<String>>,
}

impl BridgeState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Overwrite the cached message with a newly received value.
    pub fn set_message(&self, message: String) {
        *self.cached_message.write() = Some(message);
    }

    /// Get the cached message, if any was ever received.
    pub fn message(&self) -> Option<String> {
        self.cached_message.read().clone()
    }
}
