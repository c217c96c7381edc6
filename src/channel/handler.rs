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

//! Method call dispatch.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::method::{MethodCall, MethodResponse, ARG_MESSAGE, METHOD_GET_DATA, METHOD_SEND_MESSAGE};
use crate::bridge::BridgeHandler;
use crate::role::DeviceRole;

/// Dispatches application-layer calls onto the bridge.
pub struct MethodChannelHandler {
    bridge: Arc<BridgeHandler>,
    role: DeviceRole,
}

impl MethodChannelHandler {
    pub fn new(bridge: Arc<BridgeHandler>, role: DeviceRole) -> Self {
        Self { bridge, role }
    }

    /// Handle a single method call.
    ///
    /// `sendMessage` is only handled when the host is classified as a phone;
    /// from any other role it falls through to `NotImplemented`, as does any
    /// unknown method name. A missing or null message argument is forwarded
    /// as the empty string.
    pub fn handle(&self, call: MethodCall) -> MethodResponse {
        match call.method.as_str() {
            METHOD_SEND_MESSAGE if self.role.is_phone() => {
                let text = call.string_arg(ARG_MESSAGE).unwrap_or_default();
                self.bridge.send_message(text);
                MethodResponse::success(Value::Null)
            }
            METHOD_GET_DATA => match self.bridge.fetch_message() {
                Some(message) if !message.is_empty() => {
                    MethodResponse::success(Value::String(message))
                }
                // Never-received and received-empty both report no data
                _ => MethodResponse::no_data(),
            },
            other => {
                debug!("Method not handled: {}", other);
                MethodResponse::NotImplemented
            }
        }
    }
}
