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

//! Device role classification.
//!
//! The host platform reports hardware capabilities as feature strings; the
//! presence of a telephony feature is used as a heuristic for "this is the
//! phone, not the watch". Devices without telephony hardware will be
//! misclassified, so the probe sits behind a trait and can be overridden
//! through configuration.

use std::collections::HashSet;
use tracing::info;

use crate::config::DeviceConfig;

/// Telephony hardware feature. Watches usually don't have it.
pub const FEATURE_TELEPHONY: &str = "android.hardware.telephony";

/// Wearable device feature.
pub const FEATURE_WATCH: &str = "android.hardware.type.watch";

/// Trait for probing host hardware capabilities.
pub trait DeviceCapabilities: Send + Sync {
    /// Whether the host device exposes the given hardware feature.
    fn has_feature(&self, feature: &str) -> bool;
}

/// Capability set built from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilities {
    features: HashSet<String>,
}

impl StaticCapabilities {
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &DeviceConfig) -> Self {
        Self::new(config.features.iter().cloned())
    }
}

impl DeviceCapabilities for StaticCapabilities {
    fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

/// Whether the host device is classified as a phone.
pub fn is_phone(probe: &dyn DeviceCapabilities) -> bool {
    probe.has_feature(FEATURE_TELEPHONY)
}

/// Whether the host device is classified as a watch.
pub fn is_watch(probe: &dyn DeviceCapabilities) -> bool {
    probe.has_feature(FEATURE_WATCH)
}

/// Classified device role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRole {
    Phone,
    Watch,
    Unknown,
}

impl DeviceRole {
    /// Classify the host device from its capability set.
    pub fn detect(probe: &dyn DeviceCapabilities) -> Self {
        if is_phone(probe) {
            DeviceRole::Phone
        } else if is_watch(probe) {
            DeviceRole::Watch
        } else {
            DeviceRole::Unknown
        }
    }

    /// Resolve the role from a preference string.
    ///
    /// - "phone": force phone role
    /// - "watch": force watch role
    /// - "auto" (or anything else): probe the capability set
    pub fn resolve(preference: &str, probe: &dyn DeviceCapabilities) -> Self {
        let role = match preference.to_lowercase().as_str() {
            "phone" => DeviceRole::Phone,
            "watch" => DeviceRole::Watch,
            _ => Self::detect(probe),
        };
        info!("Device role: {:?} (preference: {})", role, preference);
        role
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, DeviceRole::Phone)
    }
}
