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

//! Configuration module.
//!
//! Handles loading and saving application settings.

use anyhow::Result;
use gethostname::gethostname;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::datalayer::SYNC_PATH;
use crate::role::FEATURE_TELEPHONY;

/// Get a sanitized hostname suitable as a node display name.
/// Display names should only contain alphanumeric chars, spaces, and hyphens.
fn get_sanitized_hostname() -> String {
    let hostname = gethostname().to_string_lossy().to_string();
    let sanitized: String = hostname
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == ' ' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = sanitized.trim_matches('-');
    if trimmed.is_empty() {
        "Companion".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Method channel settings.
    pub channel: ChannelConfig,

    /// Data synchronization settings.
    pub sync: SyncConfig,

    /// Device identity settings.
    pub device: DeviceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Name of the application-facing method channel.
    pub name: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: "com.wearbridge.watch".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Path under which outbound data items are published.
    pub path: String,

    /// Capacity of the change-event subscription channel.
    pub event_buffer: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            path: SYNC_PATH.to_string(),
            event_buffer: 32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Role preference: "auto", "phone", or "watch".
    ///
    /// "auto" falls back to probing the capability set below.
    pub role: String,

    /// Hardware capability features exposed by the host device.
    pub features: Vec<String>,

    /// Display name reported for the local node.
    /// This is always computed at runtime from the system hostname.
    #[serde(skip)]
    pub display_name: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            role: "auto".to_string(),
            features: vec![FEATURE_TELEPHONY.to_string()],
            display_name: get_sanitized_hostname(),
        }
    }
}

impl Config {
    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("wearbridge");

        std::fs::create_dir_all(&config_dir)?;

        Self::load_from(&config_dir.join("config.toml"))
    }

    /// Load configuration from a specific path, writing defaults if absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)?
        } else {
            let config = Self::default();
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(config_path, content)?;
            config
        };

        // display_name is never persisted
        config.device.display_name = get_sanitized_hostname();

        Ok(config)
    }

    /// Save configuration to file.
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("wearbridge");

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.channel.name, "com.wearbridge.watch");
        assert_eq!(config.sync.path, "/count");
        assert_eq!(config.sync.event_buffer, 32);
        assert_eq!(config.device.role, "auto");
        assert!(config
            .device
            .features
            .iter()
            .any(|f| f == FEATURE_TELEPHONY));
    }

    #[test]
    fn test_load_from_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.sync.path, "/count");

        // Second load reads the file that was just written
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.channel.name, config.channel.name);
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[device]\nrole = \"watch\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.device.role, "watch");
        // Unspecified sections fall back to defaults
        assert_eq!(config.sync.path, "/count");
    }

    #[test]
    fn test_sanitized_hostname() {
        let name = get_sanitized_hostname();
        assert!(!name.is_empty());
        assert!(name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == ' '));
    }
}
