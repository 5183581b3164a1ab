use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::slot::UploadSlot;
use crate::validator::{DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_FILE_SIZE, PolicyTable, ValidationPolicy};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

fn default_base_url() -> String {
    "http://localhost:5000".into()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_file_size_bytes() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_types() -> Vec<String> {
    DEFAULT_ALLOWED_TYPES.iter().map(|t| (*t).to_owned()).collect()
}

/// Extraction service endpoint. A timeout of `0` disables it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
    /// Explicit per-slot overrides keyed by wire name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<String, SlotPolicyOverride>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size_bytes(),
            allowed_types: default_allowed_types(),
            slots: BTreeMap::new(),
        }
    }
}

/// Fields left out fall back to the shared `[upload]` values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlotPolicyOverride {
    pub max_file_size_bytes: Option<u64>,
    pub allowed_types: Option<Vec<String>>,
}

impl UploadConfig {
    #[must_use]
    pub fn policy_table(&self) -> PolicyTable {
        let shared = ValidationPolicy {
            max_size_bytes: self.max_file_size_bytes,
            allowed_types: self.allowed_types.clone(),
        };
        self.slots
            .iter()
            .filter_map(|(name, o)| Some((name.parse::<UploadSlot>().ok()?, o)))
            .fold(PolicyTable::uniform(shared.clone()), |table, (slot, o)| {
                table.with_override(
                    slot,
                    ValidationPolicy {
                        max_size_bytes: o.max_file_size_bytes.unwrap_or(shared.max_size_bytes),
                        allowed_types: o
                            .allowed_types
                            .clone()
                            .unwrap_or_else(|| shared.allowed_types.clone()),
                    },
                )
            })
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error for an unusable base URL or an upload policy that can
    /// never accept a file.
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = url::Url::parse(&self.api.base_url)
            .with_context(|| format!("invalid api.base_url: {}", self.api.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api.base_url must use http or https, got {}", url.scheme());
        }
        for name in self.upload.slots.keys() {
            name.parse::<UploadSlot>()
                .with_context(|| format!("invalid [upload.slots.{name}] section"))?;
        }
        let table = self.upload.policy_table();
        for slot in UploadSlot::ALL {
            let policy = table.policy(slot);
            if policy.max_size_bytes == 0 {
                bail!("max_file_size_bytes for {slot} must be greater than zero");
            }
            if policy.allowed_types.is_empty() {
                bail!("allowed_types for {slot} must not be empty");
            }
        }
        Ok(())
    }

    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("INTAKE_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = std::env::var("INTAKE_REQUEST_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => tracing::warn!("ignoring invalid INTAKE_REQUEST_TIMEOUT_SECS value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("INTAKE_CONNECT_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) => self.api.connect_timeout_secs = secs,
                Err(_) => tracing::warn!("ignoring invalid INTAKE_CONNECT_TIMEOUT_SECS value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("INTAKE_MAX_FILE_SIZE_BYTES") {
            match v.parse::<u64>() {
                Ok(bytes) => self.upload.max_file_size_bytes = bytes,
                Err(_) => tracing::warn!("ignoring invalid INTAKE_MAX_FILE_SIZE_BYTES value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("INTAKE_ALLOWED_TYPES") {
            self.upload.allowed_types = v
                .split(',')
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }
}
