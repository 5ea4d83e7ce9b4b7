use std::path::Path;

use anyhow::Context;
use nijie_core::LinkConfig;

#[derive(Clone, Debug, Default, serde_derive::Deserialize, PartialEq)]
pub struct Config {
    /// Arm link geometry.
    #[serde(default)]
    pub arm: LinkConfig,
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arm: {}", self.arm)
    }
}

/// Read and deserialize a TOML configuration file.
pub fn from_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse configuration {}", path.display()))
}
