use serde::Deserialize;

use crate::{consts, ElbowConfig};

/// Link geometry of the arm.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Proximal link length (L1) in meters.
    pub proximal_length: f64,
    /// Distal link length (L2) in meters.
    pub distal_length: f64,
    /// Preferred elbow configuration.
    pub elbow: ElbowConfig,
}

impl LinkConfig {
    /// Check that both link lengths are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.proximal_length, self.distal_length]
            .iter()
            .all(|length| length.is_finite() && *length > 0.0)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            proximal_length: consts::DEFAULT_PROXIMAL_LENGTH,
            distal_length: consts::DEFAULT_DISTAL_LENGTH,
            elbow: ElbowConfig::default(),
        }
    }
}

impl std::fmt::Display for LinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "L1: {:.3}m L2: {:.3}m ({})",
            self.proximal_length, self.distal_length, self.elbow
        )
    }
}
