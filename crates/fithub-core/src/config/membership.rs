//! Membership lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Membership lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipConfig {
    /// How often the background sweeper expires or auto-renews memberships.
    /// `0` disables the sweeper.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Longest single freeze a member may request.
    #[serde(default = "default_max_freeze_days")]
    pub max_freeze_days: u32,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: default_sweep_interval(),
            max_freeze_days: default_max_freeze_days(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    3600
}

fn default_max_freeze_days() -> u32 {
    90
}
