use core::fmt;

use super::radio::RadioConfig;
use crate::radio::caps::{ConfigError, FrequencyRange};

/// Frequency range and conducted power ceiling of a regional plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionPlan {
    /// Permitted carrier frequencies
    pub range: FrequencyRange,
    /// Highest conducted output power in dBm
    pub max_tx_power: i8,
}

/// Regional spectrum plan
///
/// Figures follow the LoRaWAN regional parameter summaries. Local regulation
/// is authoritative and may be stricter, e.g. sub-band duty cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    /// Europe 433 MHz ISM
    EU433,
    /// Europe 863-870 MHz
    EU868,
    /// North America 902-928 MHz
    US915,
    /// Australia 915-928 MHz
    AU915,
    /// Asia 915-928 MHz
    AS923,
    /// South Korea 920.9-923.3 MHz
    KR920,
    /// India 865-867 MHz
    IN865,
    /// China 470-510 MHz
    CN470,
}

impl Region {
    /// Plan for this region
    pub const fn plan(&self) -> RegionPlan {
        let (min, max, max_tx_power) = match self {
            Region::EU433 => (433_050_000, 434_790_000, 12),
            Region::EU868 => (863_000_000, 870_000_000, 14),
            Region::US915 => (902_000_000, 928_000_000, 30),
            Region::AU915 => (915_000_000, 928_000_000, 30),
            Region::AS923 => (915_000_000, 928_000_000, 16),
            Region::KR920 => (920_900_000, 923_300_000, 14),
            Region::IN865 => (865_000_000, 867_000_000, 30),
            Region::CN470 => (470_000_000, 510_000_000, 19),
        };
        RegionPlan {
            range: FrequencyRange { min, max },
            max_tx_power,
        }
    }

    /// Check carrier frequency and power against the plan
    pub fn check(&self, config: &RadioConfig) -> Result<(), ConfigError> {
        let plan = self.plan();
        if !plan.range.contains(config.band) {
            return Err(ConfigError::OutsideRegion {
                band: config.band,
                region: *self,
            });
        }
        if config.tx_power > plan.max_tx_power {
            return Err(ConfigError::RegionalPower {
                power: config.tx_power,
                max: plan.max_tx_power,
                region: *self,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::EU433 => "EU433",
            Region::EU868 => "EU868",
            Region::US915 => "US915",
            Region::AU915 => "AU915",
            Region::AS923 => "AS923",
            Region::KR920 => "KR920",
            Region::IN865 => "IN865",
            Region::CN470 => "CN470",
        };
        f.write_str(name)
    }
}
