//! Hardware capability tables and configuration validation
//!
//! A driver describes what its chip can do with a [`Capabilities`] value.
//! Bring-up checks a [`RadioConfig`] against it before any register is
//! written. Nothing here clamps or rounds: a value outside the hardware
//! domain is an error.

use core::fmt;
use core::ops::RangeInclusive;

use crate::config::radio::{NodeIdError, RadioConfig, CODING_RATES_4};
use crate::config::region::Region;

/// Inclusive carrier frequency range in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyRange {
    /// Lowest carrier frequency in Hz
    pub min: u32,
    /// Highest carrier frequency in Hz
    pub max: u32,
}

impl FrequencyRange {
    /// Create a range from MHz bounds
    pub const fn mhz(min: u32, max: u32) -> Self {
        Self {
            min: min * 1_000_000,
            max: max * 1_000_000,
        }
    }

    /// Whether `freq` lies inside the range
    pub const fn contains(&self, freq: u32) -> bool {
        freq >= self.min && freq <= self.max
    }
}

/// Bandwidth ceiling that applies inside one frequency range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRestriction {
    /// Frequencies the restriction applies to
    pub range: FrequencyRange,
    /// Widest usable bandwidth in Hz
    pub max_bandwidth: u32,
}

/// What a transceiver accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Supported carrier frequency bands
    pub bands: &'static [FrequencyRange],
    /// Output power range in dBm for the selected amplifier
    pub tx_power: RangeInclusive<i8>,
    /// Supported spreading factors
    pub spreading_factors: RangeInclusive<u8>,
    /// Supported discrete bandwidths in Hz
    pub bandwidths: &'static [u32],
    /// Band-specific bandwidth limits
    pub restrictions: &'static [BandRestriction],
}

/// A configuration value the radio cannot use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Carrier frequency outside every hardware band
    Band(u32),
    /// Output power outside the amplifier range
    TxPower(i8),
    /// Spreading factor not supported
    SpreadingFactor(u8),
    /// Bandwidth is not one of the discrete supported values
    Bandwidth(u32),
    /// Bandwidth not available at this carrier frequency
    BandwidthInBand {
        /// Requested bandwidth in Hz
        bandwidth: u32,
        /// Carrier frequency in Hz
        band: u32,
    },
    /// Coding rate denominator outside 5..=8
    CodingRate(u8),
    /// Node identifier unusable
    NodeId(NodeIdError),
    /// Carrier frequency outside the regional plan
    OutsideRegion {
        /// Carrier frequency in Hz
        band: u32,
        /// Plan that was checked
        region: Region,
    },
    /// Output power above the regional ceiling
    RegionalPower {
        /// Requested power in dBm
        power: i8,
        /// Regional ceiling in dBm
        max: i8,
        /// Plan that was checked
        region: Region,
    },
}

impl From<NodeIdError> for ConfigError {
    fn from(error: NodeIdError) -> Self {
        ConfigError::NodeId(error)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Band(freq) => write!(f, "unsupported band {} Hz", freq),
            ConfigError::TxPower(p) => write!(f, "unsupported tx power {} dBm", p),
            ConfigError::SpreadingFactor(sf) => write!(f, "unsupported spreading factor {}", sf),
            ConfigError::Bandwidth(bw) => write!(f, "unsupported bandwidth {} Hz", bw),
            ConfigError::BandwidthInBand { bandwidth, band } => {
                write!(f, "bandwidth {} Hz unavailable at {} Hz", bandwidth, band)
            }
            ConfigError::CodingRate(cr) => write!(f, "unsupported coding rate 4/{}", cr),
            ConfigError::NodeId(e) => write!(f, "{}", e),
            ConfigError::OutsideRegion { band, region } => {
                write!(f, "{} Hz outside {} plan", band, region)
            }
            ConfigError::RegionalPower { power, max, region } => {
                write!(f, "{} dBm above {} limit of {} dBm", power, region, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl Capabilities {
    /// Check a carrier frequency
    pub fn check_band(&self, freq: u32) -> Result<(), ConfigError> {
        if self.bands.iter().any(|b| b.contains(freq)) {
            Ok(())
        } else {
            Err(ConfigError::Band(freq))
        }
    }

    /// Check an output power
    pub fn check_tx_power(&self, power: i8) -> Result<(), ConfigError> {
        if self.tx_power.contains(&power) {
            Ok(())
        } else {
            Err(ConfigError::TxPower(power))
        }
    }

    /// Check a spreading factor
    pub fn check_spreading_factor(&self, sf: u8) -> Result<(), ConfigError> {
        if self.spreading_factors.contains(&sf) {
            Ok(())
        } else {
            Err(ConfigError::SpreadingFactor(sf))
        }
    }

    /// Check a bandwidth is one of the discrete supported values
    pub fn check_bandwidth(&self, bw: u32) -> Result<(), ConfigError> {
        if self.bandwidths.contains(&bw) {
            Ok(())
        } else {
            Err(ConfigError::Bandwidth(bw))
        }
    }

    /// Check a coding rate denominator
    pub fn check_coding_rate(&self, cr: u8) -> Result<(), ConfigError> {
        if CODING_RATES_4.contains(&cr) {
            Ok(())
        } else {
            Err(ConfigError::CodingRate(cr))
        }
    }

    /// Check the band/bandwidth combination
    pub fn check_combination(&self, freq: u32, bw: u32) -> Result<(), ConfigError> {
        let blocked = self
            .restrictions
            .iter()
            .any(|r| r.range.contains(freq) && bw > r.max_bandwidth);
        if blocked {
            Err(ConfigError::BandwidthInBand {
                bandwidth: bw,
                band: freq,
            })
        } else {
            Ok(())
        }
    }

    /// Check every radio parameter of `config`, returning the first violation
    pub fn check(&self, config: &RadioConfig) -> Result<(), ConfigError> {
        self.check_band(config.band)?;
        self.check_tx_power(config.tx_power)?;
        self.check_spreading_factor(config.spreading_factor)?;
        self.check_bandwidth(config.signal_bandwidth)?;
        self.check_coding_rate(config.coding_rate_4)?;
        self.check_combination(config.band, config.signal_bandwidth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::radio::SIGNAL_BANDWIDTHS;

    const TEST_CAPS: Capabilities = Capabilities {
        bands: &[FrequencyRange::mhz(137, 175), FrequencyRange::mhz(410, 525)],
        tx_power: 2..=20,
        spreading_factors: 6..=12,
        bandwidths: &SIGNAL_BANDWIDTHS,
        restrictions: &[BandRestriction {
            range: FrequencyRange::mhz(137, 175),
            max_bandwidth: 125_000,
        }],
    };

    #[test]
    fn band_edges_are_inclusive() {
        assert!(TEST_CAPS.check_band(410_000_000).is_ok());
        assert!(TEST_CAPS.check_band(525_000_000).is_ok());
        assert_eq!(TEST_CAPS.check_band(525_000_001), Err(ConfigError::Band(525_000_001)));
        assert_eq!(TEST_CAPS.check_band(300_000_000), Err(ConfigError::Band(300_000_000)));
    }

    #[test]
    fn bandwidth_is_not_rounded() {
        assert!(TEST_CAPS.check_bandwidth(125_000).is_ok());
        assert_eq!(TEST_CAPS.check_bandwidth(100_000), Err(ConfigError::Bandwidth(100_000)));
    }

    #[test]
    fn wide_bandwidth_blocked_in_low_band() {
        assert!(TEST_CAPS.check_combination(169_000_000, 125_000).is_ok());
        assert_eq!(
            TEST_CAPS.check_combination(169_000_000, 250_000),
            Err(ConfigError::BandwidthInBand {
                bandwidth: 250_000,
                band: 169_000_000
            })
        );
        assert!(TEST_CAPS.check_combination(433_000_000, 500_000).is_ok());
    }
}
