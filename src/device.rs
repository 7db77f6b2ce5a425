//! Radio bring-up
//!
//! This module programs a [`RadioConfig`] into a [`Radio`] once at startup.
//! The whole record is validated against the radio's capabilities before
//! the first register write, so a rejected configuration leaves the
//! hardware untouched.

use core::fmt;

use crate::{
    config::{radio::RadioConfig, region::Region},
    radio::{caps::Capabilities, caps::ConfigError, traits::Radio},
};

/// Bring-up error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError<E> {
    /// Configuration rejected before touching the hardware
    Config(ConfigError),
    /// Radio driver error
    Radio(E),
}

impl<E> From<ConfigError> for DeviceError<E> {
    fn from(error: ConfigError) -> Self {
        DeviceError::Config(error)
    }
}

impl<E: fmt::Debug> fmt::Display for DeviceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Config(e) => write!(f, "configuration rejected: {}", e),
            DeviceError::Radio(e) => write!(f, "radio error: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for DeviceError<E> {}

/// Check node identity and every radio parameter
pub fn validate(config: &RadioConfig, caps: &Capabilities) -> Result<(), ConfigError> {
    config.node_id.check()?;
    caps.check(config)
}

/// Program `config` into `radio` and leave it in standby
pub fn bring_up<R: Radio>(radio: &mut R, config: &RadioConfig) -> Result<(), DeviceError<R::Error>> {
    if let Err(e) = validate(config, &radio.capabilities()) {
        error!("bring-up rejected: {}", e);
        return Err(e.into());
    }

    if config.uses_public_sync_word() {
        warn!("node {}: sync word 0x34 is shared with public networks", config.node_id);
    }

    radio.init().map_err(DeviceError::Radio)?;
    radio.set_frequency(config.band).map_err(DeviceError::Radio)?;
    radio.set_tx_power(config.tx_power).map_err(DeviceError::Radio)?;
    radio.set_modulation(config.modulation()).map_err(DeviceError::Radio)?;
    radio.set_sync_word(config.sync_word).map_err(DeviceError::Radio)?;
    radio.standby().map_err(DeviceError::Radio)?;

    info!(
        "node {} up: {} Hz, {} dBm, SF{}, BW {} Hz, CR 4/{}, sync {}",
        config.node_id,
        config.band,
        config.tx_power,
        config.spreading_factor,
        config.signal_bandwidth,
        config.coding_rate_4,
        config.sync_word,
    );
    Ok(())
}

/// Like [`bring_up`], additionally enforcing a regional plan
pub fn bring_up_in_region<R: Radio>(
    radio: &mut R,
    config: &RadioConfig,
    region: Region,
) -> Result<(), DeviceError<R::Error>> {
    if let Err(e) = region.check(config) {
        error!("bring-up rejected for {}: {}", region, e);
        return Err(e.into());
    }
    bring_up(radio, config)
}
