use super::caps::Capabilities;

/// Radio modulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModulationParams {
    /// Spreading factor (SF6-SF12)
    pub spreading_factor: u8,
    /// Bandwidth in Hz
    pub bandwidth: u32,
    /// Coding rate denominator (4/5, 4/6, 4/7, 4/8)
    pub coding_rate: u8,
}

impl ModulationParams {
    /// Duration of one LoRa symbol in microseconds, `2^SF / BW`
    pub const fn symbol_duration_us(&self) -> u64 {
        if self.bandwidth == 0 || self.spreading_factor > 32 {
            return u64::MAX;
        }
        (1u64 << self.spreading_factor) * 1_000_000 / self.bandwidth as u64
    }

    /// Whether symbols are long enough to need low data rate optimization
    pub const fn needs_low_data_rate_optimize(&self) -> bool {
        self.symbol_duration_us() > 16_000
    }
}

/// Generic radio interface trait
///
/// Setters must reject values outside [`Radio::capabilities`] rather than
/// clamping them.
pub trait Radio {
    /// Error type for radio operations
    type Error;

    /// Parameter domains the hardware accepts
    fn capabilities(&self) -> Capabilities;

    /// Initialize the radio
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Set the carrier frequency in Hz
    fn set_frequency(&mut self, freq: u32) -> Result<(), Self::Error>;

    /// Set the transmission power in dBm
    fn set_tx_power(&mut self, power: i8) -> Result<(), Self::Error>;

    /// Set spreading factor, bandwidth and coding rate
    fn set_modulation(&mut self, params: ModulationParams) -> Result<(), Self::Error>;

    /// Set the network sync word
    fn set_sync_word(&mut self, sync_word: u8) -> Result<(), Self::Error>;

    /// Put the radio into sleep mode
    fn sleep(&mut self) -> Result<(), Self::Error>;

    /// Put the radio into standby mode
    fn standby(&mut self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_data_rate_threshold() {
        let sf7 = ModulationParams { spreading_factor: 7, bandwidth: 125_000, coding_rate: 5 };
        assert_eq!(sf7.symbol_duration_us(), 1_024);
        assert!(!sf7.needs_low_data_rate_optimize());

        let sf11 = ModulationParams { spreading_factor: 11, ..sf7 };
        assert_eq!(sf11.symbol_duration_us(), 16_384);
        assert!(sf11.needs_low_data_rate_optimize());

        let sf12_wide = ModulationParams { spreading_factor: 12, bandwidth: 500_000, coding_rate: 5 };
        assert!(!sf12_wide.needs_low_data_rate_optimize());
    }
}
