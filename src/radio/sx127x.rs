use core::fmt;

use embedded_hal::{
    blocking::delay::DelayMs,
    blocking::spi::{Transfer, Write},
    digital::v2::OutputPin,
};

use crate::config::radio::{SIGNAL_BANDWIDTHS, SPREADING_FACTORS};
use crate::radio::caps::{BandRestriction, Capabilities, ConfigError, FrequencyRange};
use crate::radio::traits::{ModulationParams, Radio};

// SX127x Register Map
const REG_OP_MODE: u8 = 0x01;
const REG_FRF_MSB: u8 = 0x06;
const REG_FRF_MID: u8 = 0x07;
const REG_FRF_LSB: u8 = 0x08;
const REG_PA_CONFIG: u8 = 0x09;
const REG_OCP: u8 = 0x0B;
const REG_LNA: u8 = 0x0C;
const REG_FIFO_TX_BASE_ADDR: u8 = 0x0E;
const REG_FIFO_RX_BASE_ADDR: u8 = 0x0F;
const REG_MODEM_CONFIG_1: u8 = 0x1D;
const REG_MODEM_CONFIG_2: u8 = 0x1E;
const REG_MODEM_CONFIG_3: u8 = 0x26;
const REG_DETECTION_OPTIMIZE: u8 = 0x31;
const REG_DETECTION_THRESHOLD: u8 = 0x37;
const REG_SYNC_WORD: u8 = 0x39;
const REG_VERSION: u8 = 0x42;
const REG_PA_DAC: u8 = 0x4D;

// Operating Mode bits
const MODE_LONG_RANGE_MODE: u8 = 0x80;
const MODE_SLEEP: u8 = 0x00;
const MODE_STDBY: u8 = 0x01;

// PA Config
const PA_BOOST: u8 = 0x80;
const PA_RFO: u8 = 0x70;
const PA_DAC_DEFAULT: u8 = 0x84;
const PA_DAC_HIGH_POWER: u8 = 0x87;

// Modem config bits
const MC1_IMPLICIT_HEADER: u8 = 0x01;
const MC3_LOW_DATA_RATE_OPTIMIZE: u8 = 0x08;
const MC3_AGC_AUTO_ON: u8 = 0x04;
const LNA_BOOST_HF: u8 = 0x03;

/// Silicon revision reported by every SX1276/77/78/79
pub const SX127X_VERSION: u8 = 0x12;

const CRYSTAL_HZ: u64 = 32_000_000;

static SX1276_BANDS: [FrequencyRange; 3] = [
    FrequencyRange::mhz(137, 175),
    FrequencyRange::mhz(410, 525),
    FrequencyRange::mhz(862, 1020),
];
static SX1278_BANDS: [FrequencyRange; 2] =
    [FrequencyRange::mhz(137, 175), FrequencyRange::mhz(410, 525)];
static SX1279_BANDS: [FrequencyRange; 1] = [FrequencyRange::mhz(137, 960)];

// 250 and 500 kHz are not supported in the 169 MHz band
static LOW_BAND_RESTRICTIONS: [BandRestriction; 1] = [BandRestriction {
    range: FrequencyRange::mhz(137, 175),
    max_bandwidth: 125_000,
}];

/// Members of the SX127x family sharing this register map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sx127xVariant {
    /// 137-1020 MHz, SF6-SF12
    Sx1276,
    /// 137-1020 MHz, SF6-SF9
    Sx1277,
    /// 137-525 MHz, SF6-SF12
    Sx1278,
    /// 137-960 MHz, SF6-SF12
    Sx1279,
}

/// Power amplifier output the antenna is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaOutput {
    /// PA_BOOST pin, 2 to 20 dBm
    Boost,
    /// RFO pin, 0 to 14 dBm
    Rfo,
}

impl Sx127xVariant {
    /// Parameter domains of this part with the given amplifier output
    pub fn capabilities(&self, pa: PaOutput) -> Capabilities {
        let bands: &'static [FrequencyRange] = match self {
            Sx127xVariant::Sx1276 | Sx127xVariant::Sx1277 => &SX1276_BANDS,
            Sx127xVariant::Sx1278 => &SX1278_BANDS,
            Sx127xVariant::Sx1279 => &SX1279_BANDS,
        };
        let spreading_factors = match self {
            Sx127xVariant::Sx1277 => 6..=9,
            _ => SPREADING_FACTORS,
        };
        let tx_power = match pa {
            PaOutput::Boost => 2..=20,
            PaOutput::Rfo => 0..=14,
        };
        Capabilities {
            bands,
            tx_power,
            spreading_factors,
            bandwidths: &SIGNAL_BANDWIDTHS,
            restrictions: &LOW_BAND_RESTRICTIONS,
        }
    }
}

/// Possible errors in radio operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// SPI transfer error
    Spi,
    /// GPIO error
    Gpio,
    /// Chip answered with an unexpected silicon version
    Version(u8),
    /// Parameter rejected by the hardware domain check
    Config(ConfigError),
}

impl From<ConfigError> for RadioError {
    fn from(error: ConfigError) -> Self {
        RadioError::Config(error)
    }
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadioError::Spi => write!(f, "SPI transfer failed"),
            RadioError::Gpio => write!(f, "GPIO access failed"),
            RadioError::Version(v) => write!(f, "unexpected SX127x version {:#04x}", v),
            RadioError::Config(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RadioError {}

/// FRF register value for a carrier frequency in Hz
pub(crate) fn frf(freq: u32) -> u32 {
    (((freq as u64) << 19) / CRYSTAL_HZ) as u32
}

/// ModemConfig1 bandwidth field for an exact supported bandwidth
pub(crate) fn bandwidth_index(bw: u32) -> Option<u8> {
    SIGNAL_BANDWIDTHS
        .iter()
        .position(|&b| b == bw)
        .map(|i| i as u8)
}

/// RegOcp value for an over-current limit in mA
pub(crate) fn ocp_register(ma: u8) -> u8 {
    let trim = if ma <= 120 {
        ma.saturating_sub(45) / 5
    } else if ma <= 240 {
        ((ma as u16 + 30) / 10) as u8
    } else {
        27
    };
    0x20 | (0x1F & trim)
}

/// Register values selecting an output power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PaSettings {
    pub pa_config: u8,
    pub pa_dac: u8,
    pub ocp: u8,
}

/// PA registers for a power already checked against the output's range
pub(crate) fn pa_settings(power: i8, pa: PaOutput) -> PaSettings {
    match pa {
        PaOutput::Boost if power > 17 => PaSettings {
            pa_config: PA_BOOST | (power - 5) as u8,
            pa_dac: PA_DAC_HIGH_POWER,
            ocp: ocp_register(140),
        },
        PaOutput::Boost => PaSettings {
            pa_config: PA_BOOST | (power - 2) as u8,
            pa_dac: PA_DAC_DEFAULT,
            ocp: ocp_register(100),
        },
        PaOutput::Rfo => PaSettings {
            pa_config: PA_RFO | power as u8,
            pa_dac: PA_DAC_DEFAULT,
            ocp: ocp_register(100),
        },
    }
}

/// SX127x Radio Driver
pub struct SX127x<SPI, CS, RESET, DELAY>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    RESET: OutputPin,
    DELAY: DelayMs<u8>,
{
    spi: SPI,
    cs: CS,
    reset: RESET,
    delay: DELAY,
    variant: Sx127xVariant,
    pa: PaOutput,
    frequency: Option<u32>,
}

impl<SPI, CS, RESET, DELAY> SX127x<SPI, CS, RESET, DELAY>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    RESET: OutputPin,
    DELAY: DelayMs<u8>,
{
    /// Create new instance of SX127x driver
    ///
    /// Resets the chip and fails if it does not report [`SX127X_VERSION`].
    pub fn new(
        spi: SPI,
        cs: CS,
        reset: RESET,
        delay: DELAY,
        variant: Sx127xVariant,
        pa: PaOutput,
    ) -> Result<Self, RadioError> {
        let mut radio = Self {
            spi,
            cs,
            reset,
            delay,
            variant,
            pa,
            frequency: None,
        };

        radio.cs.set_high().map_err(|_| RadioError::Gpio)?;

        // Perform hardware reset
        radio.reset.set_low().map_err(|_| RadioError::Gpio)?;
        radio.delay.delay_ms(10);
        radio.reset.set_high().map_err(|_| RadioError::Gpio)?;
        radio.delay.delay_ms(10);

        // Check version
        let version = radio.read_register(REG_VERSION)?;
        if version != SX127X_VERSION {
            error!("sx127x: unexpected version {}", version);
            return Err(RadioError::Version(version));
        }
        debug!("sx127x: version ok");

        Ok(radio)
    }

    /// Configured part
    pub fn variant(&self) -> Sx127xVariant {
        self.variant
    }

    /// Last carrier frequency written, in Hz
    pub fn frequency(&self) -> Option<u32> {
        self.frequency
    }

    /// Give back the bus, pins and delay
    pub fn release(self) -> (SPI, CS, RESET, DELAY) {
        (self.spi, self.cs, self.reset, self.delay)
    }

    /// Read a radio register
    fn read_register(&mut self, addr: u8) -> Result<u8, RadioError> {
        self.cs.set_low().map_err(|_| RadioError::Gpio)?;
        let mut buffer = [addr & 0x7F, 0];
        let result = self.spi.transfer(&mut buffer).map(|b| b[1]);
        self.cs.set_high().map_err(|_| RadioError::Gpio)?;
        result.map_err(|_| RadioError::Spi)
    }

    /// Write to a radio register
    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), RadioError> {
        trace!("sx127x: write {} = {}", addr, value);
        self.cs.set_low().map_err(|_| RadioError::Gpio)?;
        let result = self.spi.write(&[addr | 0x80, value]);
        self.cs.set_high().map_err(|_| RadioError::Gpio)?;
        result.map_err(|_| RadioError::Spi)
    }

    /// Read-modify-write keeping the bits selected by `keep`
    fn update_register(&mut self, addr: u8, keep: u8, bits: u8) -> Result<(), RadioError> {
        let current = self.read_register(addr)?;
        self.write_register(addr, (current & keep) | bits)
    }

    /// Set operating mode
    fn set_mode(&mut self, mode: u8) -> Result<(), RadioError> {
        self.write_register(REG_OP_MODE, MODE_LONG_RANGE_MODE | mode)
    }
}

impl<SPI, CS, RESET, DELAY> Radio for SX127x<SPI, CS, RESET, DELAY>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    RESET: OutputPin,
    DELAY: DelayMs<u8>,
{
    type Error = RadioError;

    fn capabilities(&self) -> Capabilities {
        self.variant.capabilities(self.pa)
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        // LoRa mode can only be selected from sleep
        self.set_mode(MODE_SLEEP)?;

        // Set base addresses
        self.write_register(REG_FIFO_TX_BASE_ADDR, 0x00)?;
        self.write_register(REG_FIFO_RX_BASE_ADDR, 0x00)?;

        // Set LNA boost
        self.update_register(REG_LNA, 0xFF, LNA_BOOST_HF)?;

        // Set auto AGC
        self.write_register(REG_MODEM_CONFIG_3, MC3_AGC_AUTO_ON)?;

        self.set_mode(MODE_STDBY)
    }

    fn set_frequency(&mut self, freq: u32) -> Result<(), Self::Error> {
        self.capabilities().check_band(freq)?;

        let frf = frf(freq);
        debug!("sx127x: frequency {} Hz, frf {}", freq, frf);

        // Write frequency registers
        self.write_register(REG_FRF_MSB, ((frf >> 16) & 0xFF) as u8)?;
        self.write_register(REG_FRF_MID, ((frf >> 8) & 0xFF) as u8)?;
        self.write_register(REG_FRF_LSB, (frf & 0xFF) as u8)?;

        self.frequency = Some(freq);
        Ok(())
    }

    fn set_tx_power(&mut self, power: i8) -> Result<(), Self::Error> {
        self.capabilities().check_tx_power(power)?;

        let pa = pa_settings(power, self.pa);
        self.write_register(REG_PA_DAC, pa.pa_dac)?;
        self.write_register(REG_OCP, pa.ocp)?;
        self.write_register(REG_PA_CONFIG, pa.pa_config)
    }

    fn set_modulation(&mut self, params: ModulationParams) -> Result<(), Self::Error> {
        let caps = self.capabilities();
        caps.check_spreading_factor(params.spreading_factor)?;
        caps.check_bandwidth(params.bandwidth)?;
        caps.check_coding_rate(params.coding_rate)?;
        if let Some(freq) = self.frequency {
            caps.check_combination(freq, params.bandwidth)?;
        }
        let bw = bandwidth_index(params.bandwidth)
            .ok_or(ConfigError::Bandwidth(params.bandwidth))?;
        let sf = params.spreading_factor;
        let cr = params.coding_rate - 4;

        // SF6 needs its own detection settings
        let (optimize, threshold) = if sf == 6 { (0xC5, 0x0C) } else { (0xC3, 0x0A) };
        self.write_register(REG_DETECTION_OPTIMIZE, optimize)?;
        self.write_register(REG_DETECTION_THRESHOLD, threshold)?;

        self.update_register(REG_MODEM_CONFIG_2, 0x0F, sf << 4)?;
        self.update_register(REG_MODEM_CONFIG_1, MC1_IMPLICIT_HEADER, (bw << 4) | (cr << 1))?;

        let ldo = if params.needs_low_data_rate_optimize() {
            MC3_LOW_DATA_RATE_OPTIMIZE
        } else {
            0
        };
        self.update_register(REG_MODEM_CONFIG_3, !MC3_LOW_DATA_RATE_OPTIMIZE, ldo)
    }

    fn set_sync_word(&mut self, sync_word: u8) -> Result<(), Self::Error> {
        self.write_register(REG_SYNC_WORD, sync_word)
    }

    fn sleep(&mut self) -> Result<(), Self::Error> {
        self.set_mode(MODE_SLEEP)
    }

    fn standby(&mut self) -> Result<(), Self::Error> {
        self.set_mode(MODE_STDBY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frf_for_common_bands() {
        assert_eq!(frf(433_000_000), 0x6C_4000);
        assert_eq!(frf(868_000_000), 0xD9_0000);
        assert_eq!(frf(915_000_000), 0xE4_C000);
    }

    #[test]
    fn bandwidth_index_is_exact() {
        assert_eq!(bandwidth_index(7_800), Some(0));
        assert_eq!(bandwidth_index(125_000), Some(7));
        assert_eq!(bandwidth_index(500_000), Some(9));
        assert_eq!(bandwidth_index(125_001), None);
    }

    #[test]
    fn ocp_trim() {
        assert_eq!(ocp_register(100), 0x2B);
        assert_eq!(ocp_register(140), 0x31);
        assert_eq!(ocp_register(250), 0x3B);
    }

    #[test]
    fn pa_boost_switches_to_high_power_above_17_dbm() {
        assert_eq!(
            pa_settings(17, PaOutput::Boost),
            PaSettings { pa_config: 0x8F, pa_dac: 0x84, ocp: 0x2B }
        );
        assert_eq!(
            pa_settings(20, PaOutput::Boost),
            PaSettings { pa_config: 0x8F, pa_dac: 0x87, ocp: 0x31 }
        );
        assert_eq!(pa_settings(2, PaOutput::Boost).pa_config, 0x80);
        assert_eq!(pa_settings(14, PaOutput::Rfo).pa_config, 0x7E);
    }

    #[test]
    fn sx1277_caps_stop_at_sf9() {
        let caps = Sx127xVariant::Sx1277.capabilities(PaOutput::Boost);
        assert!(caps.check_spreading_factor(9).is_ok());
        assert_eq!(caps.check_spreading_factor(10), Err(ConfigError::SpreadingFactor(10)));
    }

    #[test]
    fn sx1278_has_no_high_band() {
        let caps = Sx127xVariant::Sx1278.capabilities(PaOutput::Boost);
        assert!(caps.check_band(433_000_000).is_ok());
        assert_eq!(caps.check_band(868_000_000), Err(ConfigError::Band(868_000_000)));
    }
}
