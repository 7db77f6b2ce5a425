use core::fmt;
use core::ops::RangeInclusive;

use heapless::Vec;

use crate::radio::traits::ModulationParams;

/// Sync word used by public LoRaWAN networks on SX127x parts
pub const PUBLIC_SYNC_WORD: u8 = 0x34;

/// Maximum node identifier length in bytes
pub const NODE_ID_MAX_LEN: usize = 16;

/// Legal LoRa spreading factors
pub const SPREADING_FACTORS: RangeInclusive<u8> = 6..=12;

/// Legal coding rate denominators (4/5 to 4/8)
pub const CODING_RATES_4: RangeInclusive<u8> = 5..=8;

/// Discrete LoRa signal bandwidths in Hz
pub const SIGNAL_BANDWIDTHS: [u32; 10] = [
    7_800, 10_400, 15_600, 20_800, 31_250, 41_700, 62_500, 125_000, 250_000, 500_000,
];

/// Reasons a node identifier is unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeIdError {
    /// Identifier has no characters
    Empty,
    /// Identifier is longer than [`NODE_ID_MAX_LEN`]
    TooLong(usize),
    /// Identifier contains a byte that is not printable ASCII
    InvalidChar(u8),
}

impl fmt::Display for NodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeIdError::Empty => write!(f, "node id is empty"),
            NodeIdError::TooLong(len) => {
                write!(f, "node id is {} bytes, max {}", len, NODE_ID_MAX_LEN)
            }
            NodeIdError::InvalidChar(b) => write!(f, "node id contains byte {:#04x}", b),
        }
    }
}

/// Human-readable identity of one physical node
///
/// Uniqueness across a deployment is a provisioning concern, see
/// [`crate::config::fleet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeId(&'static str);

impl NodeId {
    /// Wrap a static identifier
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Identifier text
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Identifier bytes, without terminator or length prefix
    pub const fn as_bytes(&self) -> &'static [u8] {
        self.0.as_bytes()
    }

    /// Length in bytes
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the identifier is empty
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the identifier is non-empty, short and printable ASCII without spaces
    pub fn check(&self) -> Result<(), NodeIdError> {
        if self.is_empty() {
            return Err(NodeIdError::Empty);
        }
        if self.len() > NODE_ID_MAX_LEN {
            return Err(NodeIdError::TooLong(self.len()));
        }
        match self.as_bytes().iter().find(|b| !b.is_ascii_graphic()) {
            Some(&b) => Err(NodeIdError::InvalidChar(b)),
            None => Ok(()),
        }
    }

    /// Encode as a single length byte followed by the identifier
    pub fn to_length_prefixed(&self) -> Result<Vec<u8, { NODE_ID_MAX_LEN + 1 }>, NodeIdError> {
        self.check()?;
        let mut out = Vec::new();
        // check() bounds the length, so neither push can overflow
        out.push(self.len() as u8)
            .map_err(|_| NodeIdError::TooLong(self.len()))?;
        out.extend_from_slice(self.as_bytes())
            .map_err(|_| NodeIdError::TooLong(self.len()))?;
        Ok(out)
    }

    /// Encode as a NUL-terminated C string
    pub fn to_nul_terminated(&self) -> Result<Vec<u8, { NODE_ID_MAX_LEN + 1 }>, NodeIdError> {
        self.check()?;
        let mut out = Vec::new();
        out.extend_from_slice(self.as_bytes())
            .map_err(|_| NodeIdError::TooLong(self.len()))?;
        out.push(0).map_err(|_| NodeIdError::TooLong(self.len()))?;
        Ok(out)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Static radio and identity parameters of a node
///
/// Values are fixed when the image is built and handed to
/// [`crate::device::bring_up`] once at startup. The record carries no
/// validation of its own; the radio driver rejects values its hardware
/// cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Carrier frequency in Hz
    pub band: u32,
    /// Transmit output power in dBm
    pub tx_power: i8,
    /// LoRa spreading factor exponent
    pub spreading_factor: u8,
    /// Channel bandwidth in Hz
    pub signal_bandwidth: u32,
    /// Forward error correction denominator, coding rate is 4/x
    pub coding_rate_4: u8,
    /// Network discriminator byte
    pub sync_word: u8,
    /// Node identity
    pub node_id: NodeId,
}

impl RadioConfig {
    /// Modulation view consumed by the radio driver
    pub const fn modulation(&self) -> ModulationParams {
        ModulationParams {
            spreading_factor: self.spreading_factor,
            bandwidth: self.signal_bandwidth,
            coding_rate: self.coding_rate_4,
        }
    }

    /// Whether the sync word collides with public networks
    pub const fn uses_public_sync_word(&self) -> bool {
        self.sync_word == PUBLIC_SYNC_WORD
    }
}
