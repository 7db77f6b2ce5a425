#![allow(dead_code)]

use heapless::Vec;
use lora_node::radio::{
    caps::Capabilities,
    traits::{ModulationParams, Radio},
    PaOutput, Sx127xVariant,
};

/// Mock radio error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Generic error
    Error,
}

/// Calls seen by the mock, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Init,
    Frequency(u32),
    TxPower(i8),
    Modulation(ModulationParams),
    SyncWord(u8),
    Sleep,
    Standby,
}

/// Mock radio for testing
pub struct MockRadio {
    caps: Capabilities,
    calls: Vec<Call, 16>,
    fail_on_init: bool,
}

impl MockRadio {
    /// Create new mock radio with SX1276 PA_BOOST limits
    pub fn new() -> Self {
        Self::with_capabilities(Sx127xVariant::Sx1276.capabilities(PaOutput::Boost))
    }

    /// Create new mock radio with custom limits
    pub fn with_capabilities(caps: Capabilities) -> Self {
        Self {
            caps,
            calls: Vec::new(),
            fail_on_init: false,
        }
    }

    /// Make the next init call fail
    pub fn fail_init(&mut self) {
        self.fail_on_init = true;
    }

    /// Calls received so far
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    fn record(&mut self, call: Call) -> Result<(), MockError> {
        self.calls.push(call).map_err(|_| MockError::Error)
    }
}

impl Radio for MockRadio {
    type Error = MockError;

    fn capabilities(&self) -> Capabilities {
        self.caps.clone()
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        if self.fail_on_init {
            return Err(MockError::Error);
        }
        self.record(Call::Init)
    }

    fn set_frequency(&mut self, freq: u32) -> Result<(), Self::Error> {
        self.record(Call::Frequency(freq))
    }

    fn set_tx_power(&mut self, power: i8) -> Result<(), Self::Error> {
        self.record(Call::TxPower(power))
    }

    fn set_modulation(&mut self, params: ModulationParams) -> Result<(), Self::Error> {
        self.record(Call::Modulation(params))
    }

    fn set_sync_word(&mut self, sync_word: u8) -> Result<(), Self::Error> {
        self.record(Call::SyncWord(sync_word))
    }

    fn sleep(&mut self) -> Result<(), Self::Error> {
        self.record(Call::Sleep)
    }

    fn standby(&mut self) -> Result<(), Self::Error> {
        self.record(Call::Standby)
    }
}
