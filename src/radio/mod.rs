//! Radio hardware abstraction layer

/// Capability tables and parameter validation
pub mod caps;
/// SX1276/77/78/79 driver
pub mod sx127x;
/// Generic radio interface
pub mod traits;

pub use caps::{Capabilities, ConfigError};
pub use sx127x::{PaOutput, RadioError, Sx127xVariant, SX127x};
pub use traits::{ModulationParams, Radio};
