//! Node radio configuration
//!
//! This module contains the static parameters a node programs into its radio
//! at startup. It includes:
//! - The configuration record and node identity
//! - The values compiled into this image
//! - Regional plans for opt-in regulatory checks
//! - Fleet-level provisioning checks

/// Configuration record and node identity
pub mod radio;

/// Values compiled into this firmware image
pub mod node;

/// Regional frequency and power plans
pub mod region;

/// Provisioning checks across many nodes
pub mod fleet;

pub use node::NODE;
pub use radio::{NodeId, NodeIdError, RadioConfig, PUBLIC_SYNC_WORD};
pub use region::Region;
