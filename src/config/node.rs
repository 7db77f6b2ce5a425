//! Compiled-in node configuration
//!
//! `build.rs` renders [`NODE`] from `node.toml` (or the file named by
//! `LORA_NODE_CONFIG`). `LORA_NODE_ID` replaces the identifier so one source
//! tree can be flashed onto many boards.

use super::radio::{NodeId, RadioConfig};

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/node_config.rs"));
