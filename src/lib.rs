//! Static radio configuration for LoRa nodes
//!
//! This crate holds the radio and identity parameters a node burns into its
//! firmware image, and the bring-up path that programs them into the
//! transceiver at startup.
//!
//! # Features
//! - Immutable, `const` configuration record with integer units
//! - Per-board values injected at build time from `node.toml`
//! - SX1276/77/78/79 register-level driver
//! - Fail-fast validation against hardware and regional limits
//! - Fleet-level node identity checks for provisioning tools
//! - No unsafe code
//!
//! # Example
//! ```no_run
//! use lora_node::{
//!     config::NODE,
//!     device::bring_up,
//!     radio::{PaOutput, Sx127xVariant, SX127x},
//! };
//!
//! # fn run<SPI, CS, RST, D>(spi: SPI, cs: CS, rst: RST, delay: D)
//! # where
//! #     SPI: embedded_hal::blocking::spi::Transfer<u8> + embedded_hal::blocking::spi::Write<u8>,
//! #     CS: embedded_hal::digital::v2::OutputPin,
//! #     RST: embedded_hal::digital::v2::OutputPin,
//! #     D: embedded_hal::blocking::delay::DelayMs<u8>,
//! # {
//! let mut radio = SX127x::new(spi, cs, rst, delay, Sx127xVariant::Sx1278, PaOutput::Boost)
//!     .unwrap();
//! bring_up(&mut radio, &NODE).unwrap();
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

/// Node radio configuration
pub mod config;

/// Radio bring-up
pub mod device;

/// Radio hardware abstraction layer
pub mod radio;
