//! Fleet-level provisioning checks
//!
//! A node cannot detect that another board carries the same identity. Tooling
//! that provisions many images runs [`check_fleet`] over the whole set before
//! flashing.

use core::fmt;

use super::radio::{NodeIdError, RadioConfig};

/// Problems found across a set of node configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FleetError {
    /// Configuration at `index` has an unusable identifier
    InvalidNodeId {
        /// Position in the checked slice
        index: usize,
        /// Why the identifier is rejected
        error: NodeIdError,
    },
    /// Two configurations share an identifier on the same network
    DuplicateNodeId {
        /// Position of the first occurrence
        first: usize,
        /// Position of the colliding entry
        second: usize,
    },
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::InvalidNodeId { index, error } => {
                write!(f, "node {}: {}", index, error)
            }
            FleetError::DuplicateNodeId { first, second } => {
                write!(f, "nodes {} and {} share an identifier", first, second)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FleetError {}

/// Whether two nodes can hear each other's traffic as the same network
fn same_network(a: &RadioConfig, b: &RadioConfig) -> bool {
    a.sync_word == b.sync_word && a.band == b.band
}

/// Check every identifier is valid and unique within its network
///
/// Nodes on different sync words or carrier frequencies never share an
/// address space, so they may reuse identifiers.
pub fn check_fleet(nodes: &[RadioConfig]) -> Result<(), FleetError> {
    for (index, node) in nodes.iter().enumerate() {
        node.node_id
            .check()
            .map_err(|error| FleetError::InvalidNodeId { index, error })?;
    }

    for (first, a) in nodes.iter().enumerate() {
        for (offset, b) in nodes[first + 1..].iter().enumerate() {
            if a.node_id == b.node_id && same_network(a, b) {
                return Err(FleetError::DuplicateNodeId {
                    first,
                    second: first + 1 + offset,
                });
            }
        }
    }

    Ok(())
}
