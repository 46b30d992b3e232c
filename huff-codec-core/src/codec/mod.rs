//! Container format: error type, the 64-bit node record layout, and the
//! encoder that writes the header, tree section, and packed payload.

use crate::tree::Node;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Container encoder.
pub mod encoder;
mod header;

#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error")]
    IoError(#[from] io::Error),

    #[error("Bincode error")]
    BincodeError(#[from] bincode::Error),
}

const LEAF_FLAG: u64 = 0x1;
const WEIGHT_MASK: u64 = 0x00FF_FFFF_FFFF_FFFE;
const SYMBOL_SHIFT: u32 = 56;

/// One serialized tree node, as it appears in the container's tree section.
///
/// Fixed 64-bit layout, written little-endian:
/// - bit 0: leaf flag;
/// - bits 1-55: the node's weight, truncated to its low 55 bits (larger
///   weights silently lose their high bits);
/// - bits 56-63: the leaf's symbol, zero for internal nodes.
///
/// The all-zero record is the sentinel terminating the tree section. An
/// internal node whose weight truncates to zero would collide with the
/// sentinel; like the weight truncation itself, this only matters past
/// 2^55 input bytes and is a known limitation of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord(u64);

impl NodeRecord {
    /// The all-zero marker ending the tree section.
    pub const SENTINEL: NodeRecord = NodeRecord(0);

    /// Record for a leaf carrying `symbol`.
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        NodeRecord(LEAF_FLAG | (weight << 1 & WEIGHT_MASK) | (u64::from(symbol) << SYMBOL_SHIFT))
    }

    /// Record for an internal node. Child links are not stored; pre-order
    /// emission makes them reconstructible.
    pub fn internal(weight: u64) -> Self {
        NodeRecord(weight << 1 & WEIGHT_MASK)
    }

    /// Record for any tree node.
    pub fn from_node(node: &Node) -> Self {
        match *node {
            Node::Leaf { symbol, weight } => Self::leaf(symbol, weight),
            Node::Internal { weight, .. } => Self::internal(weight),
        }
    }

    /// True if the leaf flag is set.
    pub fn is_leaf(&self) -> bool {
        self.0 & LEAF_FLAG != 0
    }

    /// True for the tree-section terminator.
    pub fn is_sentinel(&self) -> bool {
        self.0 == 0
    }

    /// The stored weight: the low 55 bits of the original.
    pub fn weight(&self) -> u64 {
        (self.0 & WEIGHT_MASK) >> 1
    }

    /// The stored symbol byte. Only meaningful when the leaf flag is set.
    pub fn symbol(&self) -> u8 {
        (self.0 >> SYMBOL_SHIFT) as u8
    }

    /// The raw 64-bit record value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}
