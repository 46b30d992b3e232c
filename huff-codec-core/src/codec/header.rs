use serde::{Deserialize, Serialize};

pub(crate) type Magic = [u8; 8];

/// `{hu|m}ff` in ASCII.
pub(crate) const MAGIC_HUFF: Magic = [0x7B, 0x68, 0x75, 0x7C, 0x6D, 0x7D, 0x66, 0x66];

/// Container header.
///
/// The magic is the whole header: the format carries no version field and
/// cannot evolve without an incompatible header change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ContainerHeader {
    pub(crate) magic: Magic,
}
