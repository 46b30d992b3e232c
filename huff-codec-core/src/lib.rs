#![warn(missing_docs)]
//! Static, two-pass Huffman encoding.
//!
//! The pipeline reads an input stream twice: the first pass counts per-byte
//! frequencies, then a prefix-free code tree is built and walked in memory,
//! and the second pass substitutes each input byte with its code and packs
//! the bits into the output. The emitted container is self-describing: it
//! carries a linearized form of the tree ahead of the payload, so no
//! separate frequency table has to travel with the data.
//!
//! Every call to [`encode_stream`] allocates its own frequency table, tree,
//! and code map, and discards them when it returns. Nothing is shared
//! across calls.
//!
//! ```
//! use huff_codec_core::encode_stream;
//! use std::io::Cursor;
//!
//! let encoded = encode_stream(Cursor::new(b"abracadabra".to_vec()), Vec::new())
//!     .unwrap()
//!     .expect("nonempty input yields a container");
//! assert_eq!(&encoded[..8], &[0x7B, 0x68, 0x75, 0x7C, 0x6D, 0x7D, 0x66, 0x66]);
//! ```

pub mod codec;

/// Code map generation (symbol to bit pattern).
pub mod codes;

/// First-pass frequency counting.
pub mod freq;

/// Huffman tree construction.
pub mod tree;

pub use bitstream_io;

use crate::codec::encoder::Encoder;
use crate::codec::CodecError;
use crate::codes::CodeTable;
use crate::freq::FrequencyTable;
use crate::tree::HuffmanTree;
use std::io::{Read, Seek, SeekFrom, Write};

/// Run the whole encoding pipeline over `input`, writing the container to
/// `writer`.
///
/// The input is read to exhaustion twice; it is rewound to its start between
/// the passes. Returns `Ok(None)` for a zero-length input, in which case
/// nothing at all is written to `writer`. Otherwise returns the writer after
/// the final partial byte has been padded and flushed.
pub fn encode_stream<R: Read + Seek, W: Write>(
    mut input: R,
    writer: W,
) -> Result<Option<W>, CodecError> {
    let freq = FrequencyTable::from_reader(&mut input)?;
    let tree = match HuffmanTree::from_frequencies(&freq) {
        Some(tree) => tree,
        None => return Ok(None),
    };
    let codes = CodeTable::from_tree(&tree);
    input.seek(SeekFrom::Start(0))?;

    let mut encoder = Encoder::new(writer)?;
    encoder.encode_tree(&tree)?;
    encoder.encode_payload(&mut input, &codes)?;
    Ok(Some(encoder.close_writer()?))
}
