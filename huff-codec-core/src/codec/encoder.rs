use crate::codec::header::{ContainerHeader, MAGIC_HUFF};
use crate::codec::{CodecError, NodeRecord};
use crate::codes::{Code, CodeTable};
use crate::tree::{HuffmanTree, Node};
use bincode::config::{FixintEncoding, WithOtherEndian, WithOtherIntEncoding};
use bincode::{DefaultOptions, Options};
use bitstream_io::{BitWrite, BitWriter, LittleEndian};
use std::io;
use std::io::{Read, Write};

const READ_CHUNK: usize = 4096;

/// Writes one container to a stream: magic header, pre-order tree section,
/// then the bit-packed payload.
///
/// The caller drives the three sections in order and finishes with
/// [`Encoder::close_writer`], which pads the final partial byte and returns
/// the underlying writer.
pub struct Encoder<W: Write> {
    stream: BitWriter<W, LittleEndian>,
    bincode: WithOtherEndian<
        WithOtherIntEncoding<DefaultOptions, FixintEncoding>,
        bincode::config::LittleEndian,
    >,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder over `writer` and immediately write the magic
    /// header.
    pub fn new(writer: W) -> Result<Self, CodecError> {
        let mut encoder = Self {
            stream: BitWriter::endian(writer, LittleEndian),
            bincode: DefaultOptions::new()
                .with_fixint_encoding()
                .with_little_endian(),
        };
        encoder.encode_header()?;
        Ok(encoder)
    }

    fn encode_header(&mut self) -> Result<(), CodecError> {
        let mut buffer: Vec<u8> = Vec::new();
        self.bincode
            .serialize_into(&mut buffer, &ContainerHeader { magic: MAGIC_HUFF })?;
        self.write_bytes(&buffer)
    }

    /// Write the tree section: one 64-bit record per node in pre-order,
    /// terminated by the all-zero sentinel record.
    pub fn encode_tree(&mut self, tree: &HuffmanTree) -> Result<(), CodecError> {
        let mut buffer: Vec<u8> = Vec::with_capacity((tree.node_count() + 1) * 8);
        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            let node = tree.node(id);
            if let Node::Internal { left, right, .. } = *node {
                // Right below left, so the left subtree is emitted first.
                stack.push(right);
                stack.push(left);
            }
            self.bincode
                .serialize_into(&mut buffer, &NodeRecord::from_node(node))?;
        }
        self.bincode
            .serialize_into(&mut buffer, &NodeRecord::SENTINEL)?;
        self.write_bytes(&buffer)
    }

    /// Second pass: substitute every byte of `input` with its code and pack
    /// the bits into the output.
    ///
    /// Every byte seen here was counted in the first pass and therefore has
    /// a code; a missing entry means the input changed between the passes
    /// and is a fatal invariant violation, not a recoverable error.
    pub fn encode_payload<R: Read>(
        &mut self,
        input: &mut R,
        codes: &CodeTable,
    ) -> Result<(), CodecError> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match input.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(n) => {
                    for &byte in &buf[..n] {
                        let code = codes.get(byte).unwrap_or_else(|| {
                            panic!("byte {byte:#04x} in the packing pass has no code")
                        });
                        self.write_code(code)?;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    // The branch nearest the root goes out first, into the lowest unfilled
    // bit of the current output byte.
    fn write_code(&mut self, code: Code) -> io::Result<()> {
        for i in (0..code.bit_len()).rev() {
            self.stream.write_bit(code.bit(i))?;
        }
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        Ok(self.stream.write_bytes(bytes)?)
    }

    /// Pad the final partial byte with zero bits, flush the bit writer, and
    /// return the underlying writer.
    pub fn close_writer(mut self) -> Result<W, CodecError> {
        self.stream.byte_align()?;
        self.stream.flush()?;
        Ok(self.stream.into_writer())
    }
}
