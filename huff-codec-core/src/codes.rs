use crate::tree::{HuffmanTree, Node};

/// One symbol's assigned bit pattern.
///
/// Bit `len - 1` of `bits` is the branch taken nearest the root; bit 0 is
/// the branch that reaches the leaf. The length equals the leaf's depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Build a code from its accumulated bits and bit count.
    pub fn new(bits: u64, len: u8) -> Self {
        Self { bits, len }
    }

    /// The accumulated code bits.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> u8 {
        self.len
    }

    /// Bit at position `i`; `len - 1` is nearest the root.
    pub fn bit(&self, i: u8) -> bool {
        self.bits >> i & 1 == 1
    }
}

/// Immutable symbol-to-code map for one encode call.
///
/// Dense 256-entry array; a zero length marks a symbol that does not occur
/// in the tree.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Code; 256],
}

impl CodeTable {
    /// Assign codes with an iterative depth-first walk from the root.
    ///
    /// Each left edge appends a 0 bit, each right edge a 1 bit. A tree whose
    /// root is a single leaf would give that symbol a zero-length code and
    /// make it unencodable, so the sole symbol is forced to a 1-bit code.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = [Code::default(); 256];
        let mut stack = vec![(tree.root(), 0u64, 0u8)];
        while let Some((id, bits, depth)) = stack.pop() {
            match *tree.node(id) {
                Node::Internal { left, right, .. } => {
                    stack.push((right, bits << 1 | 1, depth + 1));
                    stack.push((left, bits << 1, depth + 1));
                }
                Node::Leaf { symbol, .. } => {
                    codes[usize::from(symbol)] = Code::new(bits, depth.max(1));
                }
            }
        }
        Self { codes }
    }

    /// The code for `symbol`, or `None` if it never occurred in the input.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        let code = self.codes[usize::from(symbol)];
        (code.len != 0).then_some(code)
    }

    /// All assigned codes as `(symbol, code)`, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.len != 0)
            .map(|(i, &c)| (i as u8, c))
    }
}
