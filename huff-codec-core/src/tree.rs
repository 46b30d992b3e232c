use crate::freq::FrequencyTable;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node within the tree's arena.
pub type NodeId = usize;

/// A single node of the code tree.
///
/// Children are referenced by arena index, so the tree is acyclic by
/// construction and can be traversed iteratively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Terminal node carrying one byte value and its occurrence count.
    Leaf {
        /// The byte value this leaf encodes.
        symbol: u8,
        /// Occurrence count of the symbol.
        weight: u64,
    },
    /// Merged node owning exactly two children. Never carries a symbol.
    Internal {
        /// Sum of the two children's weights.
        weight: u64,
        /// Arena index of the left (first-selected) child.
        left: NodeId,
        /// Arena index of the right (second-selected) child.
        right: NodeId,
    },
}

impl Node {
    /// The node's weight, regardless of its kind.
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

// Forest priority below the weight: a leaf outranks an internal node, equal
// leaves rank by symbol, equal internals by creation sequence. The derived
// order on the variants gives exactly that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Leaf(u8),
    Internal(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ForestEntry {
    weight: u64,
    rank: Rank,
    id: NodeId,
}

/// An arena-backed Huffman tree.
///
/// Built once per encode call from the first-pass frequency table and
/// discarded afterwards. Construction is fully deterministic: two runs over
/// identical frequency multisets produce identical arenas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two minimum-priority roots
    /// of the forest.
    ///
    /// Priority is: lower weight first; at equal weight a leaf before an
    /// internal node; equal-weight leaves by ascending symbol; equal-weight
    /// internal nodes by ascending creation order. The first of the two
    /// selected minima becomes the left child.
    ///
    /// Returns `None` when the table is empty. A table with one distinct
    /// symbol produces a tree whose root is that single leaf.
    pub fn from_frequencies(freq: &FrequencyTable) -> Option<Self> {
        if freq.is_empty() {
            return None;
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(freq.distinct_count() * 2 - 1);
        let mut forest: BinaryHeap<Reverse<ForestEntry>> =
            BinaryHeap::with_capacity(freq.distinct_count());

        for (symbol, weight) in freq.iter() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, weight });
            forest.push(Reverse(ForestEntry {
                weight,
                rank: Rank::Leaf(symbol),
                id,
            }));
        }

        let mut next_seq: u32 = 0;
        while forest.len() > 1 {
            let Reverse(first) = forest.pop()?;
            let Reverse(second) = forest.pop()?;

            let weight = nodes[first.id].weight() + nodes[second.id].weight();
            let id = nodes.len();
            nodes.push(Node::Internal {
                weight,
                left: first.id,
                right: second.id,
            });
            forest.push(Reverse(ForestEntry {
                weight,
                rank: Rank::Internal(next_seq),
                id,
            }));
            next_seq += 1;
        }

        let root = forest.pop()?.0.id;
        Some(HuffmanTree { nodes, root })
    }

    /// Arena index of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by arena index.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total number of nodes (leaves and internals).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves, one per distinct input symbol.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// The root's weight: the total number of bytes counted in pass one.
    pub fn total_weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(bytes: &[u8]) -> FrequencyTable {
        let mut freq = FrequencyTable::new();
        freq.count_bytes(bytes);
        freq
    }

    #[test]
    fn empty_table_builds_no_tree() {
        assert!(HuffmanTree::from_frequencies(&FrequencyTable::new()).is_none());
    }

    #[test]
    fn single_symbol_yields_leaf_root() {
        let tree = HuffmanTree::from_frequencies(&table(b"xxxxxxxxxx")).unwrap();

        assert_eq!(tree.node_count(), 1);
        assert_eq!(
            *tree.node(tree.root()),
            Node::Leaf {
                symbol: b'x',
                weight: 10
            }
        );
    }

    #[test]
    fn leaf_weights_sum_to_input_length() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let tree = HuffmanTree::from_frequencies(&table(input)).unwrap();

        let leaf_sum: u64 = (0..tree.node_count())
            .filter_map(|id| match *tree.node(id) {
                Node::Leaf { weight, .. } => Some(weight),
                Node::Internal { .. } => None,
            })
            .sum();

        assert_eq!(leaf_sum, input.len() as u64);
        assert_eq!(tree.total_weight(), input.len() as u64);
        assert_eq!(tree.leaf_count(), table(input).distinct_count());
    }

    #[test]
    fn internal_nodes_always_have_two_children() {
        let tree = HuffmanTree::from_frequencies(&table(b"abracadabra")).unwrap();

        for id in 0..tree.node_count() {
            if let Node::Internal { left, right, .. } = *tree.node(id) {
                assert!(left < tree.node_count());
                assert!(right < tree.node_count());
                assert_ne!(left, right);
            }
        }
    }

    #[test]
    fn example_merge_order() {
        // A=3 B=2 C=1: C and B merge first, then the leaf A outranks the
        // equal-weight internal node and becomes the left child of the root.
        let tree = HuffmanTree::from_frequencies(&table(b"AAABBC")).unwrap();

        let (left, right) = match *tree.node(tree.root()) {
            Node::Internal {
                weight,
                left,
                right,
            } => {
                assert_eq!(weight, 6);
                (left, right)
            }
            Node::Leaf { .. } => panic!("root must be internal"),
        };

        assert_eq!(
            *tree.node(left),
            Node::Leaf {
                symbol: b'A',
                weight: 3
            }
        );
        match *tree.node(right) {
            Node::Internal {
                weight,
                left,
                right,
            } => {
                assert_eq!(weight, 3);
                assert_eq!(
                    *tree.node(left),
                    Node::Leaf {
                        symbol: b'C',
                        weight: 1
                    }
                );
                assert_eq!(
                    *tree.node(right),
                    Node::Leaf {
                        symbol: b'B',
                        weight: 2
                    }
                );
            }
            Node::Leaf { .. } => panic!("right child must be internal"),
        }
    }

    #[test]
    fn equal_weight_leaves_merge_in_symbol_order() {
        // Four weight-1 leaves: a+b merge first, then c+d, then the two
        // internals in creation order.
        let tree = HuffmanTree::from_frequencies(&table(b"abcd")).unwrap();

        let (left, right) = match *tree.node(tree.root()) {
            Node::Internal { left, right, .. } => (left, right),
            Node::Leaf { .. } => panic!("root must be internal"),
        };

        let pair = |id: NodeId| match *tree.node(id) {
            Node::Internal { left, right, .. } => {
                match (*tree.node(left), *tree.node(right)) {
                    (Node::Leaf { symbol: a, .. }, Node::Leaf { symbol: b, .. }) => (a, b),
                    _ => panic!("expected two leaf children"),
                }
            }
            Node::Leaf { .. } => panic!("expected internal node"),
        };

        assert_eq!(pair(left), (b'a', b'b'));
        assert_eq!(pair(right), (b'c', b'd'));
    }

    #[test]
    fn identical_frequencies_build_identical_trees() {
        let freq = table(b"aabbccddeeffgg mississippi");
        let one = HuffmanTree::from_frequencies(&freq).unwrap();
        let two = HuffmanTree::from_frequencies(&freq).unwrap();

        assert_eq!(one, two);
    }
}
