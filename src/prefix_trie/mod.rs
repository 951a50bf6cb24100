//! A binary prefix trie over IPv4 addresses.
//!
//! Every edge in the trie encodes one bit of an address, starting at the
//! most significant bit. A prefix of length `L` therefore lives on the node
//! at depth `L`, reached by following the top `L` bits of its address from
//! the root. Inserting a prefix creates the missing nodes on that path and
//! stores the value on the last one; a lookup follows the bits of the
//! queried address for as long as the path exists, remembering the deepest
//! value it has seen. Since a deeper node always holds a longer prefix, the
//! remembered value is the one of the longest matching prefix.
//!
//! The trie only grows: there is no removal of prefixes, and no
//! rebalancing. Both insertion and lookup take at most 32 steps.
mod node;

use log::trace;

use crate::types::addr::IPV4_BITS;
use crate::types::stats::TrieStats;
use node::TrieNode;

const TOP_BIT: u32 = 1 << (IPV4_BITS - 1);

//------------ PrefixTrie ----------------------------------------------------

/// A longest-prefix-match table, keyed on (address, mask) pairs.
///
/// The trie is not synchronized. Use the [Matcher](crate::Matcher) for a
/// handle that can be shared between threads.
pub struct PrefixTrie<V> {
    root: TrieNode<V>,
    stats: TrieStats,
}

impl<V> PrefixTrie<V> {
    /// Creates an empty trie, consisting of a root node without a value.
    pub fn new() -> Self {
        let mut stats = TrieStats::new();
        stats.inc(0);

        PrefixTrie {
            root: TrieNode::new(),
            stats,
        }
    }

    /// Stores `value` for the prefix made up of the bits of `addr` selected
    /// by `mask`, which must be a contiguous high-order mask. Bits of `addr`
    /// outside of the mask are ignored.
    ///
    /// If the prefix already had a value, it is overwritten, and the old
    /// value is returned. A mask of zero stores the value on the root, i.e.
    /// it becomes the default route.
    pub fn insert(&mut self, addr: u32, mask: u32, value: V) -> Option<V> {
        debug_assert_eq!(
            mask.leading_ones() + mask.trailing_zeros(),
            IPV4_BITS as u32,
            "mask {:032b} is not contiguous",
            mask
        );
        trace!("insert {:032b} mask {:032b}", addr, mask);

        let mut node = &mut self.root;
        let mut bit = TOP_BIT;
        let mut depth = 0_u8;

        while bit & mask != 0 {
            depth += 1;
            let (next, created) = node.child_or_insert(addr & bit != 0);
            if created {
                self.stats.inc(depth);
            }
            node = next;
            bit >>= 1;
        }

        let prev = node.value.replace(value);
        if prev.is_none() {
            trace!("new prefix at depth {}", depth);
            self.stats.inc_prefix_count(depth);
        }
        prev
    }

    /// Returns the value of the longest prefix that contains `addr`, or
    /// `None` if no inserted prefix contains it.
    pub fn find(&self, addr: u32) -> Option<&V> {
        self.find_longest(addr).map(|(_, value)| value)
    }

    /// Like [find](Self::find), but also returns the length of the prefix
    /// that matched.
    pub fn find_longest(&self, addr: u32) -> Option<(u8, &V)> {
        let mut node = &self.root;
        let mut best = node.value.as_ref().map(|value| (0, value));

        for depth in 1..=IPV4_BITS {
            let bit = TOP_BIT >> (depth - 1);
            match node.child(addr & bit != 0) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(value) = &node.value {
                best = Some((depth, value));
            }
        }

        trace!(
            "find {:032b} -> {:?}",
            addr,
            best.as_ref().map(|(len, _)| len)
        );
        best
    }

    /// Returns the value stored for exactly the prefix described by `addr`
    /// and `mask`, ignoring any shorter prefixes that contain it.
    pub fn find_exact(&self, addr: u32, mask: u32) -> Option<&V> {
        let mut node = &self.root;
        let mut bit = TOP_BIT;

        while bit & mask != 0 {
            node = node.child(addr & bit != 0)?;
            bit >>= 1;
        }

        node.value.as_ref()
    }

    /// The number of distinct prefixes that hold a value.
    pub fn prefixes_len(&self) -> usize {
        self.stats.prefixes_count()
    }

    /// The number of nodes in the trie, including the root.
    pub fn nodes_len(&self) -> usize {
        self.stats.nodes_count()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes_len() == 0
    }

    pub fn stats(&self) -> &TrieStats {
        &self.stats
    }
}

impl<V> Default for PrefixTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for PrefixTrie<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixTrie")
            .field("root", &self.root)
            .field("stats", &self.stats)
            .finish()
    }
}

//------------ Tests ---------------------------------------------------------
