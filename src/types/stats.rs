//------------ Types for Statistics -----------------------------------------

use std::fmt::{Debug, Display};

use crate::types::addr::IPV4_BITS;

/// Counters for a prefix trie, kept per depth level. Depth level `n` holds
/// the nodes reached after consuming `n` bits, and thus the prefixes of
/// length `n`.
#[derive(Clone)]
pub struct TrieStats {
    pub(crate) created_nodes: Vec<CreatedNodes>,
    pub(crate) prefixes_num: Vec<CreatedNodes>,
}

impl TrieStats {
    pub fn new() -> Self {
        Self {
            created_nodes: Self::nodes_vec(IPV4_BITS + 1),
            prefixes_num: Self::nodes_vec(IPV4_BITS + 1),
        }
    }

    fn nodes_vec(num_depth_levels: u8) -> Vec<CreatedNodes> {
        (0..num_depth_levels)
            .map(|depth_level| CreatedNodes {
                depth_level,
                count: 0,
            })
            .collect()
    }

    pub(crate) fn inc(&mut self, depth_level: u8) {
        if let Some(n) = self.created_nodes.get_mut(depth_level as usize) {
            n.count += 1
        }
    }

    pub(crate) fn inc_prefix_count(&mut self, depth_level: u8) {
        if let Some(p) = self.prefixes_num.get_mut(depth_level as usize) {
            p.count += 1;
        }
    }

    /// The total number of nodes in the trie, including the root.
    pub fn nodes_count(&self) -> usize {
        self.created_nodes.iter().map(|n| n.count).sum()
    }

    /// The total number of distinct prefixes that carry a value.
    pub fn prefixes_count(&self) -> usize {
        self.prefixes_num.iter().map(|p| p.count).sum()
    }

    /// The nodes created at each depth level.
    pub fn created_nodes(&self) -> &[CreatedNodes] {
        &self.created_nodes
    }

    /// The prefixes stored for each prefix length.
    pub fn prefixes_per_len(&self) -> &[CreatedNodes] {
        &self.prefixes_num
    }
}

impl Default for TrieStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for TrieStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrieStats")
            .field("created_nodes", &self.created_nodes)
            .field("prefixes_num", &self.prefixes_num)
            .finish()
    }
}

impl Display for TrieStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "nodes:{:>8} prefixes:{:>8}",
            self.nodes_count(),
            self.prefixes_count()
        )?;
        // Only print the levels that have anything on them.
        for (n, p) in self.created_nodes.iter().zip(&self.prefixes_num) {
            if n.count > 0 {
                writeln!(f, "{:?}\t{} prefixes", n, p.count)?;
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct CreatedNodes {
    pub depth_level: u8,
    pub count: usize,
}

impl Debug for CreatedNodes {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_fmt(format_args!("/{}: {}", &self.depth_level, &self.count))
    }
}
