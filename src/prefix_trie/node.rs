use std::fmt::Debug;

//------------ TrieNode ------------------------------------------------------

// A node in the binary prefix trie. A node does not know its own position:
// that is the path of left (0) and right (1) decisions taken from the root
// to reach it, and its depth is the length of that path. A node without a
// value only exists as a stepping stone to a longer prefix, and must never
// satisfy a match by itself.
pub(crate) struct TrieNode<V> {
    pub left: Option<Box<TrieNode<V>>>,
    pub right: Option<Box<TrieNode<V>>>,
    pub value: Option<V>,
}

impl<V> TrieNode<V> {
    pub(crate) fn new() -> Self {
        TrieNode {
            left: None,
            right: None,
            value: None,
        }
    }

    // The child to descend to for `bit` at this node's depth: right on a one
    // bit, left on a zero bit.
    pub(crate) fn child(&self, bit: bool) -> Option<&TrieNode<V>> {
        if bit {
            self.right.as_deref()
        } else {
            self.left.as_deref()
        }
    }

    // Like `child`, but mutable, and creates the child if it is absent. The
    // returned flag is true if the node was created.
    pub(crate) fn child_or_insert(
        &mut self,
        bit: bool,
    ) -> (&mut TrieNode<V>, bool) {
        let slot = if bit { &mut self.right } else { &mut self.left };
        let created = slot.is_none();
        let child = slot.get_or_insert_with(|| Box::new(TrieNode::new()));
        (child.as_mut(), created)
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for TrieNode<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrieNode")
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .field("value", &self.value)
            .finish()
    }
}
