use std::fmt::{Debug, Formatter};

use crate::alphabet::ALPHABET_SIZE;

pub(crate) type Slot = Option<Box<TrieNode>>;

pub(crate) const EMPTY_SLOT: Slot = None;

pub(crate) struct TrieNode {
    pub(crate) children: [Slot; ALPHABET_SIZE],
    pub(crate) is_terminal: bool,
}

impl Default for TrieNode {
    fn default() -> Self {
        TrieNode {
            children: [EMPTY_SLOT; ALPHABET_SIZE],
            is_terminal: false,
        }
    }
}

impl TrieNode {
    fn terminal() -> TrieNode {
        TrieNode {
            is_terminal: true,
            ..Default::default()
        }
    }

    /// Builds the detached path for `rest`: the returned node stands for the
    /// first missing character, its descendants follow `rest`, and the last
    /// one is terminal. Nothing is attached to a live tree here.
    pub(crate) fn chain(rest: &[usize]) -> Box<TrieNode> {
        let mut node = Box::new(TrieNode::terminal());
        for &idx in rest.iter().rev() {
            let mut parent = Box::new(TrieNode::default());
            parent.children[idx] = Some(node);
            node = parent;
        }
        node
    }

    pub(crate) fn get_child(&self, idx: usize) -> Option<&TrieNode> {
        self.children.get(idx).and_then(|x| x.as_deref())
    }
}

impl Debug for TrieNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrieNode")
            .field("is_terminal", &self.is_terminal)
            .field("children", &self.children.iter()
                .enumerate()
                .filter(|(_, x)| x.is_some())
                .map(|(idx, _)| idx as u8 as char)
                .collect::<Vec<_>>(),
            )
            .finish()
    }
}
