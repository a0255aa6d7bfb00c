use std::fmt::{Debug, Formatter};

use tracing::debug;

use crate::alphabet::{get_idx, ALPHABET_SIZE};
use crate::dictionary::index::Index;
use crate::dictionary::trie::node::{Slot, TrieNode, EMPTY_SLOT};
use crate::error::{DictionaryError, Result};

/// Prefix tree over pre-normalized words, one root slot per first character.
///
/// The root slots play the part of a single root node's children, which
/// saves one indirection on every lookup.
///
/// `len` counts completed inserts, not distinct words: inserting a word that
/// is already present marks the same terminal node again but still bumps the
/// count. `clear` reconciles the count back to zero.
pub struct Trie {
    roots: [Slot; ALPHABET_SIZE],
    word_count: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}

impl Trie {
    pub fn new() -> Trie {
        Trie {
            roots: [EMPTY_SLOT; ALPHABET_SIZE],
            word_count: 0,
        }
    }

    /// Inserts an already normalized word.
    ///
    /// The whole word is validated before the tree is touched. Missing nodes
    /// are built as a detached chain and attached in a single assignment,
    /// so a failed insert leaves no partial path behind.
    pub fn insert(&mut self, word: &str) -> Result<()> {
        let path = ordinals(word)?;

        let mut slot = &mut self.roots[path[0]];
        let mut consumed = 1;
        while let Some(node) = slot {
            if consumed == path.len() {
                node.is_terminal = true;
                self.word_count += 1;
                return Ok(());
            }
            slot = &mut node.children[path[consumed]];
            consumed += 1;
        }

        *slot = Some(TrieNode::chain(&path[consumed..]));
        self.word_count += 1;
        Ok(())
    }

    /// Membership of an already normalized word. Never allocates.
    pub fn contains(&self, word: &str) -> bool {
        self.get_node(word).map(|x| x.is_terminal).unwrap_or(false)
    }

    fn get_node(&self, word: &str) -> Option<&TrieNode> {
        let (&first, rest) = word.as_bytes().split_first()?;
        let mut current = self.roots[get_idx(first)?].as_deref()?;
        for &c in rest {
            current = current.get_child(get_idx(c)?)?;
        }
        Some(current)
    }

    pub fn size(&self) -> usize {
        self.word_count
    }

    /// Releases every node, children before their parent, and returns how
    /// many nodes were released.
    ///
    /// The word count drops by one per terminal node released; whatever
    /// remains afterwards is surplus from re-inserted words and is reset.
    /// Clearing an empty trie is a no-op.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        for root in self.roots.iter_mut() {
            let mut stack: Vec<Box<TrieNode>> = root.take().into_iter().collect();
            while let Some(top) = stack.last_mut() {
                if let Some(child) = top.take_next_child() {
                    stack.push(child);
                    continue;
                }
                if let Some(node) = stack.pop() {
                    if node.is_terminal {
                        self.word_count = self.word_count.saturating_sub(1);
                    }
                    released += 1;
                }
            }
        }

        if self.word_count != 0 {
            debug!(surplus = self.word_count, "reconciling word count after teardown");
            self.word_count = 0;
        }
        released
    }

    /// Number of allocated nodes, root slots included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.roots.iter()
            .filter_map(|x| x.as_deref())
            .for_each(|root| root.traverse_prefix(&mut |_| count += 1));
        count
    }
}

/// Child-slot indices for each byte of `word`, or the reason it cannot be stored.
fn ordinals(word: &str) -> Result<Vec<usize>> {
    if word.is_empty() {
        return Err(DictionaryError::EmptyWord);
    }
    word.bytes()
        .enumerate()
        .map(|(position, byte)| get_idx(byte).ok_or_else(|| DictionaryError::InvalidCharacter {
            word: word.to_string(),
            byte,
            position,
        }))
        .collect()
}

impl Index for Trie {
    fn add(&mut self, word: &str) -> Result<()> {
        self.insert(word)
    }

    fn contains(&self, word: &str) -> bool {
        Trie::contains(self, word)
    }

    fn len(&self) -> usize {
        self.word_count
    }
}

impl Drop for Trie {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Debug for Trie {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut l = f.debug_list();
        let mut stack: Vec<&TrieNode> = self.roots.iter().filter_map(|x| x.as_deref()).collect();
        while let Some(x) = stack.pop() {
            l.entry(&x);
            stack.extend(x.children());
        }
        l.finish()
    }
}
