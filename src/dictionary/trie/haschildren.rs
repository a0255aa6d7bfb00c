use crate::dictionary::trie::node::TrieNode;

impl TrieNode {
    /// Detaches the lowest-indexed child still attached, if any.
    pub(crate) fn take_next_child(&mut self) -> Option<Box<TrieNode>> {
        self.children.iter_mut().find_map(Option::take)
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = &TrieNode> {
        self.children.iter().filter_map(|x| x.as_deref())
    }

    /// Visits `self` and every descendant, parents before children.
    /// Uses an explicit stack so depth is bounded by the heap, not the call stack.
    pub(crate) fn traverse_prefix<'f, F>(&'f self, f: &mut F)
        where F: FnMut(&'f TrieNode) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            f(node);
            stack.extend(node.children());
        }
    }
}
