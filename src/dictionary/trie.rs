pub mod trie;

mod haschildren;
mod node;

pub use self::trie::Trie;
