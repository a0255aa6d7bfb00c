pub mod dictionary;
pub mod index;
pub mod trie;

pub use self::dictionary::{Dictionary, LoadOptions, LoadReport};
