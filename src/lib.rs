pub mod alphabet;
pub mod dictionary;
pub mod error;
pub mod text;

pub use crate::dictionary::{Dictionary, LoadOptions, LoadReport};
pub use crate::error::DictionaryError;
