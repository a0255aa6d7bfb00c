use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("could not open word source {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed reading word source: {0}")]
    Read(#[from] io::Error),
    #[error("invalid character {byte:#04x} at position {position} in {word:?}")]
    InvalidCharacter {
        word: String,
        byte: u8,
        position: usize,
    },
    #[error("cannot insert an empty word")]
    EmptyWord,
    #[error("word {word:?} is {length} bytes long, longer than the maximum of {max}")]
    WordTooLong {
        word: String,
        length: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, DictionaryError>;
