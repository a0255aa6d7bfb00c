/// Number of child slots per node: the full 7-bit range, so punctuation
/// such as apostrophes gets a branch of its own.
pub const ALPHABET_SIZE: usize = 128;

/// Longest word the dictionary accepts.
pub const MAX_WORD_LENGTH: usize = 45;

/// Translates a byte into a child slot, or `None` if it falls outside the alphabet.
pub fn get_idx(c: u8) -> Option<usize> {
    let idx = c as usize;
    if idx < ALPHABET_SIZE {
        Some(idx)
    } else {
        None
    }
}

/// ASCII uppercase; every other byte passes through unchanged.
///
/// Must run identically before inserting and before looking up, or
/// lookups silently miss.
pub fn normalize(s: &str) -> String {
    s.to_ascii_uppercase()
}
