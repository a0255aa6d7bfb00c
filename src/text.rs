/// Candidate words in free text.
///
/// A word is a run of ASCII letters and apostrophes that does not start with
/// an apostrophe. Runs longer than `max_len` are skipped whole, as are runs
/// touching a digit (up to the end of the alphanumeric run).
pub fn words(text: &str, max_len: usize) -> TextWords<'_> {
    TextWords {
        bytes: text.as_bytes(),
        pos: 0,
        max_len,
    }
}

pub struct TextWords<'a> {
    bytes: &'a [u8],
    pos: usize,
    max_len: usize,
}

impl<'a> TextWords<'a> {
    fn skip_while<F: Fn(u8) -> bool>(&mut self, f: F) {
        while self.pos < self.bytes.len() && f(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }
}

impl<'a> Iterator for TextWords<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.bytes;
        let mut start = None;
        while self.pos < bytes.len() {
            let c = bytes[self.pos];
            if c.is_ascii_alphabetic() || (c == b'\'' && start.is_some()) {
                let begin = *start.get_or_insert(self.pos);
                self.pos += 1;
                if self.pos - begin > self.max_len {
                    self.skip_while(|c| c.is_ascii_alphabetic());
                    start = None;
                }
            } else if c.is_ascii_digit() {
                self.skip_while(|c| c.is_ascii_alphanumeric());
                start = None;
            } else {
                self.pos += 1;
                if let Some(begin) = start {
                    return std::str::from_utf8(&bytes[begin..self.pos - 1]).ok();
                }
            }
        }

        // text ended mid-word
        start.and_then(|begin| std::str::from_utf8(&bytes[begin..]).ok())
    }
}
