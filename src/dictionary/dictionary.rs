use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use delegate::delegate;
use derive_new::new;
use metrics::{counter, gauge};
use serde::Serialize;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use crate::alphabet::{normalize, MAX_WORD_LENGTH};
use crate::dictionary::index::Index;
use crate::dictionary::trie::Trie;
use crate::error::{DictionaryError, Result};

/// How tokens from a word source are accepted.
#[derive(TypedBuilder, Debug, Clone)]
pub struct LoadOptions {
    #[builder(default = MAX_WORD_LENGTH)]
    pub max_word_length: usize,
    /// Abort the load on the first rejected token instead of skipping it.
    #[builder(default)]
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions::builder().build()
    }
}

/// Outcome of reading one word source.
#[derive(new, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub inserted: usize,
    pub rejected: usize,
}

/// A spell-check dictionary: owns the trie and the options it was loaded with.
#[derive(Debug, Default)]
pub struct Dictionary {
    trie: Trie,
    options: LoadOptions,
}

impl Dictionary {
    pub fn new(options: LoadOptions) -> Dictionary {
        Dictionary {
            trie: Trie::new(),
            options,
        }
    }

    delegate! {
        to self.trie {
            pub fn size(&self) -> usize;
            pub fn node_count(&self) -> usize;
        }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Loads every word in the file at `path`. False only if the file could
    /// not be read; an empty file still loads.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match self.try_load(path) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "dictionary load failed");
                false
            }
        }
    }

    pub fn try_load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DictionaryError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let start = Instant::now();
        let report = self.load_from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            inserted = report.inserted,
            rejected = report.rejected,
            size = self.size(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded dictionary"
        );
        Ok(report)
    }

    /// Reads whitespace-separated tokens until end of stream, normalizing
    /// and inserting each one.
    pub fn load_from_reader<R: BufRead>(&mut self, mut reader: R) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            let read = match reader.read_until(b'\n', &mut line) {
                Ok(read) => read,
                Err(e) => {
                    self.record(&report);
                    return Err(e.into());
                }
            };
            if read == 0 {
                break;
            }
            for token in line.split(is_separator).filter(|x| !x.is_empty()) {
                match self.add_token(token) {
                    Ok(()) => report.inserted += 1,
                    Err(e) if !self.options.strict => {
                        warn!(error = %e, "skipping word");
                        report.rejected += 1;
                    }
                    Err(e) => {
                        self.record(&report);
                        return Err(e);
                    }
                }
            }
        }

        self.record(&report);
        Ok(report)
    }

    fn add_token(&mut self, token: &[u8]) -> Result<()> {
        let word = String::from_utf8_lossy(token);
        if token.len() > self.options.max_word_length {
            return Err(DictionaryError::WordTooLong {
                word: word.into_owned(),
                length: token.len(),
                max: self.options.max_word_length,
            });
        }
        if let Some(position) = token.iter().position(|c| !c.is_ascii()) {
            return Err(DictionaryError::InvalidCharacter {
                word: word.into_owned(),
                byte: token[position],
                position,
            });
        }
        self.trie.add(&normalize(&word))
    }

    fn record(&self, report: &LoadReport) {
        counter!("speller_words_loaded", report.inserted as u64);
        counter!("speller_words_rejected", report.rejected as u64);
        gauge!("speller_dictionary_size", self.size() as f64);
    }

    /// Case-insensitive membership. Anything that could never have been
    /// loaded (empty, too long, non-ASCII) is simply not found.
    pub fn check(&self, word: &str) -> bool {
        if word.is_empty() || word.len() > self.options.max_word_length {
            return false;
        }
        self.trie.contains(&normalize(word))
    }

    /// Releases every node. Always succeeds.
    pub fn unload(&mut self) -> bool {
        let released = self.trie.clear();
        counter!("speller_nodes_released", released as u64);
        debug!(released, "unloaded dictionary");
        true
    }
}

/// Whitespace as C's `isspace` sees it, which includes vertical tab.
fn is_separator(c: &u8) -> bool {
    c.is_ascii_whitespace() || *c == b'\x0b'
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{self, BufReader, Cursor, Read};
    use std::path::PathBuf;

    use crate::dictionary::dictionary::{Dictionary, LoadOptions, LoadReport};
    use crate::error::DictionaryError;

    fn temp_word_list(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("speller-{}-{}.txt", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn loaded(words: &str) -> Dictionary {
        let mut dict = Dictionary::default();
        dict.load_from_reader(Cursor::new(words.as_bytes().to_vec())).unwrap();
        dict
    }

    #[test]
    fn checks_case_insensitively() {
        let dict = loaded("hello\nWorld\n");
        assert!(dict.check("HELLO"));
        assert!(dict.check("hello"));
        assert!(dict.check("HeLLo"));
        assert!(dict.check("world"));
        assert!(!dict.check("help"));
    }

    #[test]
    fn case_variants_share_a_path_but_count_twice() {
        let mut dict = Dictionary::default();
        let report = dict
            .load_from_reader(Cursor::new(b"apple\nApple\nbanana\n".to_vec()))
            .unwrap();

        assert_eq!(report, LoadReport::new(3, 0));
        assert_eq!(dict.size(), 3);
        assert!(dict.check("APPLE"));
        assert!(dict.check("BANANA"));
        assert!(!dict.check("banan"));
    }

    #[test]
    fn distinct_words_are_counted_once_each() {
        let dict = loaded("a\nan\nand\nant\nantelope\n");
        assert_eq!(dict.size(), 5);
    }

    #[test]
    fn tokens_split_on_any_whitespace() {
        let dict = loaded("  cat dog\t\tbird\r\n\n\nfish");
        assert_eq!(dict.size(), 4);
        assert!(dict.check("bird"));
        assert!(dict.check("fish"));
    }

    #[test]
    fn vertical_tab_and_form_feed_separate_words() {
        let dict = loaded("cat\x0bdog\x0cbird");
        assert_eq!(dict.size(), 3);
        assert!(dict.check("cat"));
        assert!(dict.check("dog"));
        assert!(dict.check("bird"));
    }

    #[test]
    fn empty_source_loads_nothing() {
        let dict = loaded("");
        assert_eq!(dict.size(), 0);
        assert!(!dict.check("anything"));
    }

    #[test]
    fn skips_bad_tokens_and_keeps_going() {
        let long = "x".repeat(46);
        let mut dict = Dictionary::default();
        let source = format!("good\ncaf\u{e9}\n{}\nfine\n", long);
        let report = dict.load_from_reader(Cursor::new(source.into_bytes())).unwrap();

        assert_eq!(report, LoadReport::new(2, 2));
        assert!(dict.check("good"));
        assert!(dict.check("fine"));
        assert!(!dict.check("caf\u{e9}"));
        assert!(!dict.check(&long));
    }

    #[test]
    fn invalid_utf8_is_rejected_not_fatal() {
        let mut dict = Dictionary::default();
        let report = dict
            .load_from_reader(Cursor::new(b"ok\n\xff\xfe\nalso\n".to_vec()))
            .unwrap();
        assert_eq!(report, LoadReport::new(2, 1));
    }

    #[test]
    fn strict_mode_stops_at_first_bad_token() {
        let mut dict = Dictionary::new(LoadOptions::builder().strict(true).build());
        let result = dict.load_from_reader(Cursor::new(b"one\ntw\xc3\xb6\nthree\n".to_vec()));

        match result {
            Err(DictionaryError::InvalidCharacter { byte, position, .. }) => {
                assert_eq!(byte, 0xc3);
                assert_eq!(position, 2);
            }
            other => panic!("expected InvalidCharacter, got {:?}", other),
        }
        assert!(dict.check("one"));
        assert!(!dict.check("three"));
    }

    #[test]
    fn respects_configured_word_length() {
        let mut dict = Dictionary::new(LoadOptions::builder().max_word_length(4).build());
        let report = dict.load_from_reader(Cursor::new(b"tiny\nlonger\n".to_vec())).unwrap();
        assert_eq!(report, LoadReport::new(1, 1));
        assert!(dict.check("tiny"));
        assert!(!dict.check("longer"));
    }

    #[test]
    fn unload_clears_every_word() {
        let mut dict = loaded("apple\nbanana\ncherry\n");
        assert!(dict.unload());
        assert_eq!(dict.size(), 0);
        assert_eq!(dict.node_count(), 0);
        assert!(!dict.check("apple"));
        assert!(dict.unload());
    }

    #[test]
    fn loads_from_file() {
        let path = temp_word_list("load", "cat\ndog\n");
        let mut dict = Dictionary::default();
        assert!(dict.load(&path));
        assert_eq!(dict.size(), 2);
        assert!(dict.check("Cat"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn empty_file_still_loads() {
        let path = temp_word_list("empty", "");
        let mut dict = Dictionary::default();
        assert!(dict.load(&path));
        assert_eq!(dict.size(), 0);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_fails_and_leaves_dictionary_empty() {
        let mut path = std::env::temp_dir();
        path.push("speller-does-not-exist/words.txt");

        let mut dict = Dictionary::default();
        assert!(!dict.load(&path));
        assert_eq!(dict.size(), 0);
        assert!(matches!(
            dict.try_load(&path),
            Err(DictionaryError::SourceUnavailable { .. })
        ));
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk went away"))
        }
    }

    #[test]
    fn read_failure_keeps_words_read_so_far() {
        let mut dict = Dictionary::default();
        let source = BufReader::new(Cursor::new(b"first\n".to_vec()).chain(Broken));

        assert!(matches!(
            dict.load_from_reader(source),
            Err(DictionaryError::Read(_))
        ));
        assert_eq!(dict.size(), 1);
        assert!(dict.check("first"));
    }

    #[test]
    fn check_rejects_what_could_never_be_stored() {
        let dict = loaded("word\n");
        assert!(!dict.check(""));
        assert!(!dict.check(&"w".repeat(100)));
        assert!(!dict.check("w\u{f6}rd"));
    }
}
