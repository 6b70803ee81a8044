//! The configuration store: entry map, validity flag and typed accessors.

use std::fs;

use camino::Utf8Path;
use indexmap::IndexMap;

use crate::line::parse_line;
use crate::value::{parse_array, parse_sequence, FromEntry};

/// A loaded configuration file, held as unique `key -> value` string entries.
///
/// The store is populated once by [`ConfigStore::open`] (or again by
/// [`ConfigStore::reload`]) and is read-only afterwards, so sharing it across
/// threads by reference needs no synchronization. Malformed lines are skipped
/// during loading without an error; only the failure to open the file at all
/// is observable, through [`ConfigStore::is_valid`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    entries: IndexMap<String, String>,
    valid: bool,
}

impl ConfigStore {
    /// Open and load the configuration file at `path`.
    ///
    /// Never fails loudly: if the file cannot be read, the store is empty and
    /// [`ConfigStore::is_valid`] returns `false`, and every lookup on it
    /// comes back empty.
    pub fn open(path: impl AsRef<Utf8Path>) -> Self {
        let mut store = Self {
            entries: IndexMap::new(),
            valid: false,
        };
        store.reload(path);
        store
    }

    /// Discard all entries and load `path` from scratch.
    ///
    /// Callers sharing the store across threads must serialize this against
    /// all concurrent readers; the `&mut self` receiver enforces that within
    /// safe code.
    pub fn reload(&mut self, path: impl AsRef<Utf8Path>) {
        let path = path.as_ref();
        self.entries.clear();
        self.valid = false;

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(%path, %err, "configuration file could not be opened");
                return;
            }
        };
        self.valid = true;

        // `str::lines` splits on `\n` and tolerates a trailing `\r`.
        for raw in content.lines() {
            match parse_line(raw) {
                Some((key, value)) => {
                    // Last occurrence of a key wins.
                    self.entries.insert(key, value);
                }
                None => tracing::trace!(line = raw, "skipped line without key=value pair"),
            }
        }
    }

    /// Whether the backing file was successfully opened.
    ///
    /// A file that opened but contained no parseable entries still counts as
    /// valid.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stored keys, in the order their last occurrence appeared.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The raw stored value for `key`, unmodified.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Parse the value stored under `key` as a `T`.
    ///
    /// Returns `None` if the key is absent, the value does not fully parse as
    /// `T`, or the parsed value is out of `T`'s range; see [`FromEntry`] for
    /// the exact rules.
    pub fn get_as<T: FromEntry>(&self, key: &str) -> Option<T> {
        T::from_entry(self.entries.get(key)?)
    }

    /// Parse the value stored under `key` as a comma-separated sequence.
    ///
    /// Every element must parse as `T`; one bad element fails the whole call
    /// and no partial result is returned.
    pub fn get_sequence<T: FromEntry>(&self, key: &str) -> Option<Vec<T>> {
        parse_sequence(self.entries.get(key)?)
    }

    /// Parse the first `N` comma-separated elements stored under `key`.
    ///
    /// Extra elements beyond `N` are ignored; fewer than `N` elements, or a
    /// parse failure among the first `N`, fails the call.
    pub fn get_array<T: FromEntry, const N: usize>(&self, key: &str) -> Option<[T; N]> {
        parse_array(self.entries.get(key)?)
    }

    /// Parse the value under `key` into `destination`.
    ///
    /// On failure `destination` is left untouched and `false` is returned.
    pub fn read_into<T: FromEntry>(&self, key: &str, destination: &mut T) -> bool {
        match self.get_as(key) {
            Some(value) => {
                *destination = value;
                true
            }
            None => false,
        }
    }

    /// Parse the first `N` comma-separated elements under `key` into
    /// `destination`.
    ///
    /// All-or-nothing: the elements are parsed into a complete array first,
    /// so on failure `destination` is never partially overwritten.
    pub fn read_into_array<T: FromEntry, const N: usize>(
        &self,
        key: &str,
        destination: &mut [T; N],
    ) -> bool {
        match self.get_array(key) {
            Some(values) => {
                *destination = values;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn store_from(content: &str) -> ConfigStore {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();
        ConfigStore::open(path)
    }

    #[test]
    fn open_missing_file() {
        let store = ConfigStore::open("/nonexistent/conf.txt");
        assert!(!store.is_valid());
        assert!(store.is_empty());
        assert_eq!(store.get_string("anything"), None);
        assert_eq!(store.get_as::<i32>("anything"), None);
    }

    #[test]
    fn open_empty_file_is_valid() {
        let store = store_from("");
        assert!(store.is_valid());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let store = store_from("novalue\n=onlyvalue\nonlykey=\na=1\n");
        assert!(store.is_valid());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_string("a"), Some("1"));
    }

    #[test]
    fn last_occurrence_of_a_key_wins() {
        let store = store_from("a=1\nb=2\na=3\n");
        assert_eq!(store.get_string("a"), Some("3"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn crlf_line_endings() {
        let store = store_from("a=1\r\nb=2\r\n");
        assert_eq!(store.get_string("a"), Some("1"));
        assert_eq!(store.get_string("b"), Some("2"));
    }

    #[test]
    fn reload_clears_previous_entries() {
        let mut store = store_from("a=1\n");
        assert!(store.is_valid());

        let mut other = NamedTempFile::new().unwrap();
        write!(other, "b=2\n").unwrap();
        store.reload(Utf8Path::from_path(other.path()).unwrap());

        assert!(store.is_valid());
        assert_eq!(store.get_string("a"), None);
        assert_eq!(store.get_string("b"), Some("2"));
    }

    #[test]
    fn reload_of_missing_file_invalidates() {
        let mut store = store_from("a=1\n");
        store.reload("/nonexistent/conf.txt");
        assert!(!store.is_valid());
        assert!(store.is_empty());
        assert_eq!(store.get_string("a"), None);
    }

    #[test]
    fn read_into_leaves_destination_on_failure() {
        let store = store_from("good=7\nbad=x\n");
        let mut value = 42_i32;
        assert!(!store.read_into("bad", &mut value));
        assert_eq!(value, 42);
        assert!(!store.read_into("missing", &mut value));
        assert_eq!(value, 42);
        assert!(store.read_into("good", &mut value));
        assert_eq!(value, 7);
    }

    #[test]
    fn read_into_array_is_all_or_nothing() {
        let store = store_from("ok=1,2,3\npartial=1,2,x\nshort=1,2\n");
        let mut values = [9_i32; 3];
        assert!(!store.read_into_array("partial", &mut values));
        assert_eq!(values, [9, 9, 9]);
        assert!(!store.read_into_array("short", &mut values));
        assert_eq!(values, [9, 9, 9]);
        assert!(store.read_into_array("ok", &mut values));
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn keys_reflect_stored_entries() {
        let store = store_from("a=1\nb=2\n# comment only\n");
        let keys: Vec<_> = store.keys().collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
