//! SHA-256 content digests of archive artifacts.

use sha2::Digest;
use sha2::Sha256;
use std::fmt;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-256 digest of an archive file.
///
/// # Examples
///
/// ```
/// use zipmover_core::ContentHash;
///
/// let hash = ContentHash::of_bytes(b"");
/// assert_eq!(
///     hash.as_str(),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Length of the hex representation.
    pub const HEX_LEN: usize = 64;

    /// Digests an in-memory byte slice.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    /// Digests everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading.
    pub fn of_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..n]);
        }

        Ok(Self(hex::encode(hasher.finalize())))
    }

    /// Digests the full contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn of_file(path: &Path) -> io::Result<Self> {
        Self::of_reader(File::open(path)?)
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_known_digest() {
        let hash = ContentHash::of_bytes(b"Hello World");
        assert_eq!(
            hash.as_str(),
            "a591a6d40bf420404a011733cfb7b190d62c65bf0bcda32b57b277d9ad9f146e"
        );
        assert_eq!(hash.as_str().len(), ContentHash::HEX_LEN);
    }

    #[test]
    fn test_reader_matches_bytes() {
        let data = vec![7u8; HASH_BUFFER_SIZE * 2 + 13];
        let streamed = ContentHash::of_reader(Cursor::new(&data)).unwrap();
        assert_eq!(streamed, ContentHash::of_bytes(&data));
    }

    #[test]
    fn test_of_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob");
        std::fs::write(&path, b"modified content").unwrap();

        let hash = ContentHash::of_file(&path).unwrap();
        assert_eq!(hash, ContentHash::of_bytes(b"modified content"));
        assert_eq!(hash.to_string(), hash.as_str());
    }

    #[test]
    fn test_of_file_missing() {
        let temp = TempDir::new().unwrap();
        let result = ContentHash::of_file(&temp.path().join("missing"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let hash = ContentHash::of_bytes(b"Foo Bar");
        assert!(
            hash.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }
}
