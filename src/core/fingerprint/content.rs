//! Exact-match content hashing.

use std::fs;
use std::path::Path;

/// Compute the blake3 digest of a file's raw bytes as a 64-character
/// lowercase hex string.
///
/// Returns an empty string when the file cannot be read. Callers treat the
/// empty string as "digest unavailable": such records can still match on
/// their perceptual hash but never form an exact-duplicate group.
pub fn content_digest(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => blake3::hash(&bytes).to_hex().to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn digest_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.bin");
        std::fs::write(&path, b"some image bytes").unwrap();

        assert_eq!(content_digest(&path), content_digest(&path));
    }

    #[test]
    fn digest_is_fixed_width_hex() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.bin");
        std::fs::write(&path, b"content").unwrap();

        let digest = content_digest(&path);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn identical_content_identical_digest() {
        let temp_dir = TempDir::new().unwrap();
        let path_a = temp_dir.path().join("a.bin");
        let path_b = temp_dir.path().join("b.bin");
        std::fs::write(&path_a, b"same bytes").unwrap();
        std::fs::write(&path_b, b"same bytes").unwrap();

        assert_eq!(content_digest(&path_a), content_digest(&path_b));
    }

    #[test]
    fn different_content_different_digest() {
        let temp_dir = TempDir::new().unwrap();
        let path_a = temp_dir.path().join("a.bin");
        let path_b = temp_dir.path().join("b.bin");

        let mut file = std::fs::File::create(&path_a).unwrap();
        file.write_all(b"first").unwrap();
        let mut file = std::fs::File::create(&path_b).unwrap();
        file.write_all(b"second").unwrap();

        assert_ne!(content_digest(&path_a), content_digest(&path_b));
    }

    #[test]
    fn unreadable_file_returns_empty_sentinel() {
        let digest = content_digest(Path::new("/nonexistent/file.jpg"));
        assert!(digest.is_empty());
    }
}
