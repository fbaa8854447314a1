//! Whole-file content hashing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::Result;

const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// MD5 over the full file contents, hex lowercase.
///
/// Streams the file through the hasher in fixed-size reads; the file is
/// never loaded whole.
pub fn md5_of_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

    loop {
        let count = file.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        hasher.update(&buffer[..count]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_md5_of_known_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        file.flush().unwrap();

        let hash = md5_of_file(file.path()).unwrap();
        assert_eq!(hash, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_md5_of_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let hash = md5_of_file(file.path()).unwrap();
        assert_eq!(hash, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(md5_of_file("/nonexistent/path/game.exe").is_err());
    }
}
