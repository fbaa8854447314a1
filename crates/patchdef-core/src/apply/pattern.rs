//! Streaming byte-pattern locate-and-overwrite.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::defs::PatternPatch;

/// Read buffer capacity for the streaming scan.
const SCAN_BUFFER_SIZE: usize = 8 * 1024;

/// Locate the first occurrence of `patch.pattern` in the file and overwrite
/// bytes starting at the match with `patch.patch_byte_array`.
///
/// Best effort: pattern absent, replacement running past end of file, and
/// I/O trouble are all reported as `false`, never as a panic or error.
pub fn pattern_apply<P: AsRef<Path>>(path: P, patch: &PatternPatch) -> bool {
    match try_pattern_apply(path.as_ref(), patch) {
        Ok(applied) => applied,
        Err(e) => {
            debug!("Pattern patch '{}' failed: {}", patch.description, e);
            false
        }
    }
}

fn try_pattern_apply(path: &Path, patch: &PatternPatch) -> std::io::Result<bool> {
    if patch.pattern.is_empty() || patch.patch_byte_array.is_empty() {
        return Ok(false);
    }

    let mut exe = OpenOptions::new().read(true).write(true).open(path)?;
    let file_size = exe.metadata()?.len();

    let Some(start) = find_pattern_start(&mut exe, &patch.pattern)? else {
        return Ok(false);
    };

    // The replacement need not be the same length as the pattern; it only
    // has to stay within the file.
    if start + patch.patch_byte_array.len() as u64 > file_size {
        return Ok(false);
    }

    exe.seek(SeekFrom::Start(start))?;
    exe.write_all(&patch.patch_byte_array)?;
    Ok(true)
}

/// Single forward pass over `reader` looking for `pattern`.
///
/// The count of consecutively matched pattern bytes persists across buffer
/// refills. On a mismatch the count resets to zero and scanning continues
/// with the next byte; a candidate match overlapping the tail of a failed
/// one is not revisited (naive sequential matcher, no backtracking). Every
/// refill requests the buffer's full capacity and only the bytes actually
/// read are compared, so a short read never shrinks the scan window or
/// skips file bytes.
///
/// Returns the absolute file offset of the match start.
fn find_pattern_start<R: Read>(reader: &mut R, pattern: &[u8]) -> std::io::Result<Option<u64>> {
    let mut buffer = vec![0u8; SCAN_BUFFER_SIZE];
    let mut matched = 0usize;
    // Absolute offset of the byte currently being examined.
    let mut position = 0u64;

    loop {
        let count = reader.read(&mut buffer)?;
        if count == 0 {
            return Ok(None);
        }

        for &byte in &buffer[..count] {
            if byte == pattern[matched] {
                matched += 1;
                if matched == pattern.len() {
                    return Ok(Some(position + 1 - pattern.len() as u64));
                }
            } else {
                matched = 0;
            }
            position += 1;
        }
    }
}
