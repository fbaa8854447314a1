//! Bounds-checked direct overwrite at a fixed file position.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::defs::OffsetPatch;

/// Overwrite `patch.patch_byte_array` at `patch.offset`.
///
/// The write must fit entirely within the current file size; on violation
/// nothing is written and `false` is returned. I/O trouble is likewise
/// reported as `false`.
pub fn offset_apply<P: AsRef<Path>>(path: P, patch: &OffsetPatch) -> bool {
    match try_offset_apply(path.as_ref(), patch) {
        Ok(applied) => applied,
        Err(e) => {
            debug!("Offset patch '{}' failed: {}", patch.description, e);
            false
        }
    }
}

fn try_offset_apply(path: &Path, patch: &OffsetPatch) -> std::io::Result<bool> {
    if patch.patch_byte_array.is_empty() {
        return Ok(false);
    }

    let mut exe = OpenOptions::new().read(true).write(true).open(path)?;
    let file_size = exe.metadata()?.len();

    let end = patch
        .offset
        .checked_add(patch.patch_byte_array.len() as u64);
    match end {
        Some(end) if end <= file_size => {}
        _ => return Ok(false),
    }

    exe.seek(SeekFrom::Start(patch.offset))?;
    exe.write_all(&patch.patch_byte_array)?;
    Ok(true)
}
