//! Patch application engines and the per-run orchestrator.

mod offset;
mod pattern;

pub use offset::offset_apply;
pub use pattern::pattern_apply;

use std::path::Path;

use tracing::debug;

use crate::defs::{OffsetPatch, PatchingResult, PatternPatch};

/// Apply every patch to the executable, best effort.
///
/// Pattern patches run first in load order, then offset patches in load
/// order, one `PatchingResult` per patch in that combined order. A failed
/// patch never prevents the remaining ones from being attempted.
pub fn apply_patches<P: AsRef<Path>>(
    exe_path: P,
    pattern_patches: &[PatternPatch],
    offset_patches: &[OffsetPatch],
) -> Vec<PatchingResult> {
    let exe_path = exe_path.as_ref();
    let mut results = Vec::with_capacity(pattern_patches.len() + offset_patches.len());

    for patch in pattern_patches {
        debug!("Applying pattern patch '{}'", patch.description);
        results.push(PatchingResult {
            description: patch.description.clone(),
            success: pattern_apply(exe_path, patch),
        });
    }

    for patch in offset_patches {
        debug!("Applying offset patch '{}'", patch.description);
        results.push(PatchingResult {
            description: patch.description.clone(),
            success: offset_apply(exe_path, patch),
        });
    }

    results
}
