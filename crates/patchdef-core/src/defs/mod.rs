//! Patch definition model and parser.
//!
//! A definitions file declares game builds (identified by the MD5 of their
//! executable) and the patches that apply to them. Parsing is keyed to one
//! target checksum: only the build whose declared checksum matches is
//! materialized, together with the patches whose groups it accepts.

mod parser;

pub use parser::{load_patch_defs, parse_defs};

use strum::EnumString;

/// Which locating strategy a patch line declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PatchKind {
    Pattern,
    Offset,
}

/// A patch located by searching the executable for a byte sequence.
///
/// The replacement is written at the first occurrence of `pattern`. The two
/// byte arrays need not be the same length; the write only has to stay
/// within file bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternPatch {
    pub description: String,
    pub pattern: Vec<u8>,
    pub patch_byte_array: Vec<u8>,
}

/// A patch located by a fixed byte position from the start of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPatch {
    pub description: String,
    pub offset: u64,
    pub patch_byte_array: Vec<u8>,
}

/// Outcome of applying one patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchingResult {
    pub description: String,
    pub success: bool,
}

/// One recognized, hash-identified variant of the target binary, with the
/// patches accepted for it.
///
/// The default value is the "unmatched" state: empty id, no patches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameBuild {
    pub id: String,
    pub exe_filename: String,
    pub md5_checksum: String,
    pub patch_group_ids: Vec<String>,
    pub pattern_patches: Vec<PatternPatch>,
    pub offset_patches: Vec<OffsetPatch>,
}

impl GameBuild {
    /// Whether any build declaration matched the target checksum.
    pub fn is_matched(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn patch_count(&self) -> usize {
        self.pattern_patches.len() + self.offset_patches.len()
    }

    pub fn has_patches(&self) -> bool {
        self.patch_count() > 0
    }

    /// Whether this build accepts at least one of the given patch groups.
    pub fn accepts_any_group<S: AsRef<str>>(&self, group_ids: &[S]) -> bool {
        group_ids
            .iter()
            .any(|id| self.patch_group_ids.iter().any(|g| g == id.as_ref()))
    }
}
