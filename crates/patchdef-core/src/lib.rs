pub mod apply;
pub mod config;
pub mod defs;
pub mod error;
pub mod hash;
pub mod report;
pub mod update;

pub use apply::{apply_patches, offset_apply, pattern_apply};
pub use config::UpdateConfig;
pub use defs::{
    GameBuild, OffsetPatch, PatchKind, PatchingResult, PatternPatch, load_patch_defs, parse_defs,
};
pub use error::{Error, Result};
pub use hash::md5_of_file;
pub use report::PatchSummary;
pub use update::{DEFS_FILENAME, DEFS_FORMAT_VERSION, UpdateClient};
