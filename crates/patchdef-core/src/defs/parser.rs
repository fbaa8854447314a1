//! Line-oriented patch definition parsing.
//!
//! The format is forgiving by design: malformed or non-matching lines are
//! dropped so one corrupt line in a large shared definitions file does not
//! block unrelated builds or patches. Only failing to read the file at all
//! is an error.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::defs::{GameBuild, OffsetPatch, PatchKind, PatternPatch};
use crate::error::Result;

/// Read a definitions file and parse it against the target's checksum.
pub fn load_patch_defs<P: AsRef<Path>>(path: P, exe_md5: &str) -> Result<GameBuild> {
    let content = fs::read_to_string(path)?;
    Ok(parse_defs(&content, exe_md5))
}

/// Parse definitions text against the target's checksum.
///
/// Single forward pass. Lines are `key=value`; the key `patch` introduces a
/// patch entry, any other key a build declaration whose key is the build id.
/// Patch lines are only accepted once a build declaration has matched
/// `exe_md5`. When no declaration ever matches, the returned build is
/// `GameBuild::default()`.
pub fn parse_defs(content: &str, exe_md5: &str) -> GameBuild {
    let mut build = GameBuild::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();

        if key == "patch" {
            parse_patch_line(&mut build, value);
        } else {
            parse_build_line(&mut build, key, value, exe_md5);
        }
    }

    build
}

/// `id=exeFilename:md5Checksum:groupId,groupId,...`
///
/// A declaration whose checksum differs from the target's is recognized but
/// not adopted; a later declaration may still match. A matching declaration
/// replaces the build's identity fields but keeps patches accumulated so
/// far.
fn parse_build_line(build: &mut GameBuild, id: &str, value: &str, exe_md5: &str) {
    let fields: Vec<&str> = value.split(':').collect();
    if fields.len() != 3 {
        debug!(
            "Skipping build declaration '{}': expected 3 fields, got {}",
            id,
            fields.len()
        );
        return;
    }

    let md5_checksum = fields[1].trim();
    if md5_checksum != exe_md5 {
        return;
    }

    build.id = id.to_string();
    build.exe_filename = fields[0].trim().to_string();
    build.md5_checksum = md5_checksum.to_string();
    build.patch_group_ids = fields[2].split(',').map(|g| g.trim().to_string()).collect();
}

/// `patch=description:type:groupId,...:patternOrOffset:patchBytesHex`
fn parse_patch_line(build: &mut GameBuild, value: &str) {
    // Patch lines are only meaningful once a build has matched.
    if !build.is_matched() {
        return;
    }

    let fields: Vec<&str> = value.split(':').collect();
    if fields.len() != 5 {
        debug!("Skipping patch line: expected 5 fields, got {}", fields.len());
        return;
    }

    let description = fields[0].trim();
    if description.is_empty() {
        return;
    }

    let Ok(kind) = PatchKind::from_str(fields[1].trim()) else {
        debug!(
            "Skipping patch '{}': unknown type '{}'",
            description, fields[1]
        );
        return;
    };

    let group_ids: Vec<&str> = fields[2].split(',').map(str::trim).collect();
    if !build.accepts_any_group(&group_ids) {
        return;
    }

    // hex::decode also rejects odd-length strings, which the format forbids.
    let Ok(patch_byte_array) = hex::decode(fields[4].trim()) else {
        debug!("Skipping patch '{}': bad patch hex", description);
        return;
    };

    match kind {
        PatchKind::Pattern => {
            let Ok(pattern) = hex::decode(fields[3].trim()) else {
                debug!("Skipping patch '{}': bad pattern hex", description);
                return;
            };
            if build
                .pattern_patches
                .iter()
                .any(|p| p.description == description)
            {
                return;
            }
            build.pattern_patches.push(PatternPatch {
                description: description.to_string(),
                pattern,
                patch_byte_array,
            });
        }
        PatchKind::Offset => {
            let Ok(offset) = fields[3].trim().parse::<u64>() else {
                debug!("Skipping patch '{}': bad offset", description);
                return;
            };
            if build
                .offset_patches
                .iter()
                .any(|p| p.description == description)
            {
                return;
            }
            build.offset_patches.push(OffsetPatch {
                description: description.to_string(),
                offset,
                patch_byte_array,
            });
        }
    }
}
