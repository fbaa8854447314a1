//! End-to-end tests: hash the target, parse definitions against it, apply
//! the loaded patches, and check the resulting bytes and report.

use std::io::Write;

use patchdef_core::{GameBuild, PatchSummary, apply_patches, md5_of_file, parse_defs};

fn temp_exe(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn offset_patch_end_to_end() {
    let file = temp_exe(&[0u8; 8]);
    let exe_md5 = md5_of_file(file.path()).unwrap();

    let defs = format!("build1=game.exe:{}:grp1\npatch=desc1:offset:grp1:4:aabb", exe_md5);
    let build = parse_defs(&defs, &exe_md5);

    assert_eq!(build.id, "build1");
    assert_eq!(build.offset_patches.len(), 1);
    assert_eq!(build.offset_patches[0].offset, 4);
    assert_eq!(build.offset_patches[0].patch_byte_array, vec![0xAA, 0xBB]);

    let results = apply_patches(file.path(), &build.pattern_patches, &build.offset_patches);
    let summary = PatchSummary::new(results);

    assert!(summary.all_succeeded());
    assert_eq!(summary.total(), 1);
    assert_eq!(
        std::fs::read(file.path()).unwrap(),
        vec![0x00, 0x00, 0x00, 0x00, 0xAA, 0xBB, 0x00, 0x00]
    );
}

#[test]
fn mismatched_hash_loads_nothing() {
    let file = temp_exe(&[0u8; 8]);
    let exe_md5 = md5_of_file(file.path()).unwrap();

    let defs = "build1=game.exe:deadbeefdeadbeefdeadbeefdeadbeef:grp1\n\
                patch=desc1:offset:grp1:4:aabb";
    let build = parse_defs(defs, &exe_md5);

    assert_eq!(build, GameBuild::default());
    assert!(!build.is_matched());
    assert!(!build.has_patches());
}

#[test]
fn pattern_patch_end_to_end() {
    let file = temp_exe(&[0x7F, 0xFF, 0x01, 0x02, 0x03, 0x04, 0xAA, 0x00]);
    let exe_md5 = md5_of_file(file.path()).unwrap();

    let defs = format!(
        "build1=game.exe:{}:grp1\npatch=desc1:pattern:grp1:01020304:deadbeef",
        exe_md5
    );
    let build = parse_defs(&defs, &exe_md5);

    assert_eq!(build.pattern_patches.len(), 1);

    let results = apply_patches(file.path(), &build.pattern_patches, &build.offset_patches);
    assert!(results.iter().all(|r| r.success));

    // Overwrite starts at the 0x01 position; surrounding bytes untouched.
    assert_eq!(
        std::fs::read(file.path()).unwrap(),
        vec![0x7F, 0xFF, 0xDE, 0xAD, 0xBE, 0xEF, 0xAA, 0x00]
    );
}

#[test]
fn mixed_patches_report_partial_failure() {
    let file = temp_exe(&[0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x00, 0x00]);
    let exe_md5 = md5_of_file(file.path()).unwrap();

    // Second pattern never occurs in the file; offset patch is in bounds.
    let defs = format!(
        "build1=game.exe:{0}:grp1\n\
         # pattern patches\n\
         patch=hit:pattern:grp1:0102:eeff\n\
         patch=miss:pattern:grp1:cafe:0000\n\
         patch=tail:offset:grp1:6:1122\n",
        exe_md5
    );
    let build = parse_defs(&defs, &exe_md5);
    assert_eq!(build.patch_count(), 3);

    let results = apply_patches(file.path(), &build.pattern_patches, &build.offset_patches);
    let summary = PatchSummary::new(results);

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.successes(), 2);
    assert!(!summary.all_succeeded());

    let outcomes: Vec<(&str, bool)> = summary
        .results()
        .iter()
        .map(|r| (r.description.as_str(), r.success))
        .collect();
    assert_eq!(
        outcomes,
        vec![("hit", true), ("miss", false), ("tail", true)]
    );

    assert_eq!(
        std::fs::read(file.path()).unwrap(),
        vec![0xEE, 0xFF, 0x03, 0x04, 0x00, 0x00, 0x11, 0x22]
    );
}
