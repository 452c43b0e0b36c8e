//! Integration tests for pants-export
//!
//! Tests the full pipeline: generate test assets -> build -> verify output


use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{TempDir, tempdir};

use pants_common::COLOR_KEY;
use pants_export::build::{self, BuildArgs};
use pants_export::{compile_pack, load_manifest};

const NOTE_LENGTHS: [usize; 5] = [10, 20, 30, 40, 50];
const TAIL: usize = 400;

/// Project with three icons, a five-note recording and one save state
fn create_project(capacity: usize) -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    let data = dir.path().join("data");
    std::fs::create_dir(&data).expect("Failed to create data dir");

    generate_test_assets::generate_manifest(&dir.path().join("pants.toml"), capacity)
        .expect("Failed to write manifest");
    generate_test_assets::generate_solid_tga(&data.join("a.tga"), 1, 1, [255, 0, 0, 255])
        .expect("Failed to generate a.tga");
    generate_test_assets::generate_solid_tga(&data.join("b.tga"), 2, 2, [0, 255, 0, 255])
        .expect("Failed to generate b.tga");
    generate_test_assets::generate_solid_tga(&data.join("c.tga"), 4, 4, [0, 0, 255, 0])
        .expect("Failed to generate c.tga");
    generate_test_assets::generate_recording(&data.join("instruments.wav"), &NOTE_LENGTHS)
        .expect("Failed to generate recording");
    std::fs::write(data.join("blank.zst"), [0xDE, 0xAD, 0xBE, 0xEF])
        .expect("Failed to write save state");

    dir
}

fn manifest_path(dir: &TempDir) -> PathBuf {
    dir.path().join("pants.toml")
}

fn args(dir: &TempDir) -> BuildArgs {
    BuildArgs {
        manifest: Some(manifest_path(dir)),
        ..BuildArgs::default()
    }
}

fn run(command: &str, manifest: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pants-export"))
        .args([command, "--manifest", manifest.to_str().unwrap()])
        .output()
        .expect("Failed to run pants-export")
}

/// Test the build command end to end through the binary
#[test]
fn test_build_command() {
    let dir = create_project(NOTE_LENGTHS.len());

    let output = run("build", &manifest_path(&dir));
    assert!(
        output.status.success(),
        "pants-export build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let header = std::fs::read_to_string(dir.path().join("data.h")).expect("data.h missing");
    let source = std::fs::read_to_string(dir.path().join("data.cpp")).expect("data.cpp missing");

    assert!(header.contains("const int ICON_COUNT = 3;"));
    assert!(header.contains("enum {\n    ICON_A,\n    ICON_B,\n    ICON_C,\n};"));
    assert!(header.contains("extern const SampleData sampledata[5];"));
    assert!(header.contains("const unsigned int ZST_SIZE = 4;"));
    assert!(header.contains("const unsigned int S9X_SIZE = 0;"));
    assert!(source.contains("#include \"data.h\""));
    assert!(source.contains("  { 0xDE,0xAD,0xBE,0xEF,};"));
}

/// Icons are packed back to back in file-name order
#[test]
fn test_icon_offsets() {
    let dir = create_project(NOTE_LENGTHS.len());
    let built = build::execute(&args(&dir)).expect("build failed");
    let source = &built.module.source;

    assert!(source.contains("const IconData icondata_a = { 1, 1, icon_block + 0 };"));
    assert!(source.contains("const IconData icondata_b = { 2, 2, icon_block + 4 };"));
    assert!(source.contains("const IconData icondata_c = { 4, 4, icon_block + 20 };"));

    let icon_block = source
        .split("const unsigned char icon_block[] =\n")
        .nth(1)
        .expect("icon_block missing");
    assert!(icon_block.starts_with("  { 0xFF,0x00,0x00,0xFF,0x00,0xFF,0x00,0xFF,"));
}

/// Fully transparent pixels become the color key
#[test]
fn test_transparent_icon_is_keyed() {
    let dir = create_project(NOTE_LENGTHS.len());
    let ctx = load_manifest(&manifest_path(&dir), true).expect("manifest");
    let pack = compile_pack(&ctx, &ctx.data_dir()).expect("compile failed");

    let c = pack.images.get(2).expect("c.tga missing");
    assert_eq!(c.len(), 4 * 4 * 4);
    assert!(c.chunks_exact(4).all(|px| px == COLOR_KEY));
}

/// One sample per note, each keeping the faded tail, offsets cumulative
#[test]
fn test_sample_table() {
    let dir = create_project(NOTE_LENGTHS.len());
    let built = build::execute(&args(&dir)).expect("build failed");
    let source = &built.module.source;

    let mut offset = 0;
    for length in NOTE_LENGTHS {
        let len = length + TAIL;
        let entry = format!("    {{ {len}, sample_block + {offset} }},");
        assert!(source.contains(&entry), "missing entry: {entry}");
        offset += len;
    }

    let sample_block = source
        .split("const sint16 sample_block[] =\n")
        .nth(1)
        .and_then(|s| s.split(";").next())
        .expect("sample_block missing");
    assert_eq!(sample_block.matches(',').count(), offset);
    assert!(sample_block.starts_with("  {   1000,  1000,"));
}

/// A sample count that does not match the table writes nothing
#[test]
fn test_capacity_mismatch_writes_nothing() {
    let dir = create_project(NOTE_LENGTHS.len() + 1);

    let output = run("build", &manifest_path(&dir));
    assert!(!output.status.success(), "build should fail on capacity mismatch");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("holds exactly 6"), "unexpected error: {stderr}");

    assert!(!dir.path().join("data.h").exists());
    assert!(!dir.path().join("data.cpp").exists());
}

/// A failed build leaves previously generated files untouched
#[test]
fn test_failed_build_keeps_previous_output() {
    let dir = create_project(NOTE_LENGTHS.len());
    build::execute(&args(&dir)).expect("build failed");
    let before = std::fs::read_to_string(dir.path().join("data.cpp")).unwrap();

    // Color-mapped images are rejected
    let mut bad = pants_common::RasterHeader::true_color(1, 1, 0, 0);
    bad.colormap_type = 1;
    std::fs::write(dir.path().join("data/bad.tga"), bad.to_bytes()).unwrap();

    let err = build::execute(&args(&dir)).unwrap_err();
    assert!(format!("{err:#}").contains("bad.tga"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("data.cpp")).unwrap(),
        before
    );
}

/// Check passes right after a build and fails once the data changes
#[test]
fn test_check_command() {
    let dir = create_project(NOTE_LENGTHS.len());
    let manifest = manifest_path(&dir);

    let output = run("check", &manifest);
    assert!(!output.status.success(), "check should fail before any build");

    assert!(run("build", &manifest).status.success());
    let output = run("check", &manifest);
    assert!(
        output.status.success(),
        "check failed after build: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    generate_test_assets::generate_solid_tga(
        &dir.path().join("data/d.tga"),
        1,
        1,
        [1, 2, 3, 255],
    )
    .unwrap();
    let output = run("check", &manifest);
    assert!(!output.status.success(), "check should fail after data changes");
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of date"));
}

/// --out-dir redirects output, creating the directory
#[test]
fn test_out_dir_override() {
    let dir = create_project(NOTE_LENGTHS.len());
    let out_dir = dir.path().join("generated/src");

    let built = build::execute(&BuildArgs {
        out_dir: Some(out_dir.clone()),
        ..args(&dir)
    })
    .expect("build failed");

    assert_eq!(built.header_path, out_dir.join("data.h"));
    assert!(out_dir.join("data.h").exists());
    assert!(out_dir.join("data.cpp").exists());
    assert!(!dir.path().join("data.h").exists());
}

/// The segment command reports every note
#[test]
fn test_segment_command() {
    let dir = create_project(NOTE_LENGTHS.len());
    let wav = dir.path().join("data/instruments.wav");

    let output = Command::new(env!("CARGO_BIN_EXE_pants-export"))
        .args(["segment", wav.to_str().unwrap()])
        .output()
        .expect("Failed to run pants-export");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sample[ 0, 0] >   410 samples"));
    assert!(stdout.contains("sample[ 0, 4] >   450 samples"));
    assert!(stdout.contains("5 samples"));
}
