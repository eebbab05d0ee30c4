//! Integration tests for the packaging pipeline
//!
//! These tests verify:
//! - End-to-end archive assembly, read back entry by entry
//! - Staging directory cleanup on success and on failure
//! - Fresh pack identity on every run
//! - Selection rules (folders ignored, empty selections refused)
//! - Non-ASCII pack and texture names surviving the whole trip

use camino::{Utf8Path, Utf8PathBuf};
use skinpack::BindingStore;
use skinpack::models::{Entry, Manifest, PackRequest, SkinDocument};
use skinpack::services::{MANIFEST_FILE, PackagingError, PackagingPipeline, SKINS_FILE};
use std::fs::{self, File};
use std::io::Read;
use tempfile::TempDir;
use uuid::Uuid;

fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()
}

fn write_texture(dir: &Utf8Path, name: &str, bytes: &[u8]) -> Entry {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    Entry::file(path)
}

fn request(pack_name: &str, selected: Vec<Entry>, slim: bool, no_armor: bool) -> PackRequest {
    PackRequest {
        pack_name: pack_name.to_string(),
        selected,
        no_armor,
        slim,
        animations: BindingStore::new().snapshot(),
    }
}

fn archive_entry_names(archive: &Utf8Path) -> Vec<String> {
    let zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn read_archive_entry(archive: &Utf8Path, name: &str) -> String {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut entry = zip.by_name(name).unwrap();
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    contents
}

fn scratch_listing(scratch: &Utf8Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(scratch)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_generate_end_to_end() {
    let scratch_dir = TempDir::new().unwrap();
    let texture_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);
    let textures = utf8_root(&texture_dir);

    let steve = write_texture(&textures, "steve.png", b"steve png bytes");
    let alex = write_texture(&textures, "alex.png", b"alex png bytes");

    let pipeline = PackagingPipeline::with_scratch_dir(scratch.clone());
    let archive = pipeline
        .generate(&request("Test", vec![steve, alex], true, false))
        .unwrap();

    // Archive lands in the scratch root as <name>_<uuid>.mcpack
    assert_eq!(archive.parent().unwrap(), scratch);
    assert_eq!(archive.extension(), Some("mcpack"));
    let stem = archive.file_stem().unwrap();
    let uuid_part = stem.strip_prefix("Test_").unwrap();
    Uuid::parse_str(uuid_part).unwrap();

    // Both documents and both textures, nothing else
    assert_eq!(
        archive_entry_names(&archive),
        ["alex.png", "manifest.json", "skins.json", "steve.png"]
    );

    let manifest: serde_json::Value =
        serde_json::from_str(&read_archive_entry(&archive, MANIFEST_FILE)).unwrap();
    assert_eq!(manifest["format_version"], 1);
    assert_eq!(manifest["header"]["name"], "Test");
    assert_eq!(manifest["header"]["description"], "");
    assert_eq!(manifest["header"]["version"], serde_json::json!([1, 0, 0]));
    Uuid::parse_str(manifest["header"]["uuid"].as_str().unwrap()).unwrap();
    assert_eq!(manifest["modules"][0]["type"], "skin_pack");
    Uuid::parse_str(manifest["modules"][0]["uuid"].as_str().unwrap()).unwrap();

    let skins: serde_json::Value =
        serde_json::from_str(&read_archive_entry(&archive, SKINS_FILE)).unwrap();
    assert_eq!(skins["serialize_name"], "Test");
    assert_eq!(skins["localization_name"], "Test");

    let entries = skins["skins"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry["geometry"], "geometry.humanoid.customSlim");
        assert_eq!(entry["enable_attachables"], true);
        assert_eq!(entry["type"], "free");
        assert_eq!(
            entry["animations"]["move.arms"],
            "animation.player.move.arms"
        );
    }
    assert_eq!(entries[0]["localization_name"], "steve");
    assert_eq!(entries[0]["texture"], "steve.png");
    assert_eq!(entries[1]["localization_name"], "alex");
    assert_eq!(entries[1]["texture"], "alex.png");

    // Texture bytes are copied verbatim
    let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
    let mut bytes = Vec::new();
    zip.by_name("steve.png")
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    assert_eq!(bytes, b"steve png bytes");
}

#[test]
fn test_documents_parse_back_into_schema_types() {
    let scratch_dir = TempDir::new().unwrap();
    let texture_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);

    let steve = write_texture(&utf8_root(&texture_dir), "steve.png", b"png");
    let pipeline = PackagingPipeline::with_scratch_dir(scratch);
    let archive = pipeline
        .generate(&request("Typed", vec![steve], false, false))
        .unwrap();

    let manifest: Manifest =
        serde_json::from_str(&read_archive_entry(&archive, MANIFEST_FILE)).unwrap();
    assert_eq!(manifest.format_version, 1);
    assert_eq!(manifest.header.name, "Typed");
    assert_eq!(manifest.modules.len(), 1);
    assert_ne!(manifest.header.uuid, manifest.modules[0].uuid);

    let skins: SkinDocument =
        serde_json::from_str(&read_archive_entry(&archive, SKINS_FILE)).unwrap();
    assert_eq!(skins.serialize_name, "Typed");
    assert_eq!(skins.skins.len(), 1);
    assert_eq!(skins.skins[0].texture, "steve.png");
    assert_eq!(skins.skins[0].animations, BindingStore::new().snapshot());
}

#[test]
fn test_staging_is_removed_after_success() {
    let scratch_dir = TempDir::new().unwrap();
    let texture_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);

    let steve = write_texture(&utf8_root(&texture_dir), "steve.png", b"png");
    let pipeline = PackagingPipeline::with_scratch_dir(scratch.clone());

    let archive = pipeline
        .generate(&request("Cleanup", vec![steve], false, false))
        .unwrap();

    // Only the archive survives the run
    let listing = scratch_listing(&scratch);
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0], archive.file_name().unwrap());
    assert!(!listing[0].starts_with("SkinPack_"));
}

#[test]
fn test_each_run_mints_a_new_pack_identity() {
    let scratch_dir = TempDir::new().unwrap();
    let texture_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);

    let steve = write_texture(&utf8_root(&texture_dir), "steve.png", b"png");
    let pipeline = PackagingPipeline::with_scratch_dir(scratch);

    let first = pipeline
        .generate(&request("Rerun", vec![steve.clone()], false, false))
        .unwrap();
    let second = pipeline
        .generate(&request("Rerun", vec![steve], false, false))
        .unwrap();

    assert_ne!(first, second);

    let first_manifest: serde_json::Value =
        serde_json::from_str(&read_archive_entry(&first, MANIFEST_FILE)).unwrap();
    let second_manifest: serde_json::Value =
        serde_json::from_str(&read_archive_entry(&second, MANIFEST_FILE)).unwrap();
    assert_ne!(
        first_manifest["header"]["uuid"],
        second_manifest["header"]["uuid"]
    );
}

#[test]
fn test_folder_entries_are_ignored() {
    let scratch_dir = TempDir::new().unwrap();
    let texture_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);
    let textures = utf8_root(&texture_dir);

    let steve = write_texture(&textures, "steve.png", b"png");
    let folder = Entry::folder(textures.clone());

    let pipeline = PackagingPipeline::with_scratch_dir(scratch);
    let archive = pipeline
        .generate(&request("Mixed", vec![folder, steve], false, false))
        .unwrap();

    let skins: serde_json::Value =
        serde_json::from_str(&read_archive_entry(&archive, SKINS_FILE)).unwrap();
    assert_eq!(skins["skins"].as_array().unwrap().len(), 1);
    assert_eq!(
        archive_entry_names(&archive),
        ["manifest.json", "skins.json", "steve.png"]
    );
}

#[test]
fn test_empty_selection_is_refused() {
    let scratch_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);

    let pipeline = PackagingPipeline::with_scratch_dir(scratch.clone());
    let folders_only = request("Nothing", vec![Entry::folder("/somewhere")], false, false);

    let result = pipeline.generate(&folders_only);

    assert!(matches!(result, Err(PackagingError::NoSelection)));
    // Nothing was staged or written
    assert!(scratch_listing(&scratch).is_empty());
}

#[test]
fn test_failed_run_leaves_no_staging_behind() {
    let scratch_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);

    let missing = Entry::file(scratch.join("not-there.png"));
    let pipeline = PackagingPipeline::with_scratch_dir(scratch.clone());

    let result = pipeline.generate(&request("Broken", vec![missing], false, false));

    assert!(matches!(result, Err(PackagingError::Staging(_))));
    assert!(scratch_listing(&scratch).is_empty());
}

#[test]
fn test_duplicate_texture_names_last_one_wins() {
    let scratch_dir = TempDir::new().unwrap();
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);

    let original = write_texture(&utf8_root(&first_dir), "steve.png", b"first");
    let replacement = write_texture(&utf8_root(&second_dir), "steve.png", b"second");

    let pipeline = PackagingPipeline::with_scratch_dir(scratch);
    let archive = pipeline
        .generate(&request("Dupes", vec![original, replacement], false, false))
        .unwrap();

    let names = archive_entry_names(&archive);
    assert_eq!(names.iter().filter(|n| *n == "steve.png").count(), 1);

    let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
    let mut bytes = Vec::new();
    zip.by_name("steve.png")
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    assert_eq!(bytes, b"second");
}

#[test]
fn test_non_ascii_names_survive_the_whole_trip() {
    let scratch_dir = TempDir::new().unwrap();
    let texture_dir = TempDir::new().unwrap();
    let scratch = utf8_root(&scratch_dir);

    let texture = write_texture(&utf8_root(&texture_dir), "雪だるま.png", b"png");
    let pipeline = PackagingPipeline::with_scratch_dir(scratch);

    let archive = pipeline
        .generate(&request("スキンパック", vec![texture], false, true))
        .unwrap();

    assert!(archive.file_name().unwrap().starts_with("スキンパック_"));

    let skins_raw = read_archive_entry(&archive, SKINS_FILE);
    assert!(skins_raw.contains("スキンパック"));
    assert!(skins_raw.contains("雪だるま.png"));
    assert!(!skins_raw.contains("\\u"));

    let skins: serde_json::Value = serde_json::from_str(&skins_raw).unwrap();
    let entry = &skins["skins"][0];
    assert_eq!(entry["localization_name"], "雪だるま");
    assert_eq!(entry["geometry"], "geometry.humanoid.customNoArmor");
    assert_eq!(entry["enable_attachables"], false);
}
