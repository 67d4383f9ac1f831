use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

const BIN: &str = env!("CARGO_BIN_EXE_fatscope");

/// 512-byte sectors, 1 sector per cluster, 1 FAT sector, 16 root entries.
fn small_image() -> Vec<u8> {
    let mut img = vec![0u8; 1536 + 4 * 512];
    img[0x03..0x0B].copy_from_slice(b"MSDOS5.0");
    img[0x0B..0x0D].copy_from_slice(&512u16.to_le_bytes());
    img[0x0D] = 1;
    img[0x0E..0x10].copy_from_slice(&1u16.to_le_bytes());
    img[0x10] = 1;
    img[0x11..0x13].copy_from_slice(&16u16.to_le_bytes());
    img[0x16..0x18].copy_from_slice(&1u16.to_le_bytes());
    img[0x1FE] = 0x55;
    img[0x1FF] = 0xAA;

    // FAT: reserved slots, cluster 2 is a one-cluster file
    img[512..514].copy_from_slice(&0xFFF8u16.to_le_bytes());
    img[514..516].copy_from_slice(&0xFFFFu16.to_le_bytes());
    img[516..518].copy_from_slice(&0xFFFFu16.to_le_bytes());

    let entry = &mut img[1024..1056];
    entry[0..11].copy_from_slice(b"HELLO   TXT");
    entry[11] = 0x20;
    entry[26..28].copy_from_slice(&2u16.to_le_bytes());
    entry[28..32].copy_from_slice(&5u32.to_le_bytes());
    img
}

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("temp file");
    f.write_all(bytes).expect("write image");
    f.flush().expect("flush");
    f
}

#[test]
fn test_prints_report() {
    let f = write_temp(&small_image());
    let out = Command::new(BIN).arg(f.path()).output().expect("run fatscope");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Boot sector information:\n"));
    assert!(stdout.contains(" OEM name: MSDOS5.0\n"));
    assert!(stdout.contains("    2: 2 -> EOF\n"));
    assert!(stdout.contains(
        "    0000: HELLO    TXT, attributes: 20, cluster: 2 (sector: 3), size: 5 bytes\n"
    ));
    assert!(!stdout.contains("[fatscope]"));
}

#[test]
fn test_quiet_keeps_stderr_empty() {
    let f = write_temp(&small_image());
    let out = Command::new(BIN)
        .arg("--quiet")
        .arg(f.path())
        .output()
        .expect("run fatscope");

    assert!(out.status.success());
    assert!(out.stderr.is_empty());
}

#[test]
fn test_missing_argument() {
    let out = Command::new(BIN).output().expect("run fatscope");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn test_truncated_image_fails() {
    let f = write_temp(&[0u8; 100]);
    let out = Command::new(BIN).arg(f.path()).output().expect("run fatscope");

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: Not a usable FAT16 volume"));
    assert!(stderr.contains("Image shorter than a boot sector"));
}

#[test]
fn test_unreadable_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.img");
    let out = Command::new(BIN).arg(&missing).output().expect("run fatscope");

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Cannot read image"));
}
