//! File Signature Tests
//!
//! Uploads are accepted only when name, magic bytes, and allow-list agree;
//! the header sniff must leave the caller's stream untouched.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use quire::filecheck::{
    sniff_header, validate_file, validate_upload, FileError, HEADER_LEN,
};
use tempfile::tempdir;

const PDF_BYTES: &[u8] = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF";
const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn allow(mimes: &[&str]) -> Vec<String> {
    mimes.iter().map(|m| m.to_string()).collect()
}

// =============================================================================
// Agreement Rule Tests
// =============================================================================

/// Positive: PDF bytes, PDF name, PDF in the allow-list.
#[test]
fn test_pdf_accepted() {
    let accepted = validate_file(
        "report.pdf",
        PDF_BYTES.len() as u64,
        PDF_BYTES,
        &allow(&["application/pdf"]),
        1024,
    )
    .unwrap();
    assert_eq!(accepted.extension, "pdf");
    assert_eq!(accepted.mime, "application/pdf");
}

/// Negative: the same bytes renamed to .exe are rejected even though the
/// signature matched a known type, because the claimed extension disagrees.
#[test]
fn test_renamed_bytes_rejected() {
    let result = validate_file(
        "report.exe",
        PDF_BYTES.len() as u64,
        PDF_BYTES,
        &allow(&["application/pdf"]),
        1024,
    );
    assert_eq!(result, Err(FileError::UnsupportedFileType));
}

/// A type outside the allow-list is rejected even when name and bytes agree.
#[test]
fn test_allow_list_is_enforced() {
    let result = validate_file(
        "photo.png",
        64,
        PNG_HEADER,
        &allow(&["application/pdf"]),
        1024,
    );
    assert_eq!(result, Err(FileError::UnsupportedFileType));

    assert!(validate_file(
        "photo.png",
        64,
        PNG_HEADER,
        &allow(&["application/pdf", "image/png"]),
        1024,
    )
    .is_ok());
}

/// Extension comparison is case-insensitive on the name side.
#[test]
fn test_extension_lowercased() {
    assert!(validate_file(
        "REPORT.PDF",
        64,
        PDF_BYTES,
        &allow(&["application/pdf"]),
        1024,
    )
    .is_ok());
}

/// Size is checked before anything else.
#[test]
fn test_oversize_rejected_first() {
    let result = validate_file(
        "report.pdf",
        2048,
        PDF_BYTES,
        &allow(&["application/pdf"]),
        1024,
    );
    assert_eq!(
        result,
        Err(FileError::FileTooLarge {
            limit: 1024,
            actual: 2048
        })
    );
}

/// Garbage bytes match no signature.
#[test]
fn test_unknown_signature_rejected() {
    let result = validate_file(
        "report.pdf",
        16,
        b"not a known type",
        &allow(&["application/pdf"]),
        1024,
    );
    assert_eq!(result, Err(FileError::UnsupportedFileType));
}

// =============================================================================
// Stream Handling Tests
// =============================================================================

/// Sniffing a real file leaves its offset where it was, and the full
/// content remains readable for storage.
#[test]
fn test_sniff_rewinds_real_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("upload.pdf");
    File::create(&path).unwrap().write_all(PDF_BYTES).unwrap();

    let mut file = File::open(&path).unwrap();
    let (header, filled) = sniff_header(&mut file).unwrap();
    assert_eq!(&header[..4], b"%PDF");
    assert_eq!(filled, PDF_BYTES.len().min(HEADER_LEN));
    assert_eq!(file.stream_position().unwrap(), 0);

    let mut stored = Vec::new();
    file.read_to_end(&mut stored).unwrap();
    assert_eq!(stored, PDF_BYTES);
}

/// End-to-end over a real file: size, sniff, rewind, verdict.
#[test]
fn test_validate_upload_real_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("upload.pdf");
    File::create(&path).unwrap().write_all(PDF_BYTES).unwrap();

    let mut file = File::open(&path).unwrap();
    let accepted =
        validate_upload("upload.pdf", &mut file, &allow(&["application/pdf"]), 1024).unwrap();
    assert_eq!(accepted.mime, "application/pdf");
    assert_eq!(file.stream_position().unwrap(), 0);
}

/// A stream already positioned mid-file is restored to that position.
#[test]
fn test_sniff_preserves_mid_file_offset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("upload.bin");
    File::create(&path).unwrap().write_all(PDF_BYTES).unwrap();

    let mut file = File::open(&path).unwrap();
    file.seek(SeekFrom::Start(5)).unwrap();
    sniff_header(&mut file).unwrap();
    assert_eq!(file.stream_position().unwrap(), 5);
}

/// A file shorter than the sniff window validates on what is there.
#[test]
fn test_short_file_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tiny.pdf");
    File::create(&path).unwrap().write_all(b"%PDF").unwrap();

    let mut file = File::open(&path).unwrap();
    let accepted =
        validate_upload("tiny.pdf", &mut file, &allow(&["application/pdf"]), 1024).unwrap();
    assert_eq!(accepted.extension, "pdf");
}
