//! Upload validation
//!
//! An upload is accepted only when three independent witnesses agree: the
//! extension claimed by the file name, the magic-byte signature of the
//! actual content, and the configured MIME allow-list. Renaming a binary
//! defeats none of them.

use std::io::{Read, Seek, SeekFrom};

use super::errors::{FileError, FileResult};
use super::signature::{matching_signatures, mime_for_extension};
use crate::observability::{Logger, Severity};

/// How many leading bytes signature matching looks at
pub const HEADER_LEN: usize = 32;

/// The accepted identity of a validated upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    /// The claimed (and signature-confirmed) extension
    pub extension: String,
    /// The resolved MIME type, a member of the allow-list
    pub mime: &'static str,
}

/// Derives the claimed extension from a file name: the part after the last
/// dot, lower-cased; empty when the name has no extension.
pub fn claimed_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Validates an upload's declared name against its content.
///
/// Checks run in order:
/// 1. `size` against `max_size` — `FileTooLarge {limit, actual}`
/// 2. claimed extension from `name`
/// 3. signatures matching `header` (the first [`HEADER_LEN`] bytes)
/// 4. agreement: some matched signature vouches for the claimed extension
///    AND that extension's MIME type is in `allow_list`
///
/// Anything short of full agreement is `UnsupportedFileType`.
pub fn validate_file(
    name: &str,
    size: u64,
    header: &[u8],
    allow_list: &[String],
    max_size: u64,
) -> FileResult<FileMatch> {
    if size > max_size {
        return Err(FileError::FileTooLarge {
            limit: max_size,
            actual: size,
        });
    }

    let extension = claimed_extension(name);
    if extension.is_empty() {
        return reject(name, "missing extension");
    }

    let matched = matching_signatures(header);
    if matched.is_empty() {
        return reject(name, "unknown signature");
    }

    if !matched
        .iter()
        .any(|signature| signature.extensions.contains(&extension.as_str()))
    {
        return reject(name, "extension disagrees with signature");
    }

    let mime = match mime_for_extension(&extension) {
        Some(mime) => mime,
        None => return reject(name, "no MIME mapping"),
    };
    if !allow_list.iter().any(|allowed| allowed == mime) {
        return reject(name, "MIME not in allow-list");
    }

    Ok(FileMatch { extension, mime })
}

fn reject(name: &str, reason: &str) -> FileResult<FileMatch> {
    Logger::log(
        Severity::Warn,
        "UPLOAD_REJECTED",
        &[("name", name), ("reason", reason)],
    );
    Err(FileError::UnsupportedFileType)
}

/// Reads the first [`HEADER_LEN`] bytes of a stream and rewinds it to the
/// offset it was at, so the full content remains available for storage.
///
/// Returns the header buffer and how many bytes of it are valid.
pub fn sniff_header<R: Read + Seek>(reader: &mut R) -> std::io::Result<([u8; HEADER_LEN], usize)> {
    let origin = reader.stream_position()?;
    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        let n = reader.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    reader.seek(SeekFrom::Start(origin))?;
    Ok((header, filled))
}

/// Validates an upload directly from a seekable stream: measures its size,
/// sniffs the header, rewinds, and applies [`validate_file`].
pub fn validate_upload<R: Read + Seek>(
    name: &str,
    reader: &mut R,
    allow_list: &[String],
    max_size: u64,
) -> FileResult<FileMatch> {
    let origin = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(origin))?;
    let size = end.saturating_sub(origin);

    let (header, filled) = sniff_header(reader)?;
    validate_file(name, size, &header[..filled], allow_list, max_size)
}
