//! Magic-byte signature table
//!
//! Maps leading byte patterns to the canonical extensions that may carry
//! them, independent of the file's claimed name. Container formats (zip,
//! CFB) legitimately serve several extensions; the agreement rule in the
//! validator picks between them via the claimed name.

/// A known file-type signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    /// (offset, bytes) pairs that must all match the header
    pub parts: &'static [(usize, &'static [u8])],
    /// Canonical extensions this signature vouches for
    pub extensions: &'static [&'static str],
}

/// Signatures recognized by the upload validator
pub const SIGNATURES: &[FileSignature] = &[
    FileSignature {
        parts: &[(0, b"%PDF")],
        extensions: &["pdf"],
    },
    FileSignature {
        parts: &[(0, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])],
        extensions: &["png"],
    },
    FileSignature {
        parts: &[(0, &[0xFF, 0xD8, 0xFF])],
        extensions: &["jpg", "jpeg"],
    },
    FileSignature {
        parts: &[(0, b"GIF87a")],
        extensions: &["gif"],
    },
    FileSignature {
        parts: &[(0, b"GIF89a")],
        extensions: &["gif"],
    },
    FileSignature {
        parts: &[(0, b"RIFF"), (8, b"WEBP")],
        extensions: &["webp"],
    },
    FileSignature {
        parts: &[(0, &[0x49, 0x49, 0x2A, 0x00])],
        extensions: &["tif", "tiff"],
    },
    FileSignature {
        parts: &[(0, &[0x4D, 0x4D, 0x00, 0x2A])],
        extensions: &["tif", "tiff"],
    },
    FileSignature {
        parts: &[(0, b"BM")],
        extensions: &["bmp"],
    },
    // zip container: plain archives and OOXML documents
    FileSignature {
        parts: &[(0, &[0x50, 0x4B, 0x03, 0x04])],
        extensions: &["zip", "docx", "xlsx"],
    },
    // CFB container: legacy Office documents
    FileSignature {
        parts: &[(0, &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])],
        extensions: &["doc", "xls"],
    },
];

impl FileSignature {
    /// Whether every part of this signature matches the header bytes
    pub fn matches(&self, header: &[u8]) -> bool {
        self.parts.iter().all(|(offset, pattern)| {
            header
                .get(*offset..offset + pattern.len())
                .map_or(false, |slice| slice == *pattern)
        })
    }
}

/// All signatures whose pattern matches the given header bytes
pub fn matching_signatures(header: &[u8]) -> Vec<&'static FileSignature> {
    SIGNATURES.iter().filter(|s| s.matches(header)).collect()
}

/// Resolves a canonical extension to its MIME type
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    Some(match extension {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        "zip" => "application/zip",
        "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "doc" => "application/msword",
        "xls" => "application/vnd.ms-excel",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_signature_matches() {
        let matched = matching_signatures(b"%PDF-1.7 rest of header padding.");
        assert!(matched.iter().any(|s| s.extensions.contains(&"pdf")));
    }

    #[test]
    fn test_zip_signature_covers_ooxml() {
        let header = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00];
        let matched = matching_signatures(&header);
        assert_eq!(matched.len(), 1);
        assert!(matched[0].extensions.contains(&"docx"));
        assert!(matched[0].extensions.contains(&"zip"));
    }

    #[test]
    fn test_webp_needs_both_parts() {
        let mut header = [0u8; 16];
        header[..4].copy_from_slice(b"RIFF");
        assert!(matching_signatures(&header).is_empty());
        header[8..12].copy_from_slice(b"WEBP");
        let matched = matching_signatures(&header);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].extensions, &["webp"]);
    }

    #[test]
    fn test_short_header_never_panics() {
        assert!(matching_signatures(b"").is_empty());
        assert!(matching_signatures(b"%P").is_empty());
    }

    #[test]
    fn test_every_signature_extension_has_a_mime() {
        for signature in SIGNATURES {
            for extension in signature.extensions {
                assert!(
                    mime_for_extension(extension).is_some(),
                    "no MIME for '{}'",
                    extension
                );
            }
        }
    }

    #[test]
    fn test_unknown_extension_has_no_mime() {
        assert_eq!(mime_for_extension("exe"), None);
        assert_eq!(mime_for_extension(""), None);
    }
}
