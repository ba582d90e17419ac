//! Version guard
//!
//! Pins every document to the schema version it was created against.
//! The guard never migrates: moving a document between schema revisions
//! is a separate, explicit operation that does not exist in this engine.

use super::errors::{VersionError, VersionResult};

/// Checks a document's declared version against the version in force.
///
/// On create (`previous_version` is `None`) the document must carry
/// `expected_version` — the tag baked into the schema of the questionnaire
/// it was created against. On update it must carry exactly the version the
/// previous revision recorded; anything else would silently migrate the
/// document through an ordinary edit.
pub fn check_version(
    document_version: &str,
    expected_version: &str,
    previous_version: Option<&str>,
) -> VersionResult<()> {
    match previous_version {
        Some(previous) => {
            if document_version != previous {
                return Err(VersionError::PreviousVersionMismatch {
                    previous: previous.to_string(),
                    got: document_version.to_string(),
                });
            }
        }
        None => {
            if document_version != expected_version {
                return Err(VersionError::SchemaVersionMismatch {
                    expected: expected_version.to_string(),
                    got: document_version.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_accepts_expected_version() {
        assert!(check_version("2025.09-1", "2025.09-1", None).is_ok());
    }

    #[test]
    fn test_create_rejects_other_version() {
        let err = check_version("2025.09-2", "2025.09-1", None).unwrap_err();
        assert_eq!(
            err,
            VersionError::SchemaVersionMismatch {
                expected: "2025.09-1".into(),
                got: "2025.09-2".into(),
            }
        );
    }

    #[test]
    fn test_update_pins_previous_version() {
        assert!(check_version("2025.09-1", "2025.09-2", Some("2025.09-1")).is_ok());

        let err = check_version("2025.09-2", "2025.09-2", Some("2025.09-1")).unwrap_err();
        assert_eq!(
            err,
            VersionError::PreviousVersionMismatch {
                previous: "2025.09-1".into(),
                got: "2025.09-2".into(),
            }
        );
    }

    #[test]
    fn test_versions_compare_as_opaque_strings() {
        // "1.0" and "1.00" are different tokens, nothing is parsed
        assert!(check_version("1.00", "1.0", None).is_err());
    }
}
