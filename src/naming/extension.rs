//! File-name extension helpers.

use crate::error::AsinpackError;

/// Returns the substring from the last `.` onward, case preserved.
pub fn final_extension(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|idx| &file_name[idx..])
}

/// Checks a file name against an extension allow-list, ignoring case.
///
/// Allowed extensions include the leading dot (e.g. `.jpg`).
pub fn has_supported_extension<S: AsRef<str>>(file_name: &str, allowed: &[S]) -> bool {
    let lower = file_name.to_lowercase();
    allowed
        .iter()
        .any(|ext| lower.ends_with(&ext.as_ref().to_lowercase()))
}

/// Builds `<identifier>.<variant><extension>`.
pub fn output_file_name(
    identifier: &str,
    variant: &str,
    original_name: &str,
) -> Result<String, AsinpackError> {
    let extension =
        final_extension(original_name).ok_or_else(|| AsinpackError::MalformedFilename {
            file_name: original_name.to_string(),
        })?;
    Ok(format!("{identifier}.{variant}{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_extension_uses_last_dot() {
        assert_eq!(final_extension("photo.final.JPG"), Some(".JPG"));
        assert_eq!(final_extension("photo"), None);
        assert_eq!(final_extension(".png"), Some(".png"));
    }

    #[test]
    fn supported_extension_is_case_insensitive() {
        let allowed = [".jpg", ".tiff"];
        assert!(has_supported_extension("A.JPG", &allowed));
        assert!(has_supported_extension("scan.TiFf", &allowed));
        assert!(!has_supported_extension("notes.txt", &allowed));
        assert!(!has_supported_extension("jpg", &allowed));
    }

    #[test]
    fn output_name_preserves_extension_case() {
        assert_eq!(output_file_name("X", "MAIN", "Photo.JPG").unwrap(), "X.MAIN.JPG");
    }

    #[test]
    fn output_name_without_dot_fails_fast() {
        let err = output_file_name("X", "MAIN", "photo").unwrap_err();
        assert!(matches!(err, AsinpackError::MalformedFilename { .. }));
    }
}
