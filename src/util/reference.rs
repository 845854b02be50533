use thiserror::Error;

/// Why a video reference was not handed to the system opener.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("This item has no video")]
    Empty,
    /// A leading dash would be read as an option by some openers.
    #[error("Refusing to open reference starting with '-'")]
    LeadingDash,
    #[error("Video reference contains control characters")]
    ControlChars,
    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// Schemes the opener may receive. Anything without a scheme is treated as
/// a local path.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "file"];

/// Validate an opaque video reference before passing it to `open::that`.
///
/// References come from the catalog and may be URLs or file paths. Only
/// web and file URLs are allowed; bare paths pass through unchanged.
pub fn validate_video_ref(reference: &str) -> Result<&str, ReferenceError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(ReferenceError::Empty);
    }
    if reference.starts_with('-') {
        return Err(ReferenceError::LeadingDash);
    }
    if reference.chars().any(char::is_control) {
        return Err(ReferenceError::ControlChars);
    }

    if let Some((scheme, _)) = reference.split_once("://") {
        let scheme = scheme.to_ascii_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            return Err(ReferenceError::UnsupportedScheme(scheme));
        }
    }

    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_urls_and_paths() {
        assert_eq!(
            validate_video_ref("https://videos.example.com/a.mp4"),
            Ok("https://videos.example.com/a.mp4")
        );
        assert_eq!(validate_video_ref(" /videos/1.mp4 "), Ok("/videos/1.mp4"));
        assert!(validate_video_ref("FILE:///tmp/x.mp4").is_ok());
    }

    #[test]
    fn rejects_dangerous_references() {
        assert_eq!(validate_video_ref("  "), Err(ReferenceError::Empty));
        assert_eq!(
            validate_video_ref("--help"),
            Err(ReferenceError::LeadingDash)
        );
        assert_eq!(
            validate_video_ref("a\nb"),
            Err(ReferenceError::ControlChars)
        );
        assert_eq!(
            validate_video_ref("javascript://alert"),
            Err(ReferenceError::UnsupportedScheme("javascript".to_string()))
        );
    }
}
