//! Share flow with graceful degradation.

use thiserror::Error;

/// What gets handed to the platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Why a share step failed.
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    /// The platform has no native share sheet.
    #[error("native sharing unavailable")]
    Unsupported,

    /// The user dismissed the sheet or the platform rejected it.
    #[error("share rejected: {0}")]
    Rejected(String),

    /// Clipboard access was denied by the host.
    #[error("clipboard unavailable")]
    ClipboardDenied,
}

/// Host-implemented sharing and clipboard access.
pub trait SharePlatform: Send {
    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError>;
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), ShareError>;
}

/// How a share attempt ultimately resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share sheet took it.
    Shared,
    /// The link landed on the clipboard.
    LinkCopied,
    /// Both paths failed; show the raw link instead.
    LinkShown(String),
}

/// Run the share fallback chain: native sheet, then clipboard, then the
/// raw link. Failures along the way are logged and never surfaced as
/// errors.
pub fn share_with_fallback(
    platform: &mut dyn SharePlatform,
    payload: &SharePayload,
) -> ShareOutcome {
    match platform.share(payload) {
        Ok(()) => ShareOutcome::Shared,
        Err(err) => {
            log::debug!("native share unavailable ({err}), falling back to clipboard");
            match platform.copy_to_clipboard(&payload.url) {
                Ok(()) => ShareOutcome::LinkCopied,
                Err(err) => {
                    log::debug!("clipboard fallback failed ({err}), showing raw link");
                    ShareOutcome::LinkShown(payload.url.clone())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePlatform {
        native: Result<(), ShareError>,
        clipboard: Result<(), ShareError>,
        shared: usize,
        copied: usize,
    }

    impl SharePlatform for FakePlatform {
        fn share(&mut self, _payload: &SharePayload) -> Result<(), ShareError> {
            self.shared += 1;
            self.native.clone()
        }

        fn copy_to_clipboard(&mut self, _text: &str) -> Result<(), ShareError> {
            self.copied += 1;
            self.clipboard.clone()
        }
    }

    fn payload() -> SharePayload {
        SharePayload {
            title: "Check out AR Lab".to_string(),
            text: "A project by @driftline".to_string(),
            url: "https://example.com/ar-lab".to_string(),
        }
    }

    #[test]
    fn test_native_share_wins() {
        let mut p = FakePlatform {
            native: Ok(()),
            clipboard: Ok(()),
            shared: 0,
            copied: 0,
        };
        assert_eq!(share_with_fallback(&mut p, &payload()), ShareOutcome::Shared);
        assert_eq!((p.shared, p.copied), (1, 0));
    }

    #[test]
    fn test_clipboard_fallback() {
        let mut p = FakePlatform {
            native: Err(ShareError::Unsupported),
            clipboard: Ok(()),
            shared: 0,
            copied: 0,
        };
        assert_eq!(
            share_with_fallback(&mut p, &payload()),
            ShareOutcome::LinkCopied
        );
        assert_eq!((p.shared, p.copied), (1, 1));
    }

    #[test]
    fn test_raw_link_when_everything_fails() {
        let mut p = FakePlatform {
            native: Err(ShareError::Rejected("dismissed".to_string())),
            clipboard: Err(ShareError::ClipboardDenied),
            shared: 0,
            copied: 0,
        };
        assert_eq!(
            share_with_fallback(&mut p, &payload()),
            ShareOutcome::LinkShown("https://example.com/ar-lab".to_string())
        );
    }
}
