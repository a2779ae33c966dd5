//! Sharing and clipboard access
//!
//! Both platform capabilities are modelled as async traits returning
//! explicit outcomes. A dismissed share sheet is its own outcome rather
//! than a silent success or an error.

use thiserror::Error;

use crate::toast::{Notifier, SHORT_TOAST_DURATION, ToastKind};

/// What gets shared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Errors from a native share sheet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The platform has no share sheet
    #[error("native sharing is not available")]
    Unsupported,

    /// The user dismissed the sheet
    #[error("share cancelled")]
    Cancelled,

    #[error("share failed: {0}")]
    Failed(String),
}

/// Errors from the system clipboard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write denied: {0}")]
    Denied(String),
}

/// Native share capability
#[allow(async_fn_in_trait)]
pub trait ShareSheet {
    async fn share(&mut self, data: &ShareData) -> Result<(), ShareError>;
}

/// System clipboard capability
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// A platform without a share sheet
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShareSheet;

impl ShareSheet for NoShareSheet {
    async fn share(&mut self, _data: &ShareData) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }
}

/// Desktop clipboard backed by `arboard`
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text).map_err(|e| match e {
            arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(e.to_string()),
            other => ClipboardError::Denied(other.to_string()),
        })
    }
}

/// How a share attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native sheet completed
    Shared,
    /// No native sheet; the link was copied instead (`false` if that failed too)
    CopiedLink(bool),
    /// The user dismissed the sheet
    Cancelled,
    /// The sheet reported an error
    Failed(String),
}

/// Share the page, falling back to copying the link when there is no share sheet
///
/// Failures other than cancellation are logged and returned; they are not
/// shown to the user.
pub async fn share_page<S, C, N>(sheet: &mut S, clipboard: &mut C, notifier: &mut N, data: &ShareData) -> ShareOutcome
where
    S: ShareSheet + ?Sized,
    C: Clipboard + ?Sized,
    N: Notifier + ?Sized,
{
    match sheet.share(data).await {
        Ok(()) => {
            notifier.success("Shared successfully!");
            ShareOutcome::Shared
        }
        Err(ShareError::Unsupported) => {
            tracing::debug!("No share sheet, copying link instead");
            ShareOutcome::CopiedLink(copy_to_clipboard(clipboard, notifier, &data.url).await)
        }
        Err(ShareError::Cancelled) => ShareOutcome::Cancelled,
        Err(ShareError::Failed(reason)) => {
            tracing::warn!("Error sharing: {}", reason);
            ShareOutcome::Failed(reason)
        }
    }
}

/// Copy `text` and tell the user whether it worked
pub async fn copy_to_clipboard<C, N>(clipboard: &mut C, notifier: &mut N, text: &str) -> bool
where
    C: Clipboard + ?Sized,
    N: Notifier + ?Sized,
{
    match clipboard.write_text(text).await {
        Ok(()) => {
            notifier.notify("Copied to clipboard!", ToastKind::Success, SHORT_TOAST_DURATION);
            true
        }
        Err(e) => {
            tracing::error!("Failed to copy: {}", e);
            notifier.notify("Failed to copy", ToastKind::Error, SHORT_TOAST_DURATION);
            false
        }
    }
}
