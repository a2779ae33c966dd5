//! Transient on-screen notifications
//!
//! Components report user-facing messages through [`Notifier`]. The
//! page-backed implementation, [`Toaster`], mounts each message as a
//! fixed-position toast, plays a slide-out animation once its duration
//! has elapsed, and removes it after the animation finishes. Toasts are
//! independent: nothing is merged, queued or deduplicated.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::page::{ElementRef, Page};
use crate::theme::{Rgb, Theme};
use crate::time::Clock;

/// How long a toast stays up by default
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);
/// Duration used by short confirmations (clipboard, theme switches)
pub const SHORT_TOAST_DURATION: Duration = Duration::from_millis(2000);
/// Length of the slide-out animation that precedes removal
pub const EXIT_ANIMATION: Duration = Duration::from_millis(300);

/// Visual category of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    /// Background colour for this kind
    pub fn background(&self, theme: &Theme) -> Rgb {
        match self {
            ToastKind::Info => theme.info,
            ToastKind::Success => theme.success,
            ToastKind::Error => theme.error,
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

/// Anything that can show a transient message
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: ToastKind, duration: Duration);

    fn info(&mut self, message: &str) {
        self.notify(message, ToastKind::Info, DEFAULT_TOAST_DURATION);
    }

    fn success(&mut self, message: &str) {
        self.notify(message, ToastKind::Success, DEFAULT_TOAST_DURATION);
    }

    fn error(&mut self, message: &str) {
        self.notify(message, ToastKind::Error, DEFAULT_TOAST_DURATION);
    }
}

/// Collects notifications instead of displaying them
impl Notifier for Vec<Notification> {
    fn notify(&mut self, message: &str, kind: ToastKind, duration: Duration) {
        self.push(Notification { message: message.to_string(), kind, duration });
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, message: &str, kind: ToastKind, duration: Duration) {
        (**self).notify(message, kind, duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Not yet on the page
    Pending,
    /// Mounted, sliding in or resting
    Visible { element: ElementRef, exit_at: i64 },
    /// Playing the slide-out animation
    Exiting { element: ElementRef, remove_at: i64 },
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    kind: ToastKind,
    shown_at: i64,
    duration_ms: i64,
    phase: Phase,
}

/// Page-backed notifier
#[derive(Debug, Clone)]
pub struct Toaster {
    clock: Clock,
    theme: Theme,
    toasts: Vec<Toast>,
}

impl Toaster {
    pub fn new(clock: Clock, theme: Theme) -> Self {
        Self { clock, theme, toasts: Vec::new() }
    }

    /// Toasts queued, visible or exiting
    pub fn active(&self) -> usize {
        self.toasts.len()
    }

    /// Messages currently queued, visible or exiting, oldest first
    pub fn messages(&self) -> Vec<&str> {
        self.toasts.iter().map(|t| t.message.as_str()).collect()
    }

    /// Advance every toast to the clock's current time
    pub fn tick<P: Page + ?Sized>(&mut self, page: &mut P) {
        let now = self.clock.now();
        self.tick_at(page, now);
    }

    /// Advance every toast to `now`
    pub fn tick_at<P: Page + ?Sized>(&mut self, page: &mut P, now: DateTime<Utc>) {
        let now_ms = now.timestamp_millis();
        let exit_ms = EXIT_ANIMATION.as_millis() as i64;

        for toast in &mut self.toasts {
            if toast.phase == Phase::Pending {
                let element = mount(page, &self.theme, &toast.message, toast.kind);
                toast.phase =
                    Phase::Visible { element, exit_at: toast.shown_at.saturating_add(toast.duration_ms) };
            }

            if let Phase::Visible { element, exit_at } = toast.phase {
                if now_ms >= exit_at {
                    page.set_style(element, "animation", "slideOut 0.3s ease");
                    toast.phase = Phase::Exiting { element, remove_at: now_ms + exit_ms };
                }
            }
        }

        self.toasts.retain(|toast| match toast.phase {
            Phase::Exiting { element, remove_at } if now_ms >= remove_at => {
                page.remove_element(element);
                false
            }
            _ => true,
        });
    }
}

impl Notifier for Toaster {
    fn notify(&mut self, message: &str, kind: ToastKind, duration: Duration) {
        tracing::debug!("Toast ({}): {}", kind, message);
        self.toasts.push(Toast {
            message: message.to_string(),
            kind,
            shown_at: self.clock.now().timestamp_millis(),
            duration_ms: i64::try_from(duration.as_millis()).unwrap_or(i64::MAX),
            phase: Phase::Pending,
        });
    }
}

fn mount<P: Page + ?Sized>(page: &mut P, theme: &Theme, message: &str, kind: ToastKind) -> ElementRef {
    let toast = page.create_element("div");
    page.add_class(toast, "toast");
    page.add_class(toast, &format!("toast-{kind}"));
    page.set_text(toast, message);

    let background = kind.background(theme).to_hex();
    for (property, value) in [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("right", "20px"),
        ("background", background.as_str()),
        ("color", "white"),
        ("padding", "1rem 1.5rem"),
        ("border-radius", "8px"),
        ("box-shadow", "0 4px 12px rgba(0,0,0,0.3)"),
        ("z-index", "10000"),
        ("animation", "slideIn 0.3s ease"),
    ] {
        page.set_style(toast, property, value);
    }

    let body = page.body();
    page.append_child(body, toast);
    toast
}

#[cfg(test)]
mod tests {
    use chrono::Duration as TimeDelta;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::page::Document;
    use crate::time::test_now;

    fn toaster() -> Toaster {
        Toaster::new(Clock::fixed(test_now()), Theme::default())
    }

    #[test]
    fn recording_notifier_keeps_order() {
        let mut log: Vec<Notification> = Vec::new();
        log.success("saved");
        log.notify("copied", ToastKind::Info, SHORT_TOAST_DURATION);

        assert_eq!(log.len(), 2);
        assert_eq!(log[0].kind, ToastKind::Success);
        assert_eq!(log[0].duration, DEFAULT_TOAST_DURATION);
        assert_eq!(log[1].message, "copied");
    }

    #[test]
    fn toast_is_mounted_with_kind_styling() {
        let mut doc = Document::new("https://coldreads.example/");
        let mut toasts = toaster();
        toasts.error("Failed to copy");
        toasts.tick_at(&mut doc, test_now());

        let mounted = doc.elements_with_class("toast");
        assert_eq!(mounted.len(), 1);
        let el = mounted[0];
        assert!(doc.has_class(el, "toast-error"));
        assert_eq!(doc.text(el), "Failed to copy");
        assert_eq!(doc.style(el, "background").as_deref(), Some("#F44336"));
        assert_eq!(doc.style(el, "animation").as_deref(), Some("slideIn 0.3s ease"));
    }

    #[test]
    fn toast_exits_then_is_removed() {
        let mut doc = Document::new("https://coldreads.example/");
        let mut toasts = toaster();
        toasts.info("Dark mode enabled");

        let start = test_now();
        toasts.tick_at(&mut doc, start);
        let el = doc.elements_with_class("toast")[0];

        toasts.tick_at(&mut doc, start + TimeDelta::milliseconds(2999));
        assert_eq!(doc.style(el, "animation").as_deref(), Some("slideIn 0.3s ease"));

        let exit = start + TimeDelta::milliseconds(3000);
        toasts.tick_at(&mut doc, exit);
        assert_eq!(doc.style(el, "animation").as_deref(), Some("slideOut 0.3s ease"));
        assert!(doc.is_attached(el));

        toasts.tick_at(&mut doc, exit + TimeDelta::milliseconds(299));
        assert!(doc.is_attached(el));

        toasts.tick_at(&mut doc, exit + TimeDelta::milliseconds(300));
        assert!(!doc.is_attached(el));
        assert_eq!(toasts.active(), 0);
    }

    #[test]
    fn late_tick_still_plays_exit_animation() {
        let mut doc = Document::new("https://coldreads.example/");
        let mut toasts = toaster();
        toasts.success("Progress saved! Score: 90%");

        let late = test_now() + TimeDelta::seconds(10);
        toasts.tick_at(&mut doc, late);
        let el = doc.elements_with_class("toast")[0];
        assert_eq!(doc.style(el, "animation").as_deref(), Some("slideOut 0.3s ease"));
        assert!(doc.is_attached(el));
    }

    #[test]
    fn toasts_stack_independently() {
        let mut doc = Document::new("https://coldreads.example/");
        let mut toasts = toaster();
        toasts.info("one");
        toasts.info("one");
        toasts.tick_at(&mut doc, test_now());

        assert_eq!(doc.elements_with_class("toast").len(), 2);
        assert_eq!(toasts.messages(), vec!["one", "one"]);
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ToastKind::Success).unwrap(), "\"success\"");
    }
}
