//! Cold Reads - client utilities for a reading-comprehension practice site
//!
//! Cold Reads scores quiz answers, remembers per-passage progress and the
//! dark-mode preference, records a bounded analytics log, and drives the
//! small page effects (toasts, fades, lazy images, scroll reveal, reading
//! timer) against an abstract [`page::Page`].

pub mod app;
pub mod config;
pub mod effects;
pub mod error;
pub mod page;
pub mod scoring;
pub mod share;
pub mod storage;
pub mod theme;
pub mod time;
pub mod timer;
pub mod toast;
pub mod validation;

pub use app::Site;
pub use config::Config;
pub use error::{ColdReadsError, Result};
pub use scoring::{Grade, ScoreResult, calculate_score};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::Theme;
pub use toast::{Notifier, ToastKind};
