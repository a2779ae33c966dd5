//! Page-level wiring of the site utilities
//!
//! [`Site`] owns the page, the store, the toast layer and the per-page
//! effect state, and exposes the operations page scripts call.

pub mod controls;
pub mod input;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::Result;
use crate::config::Config;
use crate::config::analytics::{AnalyticsEvent, AnalyticsLog};
use crate::config::preferences::DarkMode;
use crate::config::progress::{PassageProgress, Progress};
use crate::effects::{Fade, Intersection, LazyImages, ScrollReveal, inject_styles};
use crate::page::{ElementRef, Page};
use crate::share::{Clipboard, ShareOutcome, ShareSheet};
use crate::storage::KeyValueStore;
use crate::theme::{DARK_MODE_CLASS, Theme};
use crate::time::Clock;
use crate::timer::ReadingTimer;
use crate::toast::{Notifier, SHORT_TOAST_DURATION, ToastKind, Toaster};
use crate::validation::{AnswerCheck, Question};
use input::KeyPress;

/// `id` of the dark-mode toggle control
pub const DARK_MODE_TOGGLE_ID: &str = "darkModeToggle";

/// Message shown before wiping progress
pub const CLEAR_PROGRESS_PROMPT: &str = "Are you sure you want to clear all progress?";

/// One loaded page of the site
pub struct Site<S, P> {
    config: Config,
    clock: Clock,
    store: S,
    page: P,
    toaster: Toaster,
    dark_mode_toggle: Option<ElementRef>,
    lazy_images: LazyImages,
    scroll_reveal: ScrollReveal,
    timer: Option<ReadingTimer>,
}

impl<S: KeyValueStore, P: Page> Site<S, P> {
    pub fn new(config: Config, clock: Clock, store: S, page: P) -> Self {
        Self {
            config,
            clock,
            store,
            page,
            toaster: Toaster::new(clock, Theme::default()),
            dark_mode_toggle: None,
            lazy_images: LazyImages::default(),
            scroll_reveal: ScrollReveal::default(),
            timer: None,
        }
    }

    /// Run the page start-up sequence
    ///
    /// Failures are logged and skipped so one broken feature never keeps
    /// the rest of the page from working.
    pub fn init(&mut self) {
        inject_styles(&mut self.page);

        if let Err(e) = self.init_dark_mode() {
            tracing::warn!("Failed to apply dark mode: {}", e);
        }
        if let Err(e) = self.track_page_view() {
            tracing::warn!("Failed to record page view: {}", e);
        }

        self.init_lazy_loading();
        self.init_scroll_animations();
        tracing::info!("Cold Reads page ready: {}", self.page.location().pathname);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Tear the site down, returning the store and page
    pub fn into_parts(mut self) -> (S, P) {
        self.stop_reading_timer();
        (self.store, self.page)
    }

    /// Advance time-driven state: toasts and the timer display
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.tick_at(now);
    }

    /// Advance time-driven state to `now`
    ///
    /// A stopped reading session leaves its display frozen.
    pub fn tick_at(&mut self, now: DateTime<Utc>) {
        self.toaster.tick_at(&mut self.page, now);
        if let Some(timer) = self.timer.as_ref().filter(|t| t.is_running()) {
            timer.render_at(&mut self.page, now);
        }
    }

    // Notifications

    pub fn show_toast(&mut self, message: &str, kind: ToastKind, duration: Option<Duration>) {
        let duration = duration.unwrap_or_else(|| self.config.toast_duration());
        self.toaster.notify(message, kind, duration);
    }

    // Progress

    /// Record a completed passage and confirm it to the user
    pub fn track_progress(&mut self, passage_id: &str, score: f64) -> Result<PassageProgress> {
        let mut progress = Progress::load(&self.store)?;
        let entry = progress.record(passage_id, score, self.clock.now()).clone();
        progress.save(&mut self.store)?;

        tracing::info!("Progress saved for {}: {}%", passage_id, score);
        self.show_toast(&format!("Progress saved! Score: {score}%"), ToastKind::Success, None);
        Ok(entry)
    }

    pub fn get_progress(&self, passage_id: &str) -> Result<Option<PassageProgress>> {
        Ok(Progress::load(&self.store)?.get(passage_id).cloned())
    }

    pub fn get_all_progress(&self) -> Result<Progress> {
        Progress::load(&self.store)
    }

    /// Wipe all progress after the user confirms; returns whether it was cleared
    pub fn clear_all_progress(&mut self) -> Result<bool> {
        if !self.page.confirm(CLEAR_PROGRESS_PROMPT) {
            return Ok(false);
        }

        Progress::clear(&mut self.store)?;
        tracing::info!("All progress cleared");
        self.show_toast("All progress cleared", ToastKind::Success, None);
        self.page.reload();
        Ok(true)
    }

    // Dark mode

    /// Apply the stored preference and bind the toggle control if the page has one
    pub fn init_dark_mode(&mut self) -> Result<bool> {
        let mode = DarkMode::load(&self.store, self.config.dark_mode_default)?;
        self.apply_dark_mode(mode);
        self.dark_mode_toggle = self.page.element_by_id(DARK_MODE_TOGGLE_ID);
        Ok(mode.is_enabled())
    }

    /// Flip dark mode, persist it and announce it
    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        let body = self.page.body();
        let mode = DarkMode(self.page.toggle_class(body, DARK_MODE_CLASS));
        mode.save(&mut self.store)?;
        self.show_toast(mode.announcement(), ToastKind::Info, Some(SHORT_TOAST_DURATION));
        Ok(mode.is_enabled())
    }

    pub fn is_dark_mode(&self) -> bool {
        self.page.has_class(self.page.body(), DARK_MODE_CLASS)
    }

    fn apply_dark_mode(&mut self, mode: DarkMode) {
        let body = self.page.body();
        self.page.set_class(body, DARK_MODE_CLASS, mode.is_enabled());
    }

    // Input

    /// Dispatch a click; returns whether a bound control handled it
    pub fn handle_click(&mut self, target: ElementRef) -> Result<bool> {
        if self.dark_mode_toggle == Some(target) {
            self.toggle_dark_mode()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Dispatch a key press; returns whether the default action should be suppressed
    pub fn handle_key(&mut self, key: &KeyPress) -> bool {
        input::handle_key(&mut self.page, key)
    }

    // Analytics

    pub fn track_event(&mut self, name: &str, data: Map<String, Value>) -> Result<()> {
        let mut log = AnalyticsLog::load(&self.store)?;
        log.push(AnalyticsEvent {
            event: name.to_string(),
            data,
            timestamp: self.clock.now(),
            url: self.page.location().href,
        });
        log.save(&mut self.store)?;
        tracing::debug!("Tracked event {}", name);
        Ok(())
    }

    pub fn track_page_view(&mut self) -> Result<()> {
        let mut data = Map::new();
        data.insert("page".into(), Value::String(self.page.location().pathname));
        data.insert("referrer".into(), Value::String(self.page.referrer()));
        self.track_event("page_view", data)
    }

    pub fn analytics(&self) -> Result<AnalyticsLog> {
        AnalyticsLog::load(&self.store)
    }

    // Validation

    pub fn validate_answers(&self, questions: &[Question]) -> Vec<AnswerCheck> {
        crate::validation::validate_answers(&self.page, questions)
    }

    pub fn validate_form(&mut self, form_id: &str) -> bool {
        crate::validation::validate_form(&mut self.page, form_id)
    }

    // Effects

    pub fn init_lazy_loading(&mut self) {
        self.lazy_images = LazyImages::init(&self.page);
    }

    pub fn init_scroll_animations(&mut self) {
        self.scroll_reveal = ScrollReveal::init(&self.page);
    }

    /// Forward visibility changes to lazy loading and scroll reveal
    pub fn on_intersection(&mut self, entries: &[Intersection]) {
        self.lazy_images.on_intersection(&mut self.page, entries);
        self.scroll_reveal.on_intersection(&mut self.page, entries);
    }

    pub fn fade_in(&mut self, el: ElementRef) -> Fade {
        Fade::fade_in(&mut self.page, el, self.config.fade_duration())
    }

    pub fn fade_out(&mut self, el: ElementRef) -> Fade {
        Fade::fade_out(&mut self.page, el, self.config.fade_duration())
    }

    // Reading timer

    /// Start a fresh reading session, stopping any previous one
    pub fn start_reading_timer(&mut self) -> &ReadingTimer {
        self.stop_reading_timer();
        let timer = ReadingTimer::start(self.clock);
        timer.render(&mut self.page);
        self.timer.insert(timer)
    }

    pub fn stop_reading_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.stop();
        }
    }

    /// Seconds read in the current session, zero if none was started
    pub fn reading_time(&self) -> u64 {
        ReadingTimer::elapsed_or_zero(self.timer.as_ref())
    }

    // Page helpers

    pub fn smooth_scroll_to(&mut self, id: &str) -> bool {
        controls::smooth_scroll_to(&mut self.page, id)
    }

    pub fn print_page(&mut self) {
        controls::print_page(&mut self.page);
    }

    pub fn print_passage(&mut self, passage_id: &str) {
        controls::print_passage(&mut self.page, passage_id);
    }

    // Sharing

    pub async fn share_page<Sh, C>(&mut self, sheet: &mut Sh, clipboard: &mut C) -> ShareOutcome
    where
        Sh: ShareSheet + ?Sized,
        C: Clipboard + ?Sized,
    {
        let data = self.config.share_data(&self.page.location().href);
        crate::share::share_page(sheet, clipboard, &mut self.toaster, &data).await
    }

    pub async fn copy_to_clipboard<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C, text: &str) -> bool {
        crate::share::copy_to_clipboard(clipboard, &mut self.toaster, text).await
    }
}
