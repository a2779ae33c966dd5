//! Reading timer
//!
//! A [`ReadingTimer`] is an owned session: the caller keeps the handle,
//! queries it, and stops it. Each session owns its ticker, so starting a
//! second session never leaves the first one running unattended.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::page::Page;
use crate::time::Clock;

/// `id` of the element showing the running time
pub const TIMER_DISPLAY_ID: &str = "readingTimer";

/// Interval between display updates
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Render whole seconds as `m:ss`
pub fn format_elapsed(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// A background task calling back once per [`TICK_INTERVAL`]
#[derive(Debug)]
struct Ticker {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// A running (or stopped) reading session
#[derive(Debug)]
pub struct ReadingTimer {
    clock: Clock,
    started_at: DateTime<Utc>,
    ticker: Option<Ticker>,
    running: bool,
}

impl ReadingTimer {
    /// Start a session; the host drives display updates through [`ReadingTimer::render`]
    pub fn start(clock: Clock) -> Self {
        let started_at = clock.now();
        tracing::debug!("Reading timer started at {}", started_at);
        Self { clock, started_at, ticker: None, running: true }
    }

    /// Start a session that calls `on_tick` with the formatted time every second
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_ticking<F>(clock: Clock, mut on_tick: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let mut timer = Self::start(clock);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let started_at = timer.started_at;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        on_tick(format_elapsed(elapsed_between(started_at, clock.now())));
                    }
                }
            }
        });

        timer.ticker = Some(Ticker { cancel, handle });
        timer
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whole seconds since the session started
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(self.clock.now())
    }

    /// Whole seconds between the start and `now`
    pub fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u64 {
        elapsed_between(self.started_at, now)
    }

    /// Elapsed seconds for an optional session, zero when there is none
    pub fn elapsed_or_zero(timer: Option<&ReadingTimer>) -> u64 {
        timer.map(ReadingTimer::elapsed_secs).unwrap_or(0)
    }

    /// Current time as `m:ss`
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed_secs())
    }

    /// Write the current time into the timer display, if the page has one
    pub fn render<P: Page + ?Sized>(&self, page: &mut P) {
        self.render_at(page, self.clock.now());
    }

    /// Write the time elapsed at `now` into the timer display
    pub fn render_at<P: Page + ?Sized>(&self, page: &mut P, now: DateTime<Utc>) {
        if let Some(display) = page.element_by_id(TIMER_DISPLAY_ID) {
            page.set_text(display, &format_elapsed(self.elapsed_secs_at(now)));
        }
    }

    /// Stop ticking; safe to call more than once
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel.cancel();
            ticker.handle.abort();
        }
        if self.running {
            tracing::debug!("Reading timer stopped after {}s", self.elapsed_secs());
        }
        self.running = false;
    }
}

impl Drop for ReadingTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn elapsed_between(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - start).num_seconds().max(0) as u64
}
