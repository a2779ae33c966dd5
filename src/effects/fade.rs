//! Opacity fades driven by display-refresh timestamps

use std::time::Duration;

use crate::page::{ElementRef, Page};

/// Default fade length
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStep {
    /// Request another frame
    Continue,
    /// The fade has finished
    Done,
}

/// A fade in progress on one element
///
/// The host calls [`Fade::step`] with each frame timestamp (milliseconds,
/// as passed to `requestAnimationFrame` callbacks). Dropping the value
/// cancels the fade; starting a new one on the same element restarts it
/// from the element's current state.
#[derive(Debug, Clone)]
pub struct Fade {
    element: ElementRef,
    direction: Direction,
    from: f64,
    duration_ms: f64,
    started_at: Option<f64>,
    finished: bool,
}

impl Fade {
    /// Reveal `element` from fully transparent
    pub fn fade_in<P: Page + ?Sized>(page: &mut P, element: ElementRef, duration: Duration) -> Self {
        page.set_style(element, "opacity", "0");
        page.set_style(element, "display", "block");
        Self::new(element, Direction::In, 0.0, duration)
    }

    /// Fade `element` out from its current opacity, hiding it at the end
    pub fn fade_out<P: Page + ?Sized>(page: &mut P, element: ElementRef, duration: Duration) -> Self {
        let from = page
            .style(element, "opacity")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(1.0);
        Self::new(element, Direction::Out, from, duration)
    }

    fn new(element: ElementRef, direction: Direction, from: f64, duration: Duration) -> Self {
        Self {
            element,
            direction,
            from,
            duration_ms: duration.as_secs_f64() * 1000.0,
            started_at: None,
            finished: false,
        }
    }

    pub fn element(&self) -> ElementRef {
        self.element
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fraction of the fade completed at `timestamp`, clamped to `[0, 1]`
    pub fn progress_at(&self, timestamp: f64) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((timestamp - start) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Opacity for a given progress fraction
    pub fn opacity_for(&self, progress: f64) -> f64 {
        match self.direction {
            Direction::In => progress,
            Direction::Out => self.from * (1.0 - progress),
        }
    }

    /// Apply the frame at `timestamp`; the first call fixes the start time
    pub fn step<P: Page + ?Sized>(&mut self, page: &mut P, timestamp: f64) -> FadeStep {
        if self.finished {
            return FadeStep::Done;
        }
        if self.started_at.is_none() {
            self.started_at = Some(timestamp);
        }

        let progress = self.progress_at(timestamp);
        page.set_style(self.element, "opacity", &format_opacity(self.opacity_for(progress)));

        if progress < 1.0 {
            return FadeStep::Continue;
        }

        if self.direction == Direction::Out {
            page.set_style(self.element, "display", "none");
        }
        self.finished = true;
        FadeStep::Done
    }
}

fn format_opacity(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Document;

    fn page_with_panel() -> (Document, ElementRef) {
        let mut doc = Document::new("https://coldreads.example/");
        let body = doc.body();
        let panel = doc.append_with_id(body, "div", "answerKey");
        (doc, panel)
    }

    #[test]
    fn fade_in_starts_transparent_and_visible() {
        let (mut doc, panel) = page_with_panel();
        let fade = Fade::fade_in(&mut doc, panel, DEFAULT_FADE);
        assert_eq!(doc.style(panel, "opacity").as_deref(), Some("0"));
        assert_eq!(doc.style(panel, "display").as_deref(), Some("block"));
        assert!(!fade.is_finished());
    }

    #[test]
    fn fade_in_is_linear_in_time() {
        let (mut doc, panel) = page_with_panel();
        let mut fade = Fade::fade_in(&mut doc, panel, DEFAULT_FADE);

        assert_eq!(fade.step(&mut doc, 1000.0), FadeStep::Continue);
        assert_eq!(doc.style(panel, "opacity").as_deref(), Some("0"));

        assert_eq!(fade.step(&mut doc, 1150.0), FadeStep::Continue);
        assert_eq!(doc.style(panel, "opacity").as_deref(), Some("0.5"));

        assert_eq!(fade.step(&mut doc, 1400.0), FadeStep::Done);
        assert_eq!(doc.style(panel, "opacity").as_deref(), Some("1"));
        assert!(fade.is_finished());
    }

    #[test]
    fn fade_out_starts_from_current_opacity_and_hides() {
        let (mut doc, panel) = page_with_panel();
        doc.set_style(panel, "opacity", "0.8");
        let mut fade = Fade::fade_out(&mut doc, panel, Duration::from_millis(200));

        fade.step(&mut doc, 0.0);
        fade.step(&mut doc, 100.0);
        assert_eq!(doc.style(panel, "opacity").as_deref(), Some("0.4"));
        assert_eq!(doc.style(panel, "display"), None);

        assert_eq!(fade.step(&mut doc, 200.0), FadeStep::Done);
        assert_eq!(doc.style(panel, "opacity").as_deref(), Some("0"));
        assert_eq!(doc.style(panel, "display").as_deref(), Some("none"));
    }

    #[test]
    fn finished_fade_ignores_further_frames() {
        let (mut doc, panel) = page_with_panel();
        let mut fade = Fade::fade_in(&mut doc, panel, Duration::ZERO);
        assert_eq!(fade.step(&mut doc, 5.0), FadeStep::Done);

        doc.set_style(panel, "opacity", "0.3");
        assert_eq!(fade.step(&mut doc, 50.0), FadeStep::Done);
        assert_eq!(doc.style(panel, "opacity").as_deref(), Some("0.3"));
    }

    #[test]
    fn progress_is_clamped() {
        let (mut doc, panel) = page_with_panel();
        let mut fade = Fade::fade_in(&mut doc, panel, DEFAULT_FADE);
        fade.step(&mut doc, 100.0);
        assert_eq!(fade.progress_at(50.0), 0.0);
        assert_eq!(fade.progress_at(10_000.0), 1.0);
    }
}
