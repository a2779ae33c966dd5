//! One-shot viewport visibility handling
//!
//! The host forwards intersection notifications (from an
//! `IntersectionObserver` or any other source) as [`Intersection`]
//! entries. Each observed element fires at most once and is then
//! forgotten.

use std::collections::BTreeSet;

use crate::page::{ElementRef, Page};

/// Attribute holding an image's deferred source
pub const PENDING_SRC_ATTR: &str = "data-src";
/// Marker class for scroll-reveal elements
pub const REVEAL_CLASS: &str = "fade-in-on-scroll";
/// Class added once an element has been revealed
pub const REVEALED_CLASS: &str = "animated";
/// Fraction of an element that must be visible to reveal it
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// A visibility change for one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub target: ElementRef,
    pub is_intersecting: bool,
    /// Visible fraction of the element, `0.0..=1.0`
    pub ratio: f64,
}

impl Intersection {
    pub fn visible(target: ElementRef, ratio: f64) -> Self {
        Self { target, is_intersecting: ratio > 0.0, ratio }
    }

    pub fn hidden(target: ElementRef) -> Self {
        Self { target, is_intersecting: false, ratio: 0.0 }
    }
}

/// A set of elements waiting to become visible
#[derive(Debug, Clone, Default)]
pub struct VisibilityObserver {
    threshold: f64,
    pending: BTreeSet<ElementRef>,
}

impl VisibilityObserver {
    pub fn new(threshold: f64) -> Self {
        Self { threshold: threshold.clamp(0.0, 1.0), pending: BTreeSet::new() }
    }

    pub fn observe(&mut self, el: ElementRef) {
        self.pending.insert(el);
    }

    pub fn unobserve(&mut self, el: ElementRef) {
        self.pending.remove(&el);
    }

    pub fn is_observing(&self, el: ElementRef) -> bool {
        self.pending.contains(&el)
    }

    /// Elements still waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Elements that crossed the threshold, in entry order; they stop being observed
    pub fn take_triggered(&mut self, entries: &[Intersection]) -> Vec<ElementRef> {
        let mut fired = Vec::new();
        for entry in entries {
            if entry.is_intersecting && entry.ratio >= self.threshold && self.pending.remove(&entry.target)
            {
                fired.push(entry.target);
            }
        }
        fired
    }
}

/// Deferred image loading
#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    observer: VisibilityObserver,
}

impl LazyImages {
    /// Observe every image carrying a pending source
    pub fn init<P: Page + ?Sized>(page: &P) -> Self {
        let mut observer = VisibilityObserver::new(0.0);
        for el in page.elements_with_attribute(PENDING_SRC_ATTR) {
            if page.tag_name(el) == "img" {
                observer.observe(el);
            }
        }
        tracing::debug!("Lazy loading {} images", observer.len());
        Self { observer }
    }

    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    /// Swap in real sources for images that became visible; returns how many loaded
    pub fn on_intersection<P: Page + ?Sized>(&mut self, page: &mut P, entries: &[Intersection]) -> usize {
        let fired = self.observer.take_triggered(entries);
        for img in &fired {
            if let Some(src) = page.attribute(*img, PENDING_SRC_ATTR) {
                page.set_attribute(*img, "src", &src);
                page.remove_attribute(*img, PENDING_SRC_ATTR);
            }
        }
        fired.len()
    }
}

/// One-shot reveal animation for marked elements
#[derive(Debug, Clone, Default)]
pub struct ScrollReveal {
    observer: VisibilityObserver,
}

impl ScrollReveal {
    /// Observe every scroll-reveal element at the 10% threshold
    pub fn init<P: Page + ?Sized>(page: &P) -> Self {
        let mut observer = VisibilityObserver::new(REVEAL_THRESHOLD);
        for el in page.elements_with_class(REVEAL_CLASS) {
            observer.observe(el);
        }
        Self { observer }
    }

    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    /// Reveal elements that became visible enough; returns how many were revealed
    pub fn on_intersection<P: Page + ?Sized>(&mut self, page: &mut P, entries: &[Intersection]) -> usize {
        let fired = self.observer.take_triggered(entries);
        for el in &fired {
            page.add_class(*el, REVEALED_CLASS);
        }
        fired.len()
    }
}
