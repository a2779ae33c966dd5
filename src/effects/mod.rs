//! Visual effects: fades, lazy images, scroll reveal, shared styles

pub mod fade;
pub mod observer;
pub mod styles;

pub use fade::{DEFAULT_FADE, Fade, FadeStep};
pub use observer::{Intersection, LazyImages, ScrollReveal, VisibilityObserver};
pub use styles::{STYLESHEET, inject_styles};
