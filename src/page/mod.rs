//! The rendered page as seen by the site utilities
//!
//! Everything that touches the document or window goes through [`Page`],
//! so the decision logic in the other modules can be exercised against
//! the in-memory [`Document`].

mod document;

pub use document::Document;

use url::Url;

/// Opaque handle to an element on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementRef(pub(crate) usize);

/// The page's current address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Full URL
    pub href: String,
    /// Path component, `/` when the URL has none
    pub pathname: String,
}

impl Location {
    /// Build a location from a URL, keeping unparsable input as the href
    pub fn from_href(href: &str) -> Self {
        let pathname = Url::parse(href).map(|u| u.path().to_string()).unwrap_or_else(|_| {
            tracing::debug!("Unparsable page URL {:?}", href);
            "/".to_string()
        });
        Self { href: href.to_string(), pathname }
    }
}

/// Document and window capabilities consumed by the site utilities
pub trait Page {
    /// The `<body>` element
    fn body(&self) -> ElementRef;

    /// The `<head>` element
    fn head(&self) -> ElementRef;

    /// Look up an attached element by its `id`
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    /// Attached elements carrying `class`, in document order
    fn elements_with_class(&self, class: &str) -> Vec<ElementRef>;

    /// Attached elements carrying attribute `name`, in document order
    fn elements_with_attribute(&self, name: &str) -> Vec<ElementRef>;

    /// All descendants of `el`, in document order
    fn descendants(&self, el: ElementRef) -> Vec<ElementRef>;

    /// Lower-case tag name
    fn tag_name(&self, el: ElementRef) -> String;

    /// Value of the checked input in the group called `name`
    fn checked_value(&self, name: &str) -> Option<String>;

    /// Current value of a form control
    fn value(&self, el: ElementRef) -> String;

    fn attribute(&self, el: ElementRef, name: &str) -> Option<String>;
    fn set_attribute(&mut self, el: ElementRef, name: &str, value: &str);
    fn remove_attribute(&mut self, el: ElementRef, name: &str);

    fn has_class(&self, el: ElementRef, class: &str) -> bool;
    fn add_class(&mut self, el: ElementRef, class: &str);
    fn remove_class(&mut self, el: ElementRef, class: &str);

    fn text(&self, el: ElementRef) -> String;
    fn set_text(&mut self, el: ElementRef, text: &str);

    /// Inline style property, e.g. `opacity`
    fn style(&self, el: ElementRef, property: &str) -> Option<String>;
    fn set_style(&mut self, el: ElementRef, property: &str, value: &str);

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> ElementRef;
    fn append_child(&mut self, parent: ElementRef, child: ElementRef);
    /// Detach an element from the page
    fn remove_element(&mut self, el: ElementRef);

    fn focus(&mut self, el: ElementRef);
    /// Smoothly scroll so `el` sits at the top of the viewport
    fn scroll_into_view(&mut self, el: ElementRef);

    /// Blocking yes/no prompt
    fn confirm(&mut self, message: &str) -> bool;
    fn reload(&mut self);
    fn print(&mut self);

    fn location(&self) -> Location;
    fn referrer(&self) -> String;

    /// Add or remove `class` so that its presence matches `on`
    fn set_class(&mut self, el: ElementRef, class: &str, on: bool) {
        if on {
            self.add_class(el, class);
        } else {
            self.remove_class(el, class);
        }
    }

    /// Flip `class` and report whether it is now present
    fn toggle_class(&mut self, el: ElementRef, class: &str) -> bool {
        let on = !self.has_class(el, class);
        self.set_class(el, class, on);
        on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_extracts_pathname() {
        let location = Location::from_href("https://coldreads.example/passages/grade3.html?x=1");
        assert_eq!(location.pathname, "/passages/grade3.html");
    }

    #[test]
    fn location_falls_back_for_relative_urls() {
        let location = Location::from_href("passages/grade3.html");
        assert_eq!(location.href, "passages/grade3.html");
        assert_eq!(location.pathname, "/");
    }

    #[test]
    fn toggle_class_reports_new_state() {
        let mut doc = Document::new("https://coldreads.example/");
        let body = doc.body();
        assert!(doc.toggle_class(body, "dark-mode"));
        assert!(doc.has_class(body, "dark-mode"));
        assert!(!doc.toggle_class(body, "dark-mode"));
        assert!(!doc.has_class(body, "dark-mode"));
    }
}
