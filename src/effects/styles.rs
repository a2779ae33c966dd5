//! Shared stylesheet for effects, toasts and validation errors

use crate::page::{ElementRef, Page};

/// `id` of the injected `<style>` element
pub const STYLESHEET_ID: &str = "coldreads-styles";

/// Rules used by scroll reveal, field errors, toasts and loading buttons
pub const STYLESHEET: &str = r#"
.fade-in-on-scroll {
    opacity: 0;
    transform: translateY(20px);
    transition: opacity 0.6s ease, transform 0.6s ease;
}

.fade-in-on-scroll.animated {
    opacity: 1;
    transform: translateY(0);
}

.error {
    border-color: #f44336 !important;
    box-shadow: 0 0 0 2px rgba(244, 67, 54, 0.2) !important;
}

@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}

@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}

.loading-spinner {
    display: inline-block;
    width: 12px;
    height: 12px;
    border: 2px solid rgba(255,255,255,0.3);
    border-radius: 50%;
    border-top-color: white;
    animation: spin 0.6s linear infinite;
}

@keyframes spin {
    to { transform: rotate(360deg); }
}
"#;

/// Add the stylesheet to `<head>` unless it is already there
pub fn inject_styles<P: Page + ?Sized>(page: &mut P) -> ElementRef {
    if let Some(existing) = page.element_by_id(STYLESHEET_ID) {
        return existing;
    }

    let style = page.create_element("style");
    page.set_attribute(style, "id", STYLESHEET_ID);
    page.set_text(style, STYLESHEET);
    let head = page.head();
    page.append_child(head, style);
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Document;

    #[test]
    fn injection_is_idempotent() {
        let mut doc = Document::new("https://coldreads.example/");
        let first = inject_styles(&mut doc);
        let second = inject_styles(&mut doc);
        assert_eq!(first, second);
        assert_eq!(doc.children(doc.head()), vec![first]);
    }

    #[test]
    fn stylesheet_covers_toast_animations() {
        assert!(STYLESHEET.contains("@keyframes slideIn"));
        assert!(STYLESHEET.contains("@keyframes slideOut"));
        assert!(STYLESHEET.contains(".fade-in-on-scroll.animated"));
    }
}
