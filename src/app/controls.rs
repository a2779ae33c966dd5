//! Small page helpers: scrolling, loading buttons, printing

use crate::page::{ElementRef, Page};

/// Attribute remembering a button's label while it shows a spinner
const ORIGINAL_TEXT_ATTR: &str = "data-original-text";

/// Class of the spinner placed inside loading buttons
const SPINNER_CLASS: &str = "loading-spinner";

/// Default label shown while loading
pub const DEFAULT_LOADING_TEXT: &str = "Loading...";

/// Smoothly scroll to the element with `id`; returns whether it exists
pub fn smooth_scroll_to<P: Page + ?Sized>(page: &mut P, id: &str) -> bool {
    match page.element_by_id(id) {
        Some(el) => {
            page.scroll_into_view(el);
            true
        }
        None => false,
    }
}

/// Replace a button's label with a spinner and `loading_text`, and disable it
pub fn show_loading<P: Page + ?Sized>(page: &mut P, button: ElementRef, loading_text: &str) {
    let original = page.text(button);
    page.set_attribute(button, ORIGINAL_TEXT_ATTR, &original);
    page.set_text(button, loading_text);
    let spinner = page.create_element("span");
    page.add_class(spinner, SPINNER_CLASS);
    page.append_child(button, spinner);
    page.set_attribute(button, "disabled", "");
}

/// Restore a button changed by [`show_loading`]; other buttons are left alone
pub fn hide_loading<P: Page + ?Sized>(page: &mut P, button: ElementRef) -> bool {
    let Some(original) = page.attribute(button, ORIGINAL_TEXT_ATTR) else {
        return false;
    };
    page.set_text(button, &original);
    page.remove_attribute(button, ORIGINAL_TEXT_ATTR);
    for spinner in page.descendants(button) {
        if page.has_class(spinner, SPINNER_CLASS) {
            page.remove_element(spinner);
        }
    }
    page.remove_attribute(button, "disabled");
    true
}

/// Print the page
pub fn print_page<P: Page + ?Sized>(page: &mut P) {
    page.print();
}

/// Print a passage; prints the whole page, with the passage scrolled into view when present
pub fn print_passage<P: Page + ?Sized>(page: &mut P, passage_id: &str) {
    smooth_scroll_to(page, passage_id);
    page.print();
}
