//! In-memory page model

use std::collections::{BTreeMap, VecDeque};

use super::{ElementRef, Location, Page};

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    parent: Option<ElementRef>,
    children: Vec<ElementRef>,
}

/// A headless document implementing [`Page`]
///
/// Window interactions (confirm prompts, reloads, printing, focus and
/// scrolling) are recorded so callers can inspect what happened.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: ElementRef,
    head: ElementRef,
    body: ElementRef,
    href: String,
    referrer: String,
    focused: Option<ElementRef>,
    scrolled_to: Vec<ElementRef>,
    confirm_answers: VecDeque<bool>,
    prompts: Vec<String>,
    reloads: usize,
    prints: usize,
}

impl Document {
    /// An empty `<html><head/><body/></html>` document at `href`
    pub fn new(href: &str) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: ElementRef(0),
            head: ElementRef(0),
            body: ElementRef(0),
            href: href.to_string(),
            referrer: String::new(),
            focused: None,
            scrolled_to: Vec::new(),
            confirm_answers: VecDeque::new(),
            prompts: Vec::new(),
            reloads: 0,
            prints: 0,
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.head);
        doc.append_child(doc.root, doc.body);
        doc
    }

    pub fn set_referrer(&mut self, referrer: &str) {
        self.referrer = referrer.to_string();
    }

    /// Create `tag` under `parent` and return it
    pub fn append(&mut self, parent: ElementRef, tag: &str) -> ElementRef {
        let el = self.create_element(tag);
        self.append_child(parent, el);
        el
    }

    /// Create `tag` with an `id` under `parent`
    pub fn append_with_id(&mut self, parent: ElementRef, tag: &str, id: &str) -> ElementRef {
        let el = self.append(parent, tag);
        self.set_attribute(el, "id", id);
        el
    }

    pub fn set_value(&mut self, el: ElementRef, value: &str) {
        if let Some(node) = self.nodes.get_mut(el.0) {
            node.value = value.to_string();
        }
    }

    pub fn set_checked(&mut self, el: ElementRef, checked: bool) {
        if let Some(node) = self.nodes.get_mut(el.0) {
            node.checked = checked;
        }
    }

    /// Queue the answer for the next `confirm` prompt; unanswered prompts decline
    pub fn answer_next_confirm(&mut self, answer: bool) {
        self.confirm_answers.push_back(answer);
    }

    /// Messages shown through `confirm`, oldest first
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn reload_count(&self) -> usize {
        self.reloads
    }

    pub fn print_count(&self) -> usize {
        self.prints
    }

    pub fn focused(&self) -> Option<ElementRef> {
        self.focused
    }

    /// Elements scrolled into view, oldest first
    pub fn scroll_history(&self) -> &[ElementRef] {
        &self.scrolled_to
    }

    /// Direct children of `el`
    pub fn children(&self, el: ElementRef) -> Vec<ElementRef> {
        self.nodes.get(el.0).map(|n| n.children.clone()).unwrap_or_default()
    }

    /// Whether `el` is reachable from the document root
    pub fn is_attached(&self, el: ElementRef) -> bool {
        let mut current = Some(el);
        while let Some(node_ref) = current {
            if node_ref == self.root {
                return true;
            }
            current = self.nodes.get(node_ref.0).and_then(|n| n.parent);
        }
        false
    }

    /// Whether `ancestor` is `el` or one of its parents
    fn is_ancestor_or_self(&self, ancestor: ElementRef, el: ElementRef) -> bool {
        let mut current = Some(el);
        while let Some(node_ref) = current {
            if node_ref == ancestor {
                return true;
            }
            current = self.nodes.get(node_ref.0).and_then(|n| n.parent);
        }
        false
    }

    fn attached(&self) -> Vec<ElementRef> {
        let mut out = vec![self.root];
        out.extend(self.descendants(self.root));
        out
    }

    fn node(&self, el: ElementRef) -> Option<&Node> {
        self.nodes.get(el.0)
    }

    fn node_mut(&mut self, el: ElementRef) -> Option<&mut Node> {
        self.nodes.get_mut(el.0)
    }

    fn detach(&mut self, el: ElementRef) {
        if let Some(parent) = self.node(el).and_then(|n| n.parent) {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|c| *c != el);
            }
        }
        if let Some(node) = self.node_mut(el) {
            node.parent = None;
        }
    }
}

impl Page for Document {
    fn body(&self) -> ElementRef {
        self.body
    }

    fn head(&self) -> ElementRef {
        self.head
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.attached()
            .into_iter()
            .find(|el| self.node(*el).and_then(|n| n.attributes.get("id")).is_some_and(|v| v == id))
    }

    fn elements_with_class(&self, class: &str) -> Vec<ElementRef> {
        self.attached().into_iter().filter(|el| self.has_class(*el, class)).collect()
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<ElementRef> {
        self.attached().into_iter().filter(|el| self.attribute(*el, name).is_some()).collect()
    }

    fn descendants(&self, el: ElementRef) -> Vec<ElementRef> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementRef> = self.children(el).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    fn tag_name(&self, el: ElementRef) -> String {
        self.node(el).map(|n| n.tag.clone()).unwrap_or_default()
    }

    fn checked_value(&self, name: &str) -> Option<String> {
        self.attached().into_iter().find_map(|el| {
            let node = self.node(el)?;
            let named = node.attributes.get("name").is_some_and(|n| n == name);
            (node.tag == "input" && named && node.checked).then(|| node.value.clone())
        })
    }

    fn value(&self, el: ElementRef) -> String {
        self.node(el).map(|n| n.value.clone()).unwrap_or_default()
    }

    fn attribute(&self, el: ElementRef, name: &str) -> Option<String> {
        self.node(el).and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, el: ElementRef, name: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, el: ElementRef, name: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attributes.remove(name);
        }
    }

    fn has_class(&self, el: ElementRef, class: &str) -> bool {
        self.node(el).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, el: ElementRef, class: &str) {
        if let Some(node) = self.node_mut(el) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, el: ElementRef, class: &str) {
        if let Some(node) = self.node_mut(el) {
            node.classes.retain(|c| c != class);
        }
    }

    fn text(&self, el: ElementRef) -> String {
        self.node(el).map(|n| n.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, el: ElementRef, text: &str) {
        if let Some(node) = self.node_mut(el) {
            node.text = text.to_string();
        }
    }

    fn style(&self, el: ElementRef, property: &str) -> Option<String> {
        self.node(el).and_then(|n| n.styles.get(property).cloned())
    }

    fn set_style(&mut self, el: ElementRef, property: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementRef {
        self.nodes.push(Node { tag: tag.to_ascii_lowercase(), ..Default::default() });
        ElementRef(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: ElementRef, child: ElementRef) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        // Would create a cycle
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn remove_element(&mut self, el: ElementRef) {
        self.detach(el);
        if self.focused.is_some_and(|f| !self.is_attached(f)) {
            self.focused = None;
        }
    }

    fn focus(&mut self, el: ElementRef) {
        self.focused = Some(el);
    }

    fn scroll_into_view(&mut self, el: ElementRef) {
        self.scrolled_to.push(el);
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirm_answers.pop_front().unwrap_or(false)
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }

    fn print(&mut self) {
        self.prints += 1;
    }

    fn location(&self) -> Location {
        Location::from_href(&self.href)
    }

    fn referrer(&self) -> String {
        self.referrer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appending_an_ancestor_under_its_descendant_is_ignored() {
        let mut doc = Document::new("https://coldreads.example/");
        let body = doc.body();
        let outer = doc.append_with_id(body, "section", "outer");
        let inner = doc.append(outer, "div");

        doc.append_child(inner, outer);
        doc.append_child(inner, inner);

        assert_eq!(doc.children(outer), vec![inner]);
        assert!(doc.children(inner).is_empty());
        assert_eq!(doc.descendants(body), vec![outer, inner]);
        assert_eq!(doc.element_by_id("outer"), Some(outer));
    }

    #[test]
    fn new_document_has_head_and_body() {
        let doc = Document::new("https://coldreads.example/");
        assert_eq!(doc.tag_name(doc.head()), "head");
        assert_eq!(doc.tag_name(doc.body()), "body");
        assert!(doc.is_attached(doc.body()));
    }

    #[test]
    fn element_by_id_ignores_detached_elements() {
        let mut doc = Document::new("https://coldreads.example/");
        let body = doc.body();
        let timer = doc.append_with_id(body, "span", "readingTimer");
        assert_eq!(doc.element_by_id("readingTimer"), Some(timer));

        doc.remove_element(timer);
        assert_eq!(doc.element_by_id("readingTimer"), None);
    }

    #[test]
    fn descendants_are_in_document_order() {
        let mut doc = Document::new("https://coldreads.example/");
        let body = doc.body();
        let form = doc.append(body, "form");
        let first = doc.append(form, "input");
        let group = doc.append(form, "div");
        let nested = doc.append(group, "textarea");
        let last = doc.append(form, "select");

        assert_eq!(doc.descendants(form), vec![first, group, nested, last]);
    }

    #[test]
    fn checked_value_finds_selected_radio() {
        let mut doc = Document::new("https://coldreads.example/");
        let body = doc.body();
        for (value, checked) in [("A", false), ("B", true), ("C", false)] {
            let radio = doc.append(body, "input");
            doc.set_attribute(radio, "name", "q1");
            doc.set_value(radio, value);
            doc.set_checked(radio, checked);
        }

        assert_eq!(doc.checked_value("q1").as_deref(), Some("B"));
        assert_eq!(doc.checked_value("q2"), None);
    }

    #[test]
    fn confirm_declines_without_queued_answer() {
        let mut doc = Document::new("https://coldreads.example/");
        doc.answer_next_confirm(true);
        assert!(doc.confirm("first?"));
        assert!(!doc.confirm("second?"));
        assert_eq!(doc.prompts(), ["first?".to_string(), "second?".to_string()]);
    }

    #[test]
    fn appending_moves_existing_child() {
        let mut doc = Document::new("https://coldreads.example/");
        let body = doc.body();
        let head = doc.head();
        let style = doc.append(body, "style");
        doc.append_child(head, style);

        assert!(doc.children(body).is_empty());
        assert_eq!(doc.children(head), vec![style]);
    }
}
