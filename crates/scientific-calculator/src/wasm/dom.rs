//! Mock DOM for WASM Testing
//!
//! DOM abstractions that let the browser front end be exercised without a
//! browser or web-sys.
//!
//! Display state stays observable as element text and attributes.

use std::collections::HashMap;

use crate::core::history::History;
use crate::host::{DisplaySlot, DisplaySurface};
use crate::keypad::Keypad;

/// Id of the history list element
pub const HISTORY_LIST_ID: &str = "calc-history";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Whether element is visible
    pub visible: bool,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press event
    KeyPress {
        /// The key that was pressed
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for testing the calculator without a browser
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates a new mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            elements: HashMap::new(),
            event_history: Vec::new(),
        }
    }

    /// Creates the calculator page: display slots, keypad and history list
    #[must_use]
    pub fn calculator(keypad: &Keypad) -> Self {
        let mut dom = Self::new();
        let mut root = DomElement::new("div")
            .with_id("calculator")
            .with_class("calculator-app");

        for slot in DisplaySlot::ALL {
            let element = DomElement::new("div")
                .with_id(slot.element_id())
                .with_class("display-slot");
            root = root.with_child(element.clone());
            dom.register_element(element);
        }

        let mut pad = DomElement::new("div")
            .with_id("calc-keypad")
            .with_class("keypad");
        for button in keypad.buttons() {
            let element = DomElement::new("button")
                .with_id(&button.id)
                .with_text(&button.action.label())
                .with_class("keypad-btn")
                .with_class(&format!("keypad-row-{}", button.row))
                .with_class(&format!("keypad-col-{}", button.col));
            pad = pad.with_child(element.clone());
            dom.register_element(element);
        }
        root = root.with_child(pad);

        let history = DomElement::new("ul")
            .with_id(HISTORY_LIST_ID)
            .with_class("history-list");
        root = root.with_child(history.clone());
        dom.register_element(history);

        dom.root = root;
        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Records a dispatched event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.text_content = text.to_string();
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Adds a child element to a parent
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        let child_id = child.id.clone();
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.clone());
        }
        if !child_id.is_empty() {
            self.elements.insert(child_id, child);
        }
    }

    /// Clears children of an element
    pub fn clear_children(&mut self, id: &str) {
        let child_ids: Vec<String> = self
            .elements
            .get(id)
            .map(|elem| {
                elem.children
                    .iter()
                    .filter(|c| !c.id.is_empty())
                    .map(|c| c.id.clone())
                    .collect()
            })
            .unwrap_or_default();

        for child_id in child_ids {
            self.elements.remove(&child_id);
        }

        if let Some(elem) = self.elements.get_mut(id) {
            elem.children.clear();
        }
    }
}

impl DisplaySurface for MockDom {
    fn set_text(&mut self, slot: DisplaySlot, text: &str) {
        let id = slot.element_id();
        self.set_element_text(id, text);
        if slot == DisplaySlot::Error {
            if let Some(elem) = self.elements.get_mut(id) {
                elem.visible = !text.is_empty();
            }
        }
    }

    fn set_history(&mut self, history: &History) {
        self.clear_children(HISTORY_LIST_ID);
        for (i, entry) in history.iter().enumerate() {
            let item = DomElement::new("li")
                .with_id(&format!("history-{i}"))
                .with_text(&entry.display())
                .with_class("history-item")
                .with_attr("data-result", &entry.result);
            self.append_child(HISTORY_LIST_ID, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_builder() {
        let elem = DomElement::new("button")
            .with_id("btn")
            .with_text("OK")
            .with_class("primary")
            .with_attr("type", "submit")
            .with_child(DomElement::default());
        assert_eq!(elem.tag, "button");
        assert_eq!(elem.id, "btn");
        assert_eq!(elem.text_content, "OK");
        assert!(elem.has_class("primary"));
        assert!(!elem.has_class("secondary"));
        assert_eq!(elem.get_attr("type"), Some("submit"));
        assert_eq!(elem.get_attr("missing"), None);
        assert_eq!(elem.children.len(), 1);
        assert!(elem.visible);
    }

    // ===== DomEvent tests =====

    #[test]
    fn test_dom_event_constructors() {
        assert_eq!(
            DomEvent::click("btn-1"),
            DomEvent::Click {
                element_id: "btn-1".into()
            }
        );
        assert_eq!(
            DomEvent::key_press("Enter"),
            DomEvent::KeyPress {
                key: "Enter".into()
            }
        );
    }

    // ===== MockDom tests =====

    #[test]
    fn test_calculator_dom_structure() {
        let keypad = Keypad::new();
        let dom = MockDom::calculator(&keypad);
        for slot in DisplaySlot::ALL {
            assert!(dom.get_element(slot.element_id()).is_some());
        }
        assert_eq!(dom.get_element_text("btn-sqrt"), Some("√"));
        assert!(dom.get_element("btn-7").unwrap().has_class("keypad-row-4"));
        assert!(dom.get_element(HISTORY_LIST_ID).is_some());
        assert_eq!(dom.root.id, "calculator");
    }

    #[test]
    fn test_event_history() {
        let mut dom = MockDom::new();
        dom.dispatch_event(DomEvent::click("a"));
        dom.dispatch_event(DomEvent::key_press("b"));
        assert_eq!(dom.event_history().len(), 2);
    }

    #[test]
    fn test_append_and_clear_children() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("ul").with_id("list"));
        dom.append_child("list", DomElement::new("li").with_id("item-0"));
        assert!(dom.get_element("item-0").is_some());
        assert_eq!(dom.get_element("list").unwrap().children.len(), 1);

        dom.clear_children("list");
        assert!(dom.get_element("item-0").is_none());
        assert!(dom.get_element("list").unwrap().children.is_empty());
    }

    #[test]
    fn test_set_text_unknown_element_is_ignored() {
        let mut dom = MockDom::new();
        dom.set_element_text("nope", "x");
        assert!(dom.get_element_text("nope").is_none());
    }

    // ===== DisplaySurface tests =====

    #[test]
    fn test_display_surface_error_visibility() {
        let mut dom = MockDom::calculator(&Keypad::new());
        dom.set_text(DisplaySlot::Error, "Desbordamiento");
        assert!(dom.get_element("calc-error").unwrap().visible);
        dom.set_text(DisplaySlot::Error, "");
        assert!(!dom.get_element("calc-error").unwrap().visible);
    }

    #[test]
    fn test_display_surface_history() {
        let mut dom = MockDom::calculator(&Keypad::new());
        let mut history = History::new();
        history.record("1 + 1", "2");
        history.record("2 × 3", "6");
        dom.set_history(&history);

        assert_eq!(dom.get_element_text("history-0"), Some("2 × 3 = 6"));
        assert_eq!(
            dom.get_element("history-1").unwrap().get_attr("data-result"),
            Some("2")
        );

        dom.set_history(&History::new());
        assert!(dom.get_element("history-0").is_none());
    }
}
