//! Mock DOM
//!
//! An in-memory stand-in for the handful of DOM features the widgets touch:
//! lookup by id, text, classes, attributes, inline style and children. The
//! page is a single owned tree under a `#root` element; every by-id operation
//! searches it depth first, so a change made through an id is visible from
//! the parent's `children` too.

use std::collections::{BTreeMap, BTreeSet};

/// Id of the element every mounted subtree hangs from
pub const ROOT_ID: &str = "root";

/// Events kept in the log; older ones are dropped first
pub const EVENT_LOG_LIMIT: usize = 256;

/// One element of the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomElement {
    /// `id` attribute, empty when absent
    pub id: String,
    /// Tag name
    pub tag: String,
    /// `textContent`
    pub text_content: String,
    /// Attributes other than `id`, `class` and `style`
    pub attributes: BTreeMap<String, String>,
    /// `classList`
    pub classes: BTreeSet<String>,
    /// Inline style properties, kebab-case
    pub style: BTreeMap<String, String>,
    /// Child elements in document order
    pub children: Vec<DomElement>,
}

impl DomElement {
    /// Creates an element with no id, text or children
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Sets the id
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
        self.classes.insert(class.to_string());
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Sets an inline style property
    #[must_use]
    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.set_style(property, value);
        self
    }

    /// Appends children
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Adds `class` when `on`, removes it otherwise
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    /// Whether `class` is in the class list
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Attribute value
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets an inline style property
    pub fn set_style(&mut self, property: &str, value: &str) {
        self.style.insert(property.to_string(), value.to_string());
    }

    /// Inline style property value
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Finds `id` in this subtree, self included
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Self> {
        if !id.is_empty() && self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Mutable [`find`](Self::find)
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Self> {
        if !id.is_empty() && self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Elements in this subtree that carry an id, self included
    #[must_use]
    pub fn id_count(&self) -> usize {
        let own = usize::from(!self.id.is_empty());
        own + self.children.iter().map(Self::id_count).sum::<usize>()
    }
}

/// DOM events the widgets react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// A click on an element
    Click {
        /// Id of the element clicked
        element_id: String,
    },
    /// A `keydown`, `KeyboardEvent.key` naming
    KeyDown {
        /// The key pressed
        key: String,
        /// Ctrl held
        ctrl: bool,
        /// Shift held
        shift: bool,
    },
}

impl DomEvent {
    /// Click on `element_id`
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Unmodified key press
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::key_down_with_modifiers(key, false, false)
    }

    /// Key press with modifier state
    #[must_use]
    pub fn key_down_with_modifiers(key: &str, ctrl: bool, shift: bool) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            ctrl,
            shift,
        }
    }
}

/// In-memory page plus a log of the events dispatched to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDom {
    root: DomElement,
    events: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates a page holding only `#root`
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id(ROOT_ID),
            events: Vec::new(),
        }
    }

    /// The whole tree
    #[must_use]
    pub const fn root(&self) -> &DomElement {
        &self.root
    }

    /// Appends a subtree under `#root`
    pub fn mount(&mut self, element: DomElement) {
        self.root.children.push(element);
    }

    /// Number of elements carrying an id, `#root` excluded
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.root.id_count() - 1
    }

    /// Element by id
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.root.find(id)
    }

    /// Mutable element by id
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.root.find_mut(id)
    }

    /// Runs `f` on element `id`; returns false when there is no such element
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut DomElement)) -> bool {
        self.get_element_mut(id).map(f).is_some()
    }

    /// Appends to the event log, keeping the newest [`EVENT_LOG_LIMIT`]
    pub fn record_event(&mut self, event: DomEvent) {
        if self.events.len() >= EVENT_LOG_LIMIT {
            let excess = self.events.len() + 1 - EVENT_LOG_LIMIT;
            self.events.drain(..excess);
        }
        self.events.push(event);
    }

    /// Events recorded so far, oldest first
    #[must_use]
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    /// Empties the event log
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Sets the text of element `id`
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        self.update(id, |el| el.text_content = text.to_string());
    }

    /// Text of element `id`
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.get_element(id).map(|el| el.text_content.as_str())
    }

    /// Sets an inline style property of element `id`
    pub fn set_element_style(&mut self, id: &str, property: &str, value: &str) {
        self.update(id, |el| el.set_style(property, value));
    }

    /// Inline style property of element `id`
    #[must_use]
    pub fn get_element_style(&self, id: &str, property: &str) -> Option<&str> {
        self.get_element(id).and_then(|el| el.get_style(property))
    }

    /// [`DomElement::toggle_class`] on element `id`
    pub fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        self.update(id, |el| el.toggle_class(class, on));
    }

    /// Swaps the children of `id` for `children` (`replaceChildren`)
    pub fn replace_children(&mut self, id: &str, children: Vec<DomElement>) {
        self.update(id, |el| el.children = children);
    }
}
