// In-memory stand-ins for the capability traits, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use crate::SiteError;
use crate::surface::{Element, SessionStore, Surface, ToneSynth, ToneVoice};

#[derive(Default)]
pub struct FakeElement {
    pub classes: RefCell<BTreeSet<String>>,
    pub styles: RefCell<HashMap<String, String>>,
    pub text: RefCell<String>,
    pub attributes: HashMap<String, String>,
    pub top: f64,
    pub height: f64,
}

impl FakeElement {
    pub fn with_attr(name: &str, value: &str) -> Self {
        let mut el = Self::default();
        el.attributes.insert(name.to_string(), value.to_string());
        el
    }

    pub fn section(id: &str, top: f64, height: f64) -> Self {
        let mut el = Self::with_attr("id", id);
        el.top = top;
        el.height = height;
        el
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }
    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }
    fn toggle_class(&self, class: &str) -> bool {
        let mut classes = self.classes.borrow_mut();
        if classes.remove(class) {
            false
        } else {
            classes.insert(class.to_string());
            true
        }
    }
    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }
    fn style(&self, property: &str) -> String {
        self.styles.borrow().get(property).cloned().unwrap_or_default()
    }
    fn set_style(&self, property: &str, value: &str) {
        self.styles.borrow_mut().insert(property.to_string(), value.to_string());
    }
    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
    fn offset_top(&self) -> f64 {
        self.top
    }
    fn offset_height(&self) -> f64 {
        self.height
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub ops: RefCell<Vec<String>>,
}

impl Surface for RecordingSurface {
    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.borrow_mut().push(format!("clear {x} {y} {width} {height}"));
    }
    fn set_fill_style(&self, css_color: &str) {
        self.ops.borrow_mut().push(format!("style {css_color}"));
    }
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.borrow_mut().push(format!("fill {x} {y} {width} {height}"));
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub values: HashMap<String, String>,
    pub fail_writes: bool,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        if self.fail_writes {
            return Err(SiteError::Storage("quota exceeded".into()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Counts play attempts; fails every one when `blocked`.
#[derive(Default)]
pub struct CountingSynth {
    pub blocked: bool,
    pub attempts: Cell<usize>,
}

impl ToneSynth for CountingSynth {
    fn play(&self, _voices: &[ToneVoice]) -> Result<(), SiteError> {
        self.attempts.set(self.attempts.get() + 1);
        if self.blocked {
            Err(SiteError::Audio("autoplay blocked".into()))
        } else {
            Ok(())
        }
    }
}
