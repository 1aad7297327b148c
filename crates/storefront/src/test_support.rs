//! Page recorder shared by the unit tests.

use std::cell::{Cell, RefCell};

use crate::page::{Badge, CartDisplay, CartPage};

/// Records every call the cart makes into the page.
#[derive(Debug, Default)]
pub struct RecordingPage {
    name_field: Option<String>,
    badges: RefCell<Vec<Badge>>,
    displays: RefCell<Vec<CartDisplay>>,
    alerts: RefCell<Vec<String>>,
    navigations: RefCell<Vec<String>>,
    button_states: RefCell<Vec<bool>>,
    name_focused: Cell<bool>,
}

impl RecordingPage {
    /// A page without a customer name field.
    pub fn new() -> Self {
        Self::default()
    }

    /// A page with a customer name field holding `value`.
    pub fn with_name_field(value: &str) -> Self {
        Self {
            name_field: Some(value.to_owned()),
            ..Self::default()
        }
    }

    pub fn badges(&self) -> Vec<Badge> {
        self.badges.borrow().clone()
    }

    pub fn last_badge(&self) -> Option<Badge> {
        self.badges.borrow().last().copied()
    }

    pub fn displays(&self) -> Vec<CartDisplay> {
        self.displays.borrow().clone()
    }

    pub fn last_display(&self) -> Option<CartDisplay> {
        self.displays.borrow().last().cloned()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn button_states(&self) -> Vec<bool> {
        self.button_states.borrow().clone()
    }

    pub fn name_focused(&self) -> bool {
        self.name_focused.get()
    }
}

impl CartPage for RecordingPage {
    fn update_badge(&self, badge: Badge) {
        self.badges.borrow_mut().push(badge);
    }

    fn show_cart(&self, display: &CartDisplay) {
        self.displays.borrow_mut().push(display.clone());
    }

    fn customer_name(&self) -> Option<String> {
        self.name_field.clone()
    }

    fn focus_customer_name(&self) {
        self.name_focused.set(true);
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn navigate(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_owned());
    }

    fn set_place_order_enabled(&self, enabled: bool) {
        self.button_states.borrow_mut().push(enabled);
    }
}
