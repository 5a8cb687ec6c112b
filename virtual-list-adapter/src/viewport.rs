use alloc::rc::Rc;
use core::cell::RefCell;

use virtual_list::ScrollElement;

/// Scroll state shared between the host and the list.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub offset: f64,
    pub height: f64,
    pub listening: bool,
}

/// A cloneable handle to a [`ViewportState`].
///
/// Bind one clone to the list with `bind_scroll_element` and keep another in the host to feed
/// scroll and resize events.
#[derive(Clone, Debug, Default)]
pub struct Viewport(Rc<RefCell<ViewportState>>);

impl Viewport {
    pub fn new(height: f64) -> Self {
        Self(Rc::new(RefCell::new(ViewportState {
            height,
            ..ViewportState::default()
        })))
    }

    pub fn state(&self) -> ViewportState {
        *self.0.borrow()
    }

    pub fn offset(&self) -> f64 {
        self.0.borrow().offset
    }

    pub fn height(&self) -> f64 {
        self.0.borrow().height
    }

    pub fn set_offset(&self, offset: f64) {
        self.0.borrow_mut().offset = offset;
    }

    pub fn set_height(&self, height: f64) {
        self.0.borrow_mut().height = height;
    }

    pub fn is_listening(&self) -> bool {
        self.0.borrow().listening
    }
}

impl ScrollElement for Viewport {
    fn scroll_top(&self) -> f64 {
        self.offset()
    }

    fn viewport_height(&self) -> f64 {
        self.height()
    }

    fn set_scroll_top(&mut self, offset: f64) {
        self.set_offset(offset);
    }

    fn listen(&mut self) {
        self.0.borrow_mut().listening = true;
    }

    fn unlisten(&mut self) {
        self.0.borrow_mut().listening = false;
    }
}
