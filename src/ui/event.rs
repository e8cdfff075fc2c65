use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

use crate::view::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    // Mouse released over the element that received the press.
    Click,
    Hover,
    Press,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiEvent {
    pub kind: UiEventKind,
    pub target: ElementId,
    pub position: Vec2,
}

fn next_handler_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone)]
pub struct UiEventHandler {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&UiEvent)>>,
}

impl UiEventHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&UiEvent) + 'static,
    {
        Self {
            id: next_handler_id(),
            handler: Rc::new(RefCell::new(handler)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn call(&self, event: &UiEvent) {
        (self.handler.borrow_mut())(event);
    }
}

impl PartialEq for UiEventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for UiEventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiEventHandler").field("id", &self.id).finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Callbacks {
    pub on_click: Option<UiEventHandler>,
    pub on_hover: Option<UiEventHandler>,
    pub on_press: Option<UiEventHandler>,
}

impl Callbacks {
    pub fn get(&self, kind: UiEventKind) -> Option<&UiEventHandler> {
        match kind {
            UiEventKind::Click => self.on_click.as_ref(),
            UiEventKind::Hover => self.on_hover.as_ref(),
            UiEventKind::Press => self.on_press.as_ref(),
        }
    }

    pub fn set(&mut self, kind: UiEventKind, handler: UiEventHandler) {
        let slot = match kind {
            UiEventKind::Click => &mut self.on_click,
            UiEventKind::Hover => &mut self.on_hover,
            UiEventKind::Press => &mut self.on_press,
        };
        *slot = Some(handler);
    }
}
