use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec4;
use smol_str::SmolStr;

use crate::style::{ComputedStyle, LayoutState, SharedStyle, Style, UiState};
use crate::transition::ColorTransition;
use crate::ui::{Callbacks, ShaderParams};
use crate::view::element_type::ElementType;

slotmap::new_key_type! {
    pub struct ElementId;
}

fn next_element_uid() -> u64 {
    static NEXT_UID: AtomicU64 = AtomicU64::new(1);
    NEXT_UID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ElementContent {
    #[default]
    None,
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SyncKey {
    pub base: u64,
    pub instance: Option<u64>,
    pub state: UiState,
}

#[derive(Debug)]
pub struct Element {
    uid: u64,
    name: SmolStr,
    pub(crate) element_type: Rc<ElementType>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) base_style: Style,
    pub(crate) instance_style: Option<SharedStyle>,
    pub(crate) state: UiState,
    pub(crate) disabled: bool,
    pub(crate) computed: ComputedStyle,
    pub(crate) layout: LayoutState,
    pub(crate) content: ElementContent,
    pub(crate) callbacks: Callbacks,
    pub(crate) shader_params: ShaderParams,
    // Background as currently shown, which trails `computed` while a
    // transition runs.
    pub(crate) display_color: Vec4,
    pub(crate) color_transition: Option<ColorTransition>,
    pub(crate) synced: Option<SyncKey>,
    // Set after the first style sync; until then background changes snap.
    pub(crate) styled: bool,
}

impl Element {
    pub(crate) fn new(element_type: Rc<ElementType>, name: impl Into<SmolStr>) -> Self {
        let computed = ComputedStyle::default();
        Self {
            uid: next_element_uid(),
            name: name.into(),
            base_style: element_type.base_style.clone(),
            element_type,
            parent: None,
            children: Vec::new(),
            instance_style: None,
            state: UiState::Normal,
            disabled: false,
            display_color: computed.background_color,
            computed,
            layout: LayoutState::default(),
            content: ElementContent::None,
            callbacks: Callbacks::default(),
            shader_params: ShaderParams::default(),
            color_transition: None,
            synced: None,
            styled: false,
        }
    }

    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.element_type.name
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn base_style(&self) -> &Style {
        &self.base_style
    }

    pub fn instance_style(&self) -> Option<&SharedStyle> {
        self.instance_style.as_ref()
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_interactive(&self) -> bool {
        self.element_type.interactive
    }

    pub fn computed(&self) -> &ComputedStyle {
        &self.computed
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn content(&self) -> &ElementContent {
        &self.content
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    pub fn shader_params(&self) -> &ShaderParams {
        &self.shader_params
    }

    pub fn display_color(&self) -> Vec4 {
        self.display_color
    }

    pub fn is_transitioning(&self) -> bool {
        self.color_transition.is_some()
    }

    pub(crate) fn sync_key(&self) -> SyncKey {
        SyncKey {
            base: self.base_style.revision(),
            instance: self.instance_style.as_ref().map(|s| s.borrow().revision()),
            state: self.state,
        }
    }

    pub(crate) fn retarget_background(&mut self, target: Vec4) {
        let duration = self.computed.duration;
        if duration <= 0.0 {
            self.color_transition = None;
            self.display_color = target;
            return;
        }
        if let Some(transition) = &mut self.color_transition {
            transition.retarget(target, duration);
        } else {
            self.color_transition =
                Some(ColorTransition::new(self.display_color, target, duration));
        }
    }

    pub(crate) fn advance(&mut self, delta_seconds: f32) -> bool {
        let Some(transition) = &mut self.color_transition else {
            return false;
        };
        self.display_color = transition.step(delta_seconds);
        if transition.is_finished() {
            self.color_transition = None;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Element;
    use crate::view::ElementType;
    use approx::assert_relative_eq;
    use glam::Vec4;
    use std::rc::Rc;

    fn element() -> Element {
        Element::new(Rc::new(ElementType::new("element")), "e")
    }

    #[test]
    fn uids_are_unique() {
        let a = element();
        let b = element();
        assert_ne!(a.uid(), b.uid());
        assert_eq!(a.kind(), "element");
    }

    #[test]
    fn background_without_duration_snaps() {
        let mut e = element();
        e.retarget_background(Vec4::ONE);
        assert_eq!(e.display_color(), Vec4::ONE);
        assert!(!e.is_transitioning());
    }

    #[test]
    fn background_with_duration_blends() {
        let mut e = element();
        e.computed.duration = 1.0;
        e.retarget_background(Vec4::ONE);
        assert!(e.is_transitioning());
        assert_eq!(e.display_color(), Vec4::ZERO);
        assert!(e.advance(0.5));
        assert!(e.display_color().x > 0.0 && e.display_color().x < 1.0);
        assert!(!e.advance(1.0));
        assert_relative_eq!(e.display_color().x, 1.0);
        assert!(!e.is_transitioning());
    }
}
