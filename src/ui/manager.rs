use glam::{Vec2, Vec4};
use smol_str::SmolStr;

use crate::error::UiError;
use crate::style::{AttributeRegistry, Display, LengthContext, Overflow, SharedStyle, UiState};
use crate::ui::{
    ClipRect, FontMetrics, InputProvider, MeshId, MouseButton, RenderCommand, TextRun, UiConfig,
    UiEvent, UiEventHandler, UiEventKind, UiRenderer,
};
use crate::view::{ElementContent, ElementId, ElementTypeRegistry, UiTree, compose_transform};

/// Front door of the UI: owns the registries and the element tree, turns
/// polled input into element states and callbacks, and emits draw commands.
///
/// A frame is `update`, then `advance`, then `send_draw_commands`.
pub struct UiManager {
    attributes: AttributeRegistry,
    types: ElementTypeRegistry,
    tree: UiTree,
    config: UiConfig,
    hovered: Option<ElementId>,
    pressed: Option<ElementId>,
    focused: Option<ElementId>,
    mouse_was_down: bool,
}

impl Default for UiManager {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

impl UiManager {
    pub fn new(config: UiConfig) -> Self {
        Self::with_registries(
            config,
            AttributeRegistry::with_defaults(),
            ElementTypeRegistry::new(),
        )
    }

    pub fn with_registries(
        config: UiConfig,
        attributes: AttributeRegistry,
        types: ElementTypeRegistry,
    ) -> Self {
        let mut tree = UiTree::new();
        tree.set_viewport(Vec2::new(config.reference_width, config.reference_height), 1.0);
        Self {
            attributes,
            types,
            tree,
            config,
            hovered: None,
            pressed: None,
            focused: None,
            mouse_was_down: false,
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeRegistry {
        &mut self.attributes
    }

    pub fn types(&self) -> &ElementTypeRegistry {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut ElementTypeRegistry {
        &mut self.types
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    pub fn set_font_metrics(&mut self, metrics: Box<dyn FontMetrics>) {
        self.tree.set_font_metrics(metrics);
    }

    pub fn scale_factor(&self) -> f32 {
        self.tree.scale_factor()
    }

    pub fn viewport(&self) -> Vec2 {
        self.tree.viewport()
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    // ---- building ----

    pub fn begin(&mut self, kind: &str, name: impl Into<SmolStr>) -> Result<ElementId, UiError> {
        let element_type = self
            .types
            .get(kind)
            .ok_or_else(|| UiError::UnknownElementType(kind.to_string()))?;
        Ok(self.tree.begin(element_type, name))
    }

    pub fn end(&mut self) -> Result<ElementId, UiError> {
        self.tree.end()
    }

    pub fn remove(&mut self, id: ElementId) -> Result<(), UiError> {
        self.tree.remove(id)?;
        for slot in [&mut self.hovered, &mut self.pressed, &mut self.focused] {
            if slot.is_some_and(|s| !self.tree.contains(s)) {
                *slot = None;
            }
        }
        Ok(())
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> Result<(), UiError> {
        self.tree.set_base_attribute(id, name, value)
    }

    pub fn set_instance_style(&mut self, id: ElementId, style: SharedStyle) -> Result<(), UiError> {
        self.tree.set_instance_style(id, Some(style))
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<(), UiError> {
        self.tree.set_text(id, text)
    }

    pub fn on_click<F>(&mut self, id: ElementId, handler: F) -> Result<(), UiError>
    where
        F: FnMut(&UiEvent) + 'static,
    {
        self.set_handler(id, UiEventKind::Click, UiEventHandler::new(handler))
    }

    pub fn on_hover<F>(&mut self, id: ElementId, handler: F) -> Result<(), UiError>
    where
        F: FnMut(&UiEvent) + 'static,
    {
        self.set_handler(id, UiEventKind::Hover, UiEventHandler::new(handler))
    }

    pub fn on_press<F>(&mut self, id: ElementId, handler: F) -> Result<(), UiError>
    where
        F: FnMut(&UiEvent) + 'static,
    {
        self.set_handler(id, UiEventKind::Press, UiEventHandler::new(handler))
    }

    pub fn set_handler(
        &mut self,
        id: ElementId,
        kind: UiEventKind,
        handler: UiEventHandler,
    ) -> Result<(), UiError> {
        self.tree.callbacks_mut(id)?.set(kind, handler);
        Ok(())
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), UiError> {
        self.tree.set_disabled(id, disabled)?;
        if disabled {
            for slot in [&mut self.hovered, &mut self.pressed, &mut self.focused] {
                if *slot == Some(id) {
                    *slot = None;
                }
            }
        }
        Ok(())
    }

    pub fn state(&self, id: ElementId) -> Option<UiState> {
        self.tree.get(id).map(|e| e.state())
    }

    // ---- frame ----

    /// Runs one frame of input and layout for a window of the given pixel
    /// size. Callbacks fire at the end, after the tree is consistent.
    pub fn update(&mut self, window_width: f32, window_height: f32, input: &dyn InputProvider) {
        let window = Vec2::new(window_width, window_height);
        let scale = self.config.scale_for(window);
        self.tree.set_viewport(window / scale, scale);

        self.tree.sync_all_styles(&self.attributes);
        self.tree.resolve_all();

        let mouse = input.mouse_position() / scale;
        let down = input.is_mouse_down(MouseButton::Left);
        let target = self.hit_test(mouse);
        let events = self.track_pointer(target, mouse, down);

        self.tree.sync_all_styles(&self.attributes);
        self.tree.resolve_all();

        for (handler, event) in events {
            handler.call(&event);
        }
    }

    pub fn advance(&mut self, delta_seconds: f32) -> bool {
        self.tree.advance_transitions(delta_seconds)
    }

    /// Deepest visible, interactive, enabled element under `point` (layout
    /// units). Children are on top of parents, later siblings on top of
    /// earlier ones, later roots on top of earlier roots.
    pub fn hit_test(&self, point: Vec2) -> Option<ElementId> {
        self.tree
            .roots()
            .iter()
            .rev()
            .find_map(|root| hit(&self.tree, *root, point, None))
    }

    fn track_pointer(
        &mut self,
        target: Option<ElementId>,
        position: Vec2,
        down: bool,
    ) -> Vec<(UiEventHandler, UiEvent)> {
        let previous = [self.hovered, self.pressed, self.focused];
        let mut fired: Vec<(ElementId, UiEventKind)> = Vec::new();

        if down && !self.mouse_was_down {
            self.pressed = target;
            if target.is_none() {
                self.focused = None;
            }
        } else if !down && self.mouse_was_down {
            if let Some(id) = self.pressed.take() {
                if target == Some(id) {
                    fired.push((id, UiEventKind::Click));
                    self.focused = Some(id);
                }
            }
        }
        self.mouse_was_down = down;

        if self.hovered != target {
            self.hovered = target;
            if let Some(id) = target {
                fired.push((id, UiEventKind::Hover));
            }
        }

        let current = [self.hovered, self.pressed, self.focused];
        let mut touched: Vec<ElementId> = previous.into_iter().chain(current).flatten().collect();
        touched.sort();
        touched.dedup();
        for id in touched {
            let Some(element) = self.tree.get(id) else {
                continue;
            };
            let state = if element.is_disabled() {
                UiState::Disabled
            } else if down && self.pressed == Some(id) && target == Some(id) {
                UiState::Pressed
            } else if self.hovered == Some(id) {
                UiState::Hovered
            } else if self.focused == Some(id) {
                UiState::Focused
            } else {
                UiState::Normal
            };
            if matches!(self.tree.set_state(id, state), Ok(true)) && state == UiState::Pressed {
                fired.push((id, UiEventKind::Press));
            }
        }

        fired
            .into_iter()
            .filter_map(|(id, kind)| {
                let handler = self.tree.get(id)?.callbacks().get(kind)?.clone();
                Some((
                    handler,
                    UiEvent {
                        kind,
                        target: id,
                        position,
                    },
                ))
            })
            .collect()
    }

    pub fn send_draw_commands(&mut self, renderer: &mut dyn UiRenderer) {
        self.tree.resolve_all();
        let scale = self.tree.scale_factor();
        renderer.begin_frame(self.tree.viewport() * scale, scale);
        let mut submitted = 0usize;
        for root in self.tree.roots() {
            submitted += draw(&self.tree, *root, None, renderer);
        }
        renderer.end_frame();
        log::trace!("submitted {submitted} draw commands");
    }
}

fn hit(tree: &UiTree, id: ElementId, point: Vec2, clip: Option<ClipRect>) -> Option<ElementId> {
    let element = tree.get(id)?;
    let computed = element.computed();
    if computed.display == Display::None {
        return None;
    }
    let layout = element.layout();
    let rect = ClipRect::from_origin_size(layout.world_position, layout.size);
    let child_clip = match computed.overflow {
        Overflow::Hidden => Some(clip.map_or(rect, |c| c.intersect(rect))),
        Overflow::Visible => clip,
    };
    if let Some(found) = element
        .children()
        .iter()
        .rev()
        .find_map(|child| hit(tree, *child, point, child_clip))
    {
        return Some(found);
    }
    let inside = rect.contains(point) && clip.is_none_or(|c| c.contains(point));
    (inside && computed.is_visible() && element.is_interactive() && !element.is_disabled())
        .then_some(id)
}

fn draw(
    tree: &UiTree,
    id: ElementId,
    clip: Option<ClipRect>,
    renderer: &mut dyn UiRenderer,
) -> usize {
    let Some(element) = tree.get(id) else {
        return 0;
    };
    let computed = element.computed();
    if computed.display == Display::None {
        return 0;
    }
    let scale = tree.scale_factor();
    let layout = element.layout();
    let mut submitted = 0;

    if computed.is_visible() {
        let border = Vec4::new(
            layout.border.top,
            layout.border.right,
            layout.border.bottom,
            layout.border.left,
        );
        let color = element.display_color();
        let has_border = border.max_element() > 0.0 && computed.border_color.w > 0.0;
        if color.w > 0.0 || has_border {
            let mut params = *element.shader_params();
            params.size = layout.size * scale;
            params.border = border * scale;
            renderer.submit(RenderCommand {
                element: id,
                mesh: MeshId::Quad,
                transform: layout.world_transform,
                color,
                params,
                clip,
                text: None,
            });
            submitted += 1;
        }

        if let ElementContent::Text(text) = element.content() {
            let ctx = LengthContext::new(0.0, 0.0, tree.viewport().x, tree.viewport().y);
            let font_size = computed.font_size.resolve(&ctx).unwrap_or(16.0).max(0.0);
            let origin = layout.world_position + layout.content_offset();
            renderer.submit(RenderCommand {
                element: id,
                mesh: MeshId::Text,
                transform: compose_transform(
                    origin * scale,
                    layout.world_rotation,
                    layout.content_size() * scale,
                ),
                color: computed.text_color,
                params: *element.shader_params(),
                clip,
                text: Some(TextRun {
                    content: text.clone(),
                    font_size: font_size * scale,
                }),
            });
            submitted += 1;
        }
    }

    let child_clip = match computed.overflow {
        Overflow::Hidden => {
            let rect =
                ClipRect::from_origin_size(layout.world_position * scale, layout.size * scale);
            Some(clip.map_or(rect, |c| c.intersect(rect)))
        }
        Overflow::Visible => clip,
    };
    for child in element.children() {
        submitted += draw(tree, *child, child_clip, renderer);
    }
    submitted
}
