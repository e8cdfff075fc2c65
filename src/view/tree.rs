use std::rc::Rc;

use bitflags::bitflags;
use glam::{EulerRot, Mat4, Vec2, Vec3, Vec4};
use slotmap::{SecondaryMap, SlotMap};
use smol_str::SmolStr;

use crate::error::UiError;
use crate::style::{
    AttributeRegistry, ComputedStyle, Display, EdgeInsets, Length, LengthContext, SharedStyle,
    SizeSpec, Unit, UiState, resolve_layers,
};
use crate::ui::FontMetrics;
use crate::view::element::{Element, ElementContent, ElementId};
use crate::view::element_type::ElementType;
use crate::view::layout::{ChildLayout, ContainerLayout, Extent, calculator_for};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        const SIZE = 1 << 0;
        const POSITION = 1 << 1;
        const WORLD_TRANSFORM = 1 << 2;
        const STYLE = 1 << 3;
    }
}

impl DirtyFlags {
    pub const LAYOUT: Self = Self::SIZE
        .union(Self::POSITION)
        .union(Self::WORLD_TRANSFORM);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleChange {
    #[default]
    Unchanged,
    Visual,
    Layout,
}

/// Arena of elements plus everything needed to lay them out.
///
/// Geometry is computed lazily. Mutations set [`DirtyFlags`]; readers such
/// as [`UiTree::local_size`] and [`UiTree::world_transform`] recompute only
/// what is flagged, always in the order size, then position, then world
/// transform. Sizes of siblings are resolved together by their parent's
/// calculator.
pub struct UiTree {
    elements: SlotMap<ElementId, Element>,
    dirty: SecondaryMap<ElementId, DirtyFlags>,
    roots: Vec<ElementId>,
    scope: Vec<ElementId>,
    viewport: Vec2,
    scale_factor: f32,
    font_metrics: Option<Box<dyn FontMetrics>>,
}

impl Default for UiTree {
    fn default() -> Self {
        Self::new()
    }
}

impl UiTree {
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
            dirty: SecondaryMap::new(),
            roots: Vec::new(),
            scope: Vec::new(),
            viewport: Vec2::ZERO,
            scale_factor: 1.0,
            font_metrics: None,
        }
    }

    pub fn set_font_metrics(&mut self, metrics: Box<dyn FontMetrics>) {
        self.font_metrics = Some(metrics);
        self.mark_all_dirty();
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn set_viewport(&mut self, viewport: Vec2, scale_factor: f32) -> bool {
        if self.viewport == viewport && self.scale_factor == scale_factor {
            return false;
        }
        log::debug!("viewport {viewport} at scale {scale_factor}");
        self.viewport = viewport;
        self.scale_factor = scale_factor;
        let ids: Vec<ElementId> = self.elements.keys().collect();
        for id in ids {
            self.refresh_shader_params(id);
        }
        self.mark_all_dirty();
        true
    }

    fn mark_all_dirty(&mut self) {
        for root in self.roots.clone() {
            self.mark_dirty(root);
        }
    }

    // ---- structure ----

    pub fn begin(&mut self, element_type: Rc<ElementType>, name: impl Into<SmolStr>) -> ElementId {
        let parent = self.scope.last().copied();
        let id = self.insert(element_type, name, parent);
        self.scope.push(id);
        id
    }

    pub fn end(&mut self) -> Result<ElementId, UiError> {
        self.scope.pop().ok_or(UiError::UnbalancedScope)
    }

    pub fn open_scopes(&self) -> usize {
        self.scope.len()
    }

    pub fn insert(
        &mut self,
        element_type: Rc<ElementType>,
        name: impl Into<SmolStr>,
        parent: Option<ElementId>,
    ) -> ElementId {
        let id = self.elements.insert(Element::new(element_type, name));
        self.dirty.insert(id, DirtyFlags::all());
        match parent.filter(|p| self.elements.contains_key(*p)) {
            Some(parent) => {
                self.elements[id].parent = Some(parent);
                self.elements[parent].children.push(id);
                self.mark_dirty_parent(id);
            }
            None => self.roots.push(id),
        }
        id
    }

    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), UiError> {
        self.check(parent)?;
        self.check(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(UiError::InvalidParent { parent, child });
        }
        self.detach(child);
        self.elements[child].parent = Some(parent);
        self.elements[parent].children.push(child);
        self.mark_dirty_parent(child);
        self.mark_dirty(child);
        Ok(())
    }

    pub fn remove(&mut self, id: ElementId) -> Result<(), UiError> {
        self.check(id)?;
        if let Some(parent) = self.elements[id].parent {
            self.mark_dirty_parent(id);
            self.elements[parent].children.retain(|c| *c != id);
        } else {
            self.roots.retain(|r| *r != id);
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(element) = self.elements.remove(next) {
                stack.extend(element.children);
            }
            self.dirty.remove(next);
        }
        self.scope.retain(|s| self.elements.contains_key(*s));
        Ok(())
    }

    fn detach(&mut self, id: ElementId) {
        match self.elements[id].parent.take() {
            Some(old) => {
                self.elements[old].children.retain(|c| *c != id);
                self.mark_dirty(old);
            }
            None => self.roots.retain(|r| *r != id),
        }
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.elements.get(id).and_then(|e| e.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn check(&self, id: ElementId) -> Result<(), UiError> {
        if self.elements.contains_key(id) {
            Ok(())
        } else {
            Err(UiError::UnknownElement(id))
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn child(&self, id: ElementId, index: usize) -> Option<ElementId> {
        let child = self.children(id).get(index).copied();
        if child.is_none() {
            log::error!("element {id:?} has no child at index {index}");
        }
        child
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys()
    }

    pub fn walk(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.elements.len());
        let mut stack: Vec<ElementId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // ---- dirty tracking ----

    pub fn dirty(&self, id: ElementId) -> DirtyFlags {
        self.dirty.get(id).copied().unwrap_or(DirtyFlags::empty())
    }

    pub fn is_dirty(&self, id: ElementId, flags: DirtyFlags) -> bool {
        self.dirty(id).intersects(flags)
    }

    pub fn mark_dirty(&mut self, id: ElementId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(flags) = self.dirty.get_mut(next) {
                flags.insert(DirtyFlags::LAYOUT);
            }
            stack.extend(self.children(next).iter().copied());
        }
    }

    /// Invalidates the part of the tree whose layout depends on `id`: its
    /// parent's subtree, or its own when it is a root. Content-sized
    /// ancestors grow with their children, so the walk continues past them.
    pub fn mark_dirty_parent(&mut self, id: ElementId) {
        let mut target = id;
        while let Some(parent) = self.parent(target) {
            target = parent;
            let computed = &self.elements[parent].computed;
            if !(computed.width.is_auto() || computed.height.is_auto()) {
                break;
            }
        }
        self.mark_dirty(target);
    }

    // ---- style ----

    pub fn set_instance_style(
        &mut self,
        id: ElementId,
        style: Option<SharedStyle>,
    ) -> Result<(), UiError> {
        self.check(id)?;
        let element = &mut self.elements[id];
        element.instance_style = style;
        element.synced = None;
        self.flag_style(id);
        Ok(())
    }

    pub fn set_base_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), UiError> {
        self.check(id)?;
        self.elements[id].base_style.set(name, value);
        self.flag_style(id);
        Ok(())
    }

    pub fn set_state(&mut self, id: ElementId, state: UiState) -> Result<bool, UiError> {
        self.check(id)?;
        let element = &mut self.elements[id];
        if element.state == state {
            return Ok(false);
        }
        log::trace!("{} {:?} -> {:?}", element.name(), element.state, state);
        element.state = state;
        self.flag_style(id);
        Ok(true)
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), UiError> {
        self.check(id)?;
        self.elements[id].disabled = disabled;
        let state = if disabled { UiState::Disabled } else { UiState::Normal };
        self.set_state(id, state)?;
        Ok(())
    }

    fn flag_style(&mut self, id: ElementId) {
        if let Some(flags) = self.dirty.get_mut(id) {
            flags.insert(DirtyFlags::STYLE);
        }
    }

    pub fn sync_style(&mut self, id: ElementId, registry: &AttributeRegistry) -> StyleChange {
        let Some(element) = self.elements.get(id) else {
            return StyleChange::Unchanged;
        };
        let key = element.sync_key();
        if element.synced == Some(key) {
            if let Some(flags) = self.dirty.get_mut(id) {
                flags.remove(DirtyFlags::STYLE);
            }
            return StyleChange::Unchanged;
        }

        let resolved = {
            let instance = element.instance_style.as_ref().map(|s| s.borrow());
            resolve_layers(registry, &element.base_style, instance.as_deref(), element.state)
        };
        let mut computed = ComputedStyle::default();
        for (name, raw) in &resolved {
            let Some(setter) = element.element_type.dispatch.get(name) else {
                log::debug!("`{}` ignores attribute `{name}`", element.kind());
                continue;
            };
            let value = registry.get_attribute_value(name, raw).into_value();
            if let Err(err) = setter(&mut computed, &value) {
                log::warn!("{}: {name}: {err}", element.name());
            }
        }

        let change = self.apply_computed(id, computed);
        let element = &mut self.elements[id];
        element.synced = Some(key);
        element.styled = true;
        if let Some(flags) = self.dirty.get_mut(id) {
            flags.remove(DirtyFlags::STYLE);
        }
        change
    }

    pub fn sync_all_styles(&mut self, registry: &AttributeRegistry) -> StyleChange {
        let mut change = StyleChange::Unchanged;
        for id in self.walk() {
            change = change.max_with(self.sync_style(id, registry));
        }
        change
    }

    fn apply_computed(&mut self, id: ElementId, computed: ComputedStyle) -> StyleChange {
        let element = &mut self.elements[id];
        if element.computed == computed {
            return StyleChange::Unchanged;
        }
        let layout = element.computed.layout_differs(&computed);
        let rotation = element.computed.rotation_differs(&computed);
        let background = element.computed.background_color != computed.background_color;
        element.computed = computed;
        if !element.styled {
            element.display_color = element.computed.background_color;
            element.color_transition = None;
        } else if background {
            let target = element.computed.background_color;
            element.retarget_background(target);
        }
        self.refresh_shader_params(id);

        if layout {
            self.mark_dirty_parent(id);
            StyleChange::Layout
        } else if rotation {
            self.mark_dirty(id);
            StyleChange::Layout
        } else {
            StyleChange::Visual
        }
    }

    fn refresh_shader_params(&mut self, id: ElementId) {
        let ctx = LengthContext::new(0.0, 0.0, self.viewport.x, self.viewport.y);
        let element = &mut self.elements[id];
        element.shader_params.border_color = element.computed.border_color;
        element.shader_params.border_radius =
            element.computed.border_radius.resolve_or_zero(&ctx).max(0.0) * self.scale_factor;
    }

    pub fn advance_transitions(&mut self, delta_seconds: f32) -> bool {
        let mut running = false;
        for (_, element) in self.elements.iter_mut() {
            running |= element.advance(delta_seconds);
        }
        running
    }

    // ---- programmatic setters ----

    fn edit(
        &mut self,
        id: ElementId,
        edit: impl FnOnce(&mut ComputedStyle),
    ) -> Result<(), UiError> {
        self.check(id)?;
        let mut computed = self.elements[id].computed.clone();
        edit(&mut computed);
        self.apply_computed(id, computed);
        Ok(())
    }

    pub fn set_desired_size(
        &mut self,
        id: ElementId,
        width: SizeSpec,
        height: SizeSpec,
    ) -> Result<(), UiError> {
        self.edit(id, |c| {
            c.width = width;
            c.height = height;
        })
    }

    pub fn set_desired_position(
        &mut self,
        id: ElementId,
        x: Length,
        y: Length,
    ) -> Result<(), UiError> {
        self.edit(id, |c| {
            c.position_x = x;
            c.position_y = y;
        })
    }

    pub fn set_margin(&mut self, id: ElementId, margin: EdgeInsets<Length>) -> Result<(), UiError> {
        self.edit(id, |c| c.margin = margin)
    }

    pub fn set_padding(
        &mut self,
        id: ElementId,
        padding: EdgeInsets<Length>,
    ) -> Result<(), UiError> {
        self.edit(id, |c| c.padding = padding)
    }

    pub fn set_border_size(
        &mut self,
        id: ElementId,
        border: EdgeInsets<Length>,
    ) -> Result<(), UiError> {
        self.edit(id, |c| c.border = border)
    }

    pub fn set_background_color(&mut self, id: ElementId, color: Vec4) -> Result<(), UiError> {
        self.edit(id, |c| c.background_color = color)
    }

    pub fn set_rotation(&mut self, id: ElementId, rotation: Vec3) -> Result<(), UiError> {
        self.edit(id, |c| c.rotation = rotation)
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<(), UiError> {
        self.check(id)?;
        self.elements[id].content = ElementContent::Text(text.into());
        self.mark_dirty_parent(id);
        Ok(())
    }

    pub fn callbacks_mut(&mut self, id: ElementId) -> Result<&mut crate::ui::Callbacks, UiError> {
        self.elements
            .get_mut(id)
            .map(|e| &mut e.callbacks)
            .ok_or(UiError::UnknownElement(id))
    }

    // ---- lazy layout reads ----

    pub fn local_size(&mut self, id: ElementId) -> Vec2 {
        self.ensure_size(id);
        self.elements.get(id).map(|e| e.layout.size).unwrap_or(Vec2::ZERO)
    }

    pub fn screen_size(&mut self, id: ElementId) -> Vec2 {
        self.local_size(id) * self.scale_factor
    }

    pub fn local_position(&mut self, id: ElementId) -> Vec2 {
        self.ensure_position(id);
        self.elements
            .get(id)
            .map(|e| {
                e.layout.layout_position + Vec2::new(e.layout.margin.left, e.layout.margin.top)
            })
            .unwrap_or(Vec2::ZERO)
    }

    pub fn world_position(&mut self, id: ElementId) -> Vec2 {
        self.ensure_world(id);
        self.elements.get(id).map(|e| e.layout.world_position).unwrap_or(Vec2::ZERO)
    }

    pub fn world_rotation(&mut self, id: ElementId) -> Vec3 {
        self.ensure_world(id);
        self.elements.get(id).map(|e| e.layout.world_rotation).unwrap_or(Vec3::ZERO)
    }

    pub fn world_transform(&mut self, id: ElementId) -> Mat4 {
        self.ensure_world(id);
        self.elements
            .get(id)
            .map(|e| e.layout.world_transform)
            .unwrap_or(Mat4::IDENTITY)
    }

    pub fn siblings_total_layout_size(&mut self, id: ElementId) -> f32 {
        match self.parent(id) {
            Some(parent) => {
                self.ensure_children_sized(parent);
                self.elements[parent].layout.major_total
            }
            None => {
                let size = self.local_size(id);
                let margin = self
                    .elements
                    .get(id)
                    .map(|e| e.layout.margin_size())
                    .unwrap_or(Vec2::ZERO);
                size.x + margin.x
            }
        }
    }

    pub fn resolve_all(&mut self) {
        for id in self.walk() {
            self.ensure_world(id);
        }
    }

    fn ensure_size(&mut self, id: ElementId) {
        if !self.is_dirty(id, DirtyFlags::SIZE) {
            return;
        }
        match self.parent(id) {
            Some(parent) => self.ensure_children_sized(parent),
            None => self.size_root(id),
        }
    }

    fn size_root(&mut self, id: ElementId) {
        let ctx = LengthContext::new(
            self.viewport.x,
            self.viewport.y,
            self.viewport.x,
            self.viewport.y,
        );
        let computed = self.elements[id].computed.clone();
        let margin = computed.margin.resolve(&ctx);
        let room =
            (self.viewport - Vec2::new(margin.horizontal(), margin.vertical())).max(Vec2::ZERO);
        let size = if computed.display == Display::None {
            Vec2::ZERO
        } else {
            Vec2::new(
                resolve_root_extent(computed.width, &ctx, room.x),
                resolve_root_extent(computed.height, &ctx, room.y),
            )
        };
        let element = &mut self.elements[id];
        element.layout.margin = margin;
        element.layout.padding = computed.padding.resolve(&ctx);
        element.layout.border = computed.border.resolve(&ctx);
        element.layout.size = size;
        self.clear(id, DirtyFlags::SIZE);
    }

    fn ensure_children_sized(&mut self, parent: ElementId) {
        let children = self.elements[parent].children.clone();
        if !children.iter().any(|c| self.is_dirty(*c, DirtyFlags::SIZE)) {
            return;
        }
        self.ensure_size(parent);

        let (container, ctx) = self.container(parent);
        let visible: Vec<ElementId> = children
            .iter()
            .copied()
            .filter(|c| self.elements[*c].computed.display != Display::None)
            .collect();
        let layouts: Vec<ChildLayout> =
            visible.iter().map(|c| self.child_layout(*c, &ctx)).collect();

        let calculator = calculator_for(self.elements[parent].computed.layout_type);
        let pass = calculator.compute_sizes(&container, &layouts);

        for child in &children {
            let element = &mut self.elements[*child];
            element.layout.margin = element.computed.margin.resolve(&ctx);
            element.layout.padding = element.computed.padding.resolve(&ctx);
            element.layout.border = element.computed.border.resolve(&ctx);
            element.layout.size = Vec2::ZERO;
        }
        for (child, size) in visible.iter().zip(&pass.sizes) {
            self.elements[*child].layout.size = *size;
        }
        self.elements[parent].layout.major_total = pass.major_total;
        for child in children {
            self.clear(child, DirtyFlags::SIZE);
        }
        log::trace!("sized children of {}", self.elements[parent].name());
    }

    fn ensure_position(&mut self, id: ElementId) {
        if !self.is_dirty(id, DirtyFlags::POSITION) {
            return;
        }
        let Some(parent) = self.parent(id) else {
            self.ensure_size(id);
            let ctx = self.viewport_context();
            let computed = &self.elements[id].computed;
            let offset = Vec2::new(
                computed.position_x.resolve_or_zero(&ctx),
                computed.position_y.resolve_or_zero(&ctx),
            );
            self.elements[id].layout.layout_position = offset;
            self.clear(id, DirtyFlags::POSITION);
            return;
        };

        self.ensure_children_sized(parent);
        let (container, ctx) = self.container(parent);
        let children = self.elements[parent].children.clone();
        let visible: Vec<ElementId> = children
            .iter()
            .copied()
            .filter(|c| self.elements[*c].computed.display != Display::None)
            .collect();
        let layouts: Vec<ChildLayout> =
            visible.iter().map(|c| self.child_layout(*c, &ctx)).collect();
        let sizes: Vec<Vec2> = visible.iter().map(|c| self.elements[*c].layout.size).collect();

        let calculator = calculator_for(self.elements[parent].computed.layout_type);
        let positions = calculator.compute_positions(&container, &layouts, &sizes);
        let origin = self.elements[parent].layout.content_offset();

        for child in &children {
            self.elements[*child].layout.layout_position = origin;
        }
        for (child, position) in visible.iter().zip(positions) {
            self.elements[*child].layout.layout_position = origin + position;
        }
        for child in children {
            self.clear(child, DirtyFlags::POSITION);
        }
    }

    fn ensure_world(&mut self, id: ElementId) {
        if !self.is_dirty(id, DirtyFlags::WORLD_TRANSFORM) {
            return;
        }
        let (parent_position, parent_rotation) = match self.parent(id) {
            Some(parent) => {
                self.ensure_world(parent);
                let layout = &self.elements[parent].layout;
                (layout.world_position, layout.world_rotation)
            }
            None => (Vec2::ZERO, Vec3::ZERO),
        };
        self.ensure_size(id);
        self.ensure_position(id);

        let scale = self.scale_factor;
        let element = &mut self.elements[id];
        let layout = &mut element.layout;
        layout.world_position = parent_position
            + layout.layout_position
            + Vec2::new(layout.margin.left, layout.margin.top);
        layout.world_rotation = parent_rotation + element.computed.rotation;
        layout.world_transform = compose_transform(
            layout.world_position * scale,
            layout.world_rotation,
            layout.size * scale,
        );
        self.clear(id, DirtyFlags::WORLD_TRANSFORM);
    }

    fn clear(&mut self, id: ElementId, flags: DirtyFlags) {
        if let Some(current) = self.dirty.get_mut(id) {
            current.remove(flags);
        }
    }

    fn viewport_context(&self) -> LengthContext {
        LengthContext::new(self.viewport.x, self.viewport.y, self.viewport.x, self.viewport.y)
    }

    fn container(&self, parent: ElementId) -> (ContainerLayout, LengthContext) {
        let element = &self.elements[parent];
        let content = element.layout.content_size();
        let computed = &element.computed;
        (
            ContainerLayout {
                content_size: content,
                direction: computed.layout_direction,
                wrap: computed.layout_wrap,
                major: computed.layout_major,
                minor: computed.layout_minor,
                item: computed.layout_item,
            },
            LengthContext::new(content.x, content.y, self.viewport.x, self.viewport.y),
        )
    }

    fn child_layout(&self, id: ElementId, ctx: &LengthContext) -> ChildLayout {
        let computed = &self.elements[id].computed;
        let margin = computed.margin.resolve(ctx);
        let width = extent(computed.width, ctx);
        let height = extent(computed.height, ctx);
        let intrinsic = if width == Extent::Auto || height == Extent::Auto {
            self.intrinsic_size(id)
        } else {
            Vec2::ZERO
        };
        ChildLayout {
            width,
            height,
            intrinsic,
            margin: Vec2::new(margin.horizontal(), margin.vertical()),
            offset: Vec2::new(
                computed.position_x.resolve_or_zero(ctx),
                computed.position_y.resolve_or_zero(ctx),
            ),
        }
    }

    /// Border-box size `id` would take from its content alone. Percentages
    /// of the parent are unknown here and count as zero.
    pub fn intrinsic_size(&self, id: ElementId) -> Vec2 {
        let Some(element) = self.elements.get(id) else {
            return Vec2::ZERO;
        };
        let computed = &element.computed;
        let ctx = LengthContext::new(0.0, 0.0, self.viewport.x, self.viewport.y);
        let padding = computed.padding.resolve(&ctx);
        let border = computed.border.resolve(&ctx);

        let content = match &element.content {
            ElementContent::Text(text) => {
                let font_size = computed.font_size.resolve(&ctx).unwrap_or(16.0).max(0.0);
                match &self.font_metrics {
                    Some(metrics) => metrics.measure(text, font_size),
                    None => Vec2::new(0.0, font_size),
                }
            }
            ElementContent::None => {
                let layouts: Vec<ChildLayout> = element
                    .children
                    .iter()
                    .filter(|c| self.elements[**c].computed.display != Display::None)
                    .map(|c| {
                        let child = &self.elements[*c].computed;
                        let margin = child.margin.resolve(&ctx);
                        let width = measure_extent(child.width, &ctx);
                        let height = measure_extent(child.height, &ctx);
                        ChildLayout {
                            width,
                            height,
                            intrinsic: if width == Extent::Auto || height == Extent::Auto {
                                self.intrinsic_size(*c)
                            } else {
                                Vec2::ZERO
                            },
                            margin: Vec2::new(margin.horizontal(), margin.vertical()),
                            offset: Vec2::new(
                                child.position_x.resolve_or_zero(&ctx),
                                child.position_y.resolve_or_zero(&ctx),
                            ),
                        }
                    })
                    .collect();
                let container = ContainerLayout {
                    direction: computed.layout_direction,
                    wrap: computed.layout_wrap,
                    major: computed.layout_major,
                    minor: computed.layout_minor,
                    item: computed.layout_item,
                    content_size: Vec2::ZERO,
                };
                calculator_for(computed.layout_type).content_size(&container, &layouts)
            }
        };

        let chrome = Vec2::new(
            padding.horizontal() + border.horizontal(),
            padding.vertical() + border.vertical(),
        );
        let own = |size: SizeSpec, content: f32, chrome: f32| match size {
            SizeSpec::Auto => content + chrome,
            SizeSpec::Length(length) => length.resolve_or_zero(&ctx).max(0.0),
        };
        Vec2::new(
            own(computed.width, content.x, chrome.x),
            own(computed.height, content.y, chrome.y),
        )
    }
}

impl StyleChange {
    fn max_with(self, other: Self) -> Self {
        match (self, other) {
            (Self::Layout, _) | (_, Self::Layout) => Self::Layout,
            (Self::Visual, _) | (_, Self::Visual) => Self::Visual,
            _ => Self::Unchanged,
        }
    }
}

fn extent(size: SizeSpec, ctx: &LengthContext) -> Extent {
    match size {
        SizeSpec::Auto => Extent::Auto,
        SizeSpec::Length(Length {
            value,
            unit: Unit::PercentOfAvailable,
        }) => Extent::Available(value),
        SizeSpec::Length(length) => Extent::Fixed(length.resolve_or_zero(ctx).max(0.0)),
    }
}

fn measure_extent(size: SizeSpec, ctx: &LengthContext) -> Extent {
    match extent(size, ctx) {
        Extent::Available(_) => Extent::Fixed(0.0),
        other => other,
    }
}

fn resolve_root_extent(size: SizeSpec, ctx: &LengthContext, room: f32) -> f32 {
    match size {
        SizeSpec::Auto => room,
        SizeSpec::Length(Length {
            value,
            unit: Unit::PercentOfAvailable,
        }) => room * value * 0.01,
        SizeSpec::Length(length) => length.resolve_or_zero(ctx).max(0.0),
    }
}

/// `T(position) · R(rotation) · S(size)`, rotation in degrees applied x,
/// then y, then z.
pub fn compose_transform(position: Vec2, rotation_degrees: Vec3, size: Vec2) -> Mat4 {
    let r = rotation_degrees * (std::f32::consts::PI / 180.0);
    Mat4::from_translation(position.extend(0.0))
        * Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
        * Mat4::from_scale(size.extend(1.0))
}

#[cfg(test)]
mod tests {
    use super::{DirtyFlags, StyleChange, UiTree};
    use crate::error::UiError;
    use crate::style::{AttributeRegistry, EdgeInsets, Length, SizeSpec, Style, UiState};
    use crate::ui::MonospaceMetrics;
    use crate::view::{ElementId, ElementType, ElementTypeRegistry, ELEMENT};
    use glam::{Vec2, Vec3, Vec4};

    struct Fixture {
        tree: UiTree,
        attributes: AttributeRegistry,
        types: ElementTypeRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let mut tree = UiTree::new();
            tree.set_viewport(Vec2::new(800.0, 600.0), 1.0);
            Self {
                tree,
                attributes: AttributeRegistry::with_defaults(),
                types: ElementTypeRegistry::new(),
            }
        }

        fn begin(&mut self, name: &str, attributes: &[(&str, &str)]) -> ElementId {
            let ty = self.types.get(ELEMENT).unwrap();
            let id = self.tree.begin(ty, name);
            for (k, v) in attributes {
                self.tree.set_base_attribute(id, k, v).unwrap();
            }
            id
        }

        fn end(&mut self) {
            self.tree.end().unwrap();
        }

        fn sync(&mut self) -> StyleChange {
            self.tree.sync_all_styles(&self.attributes)
        }
    }

    #[test]
    fn end_without_begin_is_an_error() {
        let mut tree = UiTree::new();
        assert_eq!(tree.end(), Err(UiError::UnbalancedScope));
    }

    #[test]
    fn scopes_nest_children() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[]);
        let a = f.begin("a", &[]);
        f.end();
        let b = f.begin("b", &[]);
        f.end();
        f.end();
        assert_eq!(f.tree.roots(), [root]);
        assert_eq!(f.tree.children(root), [a, b]);
        assert_eq!(f.tree.parent(b), Some(root));
        assert_eq!(f.tree.child(root, 1), Some(b));
        assert_eq!(f.tree.child(root, 5), None);
        assert_eq!(f.tree.open_scopes(), 0);
    }

    #[test]
    fn percent_width_follows_parent() {
        for width in [100.0_f32, 400.0, 640.0] {
            let mut f = Fixture::new();
            let px = format!("{width}px");
            let root = f.begin("root", &[("width", px.as_str()), ("height", "100px")]);
            let child = f.begin("child", &[("width", "50%w"), ("height", "10px")]);
            f.end();
            f.end();
            f.sync();
            assert_eq!(f.tree.local_size(root).x, width);
            assert_eq!(f.tree.local_size(child).x, 0.5 * width);
        }
    }

    #[test]
    fn stretch_divides_container_width() {
        let mut f = Fixture::new();
        let root = f.begin(
            "root",
            &[("width", "300px"), ("height", "50px"), ("layoutMajor", "stretch")],
        );
        let children: Vec<ElementId> = (0..3)
            .map(|i| {
                let id = f.begin(&format!("c{i}"), &[("height", "10px")]);
                f.end();
                id
            })
            .collect();
        f.end();
        f.sync();
        for (i, child) in children.iter().enumerate() {
            assert_eq!(f.tree.local_size(*child).x, 100.0);
            assert_eq!(f.tree.local_position(*child).x, 100.0 * i as f32);
        }
        assert_eq!(f.tree.siblings_total_layout_size(children[0]), 300.0);
        assert_eq!(f.tree.local_size(root).x, 300.0);
    }

    #[test]
    fn every_flag_clears_after_resolve() {
        let mut f = Fixture::new();
        f.begin("root", &[("padding", "4px"), ("layoutDirection", "column")]);
        for i in 0..4 {
            f.begin(&format!("row{i}"), &[("height", "20px"), ("margin", "2px")]);
            f.begin("leaf", &[("width", "50%w"), ("height", "5px")]);
            f.end();
            f.end();
        }
        f.end();
        f.sync();
        f.tree.resolve_all();
        let ids: Vec<ElementId> = f.tree.ids().collect();
        for id in ids {
            assert!(f.tree.dirty(id).is_empty(), "{id:?} still {:?}", f.tree.dirty(id));
        }
    }

    #[test]
    fn auto_root_fills_viewport_and_auto_child_wraps_content() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[]);
        let holder = f.begin("holder", &[("padding", "5px")]);
        let leaf = f.begin("leaf", &[("width", "30px"), ("height", "20px"), ("margin", "1px")]);
        f.end();
        f.end();
        f.end();
        f.sync();
        assert_eq!(f.tree.local_size(root), Vec2::new(800.0, 600.0));
        assert_eq!(f.tree.local_size(holder), Vec2::new(42.0, 32.0));
        assert_eq!(f.tree.world_position(leaf), Vec2::new(6.0, 6.0));
    }

    #[test]
    fn world_position_adds_parent_padding_border_and_margin() {
        let mut f = Fixture::new();
        let root = f.begin(
            "root",
            &[
                ("width", "200px"),
                ("height", "100px"),
                ("padding", "10px"),
                ("borderSize", "2px"),
                ("position", "5px 7px"),
            ],
        );
        let child = f.begin(
            "child",
            &[("width", "20px"), ("height", "20px"), ("marginLeft", "3px")],
        );
        f.end();
        f.end();
        f.sync();
        assert_eq!(f.tree.world_position(root), Vec2::new(5.0, 7.0));
        assert_eq!(f.tree.world_position(child), Vec2::new(20.0, 19.0));
        assert_eq!(f.tree.local_position(child), Vec2::new(15.0, 12.0));
    }

    #[test]
    fn hidden_display_takes_no_space() {
        let mut f = Fixture::new();
        f.begin("root", &[("width", "200px"), ("height", "100px")]);
        let gone = f.begin("gone", &[("width", "50px"), ("height", "10px"), ("display", "none")]);
        f.end();
        let next = f.begin("next", &[("width", "50px"), ("height", "10px")]);
        f.end();
        f.end();
        f.sync();
        assert_eq!(f.tree.local_size(gone), Vec2::ZERO);
        assert_eq!(f.tree.local_position(next), Vec2::ZERO);
    }

    #[test]
    fn text_measures_through_font_metrics() {
        let mut f = Fixture::new();
        f.tree.set_font_metrics(Box::new(MonospaceMetrics::default()));
        f.begin("root", &[("width", "400px"), ("height", "100px")]);
        let label = f.begin("label", &[("padding", "2px")]);
        f.tree.set_text(label, "hello").unwrap();
        f.end();
        f.end();
        f.sync();
        assert_eq!(f.tree.local_size(label), Vec2::new(44.0, 20.0));
    }

    #[test]
    fn mark_dirty_parent_walks_past_auto_ancestors() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[("width", "500px"), ("height", "500px")]);
        let sibling = f.begin("sibling", &[("width", "10px"), ("height", "10px")]);
        f.end();
        let auto = f.begin("auto", &[]);
        let leaf = f.begin("leaf", &[("width", "10px"), ("height", "10px")]);
        f.end();
        f.end();
        f.end();
        f.sync();
        f.tree.resolve_all();

        f.tree.mark_dirty_parent(leaf);
        assert!(f.tree.is_dirty(auto, DirtyFlags::SIZE));
        assert!(f.tree.is_dirty(sibling, DirtyFlags::SIZE));
        assert!(f.tree.is_dirty(root, DirtyFlags::SIZE));

        f.tree.resolve_all();
        f.tree
            .set_desired_size(sibling, SizeSpec::Length(Length::px(20.0)), SizeSpec::Auto)
            .unwrap();
        assert!(f.tree.is_dirty(auto, DirtyFlags::POSITION));
        assert_eq!(f.tree.local_position(auto).x, 20.0);
    }

    #[test]
    fn visual_changes_leave_layout_alone() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[("width", "100px"), ("height", "100px")]);
        f.end();
        f.sync();
        f.tree.resolve_all();

        f.tree.set_base_attribute(root, "backgroundColor", "#ff0000").unwrap();
        assert_eq!(f.sync(), StyleChange::Visual);
        assert!(f.tree.dirty(root).is_empty());
        assert_eq!(f.tree.get(root).unwrap().display_color(), Vec4::new(1.0, 0.0, 0.0, 1.0));

        f.tree.set_base_attribute(root, "width", "50px").unwrap();
        assert_eq!(f.sync(), StyleChange::Layout);
        assert!(f.tree.is_dirty(root, DirtyFlags::SIZE));
        assert_eq!(f.tree.local_size(root).x, 50.0);
    }

    #[test]
    fn sync_skips_unchanged_styles() {
        let mut f = Fixture::new();
        f.begin("root", &[("width", "100px")]);
        f.end();
        assert_eq!(f.sync(), StyleChange::Layout);
        assert_eq!(f.sync(), StyleChange::Unchanged);
    }

    #[test]
    fn removed_attribute_reverts_to_default() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[]);
        f.end();
        let shared = Style::new("inst").with("width", "100px").shared();
        f.tree.set_instance_style(root, Some(shared.clone())).unwrap();
        f.sync();
        assert_eq!(f.tree.local_size(root).x, 100.0);

        shared.borrow_mut().remove("width");
        f.sync();
        assert_eq!(f.tree.local_size(root).x, 800.0);
    }

    #[test]
    fn state_overrides_apply_on_sync() {
        let mut f = Fixture::new();
        let ty = ElementType::new("swatch").with_base_style(
            Style::new("swatch")
                .with("backgroundColor", "#000000")
                .with_state(UiState::Hovered, "backgroundColor", "#ffffff"),
        );
        f.types.register(ty);
        let id = f.tree.begin(f.types.get("swatch").unwrap(), "s");
        f.end();
        f.sync();
        let background = f.tree.get(id).unwrap().computed().background_color;
        assert_eq!(background, Vec4::new(0.0, 0.0, 0.0, 1.0));
        f.tree.set_state(id, UiState::Hovered).unwrap();
        f.sync();
        assert_eq!(f.tree.get(id).unwrap().computed().background_color, Vec4::ONE);
    }

    #[test]
    fn rotation_accumulates_down_the_tree() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[("rotation", "0 0 30")]);
        let child = f.begin("child", &[("rotationZ", "15deg")]);
        f.end();
        f.end();
        f.sync();
        assert_eq!(f.tree.world_rotation(child), Vec3::new(0.0, 0.0, 45.0));
        f.tree.set_rotation(root, Vec3::ZERO).unwrap();
        assert!(f.tree.is_dirty(child, DirtyFlags::WORLD_TRANSFORM));
        assert_eq!(f.tree.world_rotation(child), Vec3::new(0.0, 0.0, 15.0));
    }

    #[test]
    fn remove_drops_the_subtree() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[]);
        let mid = f.begin("mid", &[]);
        let leaf = f.begin("leaf", &[]);
        f.end();
        f.end();
        f.end();
        f.tree.remove(mid).unwrap();
        assert!(!f.tree.contains(leaf));
        assert!(f.tree.children(root).is_empty());
        assert_eq!(f.tree.remove(mid), Err(UiError::UnknownElement(mid)));
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[]);
        let child = f.begin("child", &[]);
        f.end();
        f.end();
        assert_eq!(
            f.tree.add_child(child, root),
            Err(UiError::InvalidParent { parent: child, child: root })
        );
        let other = f.begin("other", &[]);
        f.end();
        f.tree.add_child(other, child).unwrap();
        assert!(f.tree.children(root).is_empty());
        assert_eq!(f.tree.parent(child), Some(other));
    }

    #[test]
    fn viewport_change_invalidates_roots() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[("width", "50vw")]);
        f.end();
        f.sync();
        assert_eq!(f.tree.local_size(root).x, 400.0);
        assert!(f.tree.set_viewport(Vec2::new(1000.0, 600.0), 1.0));
        assert!(!f.tree.set_viewport(Vec2::new(1000.0, 600.0), 1.0));
        assert_eq!(f.tree.local_size(root).x, 500.0);
        assert_eq!(f.tree.screen_size(root).x, 500.0);
    }

    #[test]
    fn programmatic_margin_moves_element() {
        let mut f = Fixture::new();
        let root = f.begin("root", &[("width", "100px"), ("height", "100px")]);
        f.end();
        f.sync();
        f.tree
            .set_margin(root, EdgeInsets::uniform(Length::px(4.0)))
            .unwrap();
        assert_eq!(f.tree.world_position(root), Vec2::new(4.0, 4.0));
    }
}
