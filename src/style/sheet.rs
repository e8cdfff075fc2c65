use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::style::attribute::AttributeRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum UiState {
    #[default]
    Normal,
    Hovered,
    Pressed,
    Focused,
    Disabled,
}

impl UiState {
    pub const ALL: [UiState; 5] = [
        Self::Normal,
        Self::Hovered,
        Self::Pressed,
        Self::Focused,
        Self::Disabled,
    ];
}

pub type AttributeMap = BTreeMap<SmolStr, SmolStr>;

pub type SharedStyle = Rc<RefCell<Style>>;

static NEXT_STYLE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Default)]
struct MergedView {
    revision: Option<u64>,
    states: FxHashMap<UiState, AttributeMap>,
}

/// A named set of raw attribute strings, keyed by state, optionally layered
/// on top of other styles.
///
/// Mutations only bump a generation counter. Readers compare
/// [`Style::revision`] against the value they saw last and re-read when it
/// moved; the merged view is rebuilt lazily on the first read after a change.
#[derive(Debug)]
pub struct Style {
    id: u64,
    name: SmolStr,
    attributes: FxHashMap<UiState, AttributeMap>,
    extends: Vec<SharedStyle>,
    generation: u64,
    merged: RefCell<MergedView>,
    rebuilds: Cell<u32>,
}

impl Default for Style {
    fn default() -> Self {
        Self::new("")
    }
}

impl Clone for Style {
    fn clone(&self) -> Self {
        Self {
            id: NEXT_STYLE_ID.fetch_add(1, Ordering::Relaxed),
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            extends: self.extends.clone(),
            generation: self.generation,
            merged: RefCell::default(),
            rebuilds: Cell::new(0),
        }
    }
}

impl Style {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            id: NEXT_STYLE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            attributes: FxHashMap::default(),
            extends: Vec::new(),
            generation: 0,
            merged: RefCell::default(),
            rebuilds: Cell::new(0),
        }
    }

    pub fn shared(self) -> SharedStyle {
        Rc::new(RefCell::new(self))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_state(mut self, state: UiState, name: &str, value: &str) -> Self {
        self.set_state(state, name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.set_state(UiState::Normal, name, value);
    }

    pub fn set_state(&mut self, state: UiState, name: &str, value: &str) {
        self.attributes
            .entry(state)
            .or_default()
            .insert(SmolStr::new(name), SmolStr::new(value.trim()));
        self.generation += 1;
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.remove_state(UiState::Normal, name)
    }

    pub fn remove_state(&mut self, state: UiState, name: &str) -> bool {
        let removed = self
            .attributes
            .get_mut(&state)
            .and_then(|map| map.remove(name))
            .is_some();
        if removed {
            self.generation += 1;
        }
        removed
    }

    /// Layers `base` underneath this style. Own attributes keep winning.
    ///
    /// Returns `false` (and logs) when `base` is this style or already
    /// depends on it.
    pub fn extend(&mut self, base: SharedStyle) -> bool {
        if base.as_ptr() as *const Style == self as *const Style || reaches(&base, self.id) {
            log::warn!(
                "style `{}` cannot extend `{}`: cycle",
                self.name,
                base.try_borrow().map(|b| b.name.clone()).unwrap_or_default()
            );
            return false;
        }
        self.extends.push(base);
        self.generation += 1;
        true
    }

    pub fn revision(&self) -> u64 {
        self.generation
            + self
                .extends
                .iter()
                .map(|base| base.borrow().revision())
                .sum::<u64>()
    }

    pub fn get(&self, name: &str) -> Option<SmolStr> {
        self.get_state(UiState::Normal, name)
    }

    pub fn get_state(&self, state: UiState, name: &str) -> Option<SmolStr> {
        self.refresh();
        self.merged
            .borrow()
            .states
            .get(&state)
            .and_then(|map| map.get(name).cloned())
    }

    pub fn get_all_state(&self, state: UiState) -> AttributeMap {
        self.refresh();
        self.merged
            .borrow()
            .states
            .get(&state)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_all(&self) -> AttributeMap {
        self.get_all_state(UiState::Normal)
    }

    pub fn cache_rebuilds(&self) -> u32 {
        self.rebuilds.get()
    }

    fn refresh(&self) {
        let revision = self.revision();
        if self.merged.borrow().revision == Some(revision) {
            return;
        }

        let mut states: FxHashMap<UiState, AttributeMap> = FxHashMap::default();
        for base in &self.extends {
            let base = base.borrow();
            for state in UiState::ALL {
                let inherited = base.get_all_state(state);
                if !inherited.is_empty() {
                    states.entry(state).or_default().extend(inherited);
                }
            }
        }
        for (state, own) in &self.attributes {
            let merged = states.entry(*state).or_default();
            for (name, value) in own {
                merged.insert(name.clone(), value.clone());
            }
        }

        *self.merged.borrow_mut() = MergedView {
            revision: Some(revision),
            states,
        };
        self.rebuilds.set(self.rebuilds.get() + 1);
        log::trace!("rebuilt merged view of style `{}`", self.name);
    }
}

fn reaches(style: &SharedStyle, id: u64) -> bool {
    let Ok(style) = style.try_borrow() else {
        // Only the style being extended is mutably borrowed here.
        return true;
    };
    style.id == id || style.extends.iter().any(|base| reaches(base, id))
}

pub fn flatten_layer(registry: &AttributeRegistry, layer: &AttributeMap, out: &mut AttributeMap) {
    let mut specific = Vec::new();
    for (name, raw) in layer {
        match registry.get(name) {
            Some(attribute) if attribute.is_composite() => {
                for (sub, value) in registry.expand(name, raw) {
                    out.insert(sub, SmolStr::new(value));
                }
            }
            _ => specific.push((name, raw)),
        }
    }
    for (name, raw) in specific {
        out.insert(name.clone(), raw.clone());
    }
}

/// Resolves the effective attributes for `state` from the element's base
/// style and optional instance style.
///
/// Layers apply in the order base(Normal), instance(Normal), base(state),
/// instance(state); later layers win.
pub fn resolve_layers(
    registry: &AttributeRegistry,
    base: &Style,
    instance: Option<&Style>,
    state: UiState,
) -> AttributeMap {
    let mut out = AttributeMap::new();
    let mut states = vec![UiState::Normal];
    if state != UiState::Normal {
        states.push(state);
    }
    for state in states {
        flatten_layer(registry, &base.get_all_state(state), &mut out);
        if let Some(instance) = instance {
            flatten_layer(registry, &instance.get_all_state(state), &mut out);
        }
    }
    out
}
