use std::rc::Rc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::error::ParseError;
use crate::style::attributes::*;
use crate::style::{ComputedStyle, SizeSpec, Style, StyleValue};

pub type AttributeSetter = fn(&mut ComputedStyle, &StyleValue) -> Result<(), ParseError>;

pub type AttributeDispatch = FxHashMap<SmolStr, AttributeSetter>;

pub const ELEMENT: &str = "element";

#[derive(Debug, Clone)]
pub struct ElementType {
    pub name: SmolStr,
    pub dispatch: AttributeDispatch,
    pub base_style: Style,
    pub interactive: bool,
}

impl ElementType {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        let name = name.into();
        Self {
            base_style: Style::new(name.clone()),
            name,
            dispatch: base_dispatch(),
            interactive: true,
        }
    }

    pub fn with_setter(mut self, attribute: &str, setter: AttributeSetter) -> Self {
        self.dispatch.insert(SmolStr::new(attribute), setter);
        self
    }

    pub fn with_base_style(mut self, style: Style) -> Self {
        self.base_style = style;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

#[derive(Debug)]
pub struct ElementTypeRegistry {
    types: FxHashMap<SmolStr, Rc<ElementType>>,
}

impl Default for ElementTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            types: FxHashMap::default(),
        };
        registry.register(ElementType::new(ELEMENT));
        registry
    }

    pub fn register(&mut self, element_type: ElementType) -> bool {
        let name = element_type.name.clone();
        let replaced = self.types.insert(name.clone(), Rc::new(element_type)).is_some();
        if replaced {
            log::warn!("element type `{name}` registered twice; the later one wins");
        } else {
            log::debug!("registered element type `{name}`");
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<Rc<ElementType>> {
        self.types.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

fn length_or_auto(value: &StyleValue) -> Result<SizeSpec, ParseError> {
    match value {
        StyleValue::String(s) if s == AUTO => Ok(SizeSpec::Auto),
        other => other.as_length().map(SizeSpec::Length),
    }
}

fn insert(d: &mut AttributeDispatch, name: &str, setter: AttributeSetter) {
    d.insert(SmolStr::new(name), setter);
}

fn keyword<K: std::str::FromStr<Err = ParseError>>(value: &StyleValue) -> Result<K, ParseError> {
    value.as_str()?.parse()
}

pub fn base_dispatch() -> AttributeDispatch {
    let mut d = AttributeDispatch::default();

    insert(&mut d, LAYOUT_MAJOR, |s, v| {
        s.layout_major = keyword(v)?;
        Ok(())
    });
    insert(&mut d, LAYOUT_MINOR, |s, v| {
        s.layout_minor = keyword(v)?;
        Ok(())
    });
    insert(&mut d, LAYOUT_ITEM, |s, v| {
        s.layout_item = keyword(v)?;
        Ok(())
    });
    insert(&mut d, LAYOUT_DIRECTION, |s, v| {
        s.layout_direction = keyword(v)?;
        Ok(())
    });
    insert(&mut d, LAYOUT_WRAP, |s, v| {
        s.layout_wrap = keyword(v)?;
        Ok(())
    });
    insert(&mut d, LAYOUT_TYPE, |s, v| {
        s.layout_type = keyword(v)?;
        Ok(())
    });
    insert(&mut d, VISIBILITY, |s, v| {
        s.visibility = keyword(v)?;
        Ok(())
    });
    insert(&mut d, DISPLAY, |s, v| {
        s.display = keyword(v)?;
        Ok(())
    });
    insert(&mut d, OVERFLOW, |s, v| {
        s.overflow = keyword(v)?;
        Ok(())
    });

    insert(&mut d, WIDTH, |s, v| {
        s.width = length_or_auto(v)?;
        Ok(())
    });
    insert(&mut d, HEIGHT, |s, v| {
        s.height = length_or_auto(v)?;
        Ok(())
    });
    insert(&mut d, POSITION_X, |s, v| {
        s.position_x = v.as_length()?;
        Ok(())
    });
    insert(&mut d, POSITION_Y, |s, v| {
        s.position_y = v.as_length()?;
        Ok(())
    });
    insert(&mut d, ROTATION_X, |s, v| {
        s.rotation.x = v.as_length()?.value;
        Ok(())
    });
    insert(&mut d, ROTATION_Y, |s, v| {
        s.rotation.y = v.as_length()?.value;
        Ok(())
    });
    insert(&mut d, ROTATION_Z, |s, v| {
        s.rotation.z = v.as_length()?.value;
        Ok(())
    });

    insert(&mut d, MARGIN_TOP, |s, v| {
        s.margin.top = v.as_length()?;
        Ok(())
    });
    insert(&mut d, MARGIN_RIGHT, |s, v| {
        s.margin.right = v.as_length()?;
        Ok(())
    });
    insert(&mut d, MARGIN_BOTTOM, |s, v| {
        s.margin.bottom = v.as_length()?;
        Ok(())
    });
    insert(&mut d, MARGIN_LEFT, |s, v| {
        s.margin.left = v.as_length()?;
        Ok(())
    });
    insert(&mut d, PADDING_TOP, |s, v| {
        s.padding.top = v.as_length()?;
        Ok(())
    });
    insert(&mut d, PADDING_RIGHT, |s, v| {
        s.padding.right = v.as_length()?;
        Ok(())
    });
    insert(&mut d, PADDING_BOTTOM, |s, v| {
        s.padding.bottom = v.as_length()?;
        Ok(())
    });
    insert(&mut d, PADDING_LEFT, |s, v| {
        s.padding.left = v.as_length()?;
        Ok(())
    });
    insert(&mut d, BORDER_TOP, |s, v| {
        s.border.top = v.as_length()?;
        Ok(())
    });
    insert(&mut d, BORDER_RIGHT, |s, v| {
        s.border.right = v.as_length()?;
        Ok(())
    });
    insert(&mut d, BORDER_BOTTOM, |s, v| {
        s.border.bottom = v.as_length()?;
        Ok(())
    });
    insert(&mut d, BORDER_LEFT, |s, v| {
        s.border.left = v.as_length()?;
        Ok(())
    });

    insert(&mut d, BACKGROUND_COLOR, |s, v| {
        s.background_color = v.as_vec4()?;
        Ok(())
    });
    insert(&mut d, BORDER_COLOR, |s, v| {
        s.border_color = v.as_vec4()?;
        Ok(())
    });
    insert(&mut d, BORDER_RADIUS, |s, v| {
        s.border_radius = v.as_length()?;
        Ok(())
    });
    insert(&mut d, DURATION, |s, v| {
        s.duration = v.as_length()?.value;
        Ok(())
    });
    d
}

pub fn text_dispatch() -> AttributeDispatch {
    let mut d = base_dispatch();
    d.insert(SmolStr::new(TEXT_COLOR), |s, v| {
        s.text_color = v.as_vec4()?;
        Ok(())
    });
    d.insert(SmolStr::new(FONT_SIZE), |s, v| {
        s.font_size = v.as_length()?;
        Ok(())
    });
    d
}
