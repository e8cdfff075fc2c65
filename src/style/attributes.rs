use std::fmt::Display;
use std::str::FromStr;

use crate::error::ParseError;
use crate::style::attribute::{AttributeRegistry, StyleAttribute};
use crate::style::color::parse_color;
use crate::style::keywords::{
    Display as DisplayMode, LayoutAlign, LayoutDirection, LayoutType, LayoutWrap, Overflow,
    Visibility,
};
use crate::style::style_value::StyleValue;
use crate::style::unit::{Length, Unit, try_get_number};

pub const AUTO: &str = "auto";

pub const LAYOUT: &str = "layout";
pub const LAYOUT_MAJOR: &str = "layoutMajor";
pub const LAYOUT_MINOR: &str = "layoutMinor";
pub const LAYOUT_ITEM: &str = "layoutItem";
pub const LAYOUT_DIRECTION: &str = "layoutDirection";
pub const LAYOUT_WRAP: &str = "layoutWrap";
pub const LAYOUT_TYPE: &str = "layoutType";
pub const VISIBILITY: &str = "visibility";
pub const DISPLAY: &str = "display";
pub const OVERFLOW: &str = "overflow";
pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const POSITION: &str = "position";
pub const POSITION_X: &str = "positionX";
pub const POSITION_Y: &str = "positionY";
pub const ROTATION: &str = "rotation";
pub const ROTATION_X: &str = "rotationX";
pub const ROTATION_Y: &str = "rotationY";
pub const ROTATION_Z: &str = "rotationZ";
pub const MARGIN: &str = "margin";
pub const MARGIN_TOP: &str = "marginTop";
pub const MARGIN_RIGHT: &str = "marginRight";
pub const MARGIN_BOTTOM: &str = "marginBottom";
pub const MARGIN_LEFT: &str = "marginLeft";
pub const PADDING: &str = "padding";
pub const PADDING_TOP: &str = "paddingTop";
pub const PADDING_RIGHT: &str = "paddingRight";
pub const PADDING_BOTTOM: &str = "paddingBottom";
pub const PADDING_LEFT: &str = "paddingLeft";
pub const BORDER_SIZE: &str = "borderSize";
pub const BORDER_WIDTH: &str = "borderWidth";
pub const BORDER_TOP: &str = "borderTop";
pub const BORDER_RIGHT: &str = "borderRight";
pub const BORDER_BOTTOM: &str = "borderBottom";
pub const BORDER_LEFT: &str = "borderLeft";
pub const BACKGROUND_COLOR: &str = "backgroundColor";
pub const BORDER_COLOR: &str = "borderColor";
pub const TEXT_COLOR: &str = "textColor";
pub const BORDER_RADIUS: &str = "borderRadius";
pub const DURATION: &str = "duration";
pub const FONT_SIZE: &str = "fontSize";

const EDGE_ZERO: &str = "0px 0px 0px 0px";

const MARGIN_SIDES: [&str; 4] = [MARGIN_TOP, MARGIN_RIGHT, MARGIN_BOTTOM, MARGIN_LEFT];
const PADDING_SIDES: [&str; 4] = [PADDING_TOP, PADDING_RIGHT, PADDING_BOTTOM, PADDING_LEFT];
const BORDER_SIDES: [&str; 4] = [BORDER_TOP, BORDER_RIGHT, BORDER_BOTTOM, BORDER_LEFT];

fn keyword<K>(raw: &str) -> Result<StyleValue, ParseError>
where
    K: FromStr<Err = ParseError> + Display,
{
    raw.parse::<K>().map(|k| StyleValue::String(k.to_string()))
}

fn length(raw: &str) -> Result<StyleValue, ParseError> {
    let length = try_get_number(raw)?;
    if length.unit.is_time() {
        return Err(ParseError::TypeMismatch {
            expected: "size",
            found: "time",
        });
    }
    Ok(StyleValue::length(length))
}

fn length_or_auto(raw: &str) -> Result<StyleValue, ParseError> {
    if raw.trim() == AUTO {
        return Ok(StyleValue::String(AUTO.to_string()));
    }
    length(raw)
}

fn degrees(raw: &str) -> Result<StyleValue, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let number = trimmed.strip_suffix("deg").unwrap_or(trimmed);
    let value = number
        .trim()
        .parse::<f32>()
        .map_err(|_| ParseError::InvalidNumber(trimmed.to_string()))?;
    Ok(StyleValue::Float(value, Unit::Unknown))
}

fn color(raw: &str) -> Result<StyleValue, ParseError> {
    parse_color(raw).map(StyleValue::color)
}

fn time(raw: &str) -> Result<StyleValue, ParseError> {
    let trimmed = raw.trim();
    let parsed = try_get_number(trimmed)?;
    let has_suffix = trimmed.ends_with(|c: char| c.is_ascii_alphabetic());
    let seconds = if !has_suffix {
        parsed.value
    } else {
        parsed
            .to_seconds()
            .ok_or_else(|| ParseError::NotATime(trimmed.to_string()))?
    };
    Ok(StyleValue::length(Length::new(seconds.max(0.0), Unit::Seconds)))
}

fn each_token(
    raw: &str,
    parse: fn(&str) -> Result<StyleValue, ParseError>,
) -> Result<StyleValue, ParseError> {
    let values = raw
        .split_whitespace()
        .map(parse)
        .collect::<Result<Vec<_>, _>>()?;
    if values.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(StyleValue::List(values))
}

fn align_list(raw: &str) -> Result<StyleValue, ParseError> {
    each_token(raw, keyword::<LayoutAlign>)
}

// One component per token, each keeping its own unit.
fn vector_of<const N: usize>(
    raw: &str,
    parse: fn(&str) -> Result<StyleValue, ParseError>,
) -> Result<StyleValue, ParseError> {
    let lengths = raw
        .split_whitespace()
        .map(|token| parse(token)?.as_length())
        .collect::<Result<Vec<_>, _>>()?;
    StyleValue::vector_from_lengths::<N>(&lengths).ok_or(ParseError::Empty)
}

fn edge_vector(raw: &str) -> Result<StyleValue, ParseError> {
    vector_of::<4>(raw, length)
}

fn position_vector(raw: &str) -> Result<StyleValue, ParseError> {
    vector_of::<2>(raw, length)
}

fn rotation_vector(raw: &str) -> Result<StyleValue, ParseError> {
    vector_of::<3>(raw, degrees)
}

impl AttributeRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_standard_attributes(&mut registry);
        registry
    }
}

pub fn register_standard_attributes(registry: &mut AttributeRegistry) {
    for (name, description) in [
        (LAYOUT_MAJOR, "placement of children along the layout direction"),
        (LAYOUT_MINOR, "placement of lines across the layout direction"),
        (LAYOUT_ITEM, "placement of each child within its line"),
    ] {
        registry.register_attribute(
            StyleAttribute::new(name, description, "start", keyword::<LayoutAlign>)
                .with_valid_inputs(LayoutAlign::KEYWORDS),
        );
    }
    registry.register_composite_attribute(
        StyleAttribute::new(LAYOUT, "layoutMajor and layoutMinor", "start", align_list),
        &[LAYOUT_MAJOR, LAYOUT_MINOR],
    );
    registry.register_attribute(
        StyleAttribute::new(LAYOUT_DIRECTION, "main axis", "row", keyword::<LayoutDirection>)
            .with_valid_inputs(LayoutDirection::KEYWORDS),
    );
    registry.register_attribute(
        StyleAttribute::new(LAYOUT_WRAP, "line breaking", "nowrap", keyword::<LayoutWrap>)
            .with_valid_inputs(LayoutWrap::KEYWORDS),
    );
    registry.register_attribute(
        StyleAttribute::new(LAYOUT_TYPE, "child layout algorithm", "flex", keyword::<LayoutType>)
            .with_valid_inputs(LayoutType::KEYWORDS),
    );
    registry.register_attribute(
        StyleAttribute::new(
            VISIBILITY,
            "whether the element draws",
            "visible",
            keyword::<Visibility>,
        )
        .with_valid_inputs(Visibility::KEYWORDS),
    );
    registry.register_attribute(
        StyleAttribute::new(
            DISPLAY,
            "whether the subtree takes part",
            "block",
            keyword::<DisplayMode>,
        )
        .with_valid_inputs(DisplayMode::KEYWORDS),
    );
    registry.register_attribute(
        StyleAttribute::new(OVERFLOW, "clipping of descendants", "visible", keyword::<Overflow>)
            .with_valid_inputs(Overflow::KEYWORDS),
    );

    for (name, description) in [(WIDTH, "border-box width"), (HEIGHT, "border-box height")] {
        registry.register_attribute(StyleAttribute::new(name, description, AUTO, length_or_auto));
    }

    registry.register_attribute(StyleAttribute::new(POSITION_X, "offset along x", "0px", length));
    registry.register_attribute(StyleAttribute::new(POSITION_Y, "offset along y", "0px", length));
    registry.register_composite_attribute(
        StyleAttribute::new(POSITION, "positionX and positionY", "0px 0px", position_vector),
        &[POSITION_X, POSITION_Y],
    );

    for name in [ROTATION_X, ROTATION_Y, ROTATION_Z] {
        registry.register_attribute(StyleAttribute::new(name, "rotation in degrees", "0", degrees));
    }
    registry.register_composite_attribute(
        StyleAttribute::new(ROTATION, "rotation about x, y and z", "0 0 0", rotation_vector),
        &[ROTATION_X, ROTATION_Y, ROTATION_Z],
    );

    for name in MARGIN_SIDES.into_iter().chain(PADDING_SIDES).chain(BORDER_SIDES) {
        registry.register_attribute(StyleAttribute::new(name, "edge thickness", "0px", length));
    }
    for (name, description, sides) in [
        (MARGIN, "outer spacing, top right bottom left", MARGIN_SIDES),
        (PADDING, "inner spacing, top right bottom left", PADDING_SIDES),
        (BORDER_SIZE, "border thickness, top right bottom left", BORDER_SIDES),
        (BORDER_WIDTH, "border thickness, top right bottom left", BORDER_SIDES),
    ] {
        registry.register_composite_attribute(
            StyleAttribute::new(name, description, EDGE_ZERO, edge_vector),
            &sides,
        );
    }

    registry.register_attribute(StyleAttribute::new(
        BACKGROUND_COLOR,
        "fill color",
        "#00000000",
        color,
    ));
    for (name, description) in [(BORDER_COLOR, "border color"), (TEXT_COLOR, "glyph color")] {
        registry.register_attribute(StyleAttribute::new(name, description, "#000000ff", color));
    }
    registry.register_attribute(StyleAttribute::new(BORDER_RADIUS, "corner radius", "0px", length));
    registry.register_attribute(StyleAttribute::new(
        DURATION,
        "color transition length",
        "0s",
        time,
    ));
    registry.register_attribute(StyleAttribute::new(FONT_SIZE, "glyph height", "16px", length));

    log::debug!("registered {} standard style attributes", registry.len());
}
