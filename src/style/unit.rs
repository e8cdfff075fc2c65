use crate::error::ParseError;
use crate::style::style_value::ParseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    #[default]
    Pixels,
    PercentOfParentWidth,
    PercentOfParentHeight,
    PercentOfViewportWidth,
    PercentOfViewportHeight,
    PercentOfAvailable,
    Seconds,
    Milliseconds,
    Unknown,
}

const UNIT_SUFFIXES: &[(&str, Unit)] = &[
    ("px", Unit::Pixels),
    ("%w", Unit::PercentOfParentWidth),
    ("%h", Unit::PercentOfParentHeight),
    ("%a", Unit::PercentOfAvailable),
    ("vw", Unit::PercentOfViewportWidth),
    ("vh", Unit::PercentOfViewportHeight),
    ("ms", Unit::Milliseconds),
    ("s", Unit::Seconds),
];

impl Unit {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        UNIT_SUFFIXES
            .iter()
            .find(|(token, _)| *token == suffix)
            .map(|(_, unit)| *unit)
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Pixels => "px",
            Self::PercentOfParentWidth => "%w",
            Self::PercentOfParentHeight => "%h",
            Self::PercentOfViewportWidth => "vw",
            Self::PercentOfViewportHeight => "vh",
            Self::PercentOfAvailable => "%a",
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Unknown => "",
        }
    }

    pub const fn is_time(self) -> bool {
        matches!(self, Self::Seconds | Self::Milliseconds)
    }

    pub const fn is_size(self) -> bool {
        !self.is_time() && !matches!(self, Self::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LengthContext {
    pub parent_width: f32,
    pub parent_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl LengthContext {
    pub const fn new(
        parent_width: f32,
        parent_height: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        Self {
            parent_width,
            parent_height,
            viewport_width,
            viewport_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    pub value: f32,
    pub unit: Unit,
}

impl Length {
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f32) -> Self {
        Self::new(value, Unit::Pixels)
    }

    pub const fn zero() -> Self {
        Self::px(0.0)
    }

    pub fn resolve(self, ctx: &LengthContext) -> Option<f32> {
        let v = self.value;
        match self.unit {
            Unit::Pixels => Some(v),
            Unit::PercentOfParentWidth => Some(ctx.parent_width.max(0.0) * v * 0.01),
            Unit::PercentOfParentHeight => Some(ctx.parent_height.max(0.0) * v * 0.01),
            Unit::PercentOfViewportWidth => Some(ctx.viewport_width.max(0.0) * v * 0.01),
            Unit::PercentOfViewportHeight => Some(ctx.viewport_height.max(0.0) * v * 0.01),
            Unit::PercentOfAvailable | Unit::Seconds | Unit::Milliseconds | Unit::Unknown => None,
        }
    }

    pub fn resolve_or_zero(self, ctx: &LengthContext) -> f32 {
        self.resolve(ctx).unwrap_or(0.0)
    }

    pub fn to_seconds(self) -> Option<f32> {
        match self.unit {
            Unit::Seconds => Some(self.value),
            Unit::Milliseconds => Some(self.value * 0.001),
            _ => None,
        }
    }
}

/// Splits `"50%w"` into its numeric prefix and unit.
///
/// The unit token is the whole trailing run of letters and `%`, so matching
/// it against the suffix table is a longest match.
pub fn try_get_number(raw: &str) -> Result<Length, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }
    let split = raw
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic() || *c == '%')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    let (number, suffix) = raw.split_at(split);

    let unit = if suffix.is_empty() {
        Unit::Pixels
    } else {
        Unit::from_suffix(suffix).ok_or_else(|| ParseError::UnknownUnit {
            input: raw.to_string(),
            unit: suffix.to_string(),
        })?
    };
    let value = number
        .parse::<f32>()
        .map_err(|_| ParseError::InvalidNumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(ParseError::InvalidNumber(raw.to_string()));
    }
    Ok(Length::new(value, unit))
}

/// Parses and immediately resolves a size against `ctx`.
///
/// Units the context cannot resolve (`%a`, time) and malformed input fall
/// back to `0`.
pub fn resolve_length(raw: &str, ctx: &LengthContext) -> ParseResult<f32> {
    match try_get_number(raw) {
        Ok(length) => match length.resolve(ctx) {
            Some(px) => ParseResult::Ok(px),
            None => {
                log::warn!("`{raw}` cannot be resolved to pixels here");
                ParseResult::Fallback(
                    0.0,
                    ParseError::TypeMismatch {
                        expected: "size",
                        found: "unresolved unit",
                    },
                )
            }
        },
        Err(err) => {
            log::warn!("{err}; using 0");
            ParseResult::Fallback(0.0, err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Length, LengthContext, Unit, resolve_length, try_get_number};
    use crate::error::ParseError;

    fn ctx(parent_width: f32) -> LengthContext {
        LengthContext::new(parent_width, 300.0, 1280.0, 720.0)
    }

    #[test]
    fn splits_every_known_suffix() {
        let cases = [
            ("50px", Unit::Pixels),
            ("10%w", Unit::PercentOfParentWidth),
            ("10%h", Unit::PercentOfParentHeight),
            ("25%a", Unit::PercentOfAvailable),
            ("5vw", Unit::PercentOfViewportWidth),
            ("5vh", Unit::PercentOfViewportHeight),
            ("2s", Unit::Seconds),
            ("250ms", Unit::Milliseconds),
            ("12", Unit::Pixels),
        ];
        for (raw, unit) in cases {
            assert_eq!(try_get_number(raw).map(|l| l.unit), Ok(unit), "{raw}");
        }
        assert_eq!(try_get_number("250ms").unwrap().value, 250.0);
        assert_eq!(try_get_number("-1.5px").unwrap().value, -1.5);
    }

    #[test]
    fn percent_width_resolves_against_parent() {
        for width in [0.0, 100.0, 400.0, 1234.0] {
            let length = try_get_number("50%w").unwrap();
            assert_eq!(length.resolve(&ctx(width)), Some(0.5 * width));
            let px = try_get_number("50px").unwrap();
            assert_eq!(px.resolve(&ctx(width)), Some(50.0));
        }
    }

    #[test]
    fn viewport_units_use_viewport() {
        let vw = Length::new(50.0, Unit::PercentOfViewportWidth);
        let vh = Length::new(10.0, Unit::PercentOfViewportHeight);
        assert_eq!(vw.resolve(&ctx(10.0)), Some(640.0));
        assert_eq!(vh.resolve(&ctx(10.0)), Some(72.0));
    }

    #[test]
    fn available_and_time_units_stay_unresolved() {
        assert_eq!(Length::new(50.0, Unit::PercentOfAvailable).resolve(&ctx(10.0)), None);
        assert_eq!(Length::new(2.0, Unit::Seconds).resolve(&ctx(10.0)), None);
        assert_eq!(Length::new(250.0, Unit::Milliseconds).to_seconds(), Some(0.25));
    }

    #[test]
    fn malformed_numbers_are_reported() {
        assert!(matches!(try_get_number("10em"), Err(ParseError::UnknownUnit { .. })));
        assert!(matches!(try_get_number("abcpx"), Err(ParseError::UnknownUnit { .. })));
        assert!(matches!(try_get_number("1.2.3px"), Err(ParseError::InvalidNumber(_))));
        assert!(matches!(try_get_number("px"), Err(ParseError::InvalidNumber(_))));
        assert_eq!(try_get_number("   "), Err(ParseError::Empty));
    }

    #[test]
    fn resolve_length_falls_back_to_zero() {
        let ok = resolve_length("50%w", &ctx(400.0));
        assert!(!ok.is_fallback());
        assert_eq!(ok.into_value(), 200.0);

        let bad = resolve_length("50furlongs", &ctx(400.0));
        assert!(bad.is_fallback());
        assert_eq!(bad.into_value(), 0.0);
    }
}
