use glam::{Vec2, Vec3, Vec4};

use crate::error::ParseError;
use crate::style::unit::{Length, Unit};

#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Int(i32),
    Float(f32, Unit),
    Vector2(Vec2, [Unit; 2]),
    Vector3(Vec3, [Unit; 3]),
    Vector4(Vec4, [Unit; 4]),
    String(String),
    List(Vec<StyleValue>),
}

impl StyleValue {
    pub fn length(length: Length) -> Self {
        Self::Float(length.value, length.unit)
    }

    pub fn color(rgba: Vec4) -> Self {
        Self::Vector4(rgba, [Unit::Unknown; 4])
    }

    /// Builds a vector value from however many lengths were parsed.
    ///
    /// A count that does not match the vector width is tolerated: the last
    /// component is repeated or the extras dropped, with a warning.
    pub fn vector_from_lengths<const N: usize>(lengths: &[Length]) -> Option<Self> {
        let last = *lengths.last()?;
        if lengths.len() != N {
            log::warn!(
                "vector value has {} components, expected {N}; adjusting",
                lengths.len()
            );
        }
        let pick = |i: usize| lengths.get(i).copied().unwrap_or(last);
        let value = match N {
            2 => Self::Vector2(
                Vec2::new(pick(0).value, pick(1).value),
                [pick(0).unit, pick(1).unit],
            ),
            3 => Self::Vector3(
                Vec3::new(pick(0).value, pick(1).value, pick(2).value),
                [pick(0).unit, pick(1).unit, pick(2).unit],
            ),
            4 => Self::Vector4(
                Vec4::new(pick(0).value, pick(1).value, pick(2).value, pick(3).value),
                [pick(0).unit, pick(1).unit, pick(2).unit, pick(3).unit],
            ),
            _ => return None,
        };
        Some(value)
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(..) => "float",
            Self::Vector2(..) => "vector2",
            Self::Vector3(..) => "vector3",
            Self::Vector4(..) => "vector4",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }

    pub fn as_int(&self) -> Result<i32, ParseError> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(other.mismatch("int")),
        }
    }

    pub fn as_length(&self) -> Result<Length, ParseError> {
        match self {
            Self::Float(value, unit) => Ok(Length::new(*value, *unit)),
            Self::Int(v) => Ok(Length::px(*v as f32)),
            other => Err(other.mismatch("float")),
        }
    }

    pub fn as_vec2(&self) -> Result<(Vec2, [Unit; 2]), ParseError> {
        match self {
            Self::Vector2(v, units) => Ok((*v, *units)),
            other => Err(other.mismatch("vector2")),
        }
    }

    pub fn as_vec3(&self) -> Result<(Vec3, [Unit; 3]), ParseError> {
        match self {
            Self::Vector3(v, units) => Ok((*v, *units)),
            other => Err(other.mismatch("vector3")),
        }
    }

    pub fn as_vec4(&self) -> Result<Vec4, ParseError> {
        match self {
            Self::Vector4(v, _) => Ok(*v),
            other => Err(other.mismatch("vector4")),
        }
    }

    pub fn as_str(&self) -> Result<&str, ParseError> {
        match self {
            Self::String(s) => Ok(s.as_str()),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn as_list(&self) -> Result<&[StyleValue], ParseError> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(other.mismatch("list")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> ParseError {
        ParseError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<T> {
    Ok(T),
    Fallback(T, ParseError),
}

impl<T> ParseResult<T> {
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(..))
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Ok(v) | Self::Fallback(v, _) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Ok(v) | Self::Fallback(v, _) => v,
        }
    }

    pub fn reason(&self) -> Option<&ParseError> {
        match self {
            Self::Ok(_) => None,
            Self::Fallback(_, reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            Self::Ok(v) => ParseResult::Ok(f(v)),
            Self::Fallback(v, reason) => ParseResult::Fallback(f(v), reason),
        }
    }
}
