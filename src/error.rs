use thiserror::Error;

use crate::view::ElementId;

/// Why a raw style string could not be turned into a value.
///
/// These never escape the parsing layer: callers receive a
/// [`ParseResult::Fallback`](crate::style::ParseResult) carrying the
/// attribute's declared fallback together with one of these reasons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unknown unit `{unit}` in `{input}`")]
    UnknownUnit { input: String, unit: String },
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("`{0}` is not a valid color")]
    InvalidColor(String),
    #[error("`{input}` is not one of {expected:?}")]
    InvalidKeyword { input: String, expected: Vec<String> },
    #[error("expected {expected} tokens, found {found}")]
    TokenCount { expected: usize, found: usize },
    #[error("`{0}` has no time unit")]
    NotATime(String),
    #[error("empty value")]
    Empty,
    #[error("attribute `{0}` is not registered")]
    UnregisteredAttribute(String),
    #[error("expected {expected} value, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("`end` called without a matching `begin`")]
    UnbalancedScope,
    #[error("element {0:?} does not exist")]
    UnknownElement(ElementId),
    #[error("element type `{0}` is not registered")]
    UnknownElementType(String),
    #[error("element {child:?} cannot be attached under {parent:?}")]
    InvalidParent { parent: ElementId, child: ElementId },
}
