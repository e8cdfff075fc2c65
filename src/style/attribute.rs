use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::error::ParseError;
use crate::style::style_value::{ParseResult, StyleValue};

pub type AttributeParser = fn(&str) -> Result<StyleValue, ParseError>;

#[derive(Debug, Clone)]
pub struct StyleAttribute {
    pub name: SmolStr,
    pub description: &'static str,
    pub valid_inputs: Vec<SmolStr>,
    pub fallback: SmolStr,
    pub parser: AttributeParser,
    pub mapped_attribute_names: Vec<SmolStr>,
}

impl StyleAttribute {
    pub fn new(
        name: impl Into<SmolStr>,
        description: &'static str,
        fallback: impl Into<SmolStr>,
        parser: AttributeParser,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            valid_inputs: Vec::new(),
            fallback: fallback.into(),
            parser,
            mapped_attribute_names: Vec::new(),
        }
    }

    pub fn with_valid_inputs(mut self, inputs: &[&str]) -> Self {
        self.valid_inputs = inputs.iter().map(|s| SmolStr::new(s)).collect();
        self
    }

    pub fn is_composite(&self) -> bool {
        !self.mapped_attribute_names.is_empty()
    }

    fn parse(&self, input: &str) -> Result<StyleValue, ParseError> {
        let trimmed = input.trim();
        if !self.valid_inputs.is_empty() && !self.valid_inputs.iter().any(|v| v == trimmed) {
            return Err(ParseError::InvalidKeyword {
                input: trimmed.to_string(),
                expected: self.valid_inputs.iter().map(|v| v.to_string()).collect(),
            });
        }
        (self.parser)(trimmed)
    }
}

/// Splits `input` on whitespace and pairs tokens with `names`.
///
/// Fewer tokens than names: the last token fills the remaining slots.
/// More tokens than names: the extras are ignored.
pub fn parse_composite_values<S: AsRef<str>>(input: &str, names: &[S]) -> Vec<(SmolStr, String)> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let Some(last) = tokens.last() else {
        return Vec::new();
    };
    if tokens.len() > names.len() {
        log::debug!(
            "`{input}` has {} tokens for {} attributes; ignoring extras",
            tokens.len(),
            names.len()
        );
    }
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let token = tokens.get(i).unwrap_or(last);
            (SmolStr::new(name.as_ref()), token.to_string())
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct AttributeRegistry {
    attributes: FxHashMap<SmolStr, StyleAttribute>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_attribute(&mut self, attribute: StyleAttribute) -> bool {
        let name = attribute.name.clone();
        let replaced = self.attributes.insert(name.clone(), attribute).is_some();
        if replaced {
            log::warn!("style attribute `{name}` registered twice; the later one wins");
        }
        replaced
    }

    pub fn register_composite_attribute(
        &mut self,
        mut attribute: StyleAttribute,
        sub_names: &[&str],
    ) -> bool {
        attribute.mapped_attribute_names = sub_names.iter().map(|s| SmolStr::new(s)).collect();
        if sub_names.iter().any(|sub| !self.contains(sub)) {
            log::debug!(
                "composite `{}` maps to attributes that are not registered yet",
                attribute.name
            );
        }
        self.register_attribute(attribute)
    }

    pub fn get(&self, name: &str) -> Option<&StyleAttribute> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Parses `input` with the parser registered under `name`.
    ///
    /// Unknown names yield `Int(0)` and an error log; malformed input
    /// yields the attribute's parsed fallback and a warning.
    pub fn get_attribute_value(&self, name: &str, input: &str) -> ParseResult<StyleValue> {
        let Some(attribute) = self.attributes.get(name) else {
            log::error!("style attribute `{name}` is not registered");
            return ParseResult::Fallback(
                StyleValue::Int(0),
                ParseError::UnregisteredAttribute(name.to_string()),
            );
        };
        match attribute.parse(input) {
            Ok(value) => ParseResult::Ok(value),
            Err(reason) => {
                log::warn!(
                    "{name}: {reason}; using fallback `{}`",
                    attribute.fallback
                );
                let fallback = (attribute.parser)(&attribute.fallback).unwrap_or_else(|err| {
                    log::error!("{name}: fallback `{}` does not parse: {err}", attribute.fallback);
                    StyleValue::Int(0)
                });
                ParseResult::Fallback(fallback, reason)
            }
        }
    }

    pub fn parse_composite_values(&self, name: &str, input: &str) -> Vec<(SmolStr, String)> {
        match self.attributes.get(name) {
            Some(attribute) if attribute.is_composite() => {
                parse_composite_values(input, &attribute.mapped_attribute_names)
            }
            _ => Vec::new(),
        }
    }

    pub fn expand(&self, name: &str, raw: &str) -> Vec<(SmolStr, String)> {
        match self.attributes.get(name) {
            Some(attribute) if attribute.is_composite() => {
                parse_composite_values(raw, &attribute.mapped_attribute_names)
            }
            _ => vec![(SmolStr::new(name), raw.to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeRegistry, StyleAttribute, parse_composite_values};
    use crate::error::ParseError;
    use crate::style::StyleValue;
    use crate::style::unit::try_get_number;
    use smol_str::SmolStr;

    fn pairs(items: &[(&str, &str)]) -> Vec<(SmolStr, String)> {
        items
            .iter()
            .map(|(k, v)| (SmolStr::new(k), v.to_string()))
            .collect()
    }

    fn number(raw: &str) -> Result<StyleValue, ParseError> {
        try_get_number(raw).map(StyleValue::length)
    }

    #[test]
    fn single_token_fills_every_slot() {
        let names = ["layoutMajor", "layoutMinor"];
        assert_eq!(
            parse_composite_values("center", &names),
            pairs(&[("layoutMajor", "center"), ("layoutMinor", "center")])
        );
        assert_eq!(
            parse_composite_values("center end", &names),
            pairs(&[("layoutMajor", "center"), ("layoutMinor", "end")])
        );
    }

    #[test]
    fn last_token_repeats_and_extras_drop() {
        let names = ["top", "right", "bottom", "left"];
        assert_eq!(
            parse_composite_values("1px 2px", &names),
            pairs(&[("top", "1px"), ("right", "2px"), ("bottom", "2px"), ("left", "2px")])
        );
        assert_eq!(
            parse_composite_values("a b c", &["x", "y"]),
            pairs(&[("x", "a"), ("y", "b")])
        );
        assert!(parse_composite_values("   ", &names).is_empty());
    }

    #[test]
    fn duplicate_registration_overwrites() {
        let mut registry = AttributeRegistry::new();
        assert!(!registry.register_attribute(StyleAttribute::new("width", "first", "0px", number)));
        assert!(registry.register_attribute(StyleAttribute::new("width", "second", "1px", number)));
        assert_eq!(registry.get("width").map(|a| a.description), Some("second"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregistered_name_returns_sentinel() {
        let registry = AttributeRegistry::new();
        let value = registry.get_attribute_value("nope", "1px");
        assert_eq!(
            value.reason(),
            Some(&ParseError::UnregisteredAttribute("nope".into()))
        );
        assert_eq!(value.into_value(), StyleValue::Int(0));
    }

    #[test]
    fn bad_input_uses_declared_fallback() {
        let mut registry = AttributeRegistry::new();
        registry.register_attribute(StyleAttribute::new("gap", "", "4px", number));
        let value = registry.get_attribute_value("gap", "wide");
        assert!(value.is_fallback());
        assert_eq!(value.into_value(), number("4px").unwrap());
    }

    #[test]
    fn valid_inputs_are_enforced() {
        let mut registry = AttributeRegistry::new();
        registry.register_attribute(
            StyleAttribute::new("mode", "", "a", |raw| Ok(StyleValue::String(raw.into())))
                .with_valid_inputs(&["a", "b"]),
        );
        assert!(!registry.get_attribute_value("mode", "b").is_fallback());
        let bad = registry.get_attribute_value("mode", "c");
        assert!(matches!(bad.reason(), Some(ParseError::InvalidKeyword { .. })));
        assert_eq!(bad.into_value(), StyleValue::String("a".into()));
    }

    #[test]
    fn expand_passes_plain_attributes_through() {
        let mut registry = AttributeRegistry::new();
        registry.register_attribute(StyleAttribute::new("a", "", "0", number));
        registry.register_attribute(StyleAttribute::new("b", "", "0", number));
        let ab = StyleAttribute::new("ab", "", "0", number);
        registry.register_composite_attribute(ab, &["a", "b"]);
        assert!(registry.get("ab").unwrap().is_composite());
        assert_eq!(registry.expand("a", "3px"), pairs(&[("a", "3px")]));
        assert_eq!(
            registry.expand("ab", "1px 2px"),
            pairs(&[("a", "1px"), ("b", "2px")])
        );
        assert_eq!(registry.parse_composite_values("a", "1px"), Vec::new());
    }
}
