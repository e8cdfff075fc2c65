use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::style::style_value::ParseResult;

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            pub const KEYWORDS: &'static [&'static str] = &[$($text),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ParseError::InvalidKeyword {
                        input: other.to_string(),
                        expected: Self::KEYWORDS.iter().map(|k| k.to_string()).collect(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    pub enum LayoutAlign {
        Start => "start",
        Center => "center",
        End => "end",
        Stretch => "stretch",
        SpaceEvenly => "space-evenly",
        SpaceAround => "space-around",
    }
    default Start
}

keyword_enum! {
    pub enum LayoutDirection {
        Row => "row",
        Column => "column",
    }
    default Row
}

keyword_enum! {
    pub enum LayoutWrap {
        NoWrap => "nowrap",
        Wrap => "wrap",
    }
    default NoWrap
}

keyword_enum! {
    pub enum LayoutType {
        None => "none",
        Flex => "flex",
        Grid => "grid",
    }
    default Flex
}

keyword_enum! {
    pub enum Visibility {
        Visible => "visible",
        Hidden => "hidden",
    }
    default Visible
}

keyword_enum! {
    pub enum Display {
        Block => "block",
        None => "none",
    }
    default Block
}

keyword_enum! {
    pub enum Overflow {
        Visible => "visible",
        Hidden => "hidden",
    }
    default Visible
}

pub fn to_layout_align(raw: &str) -> ParseResult<LayoutAlign> {
    match raw.parse() {
        Ok(align) => ParseResult::Ok(align),
        Err(err) => {
            log::warn!("{err}; using `start`");
            ParseResult::Fallback(LayoutAlign::Start, err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutAlign, LayoutType, to_layout_align};

    #[test]
    fn alignment_strings_round_trip() {
        for raw in ["start", "center", "end", "stretch", "space-evenly", "space-around"] {
            let align = to_layout_align(raw);
            assert!(!align.is_fallback(), "{raw}");
            assert_eq!(align.into_value().to_string(), raw);
        }
        assert_eq!(LayoutAlign::KEYWORDS.len(), 6);
    }

    #[test]
    fn unknown_alignment_falls_back_to_start() {
        let align = to_layout_align("middle");
        assert!(align.is_fallback());
        assert_eq!(*align.value(), LayoutAlign::Start);
    }

    #[test]
    fn defaults_match_fallbacks() {
        assert_eq!(LayoutAlign::default(), LayoutAlign::Start);
        assert_eq!(LayoutType::default(), LayoutType::Flex);
        assert_eq!(" grid ".parse::<LayoutType>(), Ok(LayoutType::Grid));
    }
}
