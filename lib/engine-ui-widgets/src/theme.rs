use engine_ui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub color: ColorTheme,
    pub typography: FontSizeScale,
    pub spacing: SpacingTheme,
    pub radius: RadiusTheme,
    pub motion: MotionTheme,
    pub button: ButtonTheme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    pub primary: ColorSet,
    pub surface: ColorSet,
    pub text: TextColorSet,
    pub border: Color,
    pub focus: Color,
    pub disabled: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorSet {
    pub base: Color,
    pub on: Color,
    pub hover: Color,
    pub active: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextColorSet {
    pub primary: Color,
    pub secondary: Color,
    pub disabled: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSizeScale {
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpacingTheme {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadiusTheme {
    pub sm: f32,
    pub md: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotionTheme {
    pub fast: u32,
    pub normal: u32,
    pub slow: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonTheme {
    pub padding_x: f32,
    pub padding_y: f32,
    pub border: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            color: ColorTheme {
                primary: ColorSet {
                    base: Color::rgb(64, 120, 242),
                    on: Color::rgb(255, 255, 255),
                    hover: Color::rgb(77, 134, 247),
                    active: Color::rgb(48, 103, 227),
                },
                surface: ColorSet {
                    base: Color::rgb(255, 255, 255),
                    on: Color::rgb(56, 58, 66),
                    hover: Color::rgb(240, 240, 240),
                    active: Color::rgb(229, 229, 230),
                },
                text: TextColorSet {
                    primary: Color::rgb(56, 58, 66),
                    secondary: Color::rgb(105, 108, 119),
                    disabled: Color::rgb(160, 161, 167),
                },
                border: Color::rgb(220, 223, 230),
                focus: Color::rgb(64, 120, 242),
                disabled: Color::rgba(160, 161, 167, 128),
            },
            typography: FontSizeScale {
                sm: 14.0,
                md: 16.0,
                lg: 20.0,
            },
            spacing: SpacingTheme {
                xs: 4.0,
                sm: 8.0,
                md: 12.0,
                lg: 16.0,
            },
            radius: RadiusTheme { sm: 4.0, md: 8.0 },
            motion: MotionTheme {
                fast: 120,
                normal: 180,
                slow: 280,
            },
            button: ButtonTheme {
                padding_x: 12.0,
                padding_y: 6.0,
                border: 1.0,
            },
        }
    }

    pub fn dark() -> Self {
        let light = Self::light();
        Self {
            color: ColorTheme {
                primary: ColorSet {
                    base: Color::rgb(97, 175, 239),
                    on: Color::rgb(40, 44, 52),
                    hover: Color::rgb(78, 131, 174),
                    active: Color::rgb(55, 121, 178),
                },
                surface: ColorSet {
                    base: Color::rgb(33, 37, 43),
                    on: Color::rgb(171, 178, 191),
                    hover: Color::rgb(44, 49, 60),
                    active: Color::rgb(56, 62, 74),
                },
                text: TextColorSet {
                    primary: Color::rgb(177, 185, 201),
                    secondary: Color::rgb(127, 132, 142),
                    disabled: Color::rgb(124, 129, 137),
                },
                border: Color::rgb(62, 68, 81),
                focus: Color::rgb(97, 175, 239),
                disabled: Color::rgba(92, 99, 112, 128),
            },
            ..light
        }
    }
}
