use engine_ui::style::Style;
use engine_ui::view::text_dispatch;
use engine_ui::{ElementId, ElementType, UiError, UiManager};

use crate::Theme;

pub const TEXT: &str = "Text";

pub fn text_type(theme: &Theme) -> ElementType {
    let style = Style::new(TEXT)
        .with("textColor", &theme.color.text.primary.to_string())
        .with("fontSize", &format!("{}px", theme.typography.md));
    let mut ty = ElementType::new(TEXT).with_base_style(style).interactive(false);
    ty.dispatch = text_dispatch();
    ty
}

pub fn text(
    ui: &mut UiManager,
    name: &str,
    content: impl Into<String>,
) -> Result<ElementId, UiError> {
    let id = ui.begin(TEXT, name)?;
    let set = ui.set_text(id, content);
    ui.end()?;
    set.map(|()| id)
}
