use engine_ui::style::Style;
use engine_ui::{ElementId, ElementType, UiError, UiManager};

use crate::Theme;

pub const PANEL: &str = "Panel";

pub fn panel_type(theme: &Theme) -> ElementType {
    let style = Style::new(PANEL)
        .with("layoutDirection", "column")
        .with("backgroundColor", &theme.color.surface.base.to_string())
        .with("borderColor", &theme.color.border.to_string())
        .with("borderSize", "1px")
        .with("borderRadius", &format!("{}px", theme.radius.md))
        .with("padding", &format!("{}px", theme.spacing.md));
    ElementType::new(PANEL).with_base_style(style).interactive(false)
}

pub fn begin_panel(ui: &mut UiManager, name: &str) -> Result<ElementId, UiError> {
    ui.begin(PANEL, name)
}

pub fn panel<F>(ui: &mut UiManager, name: &str, body: F) -> Result<ElementId, UiError>
where
    F: FnOnce(&mut UiManager) -> Result<(), UiError>,
{
    let id = ui.begin(PANEL, name)?;
    let built = body(ui);
    ui.end()?;
    built.map(|()| id)
}
