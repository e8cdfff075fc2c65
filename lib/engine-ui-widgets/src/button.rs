use engine_ui::style::{Style, UiState};
use engine_ui::ui::UiEvent;
use engine_ui::view::text_dispatch;
use engine_ui::{ElementId, ElementType, UiError, UiManager};

use crate::Theme;

pub const BUTTON: &str = "Button";
pub const BUTTON_LABEL: &str = "ButtonLabel";

pub fn button_type(theme: &Theme) -> ElementType {
    let primary = &theme.color.primary;
    let pad = format!(
        "{y}px {x}px {y}px {x}px",
        x = theme.button.padding_x,
        y = theme.button.padding_y
    );
    let style = Style::new(BUTTON)
        .with("layout", "center center")
        .with("layoutItem", "center")
        .with("padding", &pad)
        .with("borderSize", &format!("{}px", theme.button.border))
        .with("borderRadius", &format!("{}px", theme.radius.sm))
        .with("borderColor", &primary.base.to_string())
        .with("backgroundColor", &primary.base.to_string())
        .with("duration", &format!("{}ms", theme.motion.normal))
        .with_state(UiState::Hovered, "backgroundColor", &primary.hover.to_string())
        .with_state(UiState::Pressed, "backgroundColor", &primary.active.to_string())
        .with_state(UiState::Focused, "borderColor", &theme.color.focus.to_string())
        .with_state(UiState::Disabled, "backgroundColor", &theme.color.disabled.to_string())
        .with_state(UiState::Disabled, "borderColor", &theme.color.disabled.to_string());
    ElementType::new(BUTTON).with_base_style(style)
}

pub fn button_label_type(theme: &Theme) -> ElementType {
    let style = Style::new(BUTTON_LABEL)
        .with("textColor", &theme.color.primary.on.to_string())
        .with("fontSize", &format!("{}px", theme.typography.md));
    let mut ty = ElementType::new(BUTTON_LABEL)
        .with_base_style(style)
        .interactive(false);
    ty.dispatch = text_dispatch();
    ty
}

pub fn button<F>(
    ui: &mut UiManager,
    name: &str,
    label: &str,
    on_click: F,
) -> Result<ElementId, UiError>
where
    F: FnMut(&UiEvent) + 'static,
{
    let id = ui.begin(BUTTON, name)?;
    let labelled = add_label(ui, name, label);
    ui.end()?;
    labelled?;
    ui.on_click(id, on_click)?;
    Ok(id)
}

fn add_label(ui: &mut UiManager, name: &str, label: &str) -> Result<(), UiError> {
    let id = ui.begin(BUTTON_LABEL, format!("{name}.label"))?;
    let set = ui.set_text(id, label);
    ui.end()?;
    set
}
