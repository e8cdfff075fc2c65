use engine_ui::ElementTypeRegistry;

use crate::{Theme, button_label_type, button_type, panel_type, text_type};

pub fn register_widgets(types: &mut ElementTypeRegistry, theme: &Theme) {
    for ty in [
        panel_type(theme),
        button_type(theme),
        button_label_type(theme),
        text_type(theme),
    ] {
        let name = ty.name.clone();
        types.register(ty);
        log::debug!("widget `{name}` ready");
    }
}

#[cfg(test)]
mod tests {
    use super::register_widgets;
    use crate::{BUTTON, BUTTON_LABEL, PANEL, TEXT, Theme, button, panel, text};
    use engine_ui::style::UiState;
    use engine_ui::ui::{MonospaceMetrics, MouseButton, MouseState};
    use engine_ui::{ElementId, UiManager};
    use glam::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    fn manager(theme: &Theme) -> UiManager {
        let mut ui = UiManager::default();
        register_widgets(ui.types_mut(), theme);
        ui.set_font_metrics(Box::new(MonospaceMetrics::default()));
        ui
    }

    fn form(ui: &mut UiManager, clicks: Rc<Cell<u32>>) -> (ElementId, ElementId) {
        let mut ok = None;
        let root = panel(ui, "form", |ui| {
            ok = Some(button(ui, "ok", "OK", move |_| clicks.set(clicks.get() + 1))?);
            text(ui, "hint", "press it")?;
            Ok(())
        })
        .unwrap();
        (root, ok.unwrap())
    }

    #[test]
    fn registers_each_widget_once() {
        let mut ui = UiManager::default();
        register_widgets(ui.types_mut(), &Theme::default());
        for name in [PANEL, BUTTON, BUTTON_LABEL, TEXT] {
            assert!(ui.types().contains(name), "{name}");
        }
        assert!(ui.types().get(BUTTON).unwrap().interactive);
        assert!(!ui.types().get(TEXT).unwrap().interactive);
        assert!(!ui.types().get(PANEL).unwrap().interactive);
    }

    #[test]
    fn button_wraps_its_label() {
        let theme = Theme::default();
        let mut ui = manager(&theme);
        let (root, ok) = form(&mut ui, Rc::new(Cell::new(0)));
        ui.update(1920.0, 1080.0, &MouseState::default());

        let tree = ui.tree_mut();
        assert_eq!(tree.local_size(root), Vec2::new(1920.0, 1080.0));
        assert_eq!(tree.local_position(ok), Vec2::new(13.0, 13.0));
        assert_eq!(tree.local_size(ok), Vec2::new(42.0, 30.0));

        let label = tree.children(ok)[0];
        assert_eq!(tree.local_size(label), Vec2::new(16.0, 16.0));
        let hint = tree.children(root)[1];
        assert_eq!(tree.local_position(hint), Vec2::new(13.0, 43.0));
    }

    #[test]
    fn clicking_the_label_clicks_the_button() {
        let theme = Theme::default();
        let mut ui = manager(&theme);
        let clicks = Rc::new(Cell::new(0));
        let (_, ok) = form(&mut ui, clicks.clone());

        let over_label = MouseState::at(30.0, 25.0);
        ui.update(1920.0, 1080.0, &over_label);
        assert_eq!(ui.state(ok), Some(UiState::Hovered));
        let hovered = ui.tree().get(ok).unwrap().computed().background_color;
        assert_eq!(hovered, theme.color.primary.hover.to_vec4());

        ui.update(1920.0, 1080.0, &over_label.pressed(MouseButton::Left));
        assert_eq!(ui.state(ok), Some(UiState::Pressed));
        ui.update(1920.0, 1080.0, &over_label);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn state_colors_blend_over_the_motion_duration() {
        let theme = Theme::default();
        let mut ui = manager(&theme);
        let (_, ok) = form(&mut ui, Rc::new(Cell::new(0)));
        ui.update(1920.0, 1080.0, &MouseState::default());
        let base = theme.color.primary.base.to_vec4();
        assert_eq!(ui.tree().get(ok).unwrap().display_color(), base);

        ui.update(1920.0, 1080.0, &MouseState::at(20.0, 20.0));
        assert_eq!(ui.tree().get(ok).unwrap().display_color(), base);
        assert!(ui.advance(0.09));
        assert!(!ui.advance(0.2));
        assert_eq!(
            ui.tree().get(ok).unwrap().display_color(),
            theme.color.primary.hover.to_vec4()
        );
    }

    #[test]
    fn disabled_button_uses_disabled_colors() {
        let theme = Theme::dark();
        let mut ui = manager(&theme);
        let clicks = Rc::new(Cell::new(0));
        let (_, ok) = form(&mut ui, clicks.clone());
        ui.set_disabled(ok, true).unwrap();

        ui.update(1920.0, 1080.0, &MouseState::at(20.0, 20.0).pressed(MouseButton::Left));
        ui.update(1920.0, 1080.0, &MouseState::at(20.0, 20.0));
        let computed = ui.tree().get(ok).unwrap().computed();
        assert_eq!(computed.background_color, theme.color.disabled.to_vec4());
        assert_eq!(computed.border_color, theme.color.disabled.to_vec4());
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn text_takes_theme_color() {
        let theme = Theme::light();
        let mut ui = manager(&theme);
        let hint = text(&mut ui, "hint", "abc").unwrap();
        ui.update(1920.0, 1080.0, &MouseState::default());
        let element = ui.tree().get(hint).unwrap();
        assert_eq!(element.computed().text_color, theme.color.text.primary.to_vec4());
        assert_eq!(ui.tree_mut().local_size(hint), Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn dark_theme_keeps_metrics() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_ne!(light.color, dark.color);
        assert_eq!(light.spacing, dark.spacing);
        assert_eq!(light.button, dark.button);
    }
}
