use egui::{Align2, Event, FontId, PointerButton, Rect, Sense};

use crate::{
    curve,
    interaction::{Button, InputEvent, World},
    points::{PointStore, Position},
    render::{draw_banner, draw_scene, PainterCanvas, Style, Viewport},
    settings::{Settings, STORAGE_KEY},
};

const INSTRUCTIONS: &str = "Click screen to create point / Points can be dragged / Click a point to delete it";

fn into_button(button: PointerButton) -> Option<Button> {
    match button {
        PointerButton::Primary => Some(Button::Primary),
        PointerButton::Secondary => Some(Button::Secondary),
        PointerButton::Middle => Some(Button::Middle),
        _ => None,
    }
}

// presses only count inside `press_area`, releases and moves are tracked anywhere
fn into_input(event: &Event, press_area: Rect, viewport: Viewport) -> Option<InputEvent> {
    match event {
        Event::PointerMoved(pos) => Some(InputEvent::Move(viewport.to_world(*pos))),
        Event::PointerButton { pos, button, pressed, .. } => {
            let button = into_button(*button)?;
            let position = viewport.to_world(*pos);
            if *pressed {
                press_area.contains(*pos).then_some(InputEvent::Press { button, position })
            } else {
                Some(InputEvent::Release { button, position })
            }
        }
        _ => None,
    }
}

pub struct BezierLab {
    settings: Settings,
    style: Style,
    world: World,
}

impl BezierLab {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut settings = Settings::default();
        // Note that you must enable the `persistence` feature for this to work.
        if let Some(raw) = cc.storage.and_then(|storage| storage.get_string(STORAGE_KEY)) {
            match Settings::load(&raw) {
                Ok(loaded) => {
                    log::info!("loaded settings {loaded:?}");
                    settings = loaded;
                }
                Err(err) => log::warn!("ignoring stored settings: {err}"),
            }
        }
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        let world = World::new(PointStore::with_select_radius(settings.select_radius), settings.delete_threshold);
        let style = Style { curve_width: settings.curve_width, ..Style::default() };
        Self { settings, style, world }
    }

    fn apply_settings(&mut self) {
        self.settings = self.settings.sanitized();
        self.world.points.set_select_radius(self.settings.select_radius);
        self.world.set_delete_threshold(self.settings.delete_threshold);
        self.style.curve_width = self.settings.curve_width;
    }

    fn settings_ui(&mut self, ui: &mut egui::Ui) {
        let settings = &mut self.settings;
        let mut changed = false;
        ui.heading("Settings");
        ui.label("select radius (new points)");
        changed |= ui.add(egui::Slider::new(&mut settings.select_radius, 1.0..=32.0)).changed();
        ui.label("click distance");
        changed |= ui.add(egui::Slider::new(&mut settings.delete_threshold, 0.0..=32.0)).changed();
        ui.label("curve step");
        changed |= ui.add(egui::Slider::new(&mut settings.curve_step, curve::MIN_STEP..=0.25).logarithmic(true)).changed();
        ui.label("curve width");
        changed |= ui.add(egui::Slider::new(&mut settings.curve_width, 0.5..=8.0)).changed();
        if changed {
            self.apply_settings();
        }

        ui.separator();
        ui.label(format!("{} points", self.world.points.len()));
        if ui.button("Clear points").clicked() {
            log::debug!("clearing {} points", self.world.points.len());
            self.world.clear();
        }
    }

    fn canvas_ui(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        let viewport = Viewport::new(rect.min);

        // input first, then the frame is drawn from the updated world
        // menus and windows floating over the canvas take their own clicks
        let press_area = if response.hovered() { rect } else { Rect::NOTHING };
        let events = ctx.input(|i| i.events.clone());
        for event in events.iter().filter_map(|event| into_input(event, press_area, viewport)) {
            self.world.handle(event);
        }
        self.world.frame();

        let curve = curve::sample(&self.world.points.positions(), self.settings.curve_step);

        painter.rect_filled(rect, 0.0, self.style.background);
        let mut canvas = PainterCanvas::new(&painter, viewport);
        draw_scene(&mut canvas, &self.world, &curve, &self.style);

        let text_pos = viewport.to_screen(Position::new(6.0, 4.0));
        let galley = painter.layout_no_wrap(INSTRUCTIONS.to_owned(), FontId::proportional(13.0), self.style.text);
        let size = galley.size();
        draw_banner(
            &mut canvas,
            Position::new(2.0, 2.0),
            Position::new(10.0 + size.x as f64, 6.0 + size.y as f64),
            self.style.banner,
        );
        painter.text(text_pos, Align2::LEFT_TOP, INSTRUCTIONS, FontId::proportional(13.0), self.style.text);
    }
}

impl eframe::App for BezierLab {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(STORAGE_KEY, self.settings.save());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.add_space(16.0);
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });
        egui::SidePanel::right("settings_panel").resizable(false).show(ctx, |ui| {
            self.settings_ui(ui);
            egui::warn_if_debug_build(ui);
        });
        egui::CentralPanel::default().frame(egui::Frame::NONE).show(ctx, |ui| {
            self.canvas_ui(ctx, ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, Pos2};

    fn canvas() -> (Rect, Viewport) {
        let rect = Rect::from_min_max(Pos2::new(0.0, 30.0), Pos2::new(400.0, 330.0));
        (rect, Viewport::new(rect.min))
    }

    #[test]
    fn press_outside_canvas_is_dropped() {
        let (rect, viewport) = canvas();
        let event = Event::PointerButton {
            pos: Pos2::new(500.0, 100.0),
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(into_input(&event, rect, viewport), None);
    }

    #[test]
    fn press_on_covered_canvas_is_dropped() {
        let (_, viewport) = canvas();
        let event = Event::PointerButton {
            pos: Pos2::new(50.0, 80.0),
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(into_input(&event, Rect::NOTHING, viewport), None);
    }

    #[test]
    fn press_inside_canvas_maps_to_world() {
        let (rect, viewport) = canvas();
        let event = Event::PointerButton {
            pos: Pos2::new(50.0, 80.0),
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(
            into_input(&event, rect, viewport),
            Some(InputEvent::Press { button: Button::Primary, position: Position::new(50.0, 50.0) })
        );
    }

    #[test]
    fn release_anywhere_is_forwarded() {
        let (rect, viewport) = canvas();
        let event = Event::PointerButton {
            pos: Pos2::new(500.0, 0.0),
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::NONE,
        };
        assert!(matches!(into_input(&event, rect, viewport), Some(InputEvent::Release { .. })));
        assert_eq!(
            into_input(&Event::PointerMoved(Pos2::new(10.0, 40.0)), rect, viewport),
            Some(InputEvent::Move(Position::new(10.0, 10.0)))
        );
    }

    #[test]
    fn changed_settings_reach_the_world() {
        let mut app = BezierLab::with_settings(Settings::default());
        app.settings.select_radius = 12.0;
        app.settings.delete_threshold = -1.0;
        app.apply_settings();
        assert_eq!(app.settings.delete_threshold, 0.0);
        let id = app.world.points.add(Position::new(0.0, 0.0));
        assert_eq!(app.world.points.get(id).unwrap().select_radius, 12.0);
    }
}
