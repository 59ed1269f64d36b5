//! TallyCalc application

use crate::config::CalcConfig;
use crate::display::{Control, DisplaySurface, Screen};
use crate::engine::{Action, Calculator};
use crate::number::Operator;
use egui::{Context, FontId, RichText};
use tallycore::safety::catch_or;
use tallycore::theme::{menu_bar, TallyColors};
use tallycore::{fit_font_size, EguiMetrics, FitParams};

struct Key {
    label: &'static str,
    action: Action,
    /// Set for keys that are disabled while an error is shown.
    control: Option<Control>,
}

const fn key(label: &'static str, action: Action, control: Option<Control>) -> Key {
    Key { label, action, control }
}

const fn digit(label: &'static str, d: u8) -> Key {
    key(label, Action::Digit(d), None)
}

const KEYPAD: [[Key; 4]; 5] = [
    [
        key("CE", Action::ClearEntry, None),
        key("C", Action::ClearAll, None),
        key("⬅", Action::Backspace, Some(Control::Backspace)),
        key("/", Action::Operator(Operator::Divide), Some(Control::Divide)),
    ],
    [
        digit("7", 7),
        digit("8", 8),
        digit("9", 9),
        key("*", Action::Operator(Operator::Multiply), Some(Control::Multiply)),
    ],
    [
        digit("4", 4),
        digit("5", 5),
        digit("6", 6),
        key("-", Action::Operator(Operator::Subtract), Some(Control::Minus)),
    ],
    [
        digit("1", 1),
        digit("2", 2),
        digit("3", 3),
        key("+", Action::Operator(Operator::Add), Some(Control::Plus)),
    ],
    [
        key("±", Action::Negate, Some(Control::Negate)),
        digit("0", 0),
        key(".", Action::Point, Some(Control::Point)),
        key("=", Action::Evaluate, Some(Control::Evaluate)),
    ],
];

const KEY_GAP: f32 = 4.0;

pub struct TallyCalcApp {
    calc: Calculator<Screen>,
    config: CalcConfig,
    show_about: bool,
}

impl TallyCalcApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: CalcConfig) -> Self {
        Self {
            calc: Calculator::new(Screen::default(), config.max_digits),
            config,
            show_about: false,
        }
    }

    fn press(&mut self, action: Action) {
        if let Err(err) = self.calc.dispatch(action) {
            let locked = self.calc.error().is_some();
            tracing::debug!(?action, %err, locked, "action had no effect");
        }
    }

    /// One line of text, shrunk to fit the current width.
    fn render_line(ui: &mut egui::Ui, text: &str, params: FitParams, color: egui::Color32) {
        let width = ui.available_width();
        let size = fit_font_size(&EguiMetrics::new(ui.ctx()), text, width, params);
        ui.allocate_ui_with_layout(
            egui::vec2(width, params.max_size * 1.4),
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| ui.label(RichText::new(text).font(FontId::proportional(size)).color(color)),
        );
    }

    fn render_display(&self, ui: &mut egui::Ui) {
        let screen = self.calc.surface();
        egui::Frame::none()
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    Self::render_line(ui, screen.pending_text(), self.config.pending_fit(), TallyColors::MUTED);
                    Self::render_line(ui, screen.entry_text(), self.config.entry_fit(), TallyColors::TEXT);
                });
            });
    }

    /// Draw the keypad; returns the key pressed this frame.
    fn render_keypad(&self, ui: &mut egui::Ui) -> Option<Action> {
        let screen = self.calc.surface();
        let btn_w = (ui.available_width() - KEY_GAP * 3.0) / 4.0;
        let btn_h = ((ui.available_height() - KEY_GAP * 4.0) / 5.0).max(28.0);
        let mut pressed = None;

        for row in &KEYPAD {
            ui.horizontal(|ui| {
                for k in row {
                    let enabled = k.control.map_or(true, |c| screen.is_enabled(c));
                    let clicked = ui
                        .add_enabled_ui(enabled, |ui| {
                            ui.add_sized([btn_w, btn_h], egui::Button::new(RichText::new(k.label).size(20.0)))
                        })
                        .inner
                        .clicked();
                    if clicked {
                        pressed = Some(k.action);
                    }
                }
            });
        }
        pressed
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about calculator")
            .collapsible(false)
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("calculator");
                    ui.label(concat!("version ", env!("CARGO_PKG_VERSION")));
                    ui.add_space(4.0);
                    ui.label("add, subtract, multiply, divide");
                    ui.add_space(4.0);
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }
}

impl eframe::App for TallyCalcApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("calculator", |ui| {
                    if ui.button("clear all").clicked() {
                        self.press(Action::ClearAll);
                        ui.close_menu();
                    }
                    if ui.button("quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close_menu();
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        let mut pressed = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(TallyColors::PANEL).inner_margin(egui::Margin::same(8.0)))
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing = egui::vec2(KEY_GAP, KEY_GAP);
                catch_or((), || self.render_display(ui));
                ui.add_space(8.0);
                pressed = catch_or(None, || self.render_keypad(ui));
            });

        if let Some(action) = pressed {
            self.press(action);
        }

        if self.show_about {
            self.render_about(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallycore::theme::missing_glyphs;
    use tallycore::TallyTheme;

    #[test]
    fn test_keypad_labels_have_glyphs() {
        let ctx = Context::default();
        TallyTheme::default().apply(&ctx);
        let _ = ctx.run(Default::default(), |_| {});

        let font_id = FontId::proportional(20.0);
        for k in KEYPAD.iter().flatten() {
            let missing = missing_glyphs(&ctx, k.label, &font_id);
            assert!(missing.is_empty(), "key {:?} has no glyph for {:?}", k.label, missing);
        }
    }
}
