//! Tally Computer theme
//!
//! Dark panel, white glyphs, grey for anything secondary or disabled.
//! Rubik as the display font when it can be found on disk.

use egui::{Color32, FontData, FontDefinitions, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::path::{Path, PathBuf};

/// The whole palette.
pub struct TallyColors;

impl TallyColors {
    pub const PANEL: Color32 = Color32::from_rgb(32, 32, 32);
    pub const KEY: Color32 = Color32::from_rgb(48, 48, 48);
    pub const KEY_HOVER: Color32 = Color32::from_rgb(64, 64, 64);
    pub const TEXT: Color32 = Color32::from_rgb(255, 255, 255);
    pub const MUTED: Color32 = Color32::from_rgb(136, 136, 136);
}

const DISPLAY_FONT: &str = "Rubik-Regular.ttf";

/// Theme configuration for tally computer apps
pub struct TallyTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
    /// Explicit display font file; searched for before the standard paths.
    pub font_path: Option<PathBuf>,
}

impl Default for TallyTheme {
    fn default() -> Self {
        Self {
            font_size_body: 16.0,
            font_size_heading: 22.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
            font_path: None,
        }
    }
}

impl TallyTheme {
    pub fn with_font_path(mut self, path: Option<PathBuf>) -> Self {
        self.font_path = path;
        self
    }

    /// Candidate locations for the display font, most specific first.
    fn font_search_paths(&self) -> Vec<PathBuf> {
        let mut search_paths = Vec::new();
        if let Some(path) = &self.font_path {
            search_paths.push(path.clone());
        }

        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                search_paths.push(dir.join("fonts").join(DISPLAY_FONT));
                // Cargo workspace: exe is in target/debug or target/release
                if let Some(grandparent) = dir.parent().and_then(Path::parent) {
                    search_paths.push(grandparent.join("fonts").join(DISPLAY_FONT));
                }
            }
        }

        search_paths.push(PathBuf::from("fonts").join(DISPLAY_FONT));
        search_paths.push(PathBuf::from("/usr/share/tally/fonts").join(DISPLAY_FONT));
        search_paths.push(PathBuf::from("/usr/share/fonts/truetype/rubik").join(DISPLAY_FONT));
        search_paths
    }

    fn load_display_font(&self) -> Option<Vec<u8>> {
        for path in self.font_search_paths() {
            if let Ok(data) = std::fs::read(&path) {
                tracing::debug!(path = %path.display(), "loaded display font");
                return Some(data);
            }
        }
        tracing::info!("display font not found, using built-in fonts");
        None
    }

    /// Apply the tally computer theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut fonts = FontDefinitions::default();
        if let Some(data) = self.load_display_font() {
            fonts.font_data.insert("Rubik".to_owned(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .insert(0, "Rubik".to_owned());
        }
        ctx.set_fonts(fonts);

        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::dark();

        visuals.window_fill = TallyColors::PANEL;
        visuals.panel_fill = TallyColors::PANEL;
        visuals.extreme_bg_color = TallyColors::PANEL;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.override_text_color = Some(TallyColors::TEXT);

        let key = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::NONE;
            ws.fg_stroke = Stroke::new(1.0, TallyColors::TEXT);
            ws.rounding = Rounding::ZERO;
        };
        key(&mut visuals.widgets.inactive, TallyColors::KEY);
        key(&mut visuals.widgets.hovered, TallyColors::KEY_HOVER);
        key(&mut visuals.widgets.active, TallyColors::KEY_HOVER);
        key(&mut visuals.widgets.open, TallyColors::KEY);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TallyColors::MUTED);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }
}

/// Characters of `text` that none of the loaded fonts can draw.
///
/// Fonts only exist after the first `Context::run`.
pub fn missing_glyphs(ctx: &egui::Context, text: &str, font_id: &FontId) -> Vec<char> {
    ctx.fonts(|fonts| text.chars().filter(|c| !fonts.has_glyph(font_id, *c)).collect())
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    egui::Frame::none()
        .fill(TallyColors::PANEL)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner)
}
