//! Font fitting for single-line text fields.
//!
//! A field has a preferred font size. Long text shrinks one point at a time
//! until it fits the field's width (less a margin); short text never grows
//! past the preferred size. Fitting is a pure function of the text, the
//! width, and the font metrics, so it is safe to rerun on every frame and on
//! every resize.

use egui::{Color32, FontId};

/// Measures rendered text.
pub trait TextMetrics {
    /// Width in points of `text` laid out on one line at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Size bounds for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// Preferred (and largest) font size.
    pub max_size: f32,
    /// Smallest font size the loop will go down to.
    pub min_size: f32,
    /// Horizontal room kept free to the right of the text.
    pub margin: f32,
}

impl FitParams {
    pub fn new(max_size: f32, margin: f32) -> Self {
        Self {
            max_size,
            min_size: 1.0,
            margin,
        }
    }
}

/// Largest whole font size in `[min_size, max_size]` at which `text` fits in
/// `available_width - margin`. Returns `min_size` when nothing fits.
pub fn fit_font_size(
    metrics: &impl TextMetrics,
    text: &str,
    available_width: f32,
    params: FitParams,
) -> f32 {
    let min_size = params.min_size.max(1.0);
    let target = available_width - params.margin;
    let mut size = params.max_size.floor().max(min_size);

    while size > min_size && metrics.text_width(text, size) > target {
        size -= 1.0;
    }
    size
}

/// [`TextMetrics`] backed by the egui font atlas.
pub struct EguiMetrics<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiMetrics<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMetrics for EguiMetrics<'_> {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let font_id = FontId::proportional(font_size);
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), font_id, Color32::BLACK)
                .size()
                .x
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Every glyph is `ratio * font_size` wide.
    struct MockMetrics {
        ratio: f32,
        calls: Cell<usize>,
    }

    impl MockMetrics {
        fn new(ratio: f32) -> Self {
            Self { ratio, calls: Cell::new(0) }
        }
    }

    impl TextMetrics for MockMetrics {
        fn text_width(&self, text: &str, font_size: f32) -> f32 {
            self.calls.set(self.calls.get() + 1);
            text.chars().count() as f32 * font_size * self.ratio
        }
    }

    #[test]
    fn test_short_text_keeps_preferred_size() {
        let metrics = MockMetrics::new(0.5);
        let size = fit_font_size(&metrics, "0", 300.0, FitParams::new(40.0, 60.0));
        assert_eq!(size, 40.0);
    }

    #[test]
    fn test_long_text_shrinks_until_it_fits() {
        let metrics = MockMetrics::new(0.5);
        // 20 chars * size * 0.5 <= 300 - 60  =>  size <= 24
        let text = "12345678901234567890";
        let size = fit_font_size(&metrics, text, 300.0, FitParams::new(40.0, 60.0));
        assert_eq!(size, 24.0);
        assert!(metrics.text_width(text, size) <= 240.0);
        assert!(metrics.text_width(text, size + 1.0) > 240.0);
    }

    #[test]
    fn test_never_below_min_size() {
        let metrics = MockMetrics::new(1.0);
        let params = FitParams { max_size: 16.0, min_size: 6.0, margin: 10.0 };
        let size = fit_font_size(&metrics, "a very long pending line", 20.0, params);
        assert_eq!(size, 6.0);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let metrics = MockMetrics::new(0.6);
        let params = FitParams::new(40.0, 60.0);
        let first = fit_font_size(&metrics, "-123456.789", 280.0, params);
        let second = fit_font_size(&metrics, "-123456.789", 280.0, params);
        assert_eq!(first, second);
    }

    #[test]
    fn test_wider_field_allows_larger_font() {
        let metrics = MockMetrics::new(0.6);
        let params = FitParams::new(40.0, 60.0);
        let narrow = fit_font_size(&metrics, "Result is undefined", 200.0, params);
        let wide = fit_font_size(&metrics, "Result is undefined", 500.0, params);
        assert!(wide > narrow);
    }

    #[test]
    fn test_fractional_preferred_size_rounds_down() {
        let metrics = MockMetrics::new(0.0);
        let size = fit_font_size(&metrics, "7", 100.0, FitParams::new(15.5, 0.0));
        assert_eq!(size, 15.0);
        assert_eq!(metrics.calls.get(), 1);
    }
}
