//! tallycore — shared library for tally computer applications

pub mod fit;
pub mod safety;
pub mod storage;
pub mod theme;

pub use fit::{fit_font_size, EguiMetrics, FitParams, TextMetrics};
pub use theme::TallyTheme;
