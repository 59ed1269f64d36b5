//! Display surface the calculator engine writes to.

/// Controls that are disabled while an error message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Evaluate,
    Backspace,
    Multiply,
    Point,
    Minus,
    Plus,
    Negate,
    Divide,
}

impl Control {
    pub const GATED: [Control; 8] = [
        Control::Evaluate,
        Control::Backspace,
        Control::Multiply,
        Control::Point,
        Control::Minus,
        Control::Plus,
        Control::Negate,
        Control::Divide,
    ];
}

/// Sink for everything the engine wants on screen.
///
/// The engine never reads geometry; font fitting happens on the rendering
/// side after the text has been set.
pub trait DisplaySurface {
    fn set_entry_text(&mut self, text: &str);
    fn entry_text(&self) -> &str;
    fn set_pending_text(&mut self, text: &str);
    fn pending_text(&self) -> &str;
    /// Enable or disable every control in [`Control::GATED`] at once.
    fn set_controls_disabled(&mut self, disabled: bool);
}

/// In-memory surface. The egui front end renders from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    entry: String,
    pending: String,
    controls_disabled: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            entry: "0".to_string(),
            pending: String::new(),
            controls_disabled: false,
        }
    }
}

impl Screen {
    pub fn controls_disabled(&self) -> bool {
        self.controls_disabled
    }

    /// Digits and the two clear keys are always enabled.
    pub fn is_enabled(&self, control: Control) -> bool {
        !(self.controls_disabled() && Control::GATED.contains(&control))
    }
}

impl DisplaySurface for Screen {
    fn set_entry_text(&mut self, text: &str) {
        self.entry.clear();
        self.entry.push_str(text);
    }

    fn entry_text(&self) -> &str {
        &self.entry
    }

    fn set_pending_text(&mut self, text: &str) {
        self.pending.clear();
        self.pending.push_str(text);
    }

    fn pending_text(&self) -> &str {
        &self.pending
    }

    fn set_controls_disabled(&mut self, disabled: bool) {
        self.controls_disabled = disabled;
    }
}
