//! Calculator engine
//!
//! Interprets button presses into a running computation with a single
//! pending binary operation. The engine owns its state as plain data and
//! pushes every change to an injected [`DisplaySurface`].
//!
//! Two things steer most transitions:
//!
//! - the pending record is either *live* (`2 +`, waiting for a right-hand
//!   operand) or *evaluated* (`2 + 3 =`, the history of the last result);
//! - an error message in the entry field locks every control except the
//!   digits and the two clear keys.

use crate::display::DisplaySurface;
use crate::error::CalcError;
use crate::number::{normalize, remove_trailing_zero, Operand, Operator};
use tracing::{debug, info};

/// The left operand and operator waiting for a second operand, or the
/// history line of the last evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingOperation {
    Live { left: String, operator: Operator },
    Evaluated { expression: String },
}

impl PendingOperation {
    pub fn text(&self) -> String {
        match self {
            PendingOperation::Live { left, operator } => format!("{} {}", left, operator),
            PendingOperation::Evaluated { expression } => expression.clone(),
        }
    }
}

/// One button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(u8),
    Point,
    Negate,
    Backspace,
    ClearEntry,
    ClearAll,
    Operator(Operator),
    Evaluate,
}

pub struct Calculator<D: DisplaySurface> {
    surface: D,
    entry: String,
    pending: Option<PendingOperation>,
    error: Option<CalcError>,
    max_digits: usize,
    /// A right-hand operand has been typed since the last operator press.
    operand_entered: bool,
}

impl<D: DisplaySurface> Calculator<D> {
    pub fn new(surface: D, max_digits: usize) -> Self {
        let mut calc = Self {
            surface,
            entry: "0".to_string(),
            pending: None,
            error: None,
            max_digits: max_digits.max(1),
            operand_entered: false,
        };
        calc.publish();
        calc
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    pub fn pending_text(&self) -> String {
        self.pending.as_ref().map(PendingOperation::text).unwrap_or_default()
    }

    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Longest entry text that typing can produce. One extra character is
    /// allowed for a leading minus; an error message caps it at its own
    /// length.
    pub fn entry_limit(&self) -> usize {
        match &self.error {
            Some(err) => err.to_string().len(),
            None => self.max_digits + usize::from(self.entry.starts_with('-')),
        }
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Route a button press to its operation.
    pub fn dispatch(&mut self, action: Action) -> Result<(), CalcError> {
        debug!(?action, "dispatch");
        match action {
            Action::Digit(d) => self.append_digit(d),
            Action::Point => self.append_point()?,
            Action::Negate => self.negate()?,
            Action::Backspace => self.backspace()?,
            Action::ClearEntry => self.clear_entry(),
            Action::ClearAll => self.clear_all(),
            Action::Operator(op) => self.press_operator(op)?,
            Action::Evaluate => {
                self.evaluate()?;
            }
        }
        Ok(())
    }

    /// Type a digit. After an evaluation this starts a new number.
    pub fn append_digit(&mut self, digit: u8) {
        if digit > 9 {
            debug!(digit, "ignoring non-decimal digit");
            return;
        }
        self.exit_error_if_needed();
        if self.clear_pending_if_evaluated() {
            self.entry = "0".to_string();
        }

        let ch = char::from(b'0' + digit);
        if self.entry == "0" {
            self.entry = ch.to_string();
        } else if self.entry.len() < self.entry_limit() {
            self.entry.push(ch);
        }
        self.operand_entered = true;
        self.publish_entry();
    }

    /// Type a decimal point, once per number.
    pub fn append_point(&mut self) -> Result<(), CalcError> {
        self.ensure_unlocked()?;
        if self.clear_pending_if_evaluated() {
            self.entry = "0".to_string();
        }

        if !self.entry.contains('.') && self.entry.len() < self.entry_limit() {
            self.entry.push('.');
        }
        self.operand_entered = true;
        self.publish_entry();
        Ok(())
    }

    /// Toggle a leading minus. Zero has no negative form.
    pub fn negate(&mut self) -> Result<(), CalcError> {
        self.ensure_unlocked()?;
        self.clear_pending_if_evaluated();

        if let Some(rest) = self.entry.strip_prefix('-') {
            self.entry = rest.to_string();
        } else if self.entry != "0" {
            self.entry.insert(0, '-');
        }
        self.publish_entry();
        Ok(())
    }

    /// Drop the last character. A lone digit or a digit with its sign
    /// becomes `0`.
    pub fn backspace(&mut self) -> Result<(), CalcError> {
        self.ensure_unlocked()?;
        self.clear_pending_if_evaluated();

        let bare_sign_left = self.entry.len() == 2 && self.entry.starts_with('-');
        if self.entry.len() <= 1 || bare_sign_left {
            self.entry = "0".to_string();
        } else {
            self.entry.pop();
        }
        self.publish_entry();
        Ok(())
    }

    /// Reset the entry. Keeps a live pending operation.
    pub fn clear_entry(&mut self) {
        self.exit_error_if_needed();
        self.clear_pending_if_evaluated();
        self.entry = "0".to_string();
        self.operand_entered = false;
        self.publish_entry();
    }

    /// Reset everything.
    pub fn clear_all(&mut self) {
        self.exit_error_if_needed();
        self.entry = "0".to_string();
        self.pending = None;
        self.operand_entered = false;
        self.publish();
    }

    /// Start, swap, or chain a pending operation.
    ///
    /// - nothing pending, or just evaluated: the entry becomes the left
    ///   operand;
    /// - a different operator is pending: it is replaced in place;
    /// - the same operator is pending and a second operand was typed: the
    ///   pending operation is evaluated and its result becomes the new left
    ///   operand.
    pub fn press_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        self.ensure_unlocked()?;

        match &mut self.pending {
            None | Some(PendingOperation::Evaluated { .. }) => {
                let left = remove_trailing_zero(&self.entry)?;
                self.start_pending(left, op);
            }
            Some(PendingOperation::Live { operator, .. }) if *operator != op => {
                debug!(from = %operator, to = %op, "operator substituted");
                *operator = op;
                self.publish_pending();
            }
            Some(PendingOperation::Live { .. }) => {
                if !self.operand_entered {
                    return Ok(());
                }
                let result = self.evaluate()?;
                debug!(%result, %op, "chained");
                self.start_pending(result, op);
            }
        }
        Ok(())
    }

    /// Apply the pending operator to the left operand and the entry.
    ///
    /// Returns the normalized result. With nothing live pending this is a
    /// no-op that reports [`CalcError::NoPendingOperation`]. Division by
    /// zero enters the error display and reports the error.
    pub fn evaluate(&mut self) -> Result<String, CalcError> {
        self.ensure_unlocked()?;

        let (left, operator) = match &self.pending {
            Some(PendingOperation::Live { left, operator }) => (left.clone(), *operator),
            _ => return Err(CalcError::NoPendingOperation),
        };
        let lhs = Operand::parse(&left)?;
        let rhs = Operand::parse(&self.entry)?;

        match operator.apply(lhs, rhs) {
            Ok(value) => {
                let result = normalize(value);
                let right = remove_trailing_zero(&self.entry)?;
                debug!(%left, %operator, %right, %result, "evaluated");
                self.pending = Some(PendingOperation::Evaluated {
                    expression: format!("{} {} {} =", left, operator, right),
                });
                self.entry = result.clone();
                self.operand_entered = false;
                self.publish();
                Ok(result)
            }
            Err(err) => {
                if err.is_displayed() {
                    self.show_error(err.clone());
                }
                Err(err)
            }
        }
    }

    /// Leave the error display, if it is up. Runs before digit entry and
    /// both clears.
    fn exit_error_if_needed(&mut self) {
        if let Some(err) = self.error.take() {
            info!(%err, "leaving error state");
            self.entry = "0".to_string();
            self.surface.set_controls_disabled(false);
            self.publish_entry();
        }
    }

    fn show_error(&mut self, err: CalcError) {
        info!(%err, "entering error state");
        self.entry = err.to_string();
        self.error = Some(err);
        self.surface.set_controls_disabled(true);
        self.publish_entry();
    }

    fn ensure_unlocked(&self) -> Result<(), CalcError> {
        match self.error {
            Some(_) => Err(CalcError::Locked),
            None => Ok(()),
        }
    }

    /// Drop the history line of a finished evaluation. Returns whether one
    /// was dropped.
    fn clear_pending_if_evaluated(&mut self) -> bool {
        if matches!(self.pending, Some(PendingOperation::Evaluated { .. })) {
            self.pending = None;
            self.publish_pending();
            true
        } else {
            false
        }
    }

    fn start_pending(&mut self, left: String, operator: Operator) {
        self.pending = Some(PendingOperation::Live { left, operator });
        self.entry = "0".to_string();
        self.operand_entered = false;
        self.publish();
    }

    fn publish_entry(&mut self) {
        self.surface.set_entry_text(&self.entry);
    }

    fn publish_pending(&mut self) {
        let text = self.pending_text();
        self.surface.set_pending_text(&text);
    }

    fn publish(&mut self) {
        self.publish_entry();
        self.publish_pending();
    }
}
