use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::ChipField;
use crate::session::{Direction, EditSession};

use super::ChipIntent;

/// Maps navigation keys of an open chip to intents. Text keys are left to the
/// input widget, which reports them back as [`ChipIntent::FieldChanged`].
/// Backspace and Delete yield [`ChipIntent::DeleteKey`] but must still reach
/// the input widget.
pub fn classify(key: &KeyEvent, session: &EditSession) -> Option<ChipIntent> {
    let focused = session.focused_field()?;
    let backwards = key.code == KeyCode::BackTab
        || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT));

    match key.code {
        KeyCode::Tab | KeyCode::BackTab if backwards => Some(match focused {
            ChipField::Key => ChipIntent::Advance(Direction::Previous),
            ChipField::Value => ChipIntent::Focus(ChipField::Key),
        }),
        KeyCode::Tab => Some(match focused {
            ChipField::Key => ChipIntent::Focus(ChipField::Value),
            ChipField::Value => ChipIntent::Advance(Direction::Next),
        }),
        KeyCode::Esc => Some(ChipIntent::Advance(Direction::Commit)),
        KeyCode::Backspace | KeyCode::Delete => Some(ChipIntent::DeleteKey),
        _ => None,
    }
}
