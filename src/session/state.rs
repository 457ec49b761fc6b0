use serde::Serialize;

use crate::domain::ChipField;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

/// Flattened state-machine position: which sub-field of the active chip has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditPhase {
    Viewing,
    EditingKey { index: usize },
    EditingValue { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Dismissal outside the edit surface.
    Commit,
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveChip {
    index: usize,
    field: ChipField,
    is_new: bool,
}

/// The active index and focused field exist only while editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSession {
    active: Option<ActiveChip>,
}

impl EditSession {
    pub fn mode(&self) -> EditMode {
        if self.active.is_some() {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|active| active.index)
    }

    pub fn focused_field(&self) -> Option<ChipField> {
        self.active.map(|active| active.field)
    }

    pub fn is_newly_created(&self) -> bool {
        self.active.is_some_and(|active| active.is_new)
    }

    pub fn phase(&self) -> EditPhase {
        match self.active {
            None => EditPhase::Viewing,
            Some(ActiveChip {
                index,
                field: ChipField::Key,
                ..
            }) => EditPhase::EditingKey { index },
            Some(ActiveChip {
                index,
                field: ChipField::Value,
                ..
            }) => EditPhase::EditingValue { index },
        }
    }

    pub(crate) fn enter(&mut self, index: usize, field: ChipField, is_new: bool) {
        self.active = Some(ActiveChip {
            index,
            field,
            is_new,
        });
    }

    pub(crate) fn reset(&mut self) {
        self.active = None;
    }

    pub(crate) fn focus(&mut self, field: ChipField) -> bool {
        match &mut self.active {
            Some(active) if active.field != field => {
                active.field = field;
                true
            }
            _ => false,
        }
    }

    /// Re-aligns the active index after the chip at `removed` left the list.
    pub(crate) fn chip_removed(&mut self, removed: usize) {
        let Some(active) = &mut self.active else {
            return;
        };
        if active.index == removed {
            self.active = None;
        } else if active.index > removed {
            active.index -= 1;
        }
    }
}

impl Serialize for EditSession {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("EditSession", 4)?;
        state.serialize_field("activeIndex", &self.active_index())?;
        state.serialize_field("mode", &self.mode())?;
        state.serialize_field("focusedField", &self.focused_field())?;
        state.serialize_field("isNewlyCreated", &self.is_newly_created())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewing_has_no_index_or_focus() {
        let session = EditSession::default();
        assert_eq!(session.mode(), EditMode::Viewing);
        assert_eq!(session.active_index(), None);
        assert_eq!(session.focused_field(), None);
        assert_eq!(session.phase(), EditPhase::Viewing);
    }

    #[test]
    fn focus_switches_between_key_and_value() {
        let mut session = EditSession::default();
        assert!(!session.focus(ChipField::Value), "no focus while viewing");
        session.enter(2, ChipField::Key, false);
        assert_eq!(session.phase(), EditPhase::EditingKey { index: 2 });
        assert!(session.focus(ChipField::Value));
        assert!(!session.focus(ChipField::Value));
        assert_eq!(session.phase(), EditPhase::EditingValue { index: 2 });
    }

    #[test]
    fn removal_shifts_or_ends_session() {
        let mut session = EditSession::default();
        session.enter(3, ChipField::Value, false);
        session.chip_removed(5);
        assert_eq!(session.active_index(), Some(3));
        session.chip_removed(1);
        assert_eq!(session.active_index(), Some(2));
        session.chip_removed(2);
        assert!(!session.is_editing());
    }

    #[test]
    fn serializes_host_facing_shape() {
        let mut session = EditSession::default();
        session.enter(0, ChipField::Key, true);
        let value = serde_json::to_value(session).unwrap();
        assert_eq!(value["activeIndex"], 0);
        assert_eq!(value["mode"], "Editing");
        assert_eq!(value["focusedField"], "key");
        assert_eq!(value["isNewlyCreated"], true);
    }
}
