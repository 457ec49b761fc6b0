use tracing::{debug, warn};

use crate::domain::{Chip, ChipField};
use crate::form::{ChipError, ChipListStore, FormStateHost};
use crate::validation::{ValidationEngine, ValidationReport};

use super::{Direction, EditSession};

/// Drives one chip field: owns the edit session and the latest validation
/// report, and writes to the host's chip list through [`ChipListStore`].
#[derive(Debug, Clone)]
pub struct EditSessionController {
    field_name: String,
    delimiter: Option<String>,
    session: EditSession,
    validation: ValidationEngine,
    report: ValidationReport,
}

impl EditSessionController {
    pub fn new(field_name: impl Into<String>, validation: ValidationEngine) -> Self {
        Self {
            field_name: field_name.into(),
            delimiter: None,
            session: EditSession::default(),
            validation,
            report: ValidationReport::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: Option<String>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Recomputes the report from the host's current chips.
    pub fn revalidate<H: FormStateHost + ?Sized>(&mut self, host: &H) -> &ValidationReport {
        self.report = self.validation.validate(host.chips(&self.field_name));
        &self.report
    }

    pub fn activate<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
    ) -> Result<bool, ChipError> {
        let len = host.chips(&self.field_name).len();
        ChipError::check_index(index, len).inspect_err(|err| {
            warn!(field = %self.field_name, %err, "activate rejected");
        })?;
        if self.session.active_index() == Some(index) {
            return Ok(false);
        }

        let mut target = index;
        if let Some(removed) = self.discard_pending_blank(host)? {
            if removed < target {
                target -= 1;
            }
            self.finish(host);
        }

        self.session.enter(target, ChipField::Key, false);
        debug!(field = %self.field_name, index = target, "chip activated");
        Ok(true)
    }

    /// Appends an empty chip and opens it, unless a new chip is still pending.
    pub fn add_new<H: FormStateHost + ?Sized>(&mut self, host: &mut H) -> Result<bool, ChipError> {
        if self.session.is_newly_created() {
            return Ok(false);
        }
        let index = {
            let mut store = ChipListStore::new(host, &self.field_name);
            store.push(Chip::blank(self.delimiter.clone()))
        };
        self.session.enter(index, ChipField::Key, true);
        debug!(field = %self.field_name, index, "new chip added");
        self.finish(host);
        Ok(true)
    }

    pub fn advance<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
        direction: Direction,
    ) -> Result<bool, ChipError> {
        let Some(index) = self.session.active_index() else {
            return Ok(false);
        };
        let len = host.chips(&self.field_name).len();
        ChipError::check_index(index, len).inspect_err(|err| {
            warn!(field = %self.field_name, %err, "session points past the chip list");
            self.session.reset();
        })?;

        let removed = self.discard_pending_blank(host)?.is_some();
        let len = host.chips(&self.field_name).len();

        match direction {
            Direction::Commit => self.session.reset(),
            Direction::Next => {
                let next = if removed { index } else { index + 1 };
                if next >= len {
                    self.session.reset();
                } else {
                    self.session.enter(next, ChipField::Key, false);
                }
            }
            Direction::Previous => {
                if index == 0 {
                    self.session.reset();
                } else {
                    self.session.enter(index - 1, ChipField::Value, false);
                }
            }
        }

        debug!(
            field = %self.field_name,
            ?direction,
            from = index,
            to = ?self.session.active_index(),
            discarded = removed,
            "edit session advanced"
        );
        self.finish(host);
        Ok(true)
    }

    pub fn focus(&mut self, field: ChipField) -> bool {
        let changed = self.session.focus(field);
        if changed {
            debug!(field = %self.field_name, focused = %field, "focus moved");
        }
        changed
    }

    /// Writes typed text into the active chip.
    pub fn field_changed<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
        field: ChipField,
        text: &str,
    ) -> Result<bool, ChipError> {
        let Some(index) = self.session.active_index() else {
            return Ok(false);
        };
        self.session.focus(field);
        let changed = {
            let mut store = ChipListStore::new(host, &self.field_name);
            store.set_field(index, field, text)?
        };
        if changed {
            self.finish(host);
        }
        Ok(changed)
    }

    /// Removes a chip, keeping the active index pointed at the same chip.
    pub fn remove<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
    ) -> Result<Chip, ChipError> {
        let removed = {
            let mut store = ChipListStore::new(host, &self.field_name);
            store.remove(index).inspect_err(|err| {
                warn!(field = %self.field_name, %err, "remove rejected");
            })?
        };
        self.session.chip_removed(index);
        debug!(field = %self.field_name, index, "chip removed");
        self.finish(host);
        Ok(removed)
    }

    /// Drops the active chip when it was just added and both fields are still empty.
    fn discard_pending_blank<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<Option<usize>, ChipError> {
        let Some(index) = self.session.active_index() else {
            return Ok(None);
        };
        if !self.session.is_newly_created() {
            return Ok(None);
        }
        let mut store = ChipListStore::new(host, &self.field_name);
        if !store.get(index)?.is_blank() {
            return Ok(None);
        }
        store.remove(index)?;
        self.session.chip_removed(index);
        debug!(field = %self.field_name, index, "empty new chip discarded");
        Ok(Some(index))
    }

    fn finish<H: FormStateHost + ?Sized>(&mut self, host: &mut H) {
        self.revalidate(&*host);
        ChipListStore::new(host, &self.field_name).mark_dirty();
    }
}
