use crate::domain::{Chip, ChipField};

use super::{ChipError, FormStateHost};

/// Field-scoped view over a host's chip list. All engine writes go through here.
pub struct ChipListStore<'h, H: FormStateHost + ?Sized> {
    host: &'h mut H,
    field: &'h str,
}

impl<'h, H: FormStateHost + ?Sized> ChipListStore<'h, H> {
    pub fn new(host: &'h mut H, field: &'h str) -> Self {
        Self { host, field }
    }

    pub fn chips(&self) -> &[Chip] {
        self.host.chips(self.field)
    }

    pub fn len(&self) -> usize {
        self.chips().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips().is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Chip, ChipError> {
        let chips = self.chips();
        chips.get(index).ok_or(ChipError::InvalidIndex {
            index,
            len: chips.len(),
        })
    }

    /// Appends `chip` and returns its index.
    pub fn push(&mut self, chip: Chip) -> usize {
        self.host.push(self.field, chip);
        self.len().saturating_sub(1)
    }

    pub fn remove(&mut self, index: usize) -> Result<Chip, ChipError> {
        let removed = self.get(index)?.clone();
        self.host.remove(self.field, index);
        Ok(removed)
    }

    /// Writes `text` into one field of the chip at `index`; returns whether it changed.
    pub fn set_field(
        &mut self,
        index: usize,
        field: ChipField,
        text: &str,
    ) -> Result<bool, ChipError> {
        let chip = self.get(index)?;
        if chip.field(field) == text {
            return Ok(false);
        }
        let mut updated = chip.clone();
        updated.set_field(field, text);
        self.host.update(self.field, index, updated);
        Ok(true)
    }

    pub fn mark_dirty(&mut self) {
        self.host.mark_modified(self.field);
        self.host.mark_touched(self.field);
    }
}
