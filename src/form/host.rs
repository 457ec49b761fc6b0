use indexmap::IndexMap;

use crate::domain::{Chip, ChipList};

/// Form-state host owning the chip lists of named fields.
///
/// Index arguments are always in range when called by the engine.
pub trait FormStateHost {
    /// Current chips of `field`; a field the host does not know reads as empty.
    fn chips(&self, field: &str) -> &[Chip];
    fn push(&mut self, field: &str, chip: Chip);
    fn remove(&mut self, field: &str, index: usize);
    fn update(&mut self, field: &str, index: usize, chip: Chip);
    fn mark_modified(&mut self, field: &str);
    fn mark_touched(&mut self, field: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    pub chips: ChipList,
    pub modified: bool,
    pub touched: bool,
}

/// In-memory host keeping fields in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFormHost {
    fields: IndexMap<String, FieldRecord>,
}

impl MemoryFormHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: IndexMap<String, ChipList>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, chips)| {
                (
                    name,
                    FieldRecord {
                        chips,
                        ..Default::default()
                    },
                )
            })
            .collect();
        Self { fields }
    }

    pub fn with_field(mut self, name: impl Into<String>, chips: ChipList) -> Self {
        self.insert_field(name, chips);
        self
    }

    pub fn insert_field(&mut self, name: impl Into<String>, chips: ChipList) {
        self.fields.insert(
            name.into(),
            FieldRecord {
                chips,
                ..Default::default()
            },
        );
    }

    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_dirty(&self) -> bool {
        self.fields.values().any(|record| record.modified)
    }

    pub fn into_fields(self) -> IndexMap<String, ChipList> {
        self.fields
            .into_iter()
            .map(|(name, record)| (name, record.chips))
            .collect()
    }

    fn record_mut(&mut self, field: &str) -> &mut FieldRecord {
        self.fields.entry(field.to_string()).or_default()
    }
}

impl FormStateHost for MemoryFormHost {
    fn chips(&self, field: &str) -> &[Chip] {
        self.fields
            .get(field)
            .map(|record| record.chips.as_slice())
            .unwrap_or(&[])
    }

    fn push(&mut self, field: &str, chip: Chip) {
        self.record_mut(field).chips.push(chip);
    }

    fn remove(&mut self, field: &str, index: usize) {
        let chips = &mut self.record_mut(field).chips;
        if index < chips.len() {
            chips.remove(index);
        }
    }

    fn update(&mut self, field: &str, index: usize, chip: Chip) {
        if let Some(slot) = self.record_mut(field).chips.get_mut(index) {
            *slot = chip;
        }
    }

    fn mark_modified(&mut self, field: &str) {
        self.record_mut(field).modified = true;
    }

    fn mark_touched(&mut self, field: &str) {
        self.record_mut(field).touched = true;
    }
}
