use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{ChipField, RuleDescriptor};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChipFieldErrors {
    pub key: Vec<RuleDescriptor>,
    pub value: Vec<RuleDescriptor>,
}

impl ChipFieldErrors {
    pub fn get(&self, field: ChipField) -> &[RuleDescriptor] {
        match field {
            ChipField::Key => &self.key,
            ChipField::Value => &self.value,
        }
    }

    fn get_mut(&mut self, field: ChipField) -> &mut Vec<RuleDescriptor> {
        match field {
            ChipField::Key => &mut self.key,
            ChipField::Value => &mut self.value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    pub fn len(&self) -> usize {
        self.key.len() + self.value.len()
    }
}

/// Whole-list duplicate violations kept apart from chip-local rule failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    duplicate_indices: BTreeSet<usize>,
    field_errors: BTreeMap<usize, ChipFieldErrors>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.duplicate_indices.is_empty() && self.field_errors.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.duplicate_indices.len()
            + self
                .field_errors
                .values()
                .map(ChipFieldErrors::len)
                .sum::<usize>()
    }

    pub fn duplicate_indices(&self) -> &BTreeSet<usize> {
        &self.duplicate_indices
    }

    pub fn is_duplicate(&self, index: usize) -> bool {
        self.duplicate_indices.contains(&index)
    }

    /// Adds a group of chips sharing one key. Groups of fewer than two
    /// distinct indices are not duplicates and are ignored.
    pub fn mark_duplicates(&mut self, group: &[usize]) -> bool {
        let distinct: BTreeSet<usize> = group.iter().copied().collect();
        if distinct.len() < 2 {
            return false;
        }
        self.duplicate_indices.extend(distinct);
        true
    }

    pub fn clear_duplicates(&mut self) {
        self.duplicate_indices.clear();
    }

    pub fn field_errors(&self, index: usize) -> Option<&ChipFieldErrors> {
        self.field_errors.get(&index)
    }

    pub fn errors_for(&self, index: usize, field: ChipField) -> &[RuleDescriptor] {
        self.field_errors
            .get(&index)
            .map(|errors| errors.get(field))
            .unwrap_or(&[])
    }

    pub fn iter_field_errors(&self) -> impl Iterator<Item = (usize, &ChipFieldErrors)> {
        self.field_errors.iter().map(|(index, errors)| (*index, errors))
    }

    pub fn chip_has_errors(&self, index: usize) -> bool {
        self.is_duplicate(index) || self.field_errors.contains_key(&index)
    }

    pub fn push_field_error(&mut self, index: usize, field: ChipField, rule: RuleDescriptor) {
        let errors = self.field_errors.entry(index).or_default().get_mut(field);
        if !errors.contains(&rule) {
            errors.push(rule);
        }
    }

    pub fn clear_field_errors(&mut self, index: usize) {
        self.field_errors.remove(&index);
    }

    /// Label of the first failure recorded for a chip field, for inline hints.
    pub fn first_label(&self, index: usize, field: ChipField) -> Option<&str> {
        self.errors_for(index, field)
            .first()
            .map(|rule| rule.label.as_str())
    }
}
