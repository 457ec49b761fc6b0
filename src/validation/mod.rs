mod report;

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use tracing::debug;

use crate::domain::{Chip, ChipField, RuleDescriptor, ValidationRules};

pub use report::{ChipFieldErrors, ValidationReport};

pub const FORBIDDEN_KEY_CHARACTER: char = ' ';

pub fn forbidden_character_rule() -> RuleDescriptor {
    RuleDescriptor::new("forbiddenCharacters", "Key must not contain spaces")
}

/// Caller-supplied check run last; it may add to or rewrite the report.
pub trait ChipValidator: Send + Sync {
    fn validate(&self, chips: &[Chip], report: &mut ValidationReport);
}

impl<F> ChipValidator for F
where
    F: Fn(&[Chip], &mut ValidationReport) + Send + Sync,
{
    fn validate(&self, chips: &[Chip], report: &mut ValidationReport) {
        self(chips, report)
    }
}

pub fn validate(
    chips: &[Chip],
    rules: &ValidationRules,
    custom_validator: Option<&dyn ChipValidator>,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    scan_duplicate_keys(chips, &mut report);
    if rules.is_empty() {
        scan_forbidden_characters(chips, &mut report);
    } else {
        apply_pattern_rules(chips, rules, &mut report);
    }
    if let Some(validator) = custom_validator {
        validator.validate(chips, &mut report);
    }
    report
}

fn scan_duplicate_keys(chips: &[Chip], report: &mut ValidationReport) {
    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (index, chip) in chips.iter().enumerate() {
        groups.entry(chip.key.as_str()).or_default().push(index);
    }
    for indices in groups.values() {
        report.mark_duplicates(indices);
    }
}

fn scan_forbidden_characters(chips: &[Chip], report: &mut ValidationReport) {
    for (index, chip) in chips.iter().enumerate() {
        if chip.key.contains(FORBIDDEN_KEY_CHARACTER) {
            report.push_field_error(index, ChipField::Key, forbidden_character_rule());
        }
    }
}

fn apply_pattern_rules(chips: &[Chip], rules: &ValidationRules, report: &mut ValidationReport) {
    for (index, chip) in chips.iter().enumerate() {
        if !chip.is_complete() {
            continue;
        }
        for field in [ChipField::Key, ChipField::Value] {
            let text = chip.field(field);
            for rule in rules.for_field(field) {
                if !rule.passes(text) {
                    report.push_field_error(index, field, rule.descriptor().clone());
                }
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct ValidationEngine {
    rules: ValidationRules,
    custom_validator: Option<Arc<dyn ChipValidator>>,
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("rules", &self.rules)
            .field("custom_validator", &self.custom_validator.is_some())
            .finish()
    }
}

impl ValidationEngine {
    pub fn new(rules: ValidationRules, custom_validator: Option<Arc<dyn ChipValidator>>) -> Self {
        Self {
            rules,
            custom_validator,
        }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn validate(&self, chips: &[Chip]) -> ValidationReport {
        let report = validate(chips, &self.rules, self.custom_validator.as_deref());
        debug!(
            chips = chips.len(),
            duplicates = report.duplicate_indices().len(),
            issues = report.issue_count(),
            "chip list validated"
        );
        report
    }
}
