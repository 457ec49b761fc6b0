mod chip;
mod rules;

pub use chip::{Chip, ChipField, DEFAULT_DELIMITER};
pub use rules::{
    PatternRule, RuleConfig, RuleDescriptor, RuleTest, ValidationRules, ValidationRulesConfig,
};

/// Ordered chip data as owned by the form-state host.
pub type ChipList = Vec<Chip>;
