use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::domain::{ValidationRules, ValidationRulesConfig};
use crate::form::ChipError;
use crate::layout::{
    CellMetrics, DEFAULT_RESERVED_PADDING, KEY_MIN_WIDTH, TextMetrics, VALUE_MIN_WIDTH,
    VisibleLimit,
};
use crate::validation::ChipValidator;

#[derive(Clone)]
pub struct ChipCellOptions {
    pub delimiter: Option<String>,
    pub visible_chips_max_length: VisibleLimit,
    /// Chips can be opened, added and removed; all chips are shown.
    pub editable: bool,
    pub reserved_padding: u32,
    pub key_min_width: u32,
    pub value_min_width: u32,
    pub(crate) validation_rules: ValidationRules,
    pub(crate) custom_validator: Option<Arc<dyn ChipValidator>>,
    pub(crate) text_metrics: Arc<dyn TextMetrics>,
    /// Called on every chip activation, read-only cells included.
    pub(crate) on_click: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl fmt::Debug for ChipCellOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChipCellOptions")
            .field("delimiter", &self.delimiter)
            .field("visible_chips_max_length", &self.visible_chips_max_length)
            .field("editable", &self.editable)
            .field("reserved_padding", &self.reserved_padding)
            .field("key_min_width", &self.key_min_width)
            .field("value_min_width", &self.value_min_width)
            .field("validation_rules", &self.validation_rules)
            .field("custom_validator", &self.custom_validator.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for ChipCellOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            visible_chips_max_length: VisibleLimit::All,
            editable: false,
            reserved_padding: DEFAULT_RESERVED_PADDING,
            key_min_width: KEY_MIN_WIDTH,
            value_min_width: VALUE_MIN_WIDTH,
            validation_rules: ValidationRules::default(),
            custom_validator: None,
            text_metrics: Arc::new(CellMetrics::default()),
            on_click: None,
        }
    }
}

impl ChipCellOptions {
    /// Compiles the rule configuration; malformed rules fail here, once.
    pub fn from_config(config: &ChipCellConfig) -> Result<Self, ChipError> {
        let validation_rules = config.validation_rules.compile()?;
        Ok(Self {
            delimiter: config.delimiter.clone(),
            visible_chips_max_length: config.visible_chips_max_length,
            editable: config.editable,
            reserved_padding: config.reserved_padding,
            key_min_width: config.key_min_width,
            value_min_width: config.value_min_width,
            validation_rules,
            ..Self::default()
        })
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn with_visible_chips_max_length(mut self, limit: VisibleLimit) -> Self {
        self.visible_chips_max_length = limit;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_reserved_padding(mut self, padding: u32) -> Self {
        self.reserved_padding = padding;
        self
    }

    pub fn with_min_widths(mut self, key_min_width: u32, value_min_width: u32) -> Self {
        self.key_min_width = key_min_width;
        self.value_min_width = value_min_width;
        self
    }

    pub fn with_validation_rules(mut self, rules: ValidationRules) -> Self {
        self.validation_rules = rules;
        self
    }

    pub fn with_custom_validator(mut self, validator: impl ChipValidator + 'static) -> Self {
        self.custom_validator = Some(Arc::new(validator));
        self
    }

    pub fn with_text_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.text_metrics = Arc::new(metrics);
        self
    }

    pub fn with_on_click(mut self, on_click: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(on_click));
        self
    }

    pub fn validation_rules(&self) -> &ValidationRules {
        &self.validation_rules
    }
}

/// Serializable form of [`ChipCellOptions`], as read from a config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChipCellConfig {
    pub delimiter: Option<String>,
    pub visible_chips_max_length: VisibleLimit,
    pub editable: bool,
    pub reserved_padding: u32,
    pub key_min_width: u32,
    pub value_min_width: u32,
    pub validation_rules: ValidationRulesConfig,
}

impl Default for ChipCellConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            visible_chips_max_length: VisibleLimit::All,
            editable: false,
            reserved_padding: DEFAULT_RESERVED_PADDING,
            key_min_width: KEY_MIN_WIDTH,
            value_min_width: VALUE_MIN_WIDTH,
            validation_rules: ValidationRulesConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn config_defaults_match_options_defaults() {
        let config: ChipCellConfig = serde_json::from_value(json!({})).unwrap();
        let options = ChipCellOptions::from_config(&config).unwrap();
        let defaults = ChipCellOptions::default();
        assert_eq!(options.reserved_padding, defaults.reserved_padding);
        assert_eq!(options.visible_chips_max_length, VisibleLimit::All);
        assert_eq!(options.key_min_width, KEY_MIN_WIDTH);
        assert!(options.validation_rules().is_empty());
    }

    #[test]
    fn config_reads_camel_case_fields() {
        let config: ChipCellConfig = serde_json::from_value(json!({
            "delimiter": "=",
            "visibleChipsMaxLength": 2,
            "editable": true,
            "reservedPadding": 40,
            "validationRules": {
                "value": [{"name": "digits", "label": "Digits only", "pattern": "^[0-9]+$"}]
            }
        }))
        .unwrap();
        let options = ChipCellOptions::from_config(&config).unwrap();
        assert_eq!(options.delimiter.as_deref(), Some("="));
        assert_eq!(options.visible_chips_max_length, VisibleLimit::Count(2));
        assert!(options.editable);
        assert_eq!(options.reserved_padding, 40);
        assert_eq!(options.validation_rules().value.len(), 1);
    }

    #[test]
    fn malformed_rule_fails_construction() {
        let config: ChipCellConfig = serde_json::from_value(json!({
            "validationRules": {"key": [{"name": "bad", "pattern": "(["}]}
        }))
        .unwrap();
        let err = ChipCellOptions::from_config(&config).unwrap_err();
        assert!(matches!(err, ChipError::Configuration { ref rule, .. } if rule == "bad"));
    }
}
