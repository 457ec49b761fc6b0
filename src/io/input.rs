use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value;

use crate::app::{ChipCellConfig, ChipCellOptions};
use crate::domain::ChipList;
use crate::form::MemoryFormHost;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Read a chip cell configuration document.
pub fn parse_config_str(contents: &str, format: DocumentFormat) -> Result<ChipCellConfig> {
    let value = parse_document_str(contents, format)?;
    serde_json::from_value(value)
        .with_context(|| format!("invalid chip cell configuration ({format})"))
}

/// Read a configuration document and compile its rules into options.
pub fn load_options_str(contents: &str, format: DocumentFormat) -> Result<ChipCellOptions> {
    let config = parse_config_str(contents, format)?;
    ChipCellOptions::from_config(&config).context("failed to compile validation rules")
}

/// Seed an in-memory host from a document mapping field names to chip arrays.
pub fn parse_chip_fields_str(contents: &str, format: DocumentFormat) -> Result<MemoryFormHost> {
    let value = parse_document_str(contents, format)?;
    let fields: IndexMap<String, ChipList> = serde_json::from_value(value)
        .with_context(|| "expected an object of field name to chip list")?;
    Ok(MemoryFormHost::from_fields(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Chip;
    use crate::form::FormStateHost;
    use crate::layout::VisibleLimit;

    #[test]
    fn chip_fields_keep_document_order() {
        let host = parse_chip_fields_str(
            r#"{"tags": [{"key": "env", "value": "prod", "delimiter": "="}], "labels": []}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert_eq!(host.field_names().collect::<Vec<_>>(), vec!["tags", "labels"]);
        assert_eq!(
            host.chips("tags"),
            &[Chip::new("env", "prod").with_delimiter("=")]
        );
    }

    #[test]
    fn config_document_compiles_into_options() {
        let options = load_options_str(
            r#"{"visibleChipsMaxLength": "auto", "validationRules": {"key": [{"name": "k", "pattern": "^k"}]}}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert_eq!(options.visible_chips_max_length, VisibleLimit::Auto);
        assert_eq!(options.validation_rules().key.len(), 1);
    }

    #[test]
    fn broken_rule_is_reported_with_context() {
        let err = load_options_str(
            r#"{"validationRules": {"value": [{"name": "v", "pattern": "("}]}}"#,
            DocumentFormat::Json,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid rule 'v'"));
    }

    #[test]
    fn malformed_document_fails_to_parse() {
        assert!(parse_chip_fields_str("{", DocumentFormat::Json).is_err());
        assert!(parse_chip_fields_str("[1, 2]", DocumentFormat::Json).is_err());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_config_is_supported() {
        let config = parse_config_str("delimiter: \"=\"\neditable: true\n", DocumentFormat::Yaml)
            .unwrap();
        assert!(config.editable);
        assert_eq!(config.delimiter.as_deref(), Some("="));
    }
}
