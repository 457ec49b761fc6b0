use std::{fmt, sync::Arc};

use jsonschema::Validator;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::ChipError;

use super::ChipField;

/// Name and human readable label of a rule, as carried in validation reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub name: String,
    pub label: String,
}

impl RuleDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

type Predicate = dyn Fn(&str) -> bool + Send + Sync;

#[derive(Clone)]
pub enum RuleTest {
    /// Passes when the regex matches.
    Pattern(Regex),
    /// Passes when the text, as a JSON string, satisfies the schema.
    Schema(Arc<Validator>),
    Predicate(Arc<Predicate>),
}

impl fmt::Debug for RuleTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTest::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            RuleTest::Schema(_) => f.write_str("Schema(..)"),
            RuleTest::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    descriptor: RuleDescriptor,
    test: RuleTest,
}

impl PatternRule {
    pub fn pattern(
        name: impl Into<String>,
        label: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, ChipError> {
        let descriptor = RuleDescriptor::new(name, label);
        let regex = Regex::new(pattern)
            .map_err(|err| ChipError::configuration(&descriptor.name, err.to_string()))?;
        Ok(Self {
            descriptor,
            test: RuleTest::Pattern(regex),
        })
    }

    pub fn schema(
        name: impl Into<String>,
        label: impl Into<String>,
        schema: &Value,
    ) -> Result<Self, ChipError> {
        let descriptor = RuleDescriptor::new(name, label);
        let validator = jsonschema::validator_for(schema)
            .map_err(|err| ChipError::configuration(&descriptor.name, err.to_string()))?;
        Ok(Self {
            descriptor,
            test: RuleTest::Schema(Arc::new(validator)),
        })
    }

    pub fn predicate(
        name: impl Into<String>,
        label: impl Into<String>,
        test: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            descriptor: RuleDescriptor::new(name, label),
            test: RuleTest::Predicate(Arc::new(test)),
        }
    }

    pub fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn passes(&self, text: &str) -> bool {
        match &self.test {
            RuleTest::Pattern(regex) => regex.is_match(text),
            RuleTest::Schema(validator) => validator.is_valid(&Value::String(text.to_string())),
            RuleTest::Predicate(test) => test(text),
        }
    }
}

/// Compiled key and value rule lists.
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    pub key: Vec<PatternRule>,
    pub value: Vec<PatternRule>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_rule(mut self, rule: PatternRule) -> Self {
        self.key.push(rule);
        self
    }

    pub fn with_value_rule(mut self, rule: PatternRule) -> Self {
        self.value.push(rule);
        self
    }

    /// True when no explicit rules are configured for either field.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    pub fn for_field(&self, field: ChipField) -> &[PatternRule] {
        match field {
            ChipField::Key => &self.key,
            ChipField::Value => &self.value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub schema: Option<Value>,
}

impl RuleConfig {
    pub fn compile(&self) -> Result<PatternRule, ChipError> {
        if self.name.trim().is_empty() {
            return Err(ChipError::configuration(
                "<unnamed>",
                "rule name cannot be empty",
            ));
        }
        let label = self.label.clone().unwrap_or_else(|| self.name.clone());
        match (&self.pattern, &self.schema) {
            (Some(pattern), None) => PatternRule::pattern(&self.name, label, pattern),
            (None, Some(schema)) => PatternRule::schema(&self.name, label, schema),
            (Some(_), Some(_)) => Err(ChipError::configuration(
                &self.name,
                "declare either `pattern` or `schema`, not both",
            )),
            (None, None) => Err(ChipError::configuration(
                &self.name,
                "rule needs a `pattern` or a `schema`",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRulesConfig {
    #[serde(default)]
    pub key: Vec<RuleConfig>,
    #[serde(default)]
    pub value: Vec<RuleConfig>,
}

impl ValidationRulesConfig {
    pub fn compile(&self) -> Result<ValidationRules, ChipError> {
        let key = self
            .key
            .iter()
            .map(RuleConfig::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let value = self
            .value
            .iter()
            .map(RuleConfig::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ValidationRules { key, value })
    }
}
