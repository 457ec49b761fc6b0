use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: &str = ": ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

impl Chip {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            delimiter: None,
        }
    }

    /// An empty chip as appended by the add-new action.
    pub fn blank(delimiter: Option<String>) -> Self {
        Self {
            key: String::new(),
            value: String::new(),
            delimiter,
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }

    pub fn field(&self, field: ChipField) -> &str {
        match field {
            ChipField::Key => &self.key,
            ChipField::Value => &self.value,
        }
    }

    pub fn set_field(&mut self, field: ChipField, text: impl Into<String>) {
        match field {
            ChipField::Key => self.key = text.into(),
            ChipField::Value => self.value = text.into(),
        }
    }

    /// Rendered label: `key`, the chip's own delimiter (or `fallback`), `value`.
    pub fn label(&self, fallback: Option<&str>) -> String {
        if self.value.is_empty() {
            return self.key.clone();
        }
        let delimiter = self
            .delimiter
            .as_deref()
            .or(fallback)
            .unwrap_or(DEFAULT_DELIMITER);
        format!("{}{}{}", self.key, delimiter, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChipField {
    Key,
    Value,
}

impl ChipField {
    pub fn other(self) -> Self {
        match self {
            ChipField::Key => ChipField::Value,
            ChipField::Value => ChipField::Key,
        }
    }
}

impl fmt::Display for ChipField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChipField::Key => write!(f, "key"),
            ChipField::Value => write!(f, "value"),
        }
    }
}
