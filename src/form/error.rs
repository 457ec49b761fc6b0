use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChipError {
    #[error("chip index {index} is out of range for a list of {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("invalid rule '{rule}': {message}")]
    Configuration { rule: String, message: String },
}

impl ChipError {
    pub(crate) fn configuration(rule: impl Into<String>, message: impl Into<String>) -> Self {
        ChipError::Configuration {
            rule: rule.into(),
            message: message.into(),
        }
    }

    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(ChipError::InvalidIndex { index, len })
        }
    }
}
