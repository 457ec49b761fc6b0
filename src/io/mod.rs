mod format;
mod input;

pub use format::DocumentFormat;
pub use input::{load_options_str, parse_chip_fields_str, parse_config_str, parse_document_str};
