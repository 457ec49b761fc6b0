#![deny(rust_2018_idioms)]

mod app;
mod domain;
mod form;
mod io;
mod layout;
mod session;
mod validation;

pub use app::{
    ChipCell, ChipCellConfig, ChipCellOptions, ChipCellView, ChipIntent, OutsideClick,
    SubscriptionPlan, classify,
};
pub use domain::{
    Chip, ChipField, ChipList, DEFAULT_DELIMITER, PatternRule, RuleConfig, RuleDescriptor,
    RuleTest, ValidationRules, ValidationRulesConfig,
};
pub use form::{ChipError, ChipListStore, FieldRecord, FormStateHost, MemoryFormHost};
pub use io::{
    DocumentFormat, load_options_str, parse_chip_fields_str, parse_config_str,
    parse_document_str,
};
pub use layout::{
    CellMetrics, ChipDisplay, ChipFieldWidthEstimator, DEFAULT_FIELD_MAX_WIDTH,
    DEFAULT_RESERVED_PADDING, FIELD_MAX_INSET, FIELD_WIDTH_MARGIN, FieldWidths, KEY_MIN_WIDTH,
    OverflowCalculator, OverflowPlan, TextMetrics, VALUE_MIN_WIDTH, VisibleLimit,
    compute_visible_count, estimate_width,
};
pub use session::{Direction, EditMode, EditPhase, EditSession, EditSessionController};
pub use validation::{
    ChipFieldErrors, ChipValidator, FORBIDDEN_KEY_CHARACTER, ValidationEngine, ValidationReport,
    forbidden_character_rule, validate,
};

pub mod prelude {
    pub use super::{
        Chip, ChipCell, ChipCellOptions, ChipField, ChipIntent, Direction, FormStateHost,
        MemoryFormHost, ValidationReport,
    };
}
