mod display;
mod overflow;
mod width;

pub use display::{ChipDisplay, VisibleLimit};
pub use overflow::{DEFAULT_RESERVED_PADDING, OverflowCalculator, OverflowPlan, compute_visible_count};
pub use width::{
    CellMetrics, ChipFieldWidthEstimator, DEFAULT_FIELD_MAX_WIDTH, FIELD_MAX_INSET,
    FIELD_WIDTH_MARGIN, FieldWidths, KEY_MIN_WIDTH, TextMetrics, VALUE_MIN_WIDTH, estimate_width,
};
